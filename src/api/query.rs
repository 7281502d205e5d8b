//! Filter state and list query building.

/// Tri-state duplicate filter. `Any` sends nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateFilter {
    #[default]
    Any,
    True,
    False,
}

impl DuplicateFilter {
    /// Any → True → False → Any
    pub fn next(self) -> Self {
        match self {
            DuplicateFilter::Any => DuplicateFilter::True,
            DuplicateFilter::True => DuplicateFilter::False,
            DuplicateFilter::False => DuplicateFilter::Any,
        }
    }

    pub fn as_param(self) -> Option<&'static str> {
        match self {
            DuplicateFilter::Any => None,
            DuplicateFilter::True => Some("true"),
            DuplicateFilter::False => Some("false"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DuplicateFilter::Any => "T/F",
            DuplicateFilter::True => "True",
            DuplicateFilter::False => "False",
        }
    }
}

/// Transient list criteria, edited by the user and consumed at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub message_id: String,
    pub source: String,
    pub text: String,
    /// Single point-in-time filter (`publish_datetime`).
    pub publish_datetime: String,
    pub start: String,
    pub end: String,
    pub duplicate: DuplicateFilter,
}

impl FilterState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.text_params().next().is_none()
            && self.text.trim().is_empty()
            && self.duplicate == DuplicateFilter::Any
    }

    fn text_params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("messageId", self.message_id.as_str()),
            ("source", self.source.as_str()),
            ("publish_datetime", self.publish_datetime.as_str()),
            ("start", self.start.as_str()),
            ("end", self.end.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| (name, value.trim()))
        .filter(|(_, value)| !value.is_empty())
    }
}

/// Everything needed to fetch one page of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: FilterState,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    /// Query-string pairs. Empty filters are left out entirely; `page` and
    /// `limit` are always present.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .filters
            .text_params()
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        if let Some(dup) = self.filters.duplicate.as_param() {
            pairs.push(("is_duplicate", dup.to_string()));
        }
        let text = self.filters.text.trim();
        if !text.is_empty() {
            pairs.push(("text", text.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}
