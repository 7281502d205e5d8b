//! # Listing
//!
//! Receiver-side state: the displayed page of records, filters, pagination,
//! and the sequence numbers that keep overlapping reloads in order.
//!
//! Every reload is stamped with a monotonically increasing `seq`. A result
//! is applied only if it belongs to the most recently issued reload, so a
//! slow response can never overwrite a newer one.

use crate::api::{ApiError, FilterState, ListQuery, MessagePage, MessageRecord};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A reload the runtime should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    pub seq: u64,
    pub query: ListQuery,
}

/// Outcome of applying a finished reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Applied,
    /// Superseded by a later reload; nothing changed.
    Stale,
    /// Applied, but the page fell out of range and was clamped. Needs another reload.
    Clamped,
}

#[derive(Debug, Clone)]
pub struct ListState {
    pub records: Vec<MessageRecord>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: FilterState,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub auto_refresh: bool,
    issued_seq: u64,
}

impl ListState {
    pub fn new(page_size: u32, auto_refresh: bool) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            filters: FilterState::default(),
            page: 1,
            page_size: page_size.max(1),
            auto_refresh,
            issued_seq: 0,
        }
    }

    /// `ceil(total / page_size)`; zero when there is nothing to show.
    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.page_size as u64) as u32
    }

    /// Page count as shown to the user (never below 1).
    pub fn display_pages(&self) -> u32 {
        self.total_pages().max(1)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.can_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.can_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            filters: self.filters.clone(),
            page: self.page,
            limit: self.page_size,
        }
    }

    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.issued_seq += 1;
        self.loading = true;
        ReloadTicket {
            seq: self.issued_seq,
            query: self.query(),
        }
    }

    pub fn apply_reload(&mut self, seq: u64, result: Result<MessagePage, ApiError>) -> ReloadOutcome {
        if seq < self.issued_seq {
            return ReloadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.records = page.items;
                self.total = page.total;
                self.error = None;
                let last = self.display_pages();
                if self.page > last {
                    self.page = last;
                    return ReloadOutcome::Clamped;
                }
            }
            Err(_) => {
                self.records.clear();
                self.total = 0;
                self.page = self.page.min(self.display_pages());
                self.error = Some("Failed to load messages".to_string());
            }
        }
        ReloadOutcome::Applied
    }

    /// Local echo: show a just-published record before any reload.
    pub fn prepend_local(&mut self, record: MessageRecord) {
        self.records.insert(0, record);
        self.total += 1;
    }
}
