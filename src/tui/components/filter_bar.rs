//! # FilterBar Component
//!
//! The Receiver view's filter inputs, laid out in two rows:
//!
//! ```text
//! Message ID | Source | Message text | Is duplicate
//! Publish date/time | Start | End
//! ```
//!
//! Text filters are edited through [`FieldEditor`]; the duplicate filter is
//! a tri-state toggle cycled with Space.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::api::FilterState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEditor, FieldEvent, TextField};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterFocus {
    #[default]
    MessageId,
    Source,
    Text,
    Duplicate,
    PublishDatetime,
    Start,
    End,
}

impl FilterFocus {
    const ORDER: [FilterFocus; 7] = [
        FilterFocus::MessageId,
        FilterFocus::Source,
        FilterFocus::Text,
        FilterFocus::Duplicate,
        FilterFocus::PublishDatetime,
        FilterFocus::Start,
        FilterFocus::End,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterFocus::MessageId => "Message ID",
            FilterFocus::Source => "Source",
            FilterFocus::Text => "Message text",
            FilterFocus::Duplicate => "Is duplicate",
            FilterFocus::PublishDatetime => "Publish date/time",
            FilterFocus::Start => "Start",
            FilterFocus::End => "End",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FilterFocus::Source => "ui",
            FilterFocus::Text => "Full or partial text...",
            FilterFocus::PublishDatetime => "YYYY-MM-DDTHH:MM",
            FilterFocus::Start | FilterFocus::End => "YYYY-MM-DD",
            _ => "",
        }
    }

    fn field<'a>(self, filters: &'a mut FilterState) -> Option<&'a mut String> {
        match self {
            FilterFocus::MessageId => Some(&mut filters.message_id),
            FilterFocus::Source => Some(&mut filters.source),
            FilterFocus::Text => Some(&mut filters.text),
            FilterFocus::PublishDatetime => Some(&mut filters.publish_datetime),
            FilterFocus::Start => Some(&mut filters.start),
            FilterFocus::End => Some(&mut filters.end),
            FilterFocus::Duplicate => None,
        }
    }

    fn value(self, filters: &FilterState) -> &str {
        match self {
            FilterFocus::MessageId => &filters.message_id,
            FilterFocus::Source => &filters.source,
            FilterFocus::Text => &filters.text,
            FilterFocus::PublishDatetime => &filters.publish_datetime,
            FilterFocus::Start => &filters.start,
            FilterFocus::End => &filters.end,
            FilterFocus::Duplicate => filters.duplicate.label(),
        }
    }
}

/// High-level events emitted by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    Changed,
    Search,
}

/// Routes editing events to the focused filter.
pub struct FilterEditor<'a> {
    pub filters: &'a mut FilterState,
    pub focus: FilterFocus,
    pub cursor: &'a mut usize,
}

impl EventHandler for FilterEditor<'_> {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.focus == FilterFocus::Duplicate {
            return match event {
                TuiEvent::InputChar(' ') => {
                    self.filters.duplicate = self.filters.duplicate.next();
                    Some(FilterEvent::Changed)
                }
                TuiEvent::Submit => Some(FilterEvent::Search),
                _ => None,
            };
        }

        let buffer = self.focus.field(self.filters)?;
        FieldEditor::new(buffer, self.cursor)
            .handle_event(event)
            .map(|e| match e {
                FieldEvent::Changed => FilterEvent::Changed,
                FieldEvent::Submit => FilterEvent::Search,
            })
    }
}

/// Props-only renderer for all filter fields.
pub struct FilterBar<'a> {
    pub filters: &'a FilterState,
    pub focus: FilterFocus,
    pub cursor: usize,
}

impl FilterBar<'_> {
    pub const HEIGHT: u16 = 6;

    fn render_field(&self, frame: &mut Frame, area: Rect, field: FilterFocus) {
        let placeholder = if field == FilterFocus::Duplicate {
            ""
        } else {
            field.placeholder()
        };
        TextField::new(field.label(), field.value(self.filters))
            .placeholder(placeholder)
            .focused(self.focus == field, self.cursor)
            .render(frame, area);
    }
}

impl Component for FilterBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Ratio};
        let [top, bottom] = Layout::vertical([Length(3), Length(3)]).areas(area);

        let top_cells: [Rect; 4] =
            Layout::horizontal([Ratio(1, 4), Ratio(1, 4), Ratio(1, 3), Ratio(1, 6)]).areas(top);
        let bottom_cells: [Rect; 3] =
            Layout::horizontal([Ratio(1, 3), Ratio(1, 3), Ratio(1, 3)]).areas(bottom);

        let top_fields = [
            FilterFocus::MessageId,
            FilterFocus::Source,
            FilterFocus::Text,
            FilterFocus::Duplicate,
        ];
        let bottom_fields = [
            FilterFocus::PublishDatetime,
            FilterFocus::Start,
            FilterFocus::End,
        ];

        for (cell, field) in top_cells.into_iter().zip(top_fields) {
            self.render_field(frame, cell, field);
        }
        for (cell, field) in bottom_cells.into_iter().zip(bottom_fields) {
            self.render_field(frame, cell, field);
        }
    }
}
