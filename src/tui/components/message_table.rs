//! # MessageTable Component
//!
//! Renders the current page of records with a pager underneath.
//!
//! Columns follow the backend's record model: Message ID, Data, Source,
//! Publish time, Is duplicate. Every cell goes through the alias-aware
//! accessors on [`MessageRecord`], so records from any backend revision
//! render the same way.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};

use crate::api::{MessageRecord, format_publish_time};
use crate::core::listing::ListState;
use crate::tui::component::Component;

pub struct MessageTable<'a> {
    pub list: &'a ListState,
}

/// Display values for one row, in column order.
pub fn row_cells(record: &MessageRecord) -> [String; 5] {
    [
        record.message_id().unwrap_or_else(|| "N/A".to_string()),
        record.text().to_string(),
        record.source().to_string(),
        format_publish_time(record.publish_time()),
        if record.is_duplicate() {
            "Duplicate".to_string()
        } else {
            "Unique".to_string()
        },
    ]
}

/// `"Page 2 of 3"`, or `None` when everything fits on one page.
pub fn pager_text(list: &ListState) -> Option<String> {
    if list.total <= list.page_size as u64 {
        return None;
    }
    let prev = if list.can_prev() { "◀ PgUp" } else { "      " };
    let next = if list.can_next() { "PgDn ▶" } else { "      " };
    Some(format!(
        "{prev}  Page {} of {}  {next}",
        list.page,
        list.display_pages()
    ))
}

impl Component for MessageTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [status_area, table_area, pager_area] =
            Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

        if self.list.loading {
            let syncing = Span::styled(
                "Syncing messages from backend...",
                Style::default().fg(Color::DarkGray),
            );
            frame.render_widget(Line::from(syncing), status_area);
        } else if let Some(error) = &self.list.error {
            let error = Span::styled(error.as_str(), Style::default().fg(Color::Red));
            frame.render_widget(Line::from(error), status_area);
        }

        let title = if self.list.filters.is_empty() {
            format!("Messages ({})", self.list.total)
        } else {
            format!("Messages ({}, filtered)", self.list.total)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        if self.list.records.is_empty() {
            let empty = Paragraph::new("No messages found.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, table_area);
        } else {
            let header = Row::new(["Message ID", "Data", "Source", "Publish time", "Is duplicate"])
                .style(Style::default().add_modifier(Modifier::BOLD));

            let rows = self.list.records.iter().map(|record| {
                let [id, data, source, time, dup] = row_cells(record);
                let dup_style = if record.is_duplicate() {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Green)
                };
                let mut data_cell = Cell::from(data);
                if record.flagged() {
                    data_cell = data_cell.style(Style::default().fg(Color::Magenta));
                }
                Row::new([
                    Cell::from(id),
                    data_cell,
                    Cell::from(source),
                    Cell::from(time),
                    Cell::from(dup).style(dup_style),
                ])
            });

            let widths = [
                Constraint::Length(16),
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(17),
                Constraint::Length(12),
            ];
            let table = Table::new(rows, widths).header(header).block(block);
            frame.render_widget(table, table_area);
        }

        if let Some(pager) = pager_text(self.list) {
            frame.render_widget(
                Paragraph::new(pager).alignment(Alignment::Center),
                pager_area,
            );
        }
    }
}
