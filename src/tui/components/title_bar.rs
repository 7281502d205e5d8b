//! # TitleBar Component
//!
//! Top status bar: app name, active view, backend, status message and the
//! auto-refresh indicator.
//!
//! Stateless: every field is a prop set by the parent before rendering.
//!
//! 1. **With status**: `"pubdash [Receiver] @ http://localhost:5000 | Published | ⟳ auto"`
//! 2. **Default**: `"pubdash [Sender] @ http://localhost:5000"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub view_label: String,
    pub backend: String,
    pub status_message: String,
    pub auto_refresh: bool,
}

impl TitleBar {
    pub fn new(view_label: &str, backend: &str, status_message: &str, auto_refresh: bool) -> Self {
        Self {
            view_label: view_label.to_string(),
            backend: backend.to_string(),
            status_message: status_message.to_string(),
            auto_refresh,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("pubdash [{}] @ {}", self.view_label, self.backend);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.auto_refresh {
            text.push_str(" | ⟳ auto");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(line, area);
    }
}
