//! # Sender Panel
//!
//! Composer view: message text, optional message id, and the feedback line
//! for the last publish.
//!
//! ```text
//! ╭Message──────────────────────────╮
//! │hello world                      │
//! ╰─────────────────────────────────╯
//! ╭Message ID (optional)────────────╮
//! │e.g. Msg-001                     │
//! ╰─────────────────────────────────╯
//! [Enter] Send message
//! Published (id: 123) [masked]
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::composer::{ComposerState, FeedbackKind};
use crate::tui::component::Component;
use crate::tui::components::text_field::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenderFocus {
    #[default]
    Message,
    MessageId,
}

impl SenderFocus {
    pub fn toggle(self) -> Self {
        match self {
            SenderFocus::Message => SenderFocus::MessageId,
            SenderFocus::MessageId => SenderFocus::Message,
        }
    }
}

/// Props: the composer state, which field has focus, and that field's cursor.
pub struct SenderPanel<'a> {
    pub composer: &'a ComposerState,
    pub focus: SenderFocus,
    pub cursor: usize,
}

impl Component for SenderPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [message_area, id_area, button_area, feedback_area, _rest] =
            Layout::vertical([Length(3), Length(3), Length(1), Length(2), Min(0)]).areas(area);

        let busy = self.composer.busy;
        let message_label = if busy { "Message (Sending...)" } else { "Message" };

        TextField::new(message_label, &self.composer.text)
            .placeholder("Type a message to publish...")
            .focused(self.focus == SenderFocus::Message, self.cursor)
            .disabled(busy)
            .render(frame, message_area);

        TextField::new("Message ID (optional)", &self.composer.message_id)
            .placeholder("e.g. Msg-001")
            .focused(self.focus == SenderFocus::MessageId, self.cursor)
            .disabled(busy)
            .render(frame, id_area);

        let button = if busy {
            Span::styled("Sending...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                "[Enter] Send message",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };
        frame.render_widget(Line::from(button), button_area);

        if let Some(feedback) = &self.composer.feedback {
            let color = match feedback.kind {
                FeedbackKind::Info => Color::Gray,
                FeedbackKind::Success => Color::Green,
                FeedbackKind::Error => Color::Red,
            };
            let paragraph = Paragraph::new(feedback.text.as_str()).style(Style::default().fg(color));
            frame.render_widget(paragraph, feedback_area);
        }
    }
}
