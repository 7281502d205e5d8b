//! # TextField Component
//!
//! Single-line text input used by both the composer and the filter bar.
//!
//! The text itself lives in core state (`ComposerState`, `FilterState`), so
//! the component is split in two:
//!
//! - [`FieldEditor`]: borrows the buffer plus a TUI-owned cursor for the
//!   duration of one event and applies the edit.
//! - [`TextField`]: props-only renderer (label, value, cursor, focus).
//!
//! The cursor is a byte offset into the buffer. It is clamped on every use,
//! since the buffer may be cleared behind the field's back (e.g. after a
//! successful publish).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
    Submit,
}

/// Applies editing events to a borrowed buffer.
pub struct FieldEditor<'a> {
    buffer: &'a mut String,
    cursor: &'a mut usize,
}

impl<'a> FieldEditor<'a> {
    pub fn new(buffer: &'a mut String, cursor: &'a mut usize) -> Self {
        *cursor = clamp_cursor(buffer, *cursor);
        Self { buffer, cursor }
    }
}

impl EventHandler for FieldEditor<'_> {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let pos = *self.cursor;
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => {
                self.buffer.insert(pos, *c);
                *self.cursor += c.len_utf8();
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces.
                let line: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.insert_str(pos, &line);
                *self.cursor += line.len();
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(self.buffer, pos);
                self.buffer.drain(prev..pos);
                *self.cursor = prev;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Delete if pos < self.buffer.len() => {
                let next = next_char_boundary(self.buffer, pos);
                self.buffer.drain(pos..next);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorLeft if pos > 0 => {
                *self.cursor = prev_char_boundary(self.buffer, pos);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorRight if pos < self.buffer.len() => {
                *self.cursor = next_char_boundary(self.buffer, pos);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorHome => {
                *self.cursor = 0;
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorEnd => {
                *self.cursor = self.buffer.len();
                Some(FieldEvent::Changed)
            }
            TuiEvent::ClearField => {
                self.buffer.clear();
                *self.cursor = 0;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

fn clamp_cursor(s: &str, pos: usize) -> usize {
    let mut pos = pos.min(s.len());
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

/// Bordered single-line input.
///
/// # Props
///
/// - `label`: border title
/// - `value`: text to show
/// - `cursor`: byte offset of the caret (only drawn when `focused`)
/// - `placeholder`: shown dimmed when `value` is empty
/// - `disabled`: greyed out, no caret
pub struct TextField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub cursor: usize,
    pub focused: bool,
    pub placeholder: &'a str,
    pub disabled: bool,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            cursor: value.len(),
            focused: false,
            placeholder: "",
            disabled: false,
        }
    }

    pub fn focused(mut self, focused: bool, cursor: usize) -> Self {
        self.focused = focused;
        self.cursor = clamp_cursor(self.value, cursor);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Visible slice and caret column, scrolled so the caret stays in view.
    fn visible(&self, inner_width: u16) -> (&'a str, u16) {
        let width = inner_width.max(1) as usize;
        let before = &self.value[..self.cursor];
        let mut start = 0;
        while before[start..].width() >= width {
            start = next_char_boundary(self.value, start);
        }
        let caret = before[start..].width() as u16;
        (&self.value[start..], caret)
    }
}

impl Component for TextField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.label);

        let inner_width = area.width.saturating_sub(2);
        let (text, caret) = self.visible(inner_width);

        let paragraph = if self.value.is_empty() {
            Paragraph::new(self.placeholder).style(Style::default().fg(Color::DarkGray))
        } else if self.disabled {
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(text)
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.disabled && area.height >= 3 {
            frame.set_cursor_position((area.x + 1 + caret, area.y + 1));
        }
    }
}
