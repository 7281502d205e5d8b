use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Global
    ForceQuit, // Ctrl+C
    Quit,      // Esc
    SwitchView,
    Resize,

    // Field editing
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearField, // Ctrl+U
    Submit,

    // Focus
    FocusNext,
    FocusPrev,

    // Receiver controls
    ClearFilters,      // Ctrl+L
    ToggleAutoRefresh, // Ctrl+A
    NextPage,
    PrevPage,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::ClearFilters),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::ToggleAutoRefresh),
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NextPage),
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::PrevPage),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::ClearField),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Tab) => Some(TuiEvent::SwitchView),
        (_, KeyCode::BackTab) => Some(TuiEvent::SwitchView),
        (_, KeyCode::Down) => Some(TuiEvent::FocusNext),
        (_, KeyCode::Up) => Some(TuiEvent::FocusPrev),
        (_, KeyCode::PageDown) => Some(TuiEvent::NextPage),
        (_, KeyCode::PageUp) => Some(TuiEvent::PrevPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('l')),
            Some(TuiEvent::ClearFilters)
        );
        assert_eq!(map_key(KeyModifiers::CONTROL, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_plain_and_shifted_chars_are_input() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('a')),
            Some(TuiEvent::InputChar('a'))
        );
        assert_eq!(
            map_key(KeyModifiers::SHIFT, KeyCode::Char('A')),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_paging_keys() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::PageDown),
            Some(TuiEvent::NextPage)
        );
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::PageUp),
            Some(TuiEvent::PrevPage)
        );
    }
}
