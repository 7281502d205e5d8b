//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values for the
//! [`Runtime`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each turn draws one frame, waits up to 100ms for input, drains every
//! pending input event, then applies whatever background tasks reported in
//! the meantime. The short poll keeps publish and reload results visible
//! without a dedicated wakeup channel.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use log::{debug, info};

use crate::api::{HttpBackend, MessageBackend};
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, View};
use crate::runtime::Runtime;
use crate::tui::component::EventHandler;
use crate::tui::components::{FieldEditor, FilterEditor, FilterEvent, FilterFocus, SenderFocus};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Debug, Default)]
pub(crate) struct TuiState {
    pub sender_focus: SenderFocus,
    pub filter_focus: FilterFocus,
    /// Byte offset into whichever field has focus in the active view.
    pub cursor: usize,
}

impl TuiState {
    /// Moves the caret to the end of the newly focused field.
    fn focus_changed(&mut self) {
        self.cursor = usize::MAX;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let http = HttpBackend::new(config.backend.clone());
    info!("Using {} backend at {}", http.name(), http.base_url());
    let backend: Arc<dyn MessageBackend> = Arc::new(http);

    let app = App::from_config(&config);
    let mut runtime = Runtime::new(app, backend, config.refresh_interval);
    let mut tui = TuiState::default();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    runtime.dispatch(Action::Mount);

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|f| ui::draw_ui(f, &runtime.app, &tui))?;

        let first_event = poll_event_timeout(POLL_INTERVAL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut runtime, &mut tui, &event) {
                should_quit = true;
                break;
            }
        }

        runtime.drain();
    }

    info!("Shutting down");
    runtime.shutdown();
    drop(terminal_mode_guard);
    ratatui::restore();
    Ok(())
}

/// Routes one input event. Returns `true` when the app should quit.
fn handle_event(runtime: &mut Runtime, tui: &mut TuiState, event: &TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit | TuiEvent::Quit => runtime.dispatch(Action::Quit),
        TuiEvent::SwitchView => {
            tui.focus_changed();
            let view = runtime.app.view.toggle();
            runtime.dispatch(Action::SwitchView(view))
        }
        _ => match runtime.app.view {
            View::Sender => handle_sender_event(runtime, tui, event),
            View::Receiver => handle_receiver_event(runtime, tui, event),
        },
    }
}

fn handle_sender_event(runtime: &mut Runtime, tui: &mut TuiState, event: &TuiEvent) -> bool {
    match event {
        TuiEvent::FocusNext | TuiEvent::FocusPrev => {
            tui.sender_focus = tui.sender_focus.toggle();
            tui.focus_changed();
            false
        }
        TuiEvent::Submit => runtime.dispatch(Action::Submit),
        _ => {
            let composer = &mut runtime.app.composer;
            if composer.busy {
                debug!("Ignoring edit while publish is in flight");
                return false;
            }
            let buffer = match tui.sender_focus {
                SenderFocus::Message => &mut composer.text,
                SenderFocus::MessageId => &mut composer.message_id,
            };
            FieldEditor::new(buffer, &mut tui.cursor).handle_event(event);
            false
        }
    }
}

fn handle_receiver_event(runtime: &mut Runtime, tui: &mut TuiState, event: &TuiEvent) -> bool {
    match event {
        TuiEvent::FocusNext => {
            tui.filter_focus = tui.filter_focus.next();
            tui.focus_changed();
            false
        }
        TuiEvent::FocusPrev => {
            tui.filter_focus = tui.filter_focus.prev();
            tui.focus_changed();
            false
        }
        TuiEvent::ClearFilters => {
            tui.focus_changed();
            runtime.dispatch(Action::ClearFilters)
        }
        TuiEvent::ToggleAutoRefresh => runtime.dispatch(Action::ToggleAutoRefresh),
        TuiEvent::NextPage => runtime.dispatch(Action::NextPage),
        TuiEvent::PrevPage => runtime.dispatch(Action::PrevPage),
        _ => {
            let mut editor = FilterEditor {
                filters: &mut runtime.app.list.filters,
                focus: tui.filter_focus,
                cursor: &mut tui.cursor,
            };
            match editor.handle_event(event) {
                Some(FilterEvent::Search) => runtime.dispatch(Action::Search),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DuplicateFilter;
    use crate::test_support::ScriptedBackend;

    fn runtime(backend: Arc<ScriptedBackend>) -> Runtime {
        Runtime::new(App::new(10, false), backend, Duration::from_secs(60))
    }

    fn type_text(rt: &mut Runtime, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(rt, tui, &TuiEvent::InputChar(c));
        }
    }

    #[tokio::test]
    async fn test_typing_and_submit_publishes() {
        let backend = Arc::new(ScriptedBackend::with_records(0));
        let mut rt = runtime(backend.clone());
        let mut tui = TuiState::default();

        type_text(&mut rt, &mut tui, "hello");
        handle_event(&mut rt, &mut tui, &TuiEvent::FocusNext);
        type_text(&mut rt, &mut tui, "Msg-1");
        assert_eq!(rt.app.composer.text, "hello");
        assert_eq!(rt.app.composer.message_id, "Msg-1");

        assert!(!handle_event(&mut rt, &mut tui, &TuiEvent::Submit));
        assert!(rt.app.composer.busy);

        // Edits are ignored while the publish is in flight.
        type_text(&mut rt, &mut tui, "x");
        assert_eq!(rt.app.composer.message_id, "Msg-1");

        rt.next().await;
        assert!(!rt.app.composer.busy);
        assert_eq!(backend.publish_calls(), 1);
    }

    #[tokio::test]
    async fn test_switch_view_and_search() {
        let backend = Arc::new(ScriptedBackend::with_records(2));
        let mut rt = runtime(backend.clone());
        let mut tui = TuiState::default();

        handle_event(&mut rt, &mut tui, &TuiEvent::SwitchView);
        assert_eq!(rt.app.view, View::Receiver);

        type_text(&mut rt, &mut tui, "Msg");
        assert_eq!(rt.app.list.filters.message_id, "Msg");

        handle_event(&mut rt, &mut tui, &TuiEvent::FocusPrev);
        assert_eq!(tui.filter_focus, FilterFocus::End);

        handle_event(&mut rt, &mut tui, &TuiEvent::Submit);
        rt.next().await;
        assert_eq!(backend.list_calls(), 1);
        assert_eq!(rt.app.list.records.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_toggle_and_clear() {
        let backend = Arc::new(ScriptedBackend::with_records(0));
        let mut rt = runtime(backend.clone());
        let mut tui = TuiState {
            filter_focus: FilterFocus::Duplicate,
            ..Default::default()
        };
        rt.app.view = View::Receiver;

        handle_event(&mut rt, &mut tui, &TuiEvent::InputChar(' '));
        assert_eq!(rt.app.list.filters.duplicate, DuplicateFilter::True);

        handle_event(&mut rt, &mut tui, &TuiEvent::ClearFilters);
        assert_eq!(rt.app.list.filters.duplicate, DuplicateFilter::Any);
        rt.next().await;
        assert_eq!(backend.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let backend = Arc::new(ScriptedBackend::with_records(0));
        let mut rt = runtime(backend);
        let mut tui = TuiState::default();
        assert!(handle_event(&mut rt, &mut tui, &TuiEvent::Quit));
        assert!(handle_event(&mut rt, &mut tui, &TuiEvent::ForceQuit));
        assert!(!handle_event(&mut rt, &mut tui, &TuiEvent::Resize));
    }
}
