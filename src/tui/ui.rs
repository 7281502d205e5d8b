use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{App, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FilterBar, MessageTable, SenderPanel, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &TuiState) {
    use Constraint::{Length, Min};
    let [title_area, tabs_area, body_area, help_area] =
        Layout::vertical([Length(1), Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(
        app.view.label(),
        &app.backend_label,
        &app.status_message,
        app.list.auto_refresh,
    )
    .render(frame, title_area);

    frame.render_widget(view_tabs(app.view), tabs_area);

    match app.view {
        View::Sender => SenderPanel {
            composer: &app.composer,
            focus: tui.sender_focus,
            cursor: tui.cursor,
        }
        .render(frame, body_area),
        View::Receiver => draw_receiver(frame, app, tui, body_area),
    }

    frame.render_widget(help_line(app), help_area);
}

fn draw_receiver(frame: &mut Frame, app: &App, tui: &TuiState, area: Rect) {
    use Constraint::{Length, Min};
    let [filter_area, table_area] =
        Layout::vertical([Length(FilterBar::HEIGHT), Min(0)]).areas(area);

    FilterBar {
        filters: &app.list.filters,
        focus: tui.filter_focus,
        cursor: tui.cursor,
    }
    .render(frame, filter_area);

    MessageTable { list: &app.list }.render(frame, table_area);
}

fn view_tabs(active: View) -> Line<'static> {
    let tab = |view: View| {
        let style = if view == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", view.label()), style)
    };
    Line::from(vec![tab(View::Sender), Span::raw(" "), tab(View::Receiver)])
}

fn help_line(app: &App) -> Line<'static> {
    let text = match app.view {
        View::Sender => "Tab: receiver  ↑/↓: field  Enter: send  Ctrl+U: clear field  Esc: quit",
        View::Receiver => {
            if app.list.auto_refresh {
                "Tab: sender  ↑/↓: filter  Enter: search  Ctrl+L: clear  Ctrl+A: auto refresh off  PgUp/PgDn: page"
            } else {
                "Tab: sender  ↑/↓: filter  Enter: search  Ctrl+L: clear  Ctrl+A: auto refresh on  PgUp/PgDn: page"
            }
        }
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
