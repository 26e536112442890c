//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{SPINNER_FRAMES, truncate_end};
use crate::features::{onboarding, tabs};
use crate::overlays::OverlayExt;
use crate::state::{AppState, Screen, TuiState};

/// Height of the status line at the bottom of the screen.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    match state.screen {
        Screen::Onboarding => onboarding::render_onboarding(
            frame,
            &state.onboarding,
            state.spinner_frame,
            chunks[0],
        ),
        Screen::Tabs => tabs::render_tabs_screen(
            frame,
            &state.shell,
            state.identity_status.as_deref(),
            chunks[0],
        ),
    }

    render_status_line(frame, state, chunks[1]);
    app.overlay.render(frame, chunks[0], state.spinner_frame);
}

fn render_status_line(frame: &mut Frame, state: &TuiState, area: Rect) {
    let width = usize::from(area.width);
    let line = if let Some(status) = &state.status {
        Line::from(Span::styled(
            truncate_end(&status.text, width),
            Style::default().fg(Color::Yellow),
        ))
    } else if state.tasks.is_any_running() {
        let frame_idx = state.spinner_frame % SPINNER_FRAMES.len();
        Line::from(Span::styled(
            format!("{} signing in…", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        let hints = match state.screen {
            Screen::Onboarding => "Tab move · Enter choose · Esc quit",
            Screen::Tabs => "←/→ or 1-9 switch tab · g go to · q quit",
        };
        Line::from(Span::styled(
            truncate_end(hints, width),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tabgate_core::config::Config;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_welcome_screen() {
        let app = AppState::new(&Config::default()).unwrap();
        let screen = draw(&app);
        assert!(screen.contains("Welcome"));
        assert!(screen.contains("Esc quit"));
    }

    #[test]
    fn status_replaces_hints() {
        let mut app = AppState::new(&Config::default()).unwrap();
        app.tui.screen = Screen::Tabs;
        app.tui.set_status("Signed out.");
        let screen = draw(&app);
        assert!(screen.contains("Signed out."));
        assert!(!screen.contains("g go to"));
    }
}
