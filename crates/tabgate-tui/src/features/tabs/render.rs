//! Tab shell view: content area above a bottom tab bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tabgate_core::{NavigationShell, Tab};

use crate::features::onboarding::BRAND_GREEN;

const TAB_BAR_HEIGHT: u16 = 3;

pub fn render_tabs_screen(
    frame: &mut Frame,
    shell: &NavigationShell,
    identity_status: Option<&str>,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(TAB_BAR_HEIGHT)])
        .split(area);

    render_content(frame, shell, identity_status, chunks[0]);
    render_tab_bar(frame, shell, chunks[1]);
}

fn accent(tab: &Tab) -> Color {
    match tab.id.as_str() {
        "home" => BRAND_GREEN,
        "cart" => Color::LightRed,
        "profile" => Color::LightBlue,
        _ => Color::Cyan,
    }
}

fn render_content(
    frame: &mut Frame,
    shell: &NavigationShell,
    identity_status: Option<&str>,
    area: Rect,
) {
    let tab = shell.selected_tab();
    let color = accent(tab);
    let is_fallback = tab.id == shell.tabs().fallback().id;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            tab.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match tab.id.as_str() {
        "cart" => lines.push(Line::from("Your cart is empty.")),
        "profile" => {
            if let Some(status) = identity_status {
                lines.extend(status.lines().map(|l| Line::from(l.to_string())));
            }
            if let Some(at) = shell.gate().session().signed_in_at() {
                lines.push(Line::from(Span::styled(
                    format!("Session started {}", at.format("%H:%M:%S UTC")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        _ => {}
    }

    lines.push(Line::from(""));
    let hint = Style::default().fg(Color::DarkGray);
    if is_fallback {
        lines.push(Line::from(Span::styled("b  back to welcome", hint)));
    }
    if shell.is_signed_in() {
        lines.push(Line::from(Span::styled("o  sign out", hint)));
    } else {
        lines.push(Line::from(Span::styled("s  sign in", hint)));
    }

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(content, area);
}

fn render_tab_bar(frame: &mut Frame, shell: &NavigationShell, area: Rect) {
    let count = u32::try_from(shell.tabs().len()).unwrap_or(1).max(1);
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for ((index, tab), cell) in shell.tabs().iter().enumerate().zip(cells.iter()) {
        let selected = tab.id == *shell.selected_id();
        let locked = tab.requires_auth && !shell.is_signed_in();

        let mut style = Style::default().fg(if selected { accent(tab) } else { Color::Gray });
        if selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        let label = if locked {
            format!("{} {} ·locked", index + 1, tab.title)
        } else {
            format!("{} {}", index + 1, tab.title)
        };

        let item = Paragraph::new(Line::from(Span::styled(label, style)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(
                Style::default().fg(if selected { accent(tab) } else { Color::DarkGray }),
            ));
        frame.render_widget(item, *cell);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tabgate_core::TabSet;

    use super::*;

    fn draw(shell: &NavigationShell) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| render_tabs_screen(frame, shell, None, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn tab_bar_marks_protected_tabs_when_signed_out() {
        let shell = NavigationShell::new(TabSet::standard());
        let screen = draw(&shell);
        assert!(screen.contains("1 Home"));
        assert!(screen.contains("·locked"));
        assert!(screen.contains("s  sign in"));
    }
}
