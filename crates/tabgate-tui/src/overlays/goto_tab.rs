//! Go-to-tab overlay: jump to a tab by typing its id.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::mutations::StateMutation;
use crate::state::TuiState;

#[derive(Debug, Clone, Default)]
pub struct GoToTabState {
    pub input: String,
    /// Known tab ids, shown as the placeholder.
    pub placeholder: String,
    pub error: Option<String>,
}

impl GoToTabState {
    pub fn open(tui: &TuiState) -> Self {
        let ids: Vec<&str> = tui.shell.tabs().iter().map(|t| t.id.as_str()).collect();
        Self {
            input: String::new(),
            placeholder: ids.join(", "),
            error: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_goto_overlay(frame, self, area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => {
                let id = self.input.trim();
                if id.is_empty() {
                    self.error = Some("Type a tab id".to_string());
                    OverlayUpdate::stay()
                } else {
                    // Validity is the shell's call, not the overlay's.
                    OverlayUpdate::close()
                        .with_mutations(vec![StateMutation::TapTab(id.to_string())])
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_goto_overlay(frame: &mut Frame, state: &GoToTabState, area: Rect) {
    use super::render_utils::{InputHint, OverlayConfig, render_input_line, render_overlay};

    let hints = [InputHint::new("Enter", "go"), InputHint::new("Esc", "cancel")];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Go to tab",
            border_color: Color::Cyan,
            width: 40,
            height: 5,
            hints: &hints,
        },
    );

    let input_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
    render_input_line(
        frame,
        input_area,
        &state.input,
        &state.placeholder,
        Color::Cyan,
    );

    if let Some(error) = &state.error {
        let error_area = Rect::new(layout.body.x, layout.body.y + 1, layout.body.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))),
            error_area,
        );
    }
}
