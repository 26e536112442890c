use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use tabgate_core::phone::PhoneForm;

/// Result of a key press in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Stay,
    Cancel,
    Chosen(usize),
}

#[derive(Debug, Clone)]
pub struct PrefixPickerState {
    pub options: Vec<String>,
    pub selected: usize,
}

impl PrefixPickerState {
    /// Opens the picker on the form's current prefix.
    pub fn open(form: &PhoneForm) -> Self {
        Self {
            options: form.prefixes().iter().map(|p| p.label()).collect(),
            selected: form.selected_index(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        render_prefix_picker(frame, self, area);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Esc => PickerOutcome::Cancel,
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = self.selected.saturating_sub(1);
                PickerOutcome::Stay
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected + 1 < self.options.len() {
                    self.selected += 1;
                }
                PickerOutcome::Stay
            }
            KeyCode::Enter if self.selected < self.options.len() => {
                PickerOutcome::Chosen(self.selected)
            }
            _ => PickerOutcome::Stay,
        }
    }
}

pub fn render_prefix_picker(frame: &mut Frame, picker: &PrefixPickerState, area: Rect) {
    use super::render_utils::{InputHint, OverlayConfig, render_overlay};

    let height = (picker.options.len() as u16 + 3).max(6);
    let hints = [
        InputHint::new("↑↓", "navigate"),
        InputHint::new("Enter", "select"),
        InputHint::new("Esc", "cancel"),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: "Country code",
            border_color: Color::Green,
            width: 34,
            height,
            hints: &hints,
        },
    );

    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|label| ListItem::new(Line::from(Span::raw(label.clone()))))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(picker.selected));
    frame.render_stateful_widget(list, layout.body, &mut list_state);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tabgate_core::phone::default_prefixes;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opens_on_current_prefix_and_clamps() {
        let form = PhoneForm::new(default_prefixes(), "+1");
        let mut picker = PrefixPickerState::open(&form);
        assert_eq!(picker.selected, 2);
        assert_eq!(picker.options[0], "+39 Italy");

        picker.handle_key(key(KeyCode::Down));
        assert_eq!(picker.selected, 2);
        picker.handle_key(key(KeyCode::Up));
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), PickerOutcome::Chosen(1));
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), PickerOutcome::Cancel);
    }
}
