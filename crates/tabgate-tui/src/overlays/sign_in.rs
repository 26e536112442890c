//! Sign-in sheet.
//!
//! Shown whenever the shell's gate is prompting. The sheet only collects
//! the channel and phone number; whether sign-in counts is decided by the
//! identity exchange and the gate.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tabgate_core::SignInOutcome;
use tabgate_core::identity::SignInChannel;
use tabgate_core::phone::PhoneForm;

use super::alert::{AlertState, failure_title};
use super::prefix_picker::{PickerOutcome, PrefixPickerState};
use super::render_utils::{InputHint, OverlayConfig, bottom_sheet_area, render_framed};
use super::OverlayUpdate;
use crate::features::onboarding::{FormAction, FormField, form_lines, handle_form_key};
use crate::mutations::{SignInOrigin, StateMutation};
use crate::state::TuiState;

/// Modal stacked on top of the sheet.
#[derive(Debug, Clone)]
pub enum SheetModal {
    PrefixPicker(PrefixPickerState),
    Alert(AlertState),
}

#[derive(Debug, Clone)]
pub struct SignInSheetState {
    pub form: PhoneForm,
    pub focus: FormField,
    /// Channel of the running exchange, if any.
    pub exchanging: Option<SignInChannel>,
    pub modal: Option<SheetModal>,
    /// Title of the tab the user was trying to reach.
    pub requested: Option<String>,
}

impl SignInSheetState {
    pub fn open(tui: &TuiState) -> Self {
        let requested = tui
            .shell
            .pending_tab()
            .and_then(|id| tui.shell.tabs().get(id.as_str()))
            .map(|tab| tab.title.clone());
        Self {
            form: PhoneForm::new(tui.sign_in.prefixes.clone(), &tui.sign_in.default_prefix),
            focus: FormField::Phone,
            exchanging: None,
            modal: None,
            requested,
        }
    }

    /// Unlocks the sheet after a failed exchange and raises the alert.
    pub fn show_failure(&mut self, channel: SignInChannel, message: String) {
        self.exchanging = None;
        self.modal = Some(SheetModal::Alert(AlertState::new(
            failure_title(channel),
            message,
        )));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        if let Some(modal) = self.modal.as_mut() {
            let dismiss = match modal {
                SheetModal::PrefixPicker(picker) => match picker.handle_key(key) {
                    PickerOutcome::Stay => false,
                    PickerOutcome::Cancel => true,
                    PickerOutcome::Chosen(index) => {
                        self.form.select_prefix(index);
                        true
                    }
                },
                SheetModal::Alert(alert) => alert.handle_key(key),
            };
            if dismiss {
                self.modal = None;
            }
            return OverlayUpdate::stay();
        }

        if key.code == KeyCode::Esc {
            return OverlayUpdate::close()
                .with_mutations(vec![StateMutation::PromptOutcome(SignInOutcome::Cancelled)]);
        }

        if self.exchanging.is_some() {
            return OverlayUpdate::stay();
        }

        match handle_form_key(&mut self.form, &mut self.focus, FormField::SHEET, key) {
            FormAction::None | FormAction::Skip => OverlayUpdate::stay(),
            FormAction::OpenPrefixPicker => {
                self.modal = Some(SheetModal::PrefixPicker(PrefixPickerState::open(
                    &self.form,
                )));
                OverlayUpdate::stay()
            }
            FormAction::Submit(channel) => {
                self.exchanging = Some(channel);
                let phone = channel.uses_phone().then(|| self.form.e164()).flatten();
                OverlayUpdate::stay().with_mutations(vec![StateMutation::BeginSignIn {
                    origin: SignInOrigin::Sheet,
                    channel,
                    phone,
                }])
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: usize) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Sign in to continue",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(
                "Use your phone number or Apple to sign in.",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ];
        if let Some(title) = &self.requested {
            lines.push(
                Line::from(Span::styled(
                    format!("{title} needs you to be signed in"),
                    Style::default().fg(Color::Yellow),
                ))
                .alignment(Alignment::Center),
            );
        }
        lines.push(Line::from(""));
        lines.extend(form_lines(
            &self.form,
            self.focus,
            FormField::SHEET,
            self.exchanging,
            spinner,
        ));

        // Two border rows, one hint row, and slack for the wrapped footer.
        let height = lines.len() as u16 + 4;
        let hints = [
            InputHint::new("Tab", "move"),
            InputHint::new("Enter", "choose"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_framed(
            frame,
            bottom_sheet_area(area, height),
            &OverlayConfig {
                title: "Sign in",
                border_color: Color::Green,
                width: area.width,
                height,
                hints: &hints,
            },
        );
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            layout.body,
        );

        match &self.modal {
            Some(SheetModal::PrefixPicker(picker)) => picker.render(frame, area),
            Some(SheetModal::Alert(alert)) => alert.render(frame, area),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tabgate_core::config::Config;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sheet() -> SignInSheetState {
        let tui = TuiState::new(&Config::default()).unwrap();
        SignInSheetState::open(&tui)
    }

    #[test]
    fn esc_reports_cancellation() {
        let mut sheet = sheet();
        let update = sheet.handle_key(key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert_eq!(
            update.mutations,
            vec![StateMutation::PromptOutcome(SignInOutcome::Cancelled)]
        );
    }

    #[test]
    fn whatsapp_submits_and_locks() {
        let mut sheet = sheet();
        for c in "3401".chars() {
            sheet.handle_key(key(KeyCode::Char(c)));
        }
        sheet.focus = FormField::WhatsApp;
        let update = sheet.handle_key(key(KeyCode::Enter));

        assert_eq!(
            update.mutations,
            vec![StateMutation::BeginSignIn {
                origin: SignInOrigin::Sheet,
                channel: SignInChannel::WhatsApp,
                phone: Some("+393401".to_string()),
            }]
        );
        assert_eq!(sheet.exchanging, Some(SignInChannel::WhatsApp));
        assert!(sheet.handle_key(key(KeyCode::Enter)).mutations.is_empty());
    }

    #[test]
    fn picker_modal_changes_prefix() {
        let mut sheet = sheet();
        sheet.focus = FormField::Prefix;
        sheet.handle_key(key(KeyCode::Enter));
        assert!(matches!(sheet.modal, Some(SheetModal::PrefixPicker(_))));

        sheet.handle_key(key(KeyCode::Down));
        sheet.handle_key(key(KeyCode::Enter));
        assert!(sheet.modal.is_none());
        assert_eq!(sheet.form.prefix().code, "+44");
    }

    #[test]
    fn failure_alert_is_dismissed_before_esc_closes() {
        let mut sheet = sheet();
        sheet.exchanging = Some(SignInChannel::Apple);
        sheet.show_failure(SignInChannel::Apple, "denied".to_string());
        assert!(sheet.exchanging.is_none());

        // First Esc only closes the alert.
        let update = sheet.handle_key(key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(sheet.modal.is_none());
    }
}
