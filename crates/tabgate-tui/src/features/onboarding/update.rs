//! Onboarding feature reducer.
//!
//! Form key handling is shared with the sign-in sheet; only the welcome
//! screen has the Skip action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabgate_core::identity::SignInChannel;
use tabgate_core::phone::PhoneForm;

use super::state::{FormField, OnboardingState};
use crate::mutations::{SignInOrigin, StateMutation};

/// What a key press on the form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    OpenPrefixPicker,
    Submit(SignInChannel),
    Skip,
}

/// Applies a key press to a phone/social form.
///
/// Tab/Shift-Tab and Up/Down move focus, digits edit the phone field
/// (focusing it first), Enter activates the focused control.
pub fn handle_form_key(
    form: &mut PhoneForm,
    focus: &mut FormField,
    fields: &[FormField],
    key: KeyEvent,
) -> FormAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return FormAction::None;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            *focus = focus.cycle(fields, true);
            FormAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            *focus = focus.cycle(fields, false);
            FormAction::None
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            *focus = FormField::Phone;
            form.push_char(c);
            FormAction::None
        }
        KeyCode::Backspace if *focus == FormField::Phone => {
            form.backspace();
            FormAction::None
        }
        KeyCode::Enter => match *focus {
            FormField::Prefix => FormAction::OpenPrefixPicker,
            FormField::Phone => {
                *focus = focus.cycle(fields, true);
                FormAction::None
            }
            FormField::Skip => FormAction::Skip,
            field => field.channel().map_or(FormAction::None, FormAction::Submit),
        },
        _ => FormAction::None,
    }
}

/// Result of a key on the welcome screen that the reducer must act on.
#[derive(Debug, PartialEq, Eq)]
pub enum OnboardingAction {
    None,
    Quit,
    OpenPrefixPicker,
    EnterTabs,
    Mutate(StateMutation),
}

/// Handles a key press on the welcome screen.
pub fn handle_onboarding_key(state: &mut OnboardingState, key: KeyEvent) -> OnboardingAction {
    if state.exchanging.is_some() {
        // Form is locked while an exchange runs; only quitting is allowed.
        return match key.code {
            KeyCode::Esc => OnboardingAction::Quit,
            _ => OnboardingAction::None,
        };
    }

    if key.code == KeyCode::Esc {
        return OnboardingAction::Quit;
    }

    match handle_form_key(&mut state.form, &mut state.focus, FormField::ONBOARDING, key) {
        FormAction::None => OnboardingAction::None,
        FormAction::OpenPrefixPicker => OnboardingAction::OpenPrefixPicker,
        FormAction::Skip => OnboardingAction::EnterTabs,
        FormAction::Submit(channel) => {
            state.exchanging = Some(channel);
            OnboardingAction::Mutate(StateMutation::BeginSignIn {
                origin: SignInOrigin::Onboarding,
                channel,
                phone: channel.uses_phone().then(|| state.form.e164()).flatten(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use tabgate_core::config::SignInConfig;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_focus_phone_field() {
        let mut state = OnboardingState::new(&SignInConfig::default());
        state.focus = FormField::Apple;

        handle_onboarding_key(&mut state, key(KeyCode::Char('3')));
        handle_onboarding_key(&mut state, key(KeyCode::Char('x')));
        handle_onboarding_key(&mut state, key(KeyCode::Char('4')));

        assert_eq!(state.focus, FormField::Phone);
        assert_eq!(state.form.digits(), "34");
    }

    #[test]
    fn sms_submits_with_phone_number() {
        let mut state = OnboardingState::new(&SignInConfig::default());
        for c in "3331234".chars() {
            handle_onboarding_key(&mut state, key(KeyCode::Char(c)));
        }
        state.focus = FormField::Sms;

        let action = handle_onboarding_key(&mut state, key(KeyCode::Enter));
        assert_eq!(
            action,
            OnboardingAction::Mutate(StateMutation::BeginSignIn {
                origin: SignInOrigin::Onboarding,
                channel: SignInChannel::Sms,
                phone: Some("+393331234".to_string()),
            })
        );
        assert_eq!(state.exchanging, Some(SignInChannel::Sms));

        // Locked until the result arrives.
        assert_eq!(
            handle_onboarding_key(&mut state, key(KeyCode::Enter)),
            OnboardingAction::None
        );
    }

    #[test]
    fn apple_submits_without_phone() {
        let mut state = OnboardingState::new(&SignInConfig::default());
        handle_onboarding_key(&mut state, key(KeyCode::Char('1')));
        state.focus = FormField::Apple;

        let action = handle_onboarding_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(
            action,
            OnboardingAction::Mutate(StateMutation::BeginSignIn { phone: None, .. })
        ));
    }

    #[test]
    fn skip_and_prefix_actions() {
        let mut state = OnboardingState::new(&SignInConfig::default());
        state.focus = FormField::Skip;
        assert_eq!(
            handle_onboarding_key(&mut state, key(KeyCode::Enter)),
            OnboardingAction::EnterTabs
        );

        handle_onboarding_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, FormField::Prefix);
        assert_eq!(
            handle_onboarding_key(&mut state, key(KeyCode::Enter)),
            OnboardingAction::OpenPrefixPicker
        );
    }
}
