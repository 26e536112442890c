//! Onboarding state types.

use tabgate_core::config::SignInConfig;
use tabgate_core::identity::SignInChannel;
use tabgate_core::phone::PhoneForm;

/// Focusable controls of the phone/social form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Prefix,
    Phone,
    WhatsApp,
    Sms,
    Apple,
    Skip,
}

impl FormField {
    /// Welcome screen order.
    pub const ONBOARDING: &'static [FormField] = &[
        FormField::Prefix,
        FormField::Phone,
        FormField::WhatsApp,
        FormField::Sms,
        FormField::Apple,
        FormField::Skip,
    ];

    /// Sign-in sheet order (no Skip).
    pub const SHEET: &'static [FormField] = &[
        FormField::Prefix,
        FormField::Phone,
        FormField::WhatsApp,
        FormField::Sms,
        FormField::Apple,
    ];

    /// Moves focus one step within `fields`, wrapping at both ends.
    pub fn cycle(self, fields: &[FormField], forward: bool) -> FormField {
        let Some(pos) = fields.iter().position(|f| *f == self) else {
            return fields.first().copied().unwrap_or(self);
        };
        let len = fields.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        fields[next]
    }

    /// Sign-in channel triggered by this control, if any.
    pub fn channel(self) -> Option<SignInChannel> {
        match self {
            FormField::WhatsApp => Some(SignInChannel::WhatsApp),
            FormField::Sms => Some(SignInChannel::Sms),
            FormField::Apple => Some(SignInChannel::Apple),
            FormField::Prefix | FormField::Phone | FormField::Skip => None,
        }
    }
}

/// Welcome screen state.
#[derive(Debug, Clone)]
pub struct OnboardingState {
    pub form: PhoneForm,
    pub focus: FormField,
    /// Channel of the exchange started from this screen, while it runs.
    pub exchanging: Option<SignInChannel>,
}

impl OnboardingState {
    pub fn new(config: &SignInConfig) -> Self {
        Self {
            form: PhoneForm::new(config.prefixes.clone(), &config.default_prefix),
            focus: FormField::Phone,
            exchanging: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(
            FormField::Skip.cycle(FormField::ONBOARDING, true),
            FormField::Prefix
        );
        assert_eq!(
            FormField::Prefix.cycle(FormField::SHEET, false),
            FormField::Apple
        );
        // Skip is not on the sheet; focus snaps to the first control.
        assert_eq!(
            FormField::Skip.cycle(FormField::SHEET, true),
            FormField::Prefix
        );
    }

    #[test]
    fn only_buttons_map_to_channels() {
        assert_eq!(FormField::Sms.channel(), Some(SignInChannel::Sms));
        assert_eq!(FormField::Phone.channel(), None);
        assert_eq!(FormField::Skip.channel(), None);
    }
}
