//! Identity-provider boundary.
//!
//! The gate only cares whether sign-in succeeded. Providers live behind
//! `IdentityProvider` so the simulated one can be swapped out without the
//! navigation core noticing.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sign-in channels offered on the onboarding screen and the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInChannel {
    WhatsApp,
    Sms,
    Apple,
}

impl SignInChannel {
    pub fn label(self) -> &'static str {
        match self {
            SignInChannel::WhatsApp => "WhatsApp",
            SignInChannel::Sms => "SMS",
            SignInChannel::Apple => "Sign in with Apple",
        }
    }

    pub fn uses_phone(self) -> bool {
        matches!(self, SignInChannel::WhatsApp | SignInChannel::Sms)
    }
}

impl fmt::Display for SignInChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub channel: SignInChannel,
    /// E.164 number for the phone channels, if one was entered.
    pub phone: Option<String>,
}

/// Display-only identity fields. Never interpreted by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub user_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl IdentityProfile {
    /// Multi-line status shown after a successful sign-in.
    pub fn status_text(&self) -> String {
        format!(
            "Signed in! ID: {}\nEmail: {}\nName: {}",
            self.user_id,
            self.email.as_deref().unwrap_or("No email (existing user)"),
            self.full_name.as_deref().unwrap_or("No name"),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("{channel} failed: {reason}")]
    Rejected {
        channel: SignInChannel,
        reason: String,
    },
    #[error("sign-in was cancelled")]
    Cancelled,
}

pub trait IdentityProvider: Send + Sync {
    /// Runs the identity exchange for `request`.
    ///
    /// # Errors
    /// Returns an error if the provider rejects the sign-in.
    fn authenticate(&self, request: &SignInRequest) -> Result<IdentityProfile, IdentityError>;
}

/// How the simulated Apple exchange answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppleOutcome {
    #[default]
    Success,
    Failure,
}

/// Local stand-in for the real providers.
///
/// Phone channels always succeed (nothing is sent). The Apple channel
/// answers according to `apple_outcome`.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProvider {
    pub apple_outcome: AppleOutcome,
}

impl SimulatedProvider {
    pub fn new(apple_outcome: AppleOutcome) -> Self {
        Self { apple_outcome }
    }
}

impl IdentityProvider for SimulatedProvider {
    fn authenticate(&self, request: &SignInRequest) -> Result<IdentityProfile, IdentityError> {
        let user_id = uuid::Uuid::new_v4().simple().to_string();
        match request.channel {
            SignInChannel::Apple => match self.apple_outcome {
                AppleOutcome::Success => Ok(IdentityProfile {
                    user_id,
                    email: None,
                    full_name: None,
                }),
                AppleOutcome::Failure => Err(IdentityError::Rejected {
                    channel: request.channel,
                    reason: "The authorization attempt failed.".to_string(),
                }),
            },
            SignInChannel::WhatsApp | SignInChannel::Sms => Ok(IdentityProfile {
                user_id,
                email: None,
                full_name: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(channel: SignInChannel) -> SignInRequest {
        SignInRequest {
            channel,
            phone: channel.uses_phone().then(|| "+39333".to_string()),
        }
    }

    #[test]
    fn phone_channels_always_succeed() {
        let provider = SimulatedProvider::new(AppleOutcome::Failure);
        assert!(provider.authenticate(&request(SignInChannel::Sms)).is_ok());
        assert!(provider.authenticate(&request(SignInChannel::WhatsApp)).is_ok());
    }

    #[test]
    fn apple_failure_carries_channel_label() {
        let provider = SimulatedProvider::new(AppleOutcome::Failure);
        let err = provider
            .authenticate(&request(SignInChannel::Apple))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sign in with Apple failed: The authorization attempt failed."
        );
    }

    #[test]
    fn status_text_fills_missing_fields() {
        let profile = IdentityProfile {
            user_id: "abc".into(),
            email: None,
            full_name: Some("Ada".into()),
        };
        assert_eq!(
            profile.status_text(),
            "Signed in! ID: abc\nEmail: No email (existing user)\nName: Ada"
        );
    }
}
