//! State mutations requested by overlays and feature handlers.
//!
//! Overlays only see `&TuiState`; anything they want changed outside their
//! own state is returned as a `StateMutation` and applied by the reducer.

use tabgate_core::SignInOutcome;
use tabgate_core::identity::SignInChannel;

/// Where a sign-in attempt was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOrigin {
    Onboarding,
    Sheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    /// Tap the tab with this id (unknown ids are rejected by the shell).
    TapTab(String),
    /// Start an identity exchange.
    BeginSignIn {
        origin: SignInOrigin,
        channel: SignInChannel,
        phone: Option<String>,
    },
    /// Report a sign-in outcome to the shell without an exchange.
    PromptOutcome(SignInOutcome),
    /// Select a country prefix on the onboarding form.
    SetOnboardingPrefix(usize),
    /// Show a transient message in the status line.
    Status(String),
}
