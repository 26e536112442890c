//! Auth feature reducer.
//!
//! Maps identity-provider results onto the shell's three sign-in outcomes.
//! The profile payload is kept for display only.

use tabgate_core::identity::IdentityError;
use tabgate_core::{NavigationShell, PromptResult, SignInOutcome};

use crate::events::IdentityResult;

/// What happened to the shell, plus what to tell the user.
#[derive(Debug)]
pub struct SignInReport {
    pub prompt: PromptResult,
    /// Identity status text on success.
    pub profile: Option<String>,
    pub message: String,
}

pub fn handle_identity_result(shell: &mut NavigationShell, result: IdentityResult) -> SignInReport {
    let IdentityResult { channel, outcome } = result;

    let (sign_in, profile) = match outcome {
        Ok(profile) => (SignInOutcome::Success, Some(profile.status_text())),
        Err(IdentityError::Cancelled) => (SignInOutcome::Cancelled, None),
        Err(err) => (SignInOutcome::Failure(err.to_string()), None),
    };

    let prompt = shell.on_sign_in_prompt_result(sign_in);
    let message = match &prompt {
        PromptResult::Resumed(Some(id)) => {
            let title = shell
                .tabs()
                .get(id.as_str())
                .map_or_else(|| id.to_string(), |tab| tab.title.clone());
            format!("Signed in with {}. Opened {title}.", channel.label())
        }
        PromptResult::Resumed(None) => format!("Signed in with {}.", channel.label()),
        PromptResult::Dismissed => "Sign-in cancelled.".to_string(),
        PromptResult::Failed(failure) => failure.reason.clone(),
    };

    SignInReport {
        prompt,
        profile,
        message,
    }
}

/// Result of a sign-in started from the onboarding screen.
#[derive(Debug, PartialEq, Eq)]
pub enum OnboardingReport {
    /// Identity status text.
    SignedIn(String),
    Cancelled,
    Failed(String),
}

/// Onboarding sign-in is reported to the user and never reaches the shell.
pub fn onboarding_report(result: IdentityResult) -> OnboardingReport {
    match result.outcome {
        Ok(profile) => OnboardingReport::SignedIn(profile.status_text().replace('\n', " · ")),
        Err(IdentityError::Cancelled) => OnboardingReport::Cancelled,
        Err(err) => OnboardingReport::Failed(err.to_string()),
    }
}
