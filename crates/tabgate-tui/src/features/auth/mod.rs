//! Auth feature slice: turns identity-exchange results into gate outcomes.

mod update;

pub use update::{OnboardingReport, SignInReport, handle_identity_result, onboarding_report};
