//! Onboarding feature slice.
//!
//! The welcome screen and the phone/social form it shares with the sign-in
//! sheet.
//!
//! ## Module Structure
//!
//! - `state.rs`: form focus and onboarding screen state
//! - `update.rs`: form key handling
//! - `render.rs`: welcome screen and shared form lines

mod render;
mod state;
mod update;

pub use render::{BRAND_GREEN, form_lines, render_onboarding};
pub use state::{FormField, OnboardingState};
pub use update::{FormAction, OnboardingAction, handle_form_key, handle_onboarding_key};
