//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── screen: Screen           (onboarding or tab shell)
//! │   ├── shell: NavigationShell   (selected tab + auth gate, remounted per visit)
//! │   ├── onboarding: OnboardingState
//! │   ├── task_seq / tasks         (identity exchange lifecycle)
//! │   └── status / identity_status (display only)
//! └── overlay: Option<Overlay>     (sign-in sheet, pickers, alerts)
//! ```
//!
//! Overlays live next to `TuiState` rather than inside it so overlay
//! handlers can borrow both at once.

use std::time::{Duration, Instant};

use anyhow::Result;
use tabgate_core::{NavigationShell, TabSet};
use tabgate_core::config::{Config, SignInConfig};

use crate::common::{TaskSeq, Tasks};
use crate::features::onboarding::OnboardingState;
use crate::mutations::SignInOrigin;
use crate::overlays::Overlay;

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            tui: TuiState::new(config)?,
            overlay: None,
        })
    }
}

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Tabs,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + STATUS_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub screen: Screen,
    /// Tab selection and the auth gate. Lives for one visit to the tab shell.
    pub shell: NavigationShell,
    /// Validated tab set each fresh shell is built from.
    pub tabs: TabSet,
    pub onboarding: OnboardingState,
    /// Sign-in form defaults and exchange timing.
    pub sign_in: SignInConfig,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Which surface started the running identity exchange.
    pub exchange_origin: Option<SignInOrigin>,
    /// Transient one-line message.
    pub status: Option<StatusMessage>,
    /// Identity details from the last successful sign-in.
    pub identity_status: Option<String>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    /// Builds the initial state. Fails if the configured tab set is invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let tabs = config.tab_set()?;
        Ok(Self {
            should_quit: false,
            screen: Screen::Onboarding,
            shell: NavigationShell::new(tabs.clone()),
            tabs,
            onboarding: OnboardingState::new(&config.sign_in),
            sign_in: config.sign_in.clone(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            exchange_origin: None,
            status: None,
            identity_status: None,
            spinner_frame: 0,
        })
    }

    /// Replaces the shell with a fresh one: signed out, Home selected.
    pub fn mount_shell(&mut self) {
        self.shell = NavigationShell::new(self.tabs.clone());
        self.identity_status = None;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    /// Drops the status message once it has expired.
    pub fn expire_status(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.is_expired(now))
        {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_onboarding_signed_out() {
        let tui = TuiState::new(&Config::default()).unwrap();
        assert_eq!(tui.screen, Screen::Onboarding);
        assert!(!tui.shell.is_signed_in());
        assert_eq!(tui.shell.selected_id().as_str(), "home");
        assert!(!tui.tasks.is_any_running());
    }

    #[test]
    fn mount_shell_starts_signed_out_on_home() {
        let mut tui = TuiState::new(&Config::default()).unwrap();
        let _ = tui.shell.on_sign_in_prompt_result(tabgate_core::SignInOutcome::Success);
        tui.shell.on_tab_tapped("cart").unwrap();
        tui.identity_status = Some("Signed in! ID: 1".into());

        tui.mount_shell();
        assert!(!tui.shell.is_signed_in());
        assert_eq!(tui.shell.selected_id().as_str(), "home");
        assert!(tui.identity_status.is_none());
    }

    #[test]
    fn status_expires() {
        let mut tui = TuiState::new(&Config::default()).unwrap();
        tui.set_status("hello");
        tui.expire_status(Instant::now());
        assert!(tui.status.is_some());

        tui.expire_status(Instant::now() + STATUS_TTL);
        assert!(tui.status.is_none());
    }
}
