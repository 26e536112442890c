//! Navigation shell: owns the tab set and the committed selection.
//!
//! Every selection change goes through the gate. The shell never decides
//! on its own whether a tab is reachable; it only applies decisions.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{IdentityProviderFailure, NavError};
use crate::gate::{AuthGate, Decision, GateState, Resume};
use crate::tabs::{Tab, TabId, TabSet};

/// What the sign-in surface reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    Success,
    Failure(String),
    Cancelled,
}

/// Result of forwarding a sign-in outcome to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Signed in; selection moved to the tab, if one was pending.
    Resumed(Option<TabId>),
    /// Prompt closed without signing in.
    Dismissed,
    /// Prompt stays open; reason should be shown to the user.
    Failed(IdentityProviderFailure),
}

/// Observable shell state for renderers and the headless simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellSnapshot {
    pub signed_in: bool,
    pub selected: TabId,
    pub pending: Option<TabId>,
    pub prompt_visible: bool,
    pub gate: GateState,
}

#[derive(Debug, Clone)]
pub struct NavigationShell {
    tabs: TabSet,
    selected: TabId,
    gate: AuthGate,
}

impl NavigationShell {
    /// Creates a signed-out shell with the fallback tab selected.
    pub fn new(tabs: TabSet) -> Self {
        let fallback = tabs.fallback().id.clone();
        Self {
            selected: fallback.clone(),
            gate: AuthGate::new(fallback),
            tabs,
        }
    }

    /// Handles a tap on the tab named `id`.
    ///
    /// # Errors
    /// Returns `NavError::UnknownTab` if `id` is not in the tab set. The
    /// request never reaches the gate and the selection is unchanged.
    pub fn on_tab_tapped(&mut self, id: &str) -> Result<Decision, NavError> {
        let Some(tab) = self.tabs.get(id) else {
            warn!(tab = id, "rejected unknown tab");
            return Err(NavError::UnknownTab(id.to_string()));
        };

        let decision = self.gate.request_select(tab);
        match &decision {
            Decision::Allow(id) => self.selected = id.clone(),
            Decision::Block { fallback, .. } => self.selected = fallback.clone(),
        }
        Ok(decision)
    }

    /// Forwards the sign-in surface's outcome to the gate and applies any
    /// resulting navigation.
    pub fn on_sign_in_prompt_result(&mut self, outcome: SignInOutcome) -> PromptResult {
        match outcome {
            SignInOutcome::Success => {
                let Resume(target) = self.gate.complete_sign_in();
                if let Some(id) = &target {
                    self.selected = id.clone();
                }
                PromptResult::Resumed(target)
            }
            SignInOutcome::Failure(reason) => PromptResult::Failed(self.gate.fail_sign_in(reason)),
            SignInOutcome::Cancelled => {
                self.gate.cancel_sign_in();
                PromptResult::Dismissed
            }
        }
    }

    /// Presents the prompt with no pending intent. No-op when signed in.
    pub fn open_sign_in(&mut self) -> bool {
        self.gate.open_sign_in()
    }

    /// Ends the session, moving off a protected tab if needed.
    pub fn logout(&mut self) {
        self.gate.logout();
        if self.selected_tab().requires_auth {
            debug!(from = %self.selected, "left protected tab on sign-out");
            self.selected = self.tabs.fallback().id.clone();
        }
    }

    pub fn selected_id(&self) -> &TabId {
        &self.selected
    }

    pub fn selected_tab(&self) -> &Tab {
        self.tabs
            .get(self.selected.as_str())
            .unwrap_or_else(|| self.tabs.fallback())
    }

    pub fn prompt_visible(&self) -> bool {
        self.gate.is_prompting()
    }

    pub fn is_signed_in(&self) -> bool {
        self.gate.is_signed_in()
    }

    pub fn pending_tab(&self) -> Option<&TabId> {
        self.gate.pending_tab()
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            signed_in: self.is_signed_in(),
            selected: self.selected.clone(),
            pending: self.pending_tab().cloned(),
            prompt_visible: self.prompt_visible(),
            gate: self.gate.state(),
        }
    }
}
