//! Auth gate: the single authority for whether a tab is reachable.
//!
//! ## State machine
//!
//! ```text
//!            request_select(protected, signed out)
//!            open_sign_in (signed out)
//!   ┌──────┐ ─────────────────────────────────────▶ ┌───────────┐
//!   │ Idle │                                        │ Prompting │ ◀─┐ fail_sign_in
//!   └──────┘ ◀───────────────────────────────────── └───────────┘ ──┘ request_select(protected)
//!            complete_sign_in / cancel_sign_in /
//!            request_select(allowed) / logout
//! ```
//!
//! The gate owns the session flag and a single pending-intent slot. A new
//! blocked request overwrites the slot; nothing is queued. The slot is only
//! occupied while `Prompting`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::IdentityProviderFailure;
use crate::tabs::{Tab, TabId};

/// Gate prompt state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Idle,
    Prompting,
}

/// In-memory sign-in status for the lifetime of the shell.
#[derive(Debug, Clone, Default)]
pub struct Session {
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        self.signed_in_at.is_some()
    }

    /// When the current sign-in happened, if signed in.
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }
}

/// Outcome of a tab-selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Commit the selection.
    Allow(TabId),
    /// Keep the selection on `fallback` and present the sign-in prompt.
    Block { requested: TabId, fallback: TabId },
}

/// Navigation to apply after a successful sign-in.
///
/// `None` when sign-in was started directly rather than by a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume(pub Option<TabId>);

#[derive(Debug, Clone)]
pub struct AuthGate {
    session: Session,
    pending: Option<TabId>,
    state: GateState,
    fallback: TabId,
}

impl AuthGate {
    /// Creates a signed-out, idle gate that redirects blocked requests to
    /// `fallback`.
    pub fn new(fallback: TabId) -> Self {
        Self {
            session: Session::default(),
            pending: None,
            state: GateState::Idle,
            fallback,
        }
    }

    /// Decides whether `tab` may be selected right now.
    pub fn request_select(&mut self, tab: &Tab) -> Decision {
        if !tab.requires_auth || self.session.is_signed_in() {
            if self.state == GateState::Prompting {
                // Navigating to a reachable tab abandons the prompt.
                debug!(tab = %tab.id, pending = ?self.pending, "prompt abandoned by selection");
                self.pending = None;
                self.state = GateState::Idle;
            }
            return Decision::Allow(tab.id.clone());
        }

        if let Some(previous) = self.pending.replace(tab.id.clone())
            && previous != tab.id
        {
            debug!(%previous, tab = %tab.id, "pending intent replaced");
        }
        self.state = GateState::Prompting;
        debug!(tab = %tab.id, fallback = %self.fallback, "selection blocked");

        Decision::Block {
            requested: tab.id.clone(),
            fallback: self.fallback.clone(),
        }
    }

    /// Opens the prompt without a pending intent.
    ///
    /// Returns false (and changes nothing) when already signed in.
    pub fn open_sign_in(&mut self) -> bool {
        if self.session.is_signed_in() {
            return false;
        }
        self.state = GateState::Prompting;
        true
    }

    /// Marks the session signed in and hands back the pending destination.
    pub fn complete_sign_in(&mut self) -> Resume {
        if self.session.signed_in_at.is_none() {
            self.session.signed_in_at = Some(Utc::now());
        }
        self.state = GateState::Idle;
        let target = self.pending.take();
        debug!(resume = ?target, "sign-in completed");
        Resume(target)
    }

    /// Prompt dismissed without success: the pending intent is dropped.
    pub fn cancel_sign_in(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(%pending, "pending intent discarded");
        }
        self.state = GateState::Idle;
    }

    /// Identity flow failed. Pending intent and session are left alone so
    /// the user can retry from the same prompt.
    pub fn fail_sign_in(&mut self, reason: impl Into<String>) -> IdentityProviderFailure {
        let failure = IdentityProviderFailure::new(reason);
        warn!(reason = %failure.reason, pending = ?self.pending, "sign-in failed");
        failure
    }

    /// Ends the session. The gate returns to `Idle` with no pending intent.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.pending = None;
        self.state = GateState::Idle;
        debug!("signed out");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn pending_tab(&self) -> Option<&TabId> {
        self.pending.as_ref()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_prompting(&self) -> bool {
        self.state == GateState::Prompting
    }

    pub fn fallback(&self) -> &TabId {
        &self.fallback
    }
}
