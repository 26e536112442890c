//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! ## Module Structure
//!
//! - `sign_in.rs`: Sign-in sheet raised by the auth gate
//! - `prefix_picker.rs`: Country calling-code picker
//! - `alert.rs`: Single-button alert (identity failures)
//! - `goto_tab.rs`: Jump to a tab by id
//! - `render_utils.rs`: Shared rendering utilities for overlays

pub mod alert;
pub mod goto_tab;
pub mod prefix_picker;
pub mod render_utils;
pub mod sign_in;

pub use alert::AlertState;
use crossterm::event::KeyEvent;
pub use goto_tab::GoToTabState;
pub use prefix_picker::{PickerOutcome, PrefixPickerState};
use ratatui::Frame;
use ratatui::layout::Rect;
pub use sign_in::SignInSheetState;

use crate::mutations::StateMutation;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open a new overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayRequest {
    PrefixPicker,
    GoToTab,
    Alert { title: String, message: String },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug)]
pub enum Overlay {
    SignIn(SignInSheetState),
    PrefixPicker(PrefixPickerState),
    Alert(AlertState),
    GoToTab(GoToTabState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: usize) {
        match self {
            Overlay::SignIn(s) => s.render(frame, area, spinner),
            Overlay::PrefixPicker(p) => p.render(frame, area),
            Overlay::Alert(a) => a.render(frame, area),
            Overlay::GoToTab(g) => g.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::SignIn(s) => s.handle_key(key),
            Overlay::PrefixPicker(p) => match p.handle_key(key) {
                PickerOutcome::Stay => OverlayUpdate::stay(),
                PickerOutcome::Cancel => OverlayUpdate::close(),
                PickerOutcome::Chosen(index) => OverlayUpdate::close()
                    .with_mutations(vec![StateMutation::SetOnboardingPrefix(index)]),
            },
            Overlay::Alert(a) => {
                if a.handle_key(key) {
                    OverlayUpdate::close()
                } else {
                    OverlayUpdate::stay()
                }
            }
            Overlay::GoToTab(g) => g.handle_key(key),
        }
    }

    pub fn as_sign_in_mut(&mut self) -> Option<&mut SignInSheetState> {
        match self {
            Overlay::SignIn(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_sign_in(&self) -> bool {
        matches!(self, Overlay::SignIn(_))
    }
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, spinner: usize);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, spinner: usize) {
        if let Some(overlay) = self {
            overlay.render(frame, area, spinner);
        }
    }
}
