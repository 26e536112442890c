//! Error types for the navigation core.
//!
//! None of these are fatal: the shell reports them and keeps running.

use thiserror::Error;

use crate::tabs::TabId;

/// A tab-selection request the shell refused before it reached the gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("unknown tab requested: {0:?}")]
    UnknownTab(String),
}

/// Failure reported by the identity-provider flow.
///
/// Surfaced to the user; the gate keeps its pending intent so the user can
/// retry from the same prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct IdentityProviderFailure {
    pub reason: String,
}

impl IdentityProviderFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Reasons a tab set cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabSetError {
    #[error("tab set is empty")]
    Empty,
    #[error("duplicate tab id: {0}")]
    Duplicate(TabId),
    #[error("fallback tab {0} is not in the tab set")]
    UnknownFallback(TabId),
    #[error("fallback tab {0} requires sign-in")]
    ProtectedFallback(TabId),
}
