//! UI events consumed by the reducer.

use crossterm::event::Event;
use tabgate_core::identity::{IdentityError, IdentityProfile, SignInChannel};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Result payload of an identity exchange.
#[derive(Debug)]
pub struct IdentityResult {
    pub channel: SignInChannel,
    pub outcome: Result<IdentityProfile, IdentityError>,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic heartbeat (status expiry, spinner).
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    IdentityCompleted(TaskCompleted<IdentityResult>),
}
