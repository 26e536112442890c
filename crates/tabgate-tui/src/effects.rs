//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Cancellation is decided by the reducer (`UiEffect::CancelTask`) and
//! carried out by the runtime calling `token.cancel()`.

use tabgate_core::identity::SignInChannel;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the identity exchange for a sign-in attempt.
    StartIdentityExchange {
        task: TaskId,
        channel: SignInChannel,
        phone: Option<String>,
    },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
