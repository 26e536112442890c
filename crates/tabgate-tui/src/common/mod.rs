//! Shared helpers for the TUI.

mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{truncate_end, truncate_start};

/// Spinner frames for in-progress sign-in.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
