//! Core tabgate library (auth gate, navigation shell, config).
//!
//! The gate and shell are pure in-memory state machines. Everything that
//! touches the terminal or spawns tasks lives in `tabgate-tui`.

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod logging;
pub mod phone;
pub mod shell;
pub mod tabs;

pub use error::{IdentityProviderFailure, NavError, TabSetError};
pub use gate::{AuthGate, Decision, GateState, Resume, Session};
pub use shell::{NavigationShell, PromptResult, ShellSnapshot, SignInOutcome};
pub use tabs::{Tab, TabId, TabSet};
