//! CLI command handlers.

pub mod config;
pub mod shell;
pub mod simulate;
pub mod tabs;

use anyhow::Result;
use tabgate_core::config::Config;
use tabgate_core::logging::{self, LogTarget};
use tabgate_core::logging::WorkerGuard;

/// Headless commands keep stdout for their output and log to stderr.
pub fn init_stderr_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    logging::init(&config.log_level, LogTarget::Stderr)
}
