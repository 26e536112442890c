//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while it runs, so interactive sessions log to
//! a daily rolling file. Headless commands log to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Env var that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "TABGATE_LOG";

#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Daily rolling `tabgate.log` files in this directory.
    File(PathBuf),
    Stderr,
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the life of the process so buffered
/// file output is flushed on exit.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a subscriber is already installed.
pub fn init(default_level: &str, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level {default_level:?}"))?,
    };

    match target {
        LogTarget::File(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log dir {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, "tabgate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(None)
        }
    }
}
