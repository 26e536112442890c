//! Full-screen terminal shell for tabgate.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Context, Result};
pub use runtime::TuiRuntime;
use tabgate_core::config::Config;
use tracing::info;

/// Runs the interactive shell until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the tab configuration is
/// invalid, or the terminal fails.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive shell requires a terminal.\n\
             Use `tabgate simulate <step>...` for non-interactive use."
        );
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    let _guard = rt.enter();

    info!("starting interactive shell");
    let mut runtime = TuiRuntime::new(config)?;
    let result = runtime.run();
    drop(runtime);
    info!("interactive shell exited");
    result
}
