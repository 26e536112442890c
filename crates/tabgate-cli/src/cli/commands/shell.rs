//! Default command: the interactive shell.

use anyhow::Result;
use tabgate_core::config::Config;

#[cfg(feature = "tui")]
pub fn run(config: &Config) -> Result<()> {
    use tabgate_core::config::paths;
    use tabgate_core::logging::{self, LogTarget};

    // The shell owns the terminal, so logs go to a file.
    let _guard = logging::init(&config.log_level, LogTarget::File(paths::logs_dir()))?;
    tabgate_tui::run_interactive(config)
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: &Config) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive shell (built without the `tui` feature).\n\
         Use `tabgate simulate <step>...` instead."
    )
}
