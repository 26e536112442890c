//! CLI entry and dispatch.

use anyhow::Result;
use clap::Parser;
use tabgate_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "tabgate")]
#[command(version = "0.1")]
#[command(about = "Onboarding and sign-in gated tab shell for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Drive the navigation shell headlessly and print a JSON snapshot per step
    Simulate {
        /// Steps: a tab id (or `tap:<id>`), `success`, `fail:<reason>`, `cancel`, `signin`, `logout`
        #[arg(value_name = "STEP", required = true)]
        steps: Vec<String>,
    },
    /// List the configured tabs
    Tabs,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // default to the interactive shell
        let config = Config::load()?;
        return commands::shell::run(&config);
    };

    match command {
        Commands::Simulate { steps } => {
            let config = Config::load()?;
            let _guard = commands::init_stderr_logging(&config)?;
            commands::simulate::run(&config, &steps)
        }
        Commands::Tabs => {
            let config = Config::load()?;
            let _guard = commands::init_stderr_logging(&config)?;
            commands::tabs::list(&config)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
