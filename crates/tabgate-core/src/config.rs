//! Configuration for tabgate.
//!
//! Loads configuration from ${TABGATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::identity::AppleOutcome;
use crate::phone::{PhonePrefix, default_prefixes};
use crate::tabs::{Tab, TabId, TabSet};

/// Template written by `tabgate config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tabgate configuration

# Log filter used when TABGATE_LOG is not set.
log_level = "info"

# Where the selection lands when a protected tab is blocked.
# Must name a tab that does not require sign-in.
fallback_tab = "home"

[sign_in]
default_prefix = "+39"
# Simulated identity-provider latency.
exchange_delay_ms = 600
# "success" or "failure" for the simulated Sign in with Apple flow.
apple_outcome = "success"

[[sign_in.prefixes]]
code = "+39"
country = "Italy"

[[sign_in.prefixes]]
code = "+44"
country = "UK"

[[sign_in.prefixes]]
code = "+1"
country = "USA"

[[tabs]]
id = "home"
title = "Home"
requires_auth = false

[[tabs]]
id = "cart"
title = "Cart"
requires_auth = true

[[tabs]]
id = "profile"
title = "Profile"
requires_auth = true
"#;

/// Sign-in surface configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignInConfig {
    pub default_prefix: String,
    pub exchange_delay_ms: u64,
    pub apple_outcome: AppleOutcome,
    pub prefixes: Vec<PhonePrefix>,
}

impl Default for SignInConfig {
    fn default() -> Self {
        Self {
            default_prefix: "+39".to_string(),
            exchange_delay_ms: 600,
            apple_outcome: AppleOutcome::Success,
            prefixes: default_prefixes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub fallback_tab: TabId,
    pub sign_in: SignInConfig,
    pub tabs: Vec<Tab>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            fallback_tab: TabId::new("home"),
            sign_in: SignInConfig::default(),
            tabs: Tab::standard(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Builds the validated tab set.
    ///
    /// # Errors
    /// Returns an error if the configured tabs or fallback are invalid.
    pub fn tab_set(&self) -> Result<TabSet> {
        TabSet::new(self.tabs.clone(), &self.fallback_tab).context("Invalid tab configuration")
    }

    /// Writes the default template to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

pub mod paths {
    //! Path resolution for tabgate configuration and logs.
    //!
    //! TABGATE_HOME resolution order:
    //! 1. TABGATE_HOME environment variable (if set)
    //! 2. ~/.config/tabgate (default)
    //! 3. ./.tabgate when no home directory can be determined

    use std::path::PathBuf;

    pub fn tabgate_home() -> PathBuf {
        if let Ok(home) = std::env::var("TABGATE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".tabgate"),
            |h| h.join(".config").join("tabgate"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tabgate_home().join("config.toml")
    }

    /// Returns the directory for rolling log files.
    pub fn logs_dir() -> PathBuf {
        tabgate_home().join("logs")
    }
}
