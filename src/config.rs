//! Operator configuration for bssidctl
//!
//! Config file location: ~/.config/bssidctl/config.toml
//! Every key is optional. The file is only read, never written.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for the pause between activation attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// nmcli binary, looked up in PATH unless absolute
    pub nmcli_path: String,

    /// Seconds a single nmcli invocation may run before it is killed
    pub command_timeout_secs: u64,

    /// Pause between failed activation attempts, in milliseconds
    pub retry_delay_ms: u64,

    /// Restart the connection once more after the BSSID was written
    /// and the profile already restarted
    pub restart_after_set: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nmcli_path: "nmcli".to_string(),
            command_timeout_secs: 30,
            retry_delay_ms: 0,
            restart_after_set: true,
        }
    }
}

impl Config {
    /// Default config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("bssidctl");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the config at `path`, or the default location.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms).min(MAX_RETRY_DELAY)
    }
}
