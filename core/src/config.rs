//! Configuration for the panel helpers.
//!
//! Stored in JSON format at `~/.panelkit/config.json`. Everything has a
//! default, so a missing or partial file still yields a usable config.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::probe::{PortRange, RetryPolicy, DEFAULT_MAX_SWEEPS};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// First candidate port for the panel web server.
    #[serde(default = "default_probe_start", rename = "probeStart")]
    pub probe_start: u16,

    /// One past the last candidate port.
    #[serde(default = "default_probe_end", rename = "probeEnd")]
    pub probe_end: u16,

    /// Full sweeps over the range before the probe gives up.
    #[serde(default = "default_max_sweeps", rename = "maxSweeps")]
    pub max_sweeps: u32,

    /// Pause between sweeps of a fully busy range, in milliseconds.
    #[serde(default = "default_sweep_delay_ms", rename = "sweepDelayMs")]
    pub sweep_delay_ms: u64,

    /// Port the auxiliary monitor is expected to listen on.
    #[serde(default = "default_monitor_port", rename = "monitorPort")]
    pub monitor_port: u16,

    /// Program that starts the auxiliary monitor.
    #[serde(default = "default_monitor_command", rename = "monitorCommand")]
    pub monitor_command: String,

    /// Arguments passed to the monitor command.
    #[serde(default, rename = "monitorArgs")]
    pub monitor_args: Vec<String>,

    /// Grace period after spawning before the browser opens, in milliseconds.
    #[serde(default = "default_monitor_startup_delay_ms", rename = "monitorStartupDelayMs")]
    pub monitor_startup_delay_ms: u64,
}

fn default_probe_start() -> u16 {
    7860
}

fn default_probe_end() -> u16 {
    7865
}

fn default_max_sweeps() -> u32 {
    DEFAULT_MAX_SWEEPS
}

fn default_sweep_delay_ms() -> u64 {
    100
}

fn default_monitor_port() -> u16 {
    6006
}

fn default_monitor_command() -> String {
    "launch_monitor.sh".to_string()
}

fn default_monitor_startup_delay_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_start: default_probe_start(),
            probe_end: default_probe_end(),
            max_sweeps: default_max_sweeps(),
            sweep_delay_ms: default_sweep_delay_ms(),
            monitor_port: default_monitor_port(),
            monitor_command: default_monitor_command(),
            monitor_args: Vec::new(),
            monitor_startup_delay_ms: default_monitor_startup_delay_ms(),
        }
    }
}

impl Config {
    /// The configured probe range, validated.
    pub fn port_range(&self) -> Result<PortRange> {
        PortRange::new(self.probe_start, self.probe_end)
    }

    /// The configured bounded retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::Bounded {
            max_sweeps: self.max_sweeps,
        }
    }

    pub fn sweep_delay(&self) -> Duration {
        Duration::from_millis(self.sweep_delay_ms)
    }
}

/// Configuration store for the panel helpers.
///
/// Handles reading and writing configuration to `~/.panelkit/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.panelkit/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_dir = home.join(".panelkit");
        let config_path = config_dir.join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path.parent().unwrap().to_path_buf()
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        // Ensure config directory exists
        let config_dir = self.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        // Serialize with pretty printing
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }
}
