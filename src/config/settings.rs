//! Application and station configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Station being read
    #[serde(default)]
    pub station: StationConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "wl-sens", "wl-sens")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config {} has version {}, newer than supported {}",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            station: StationConfig::default(),
        }
    }
}

/// Station configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Label used to prefix sensor names
    #[serde(default = "default_device_label")]
    pub device_label: String,
    /// Stable id used to build sensor unique ids
    #[serde(default = "default_device_id")]
    pub device_id: String,
    /// Poll interval in seconds (0 = not configured)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// JSON snapshot written by the station poller
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

fn default_device_label() -> String {
    "WeatherLink Live".to_string()
}

fn default_device_id() -> String {
    "weatherlink".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl StationConfig {
    /// Configured poll interval, `None` when disabled
    pub fn poll_interval(&self) -> Option<Duration> {
        match self.poll_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            device_label: default_device_label(),
            device_id: default_device_id(),
            poll_interval_secs: default_poll_interval_secs(),
            snapshot_path: None,
        }
    }
}
