//! Client configuration.
//!
//! Holds the upstream base URL, cache TTL, page size and HTTP settings.
//! Configuration is read from `config.json` in the platform config directory
//! (e.g. `~/.config/octolens/config.json`); missing files and missing fields
//! fall back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Cached lookups are served for 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Upstream page length, also the "more pages may exist" signal.
pub const PAGE_SIZE: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub api_base: String,
    pub cache_ttl_secs: u64,
    pub page_size: u32,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            page_size: PAGE_SIZE,
            user_agent: "octolens".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl LensConfig {
    /// Load from the platform config directory, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: LensConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "octolens").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > 100 {
            return Err(LensError::Config(format!(
                "page_size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        if self.api_base.trim().is_empty() {
            return Err(LensError::Config("api_base must not be empty".to_string()));
        }
        Ok(())
    }
}
