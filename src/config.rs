//! Dashboard settings loaded from `dashboard.toml`.
//!
//! Every field has a default, so a missing or partial file is fine. The file
//! lives in the platform configuration directory for the app.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 850.0,
            min_width: 1000.0,
            min_height: 650.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 8 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window: WindowConfig,
    pub cache: CacheConfig,
}

impl DashboardConfig {
    fn normalized(mut self) -> Self {
        self.cache.max_entries = self.cache.max_entries.max(1);
        self
    }
}

/// Location of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "poverty_dashboard")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load settings, falling back to defaults when the file is missing or bad.
pub fn load_or_default() -> DashboardConfig {
    let Some(path) = config_path() else {
        return DashboardConfig::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; using default settings");
            DashboardConfig::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<DashboardConfig, ConfigError> {
    if !path.exists() {
        return Ok(DashboardConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DashboardConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded settings from {}", path.display());
    Ok(config.normalized())
}
