use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "crud-console.toml";
pub const CONFIG_PATH_ENV: &str = "CRUD_CONSOLE_CONFIG";
pub const BASE_URL_ENV: &str = "CONSOLE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
}

/// User-visible strings shown in the flash area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub success: String,
    pub deleted: String,
    pub liked: String,
    /// Shown when a failure carries no backend message.
    pub server_error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub messages: Messages,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            success: "SUCCESS".to_string(),
            deleted: "Product has been Deleted!".to_string(),
            liked: "Product like count increment by 1!".to_string(),
            server_error: "Server error!".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// A missing file falls back to defaults; an unreadable or invalid one
    /// is an error.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            log::info!("loading configuration from {}", path.display());
            Self::load_from_file(path)?
        } else {
            log::warn!("⚠️ Could not find {}, using defaults", path.display());
            Config::default()
        };

        config.apply_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConsoleError::Config(format!("failed to parse configuration: {}", e)))
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("backend base url overridden by {}", BASE_URL_ENV);
            self.backend.base_url = base_url.trim().to_string();
        }
    }
}
