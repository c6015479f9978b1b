//! Loading `config.toml`.
//!
//! Resolution order:
//! 1. An explicit path (CLI `--config`); it must exist
//! 2. `~/.config/feedfilter/config.toml`; optional
//! 3. Built-in defaults

use crate::error::ConfigError;
use crate::rules::RulesConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "feedfilter";
const CONFIG_FILE: &str = "config.toml";
const SETTINGS_FILE: &str = "settings.toml";

/// Where settings are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Settings file. Defaults to `~/.config/feedfilter/settings.toml`.
    pub path: Option<PathBuf>,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Selector vocabulary and labels.
    pub rules: RulesConfig,
    /// Settings storage.
    pub store: StoreConfig,
}

impl FilterConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path that cannot be read is an error. A missing default
    /// config file is not: defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.rules.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: FilterConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Resolved settings file path.
    ///
    /// Falls back to `feedfilter-settings.toml` in the working directory
    /// when the platform has no config directory.
    pub fn settings_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE)))
            .unwrap_or_else(|| PathBuf::from("feedfilter-settings.toml"))
    }
}

/// Default location of `config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
