//! CLI configuration: the config file plus command-line overrides.

use anyhow::{Context, Result};
use feedfilter_config::{FileSettingsStore, FilterConfig, RulesConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Parsed config file (or defaults).
    pub filter: FilterConfig,
    /// Settings file in effect.
    pub settings_path: PathBuf,
}

impl CliConfig {
    /// Load the config file and apply overrides.
    ///
    /// `settings` (from `--settings` or `FEEDFILTER_SETTINGS`) wins over the
    /// `[store]` section of the config file.
    pub fn load(config_file: Option<PathBuf>, settings: Option<PathBuf>) -> Result<Self> {
        let filter = FilterConfig::load(config_file.as_deref()).with_context(|| match &config_file {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load default config".to_string(),
        })?;

        let settings_path = settings.unwrap_or_else(|| filter.settings_path());
        debug!(settings = %settings_path.display(), "Resolved settings path");

        Ok(Self {
            filter,
            settings_path,
        })
    }

    /// Filter rules from the config file.
    pub fn rules(&self) -> &RulesConfig {
        &self.filter.rules
    }

    /// Settings file in effect.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Store backed by the settings file.
    pub fn store(&self) -> Arc<FileSettingsStore> {
        Arc::new(FileSettingsStore::new(self.settings_path.clone()))
    }
}
