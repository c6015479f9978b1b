//! Error types for configuration loading and settings storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config at {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::FilterConfig`].
    #[error("Failed to parse config at {path}: {message}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A field holds a value the filter cannot use.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Dotted field name.
        field: String,
        /// Description of the offending value.
        value: String,
    },
}

/// Errors raised by a [`crate::SettingsStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store cannot be reached at all.
    #[error("Settings store unavailable: {0}")]
    Unavailable(String),

    /// IO error while reading or writing the settings file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored settings could not be decoded.
    #[error("Failed to decode settings: {0}")]
    Decode(#[from] toml::de::Error),

    /// Settings could not be encoded for writing.
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Result type for settings store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
