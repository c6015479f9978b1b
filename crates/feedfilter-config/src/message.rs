//! Messages from the configuration surface to a running filter.

use crate::settings::FilterSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Message delivered to the running filter.
///
/// Wire shape: `{ "action": "updateSettings", "keywords": [...], "caseSensitive": bool }`.
/// Missing or `null` fields mean an empty list and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ControlMessage {
    /// Replace the keyword settings and reprocess the page.
    #[serde(rename = "updateSettings", rename_all = "camelCase")]
    UpdateSettings {
        /// New keyword list.
        #[serde(default)]
        keywords: Option<Vec<String>>,
        /// New case-sensitivity flag.
        #[serde(default)]
        case_sensitive: Option<bool>,
    },
}

impl ControlMessage {
    /// Build an `updateSettings` message from editor state.
    pub fn update_settings(settings: &FilterSettings) -> Self {
        Self::UpdateSettings {
            keywords: Some(settings.keywords.clone()),
            case_sensitive: Some(settings.case_sensitive),
        }
    }

    /// Decode a JSON message. Unknown actions and malformed payloads are ignored.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!(error = %e, "Ignoring unrecognized control message");
                None
            }
        }
    }

    /// Settings carried by an `updateSettings` message.
    pub fn filter_settings(&self) -> FilterSettings {
        match self {
            Self::UpdateSettings {
                keywords,
                case_sensitive,
            } => FilterSettings {
                keywords: keywords.clone().unwrap_or_default(),
                case_sensitive: case_sensitive.unwrap_or(false),
            },
        }
    }
}

/// Errors when delivering a [`ControlMessage`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No filter is running to receive the message.
    #[error("No active filter is listening")]
    NoListener,
}

/// Delivers control messages to the active filter instance.
pub trait SettingsNotifier: Send + Sync {
    /// Send `message`. Fails with [`NotifyError::NoListener`] when nothing is running.
    fn notify(&self, message: ControlMessage) -> Result<(), NotifyError>;
}
