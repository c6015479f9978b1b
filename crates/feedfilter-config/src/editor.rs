//! Headless configuration surface.
//!
//! Edits the keyword list and case-sensitivity flag, persists them, and
//! tells the running filter to reprocess. A missing filter is expected (the
//! page may not be open) and is not reported. A store that cannot be
//! written is reported as [`SaveOutcome::StorageUnavailable`] so the caller
//! can show it, but it never fails the caller.

use crate::message::{ControlMessage, SettingsNotifier};
use crate::settings::{FilterSettings, StoredSettings};
use crate::store::{load_settings, SettingsStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of [`SettingsEditor::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Settings were persisted (and the filter notified if one is running).
    Saved,
    /// The store rejected the write; nothing was sent to the filter.
    StorageUnavailable(String),
}

/// Editable copy of the keyword settings.
pub struct SettingsEditor {
    store: Arc<dyn SettingsStore>,
    settings: FilterSettings,
    hidden_count: u64,
}

impl SettingsEditor {
    /// Open the editor on the stored settings.
    pub async fn open(store: Arc<dyn SettingsStore>) -> Self {
        let loaded = load_settings(store.as_ref()).await;
        Self {
            store,
            settings: loaded.filter,
            hidden_count: loaded.hidden_count,
        }
    }

    /// Keywords in insertion order.
    pub fn keywords(&self) -> &[String] {
        &self.settings.keywords
    }

    /// Current settings.
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Hidden-post counter as loaded.
    pub fn hidden_count(&self) -> u64 {
        self.hidden_count
    }

    /// Add a keyword. Blank input and exact duplicates are rejected.
    pub fn add_keyword(&mut self, raw: &str) -> bool {
        let keyword = raw.trim();
        if keyword.is_empty() || self.settings.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.settings.keywords.push(keyword.to_string());
        true
    }

    /// Remove every occurrence of `keyword`. Returns whether anything was removed.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.settings.keywords.len();
        self.settings.keywords.retain(|k| k != keyword);
        self.settings.keywords.len() != before
    }

    /// Set the case-sensitivity flag.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.settings.case_sensitive = case_sensitive;
    }

    /// One-line summary, e.g. `3 keywords | 12 posts hidden`.
    pub fn stats_line(&self) -> String {
        format!(
            "{} keywords | {} posts hidden",
            self.settings.keywords.len(),
            self.hidden_count
        )
    }

    /// Persist the settings, then notify the running filter if there is one.
    pub async fn save(&self, notifier: Option<&dyn SettingsNotifier>) -> SaveOutcome {
        if let Err(e) = self.store.save(StoredSettings::filter(&self.settings)).await {
            warn!(error = %e, "Failed to save settings");
            return SaveOutcome::StorageUnavailable(e.to_string());
        }

        if let Some(notifier) = notifier {
            if let Err(e) = notifier.notify(ControlMessage::update_settings(&self.settings)) {
                debug!(error = %e, "Filter not running, settings apply on next start");
            }
        }

        SaveOutcome::Saved
    }
}
