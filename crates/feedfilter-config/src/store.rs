//! Settings storage.
//!
//! The store is a small key-value surface with three keys: `keywords`,
//! `caseSensitive` and `hiddenCount`. Reads return whatever is present,
//! writes merge the present fields of a [`StoredSettings`] into the store.
//!
//! Two backends are provided:
//! - [`MemorySettingsStore`]: process-local, can simulate an unavailable store
//! - [`FileSettingsStore`]: a TOML file, written atomically via a sibling temp file

use crate::error::{StoreError, StoreResult};
use crate::settings::{FilterSettings, Settings, StoredSettings};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read/write access to persisted settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read every stored value. Absent keys come back as `None`.
    async fn load(&self) -> StoreResult<StoredSettings>;

    /// Merge the present fields of `update` into the store.
    async fn save(&self, update: StoredSettings) -> StoreResult<()>;
}

/// Load settings at startup.
///
/// Absent values fall back to defaults. When the keyword list has never
/// been stored the default list is written back so the next reader sees
/// it. A store that cannot be read yields in-memory defaults; the filter
/// keeps working either way.
pub async fn load_settings(store: &dyn SettingsStore) -> Settings {
    match store.load().await {
        Ok(stored) => {
            let settings = Settings::from_stored(&stored);
            if stored.keywords.is_none() {
                info!(
                    keywords = settings.filter.keywords.len(),
                    "No stored keywords, seeding defaults"
                );
                let seed = StoredSettings {
                    keywords: Some(settings.filter.keywords.clone()),
                    ..StoredSettings::default()
                };
                if let Err(e) = store.save(seed).await {
                    warn!(error = %e, "Failed to persist default keywords");
                }
            }
            settings
        }
        Err(e) => {
            warn!(error = %e, "Settings store unavailable, using defaults");
            Settings {
                filter: FilterSettings::default(),
                hidden_count: 0,
            }
        }
    }
}

struct MemoryState {
    stored: StoredSettings,
    available: bool,
    writes: usize,
}

/// In-memory settings store.
///
/// Useful for tests and for running without a settings file. Can be
/// switched to "unavailable" to exercise degraded paths.
pub struct MemorySettingsStore {
    state: Mutex<MemoryState>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_settings(StoredSettings::default())
    }

    /// Create a store pre-populated with `stored`.
    pub fn with_settings(stored: StoredSettings) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                stored,
                available: true,
                writes: 0,
            }),
        }
    }

    /// Make every subsequent read and write fail (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.state.lock().available = available;
    }

    /// Current stored values.
    pub fn snapshot(&self) -> StoredSettings {
        self.state.lock().stored.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> StoreResult<StoredSettings> {
        let state = self.state.lock();
        if !state.available {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        Ok(state.stored.clone())
    }

    async fn save(&self, update: StoredSettings) -> StoreResult<()> {
        let mut state = self.state.lock();
        if !state.available {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        state.stored.merge(update);
        state.writes += 1;
        Ok(())
    }
}

/// Settings persisted as a TOML file.
///
/// A missing file reads as "nothing stored". Writes are serialized through
/// an async lock so concurrent partial updates do not drop each other.
pub struct FileSettingsStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSettingsStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoreResult<StoredSettings> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Settings file not found");
                Ok(StoredSettings::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> StoreResult<StoredSettings> {
        self.read().await
    }

    async fn save(&self, update: StoredSettings) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut stored = self.read().await?;
        stored.merge(update);
        let contents = toml::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!(path = %self.path.display(), "Settings written");
        Ok(())
    }
}
