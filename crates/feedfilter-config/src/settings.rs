//! Keyword settings and the hidden-post counter.

use serde::{Deserialize, Serialize};

/// Keywords seeded on first run, before the user has saved anything.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["formueskatt", "Promotert av", "Promoted by"];

/// Settings exactly as they sit in the store.
///
/// `None` means the key has never been written. Writes are partial: only
/// the fields that are `Some` replace what the store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    /// Ordered keyword list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Whether matching is case sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    /// Number of posts currently counted as hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_count: Option<u64>,
}

impl StoredSettings {
    /// A write carrying only the keyword settings.
    pub fn filter(settings: &FilterSettings) -> Self {
        Self {
            keywords: Some(settings.keywords.clone()),
            case_sensitive: Some(settings.case_sensitive),
            hidden_count: None,
        }
    }

    /// A write carrying only the hidden-post counter.
    pub fn hidden_count(count: u64) -> Self {
        Self {
            hidden_count: Some(count),
            ..Self::default()
        }
    }

    /// Overlay the present fields of `update` onto `self`.
    pub fn merge(&mut self, update: StoredSettings) {
        if let Some(keywords) = update.keywords {
            self.keywords = Some(keywords);
        }
        if let Some(case_sensitive) = update.case_sensitive {
            self.case_sensitive = Some(case_sensitive);
        }
        if let Some(hidden_count) = update.hidden_count {
            self.hidden_count = Some(hidden_count);
        }
    }
}

/// The part of the settings the matcher consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    /// Keywords in insertion order. Duplicates are allowed but pointless.
    pub keywords: Vec<String>,
    /// Whether matching is case sensitive.
    pub case_sensitive: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            case_sensitive: false,
        }
    }
}

impl FilterSettings {
    /// Settings with the given keywords, case insensitive.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    /// Builder-style case sensitivity toggle.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

/// Fully resolved settings, as used at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Keyword settings.
    pub filter: FilterSettings,
    /// Persisted hidden-post counter.
    pub hidden_count: u64,
}

impl Settings {
    /// Resolve stored values, falling back to defaults for absent keys.
    ///
    /// A stored empty keyword list is kept as empty, only an absent list
    /// falls back to [`DEFAULT_KEYWORDS`].
    pub fn from_stored(stored: &StoredSettings) -> Self {
        let defaults = FilterSettings::default();
        Self {
            filter: FilterSettings {
                keywords: stored.keywords.clone().unwrap_or(defaults.keywords),
                case_sensitive: stored.case_sensitive.unwrap_or(defaults.case_sensitive),
            },
            hidden_count: stored.hidden_count.unwrap_or(0),
        }
    }
}
