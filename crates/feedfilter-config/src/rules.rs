//! Filter rules: the selector vocabulary used to find posts and their text.
//!
//! Defaults describe the markup of the feed the filter was built for. Every
//! field can be overridden in the `[rules]` table of `config.toml` when the
//! feed changes shape.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Selector rules and notice labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Skip-navigation landmark that starts each feed section.
    pub boundary_selector: String,

    /// Tag of the block-level container holding one post.
    pub container_tag: String,

    /// Fallback selectors for feed entries, used when no boundary yields a post.
    pub post_selectors: Vec<String>,

    /// Descendants whose `aria-label` / `title` attributes carry post text.
    pub content_selectors: Vec<String>,

    /// Hashtag links whose text is appended to the post text.
    pub hashtag_selector: String,

    /// Text shown in the reveal control of a hidden post.
    pub notice_label: String,

    /// Label of the reveal button.
    pub reveal_label: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            boundary_selector: "h2.feed-skip-link__container".to_string(),
            container_tag: "div".to_string(),
            post_selectors: vec![
                r#"[data-urn*="urn:li:activity"]"#.to_string(),
                ".feed-shared-update-v2".to_string(),
                ".occludable-update".to_string(),
                r#"[data-id*="urn:li:activity"]"#.to_string(),
            ],
            content_selectors: vec![
                ".feed-shared-text".to_string(),
                ".feed-shared-update-v2__description".to_string(),
                ".feed-shared-article__description".to_string(),
                ".update-components-text".to_string(),
                r#"[data-test-id="main-feed-activity-card"] span[dir="ltr"]"#.to_string(),
                ".feed-shared-text .break-words".to_string(),
                "[aria-label]".to_string(),
                "[title]".to_string(),
            ],
            hashtag_selector: r#"a[href*="/hashtag/"]"#.to_string(),
            notice_label: "Post hidden by feed filter".to_string(),
            reveal_label: "Show".to_string(),
        }
    }
}

impl RulesConfig {
    /// Check the fields selector parsing cannot catch.
    ///
    /// Selector syntax is validated when the core compiles the rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boundary_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.boundary_selector".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        let tag = self.container_tag.trim();
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::InvalidValue {
                field: "rules.container_tag".to_string(),
                value: format!("'{}' is not a tag name", self.container_tag),
            });
        }

        if self.hashtag_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.hashtag_selector".to_string(),
                value: "must not be empty".to_string(),
            });
        }

        for (name, list) in [
            ("post_selectors", &self.post_selectors),
            ("content_selectors", &self.content_selectors),
        ] {
            if let Some(i) = list.iter().position(|s| s.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("rules.{}[{}]", name, i),
                    value: "must not be blank".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(RulesConfig::default().validate().is_ok());
    }

    #[test]
    fn test_container_tag_must_be_a_tag_name() {
        let rules = RulesConfig {
            container_tag: "div.post".to_string(),
            ..RulesConfig::default()
        };

        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("rules.container_tag"));
    }

    #[test]
    fn test_blank_selector_entries_are_rejected() {
        let rules = RulesConfig {
            post_selectors: vec!["div.post".to_string(), "  ".to_string()],
            ..RulesConfig::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("rules.post_selectors[1]"));

        let rules = RulesConfig {
            content_selectors: vec![String::new()],
            ..RulesConfig::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("rules.content_selectors[0]"));
    }

    #[test]
    fn test_empty_selector_lists_are_valid() {
        let rules = RulesConfig {
            post_selectors: Vec::new(),
            content_selectors: Vec::new(),
            ..RulesConfig::default()
        };

        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_rules_table_keeps_other_defaults() {
        let rules: RulesConfig = toml::from_str(r#"boundary_selector = "h3.section""#)
            .expect("Failed to parse rules");

        assert_eq!(rules.boundary_selector, "h3.section");
        assert_eq!(rules.container_tag, "div");
        assert_eq!(rules.post_selectors.len(), 4);
    }
}
