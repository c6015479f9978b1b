//! Post text extraction.
//!
//! Sponsored and rich-media posts often carry their meaningful text only in
//! accessibility attributes, so the rendered text alone misses keywords.
//! The extracted string is the post's text content followed by the
//! `aria-label` and `title` values of content-bearing descendants and the
//! text of hashtag links.

use crate::dom::{Document, NodeId, Selector};
use crate::error::Result;
use feedfilter_config::RulesConfig;

const ARIA_LABEL: &str = "aria-label";
const TITLE: &str = "title";

/// Builds the text the matcher runs against.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    /// `None` when no content selectors are configured.
    content: Option<Selector>,
    hashtag: Selector,
}

impl TextExtractor {
    /// Compile the extractor from filter rules.
    pub fn from_rules(rules: &RulesConfig) -> Result<Self> {
        let content = if rules.content_selectors.is_empty() {
            None
        } else {
            Some(Selector::parse_any(&rules.content_selectors)?)
        };
        Ok(Self {
            content,
            hashtag: Selector::parse(&rules.hashtag_selector)?,
        })
    }

    /// Text for `post`, trimmed. No other normalization is applied.
    pub fn extract(&self, doc: &Document, post: NodeId) -> String {
        let mut text = doc.text_content(post);

        let content = self.content.iter().flat_map(|c| doc.select(post, c));
        for element in content {
            for name in [ARIA_LABEL, TITLE] {
                if let Some(value) = doc.attr(element, name).filter(|v| !v.is_empty()) {
                    text.push(' ');
                    text.push_str(value);
                }
            }
        }

        for link in doc.select(post, &self.hashtag) {
            text.push(' ');
            text.push_str(&doc.text_content(link));
        }

        text.trim().to_string()
    }
}
