//! CSS selectors, parsed and matched by `scraper`.
//!
//! Combinators look at the full ancestor chain, not just the subtree a
//! query is scoped to, matching `querySelectorAll`.

use super::{Document, NodeId};
use std::fmt;
use thiserror::Error;

/// Selector that failed to parse.
///
/// Owns the source text and the parser's message, so it can travel in
/// error chains after the input is gone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    /// Source text.
    pub selector: String,
    /// Parser message.
    pub reason: String,
}

/// Parsed selector list.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    inner: scraper::Selector,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let inner = scraper::Selector::parse(source).map_err(|e| SelectorError {
            selector: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.trim().to_string(),
            inner,
        })
    }

    /// Parse several selectors into one list matching any of them.
    ///
    /// An empty slice is a parse error; callers decide what "no selectors"
    /// means for them.
    pub fn parse_any<S: AsRef<str>>(sources: &[S]) -> Result<Self, SelectorError> {
        let joined = sources
            .iter()
            .map(|s| s.as_ref().trim())
            .collect::<Vec<_>>()
            .join(", ");
        Self::parse(&joined)
    }

    /// Source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` is an element matching any alternative.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.element_ref(node)
            .is_some_and(|element| self.inner.matches(&element))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
