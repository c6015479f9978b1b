//! # feedfilter Core
//!
//! Keyword-driven post filtering over a mutable document tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌───────────────┐   ┌─────────┐   ┌─────────────────┐
//! │ PostLocator │──▶│ TextExtractor │──▶│ matcher │──▶│ HideShowEngine  │
//! └─────────────┘   └───────────────┘   └─────────┘   └─────────────────┘
//!        ▲                                                     │
//!        └───────────────── PostFilter (ledger) ───────────────┘
//! ```
//!
//! - [`dom`]: `scraper`-backed document with node handles, CSS selectors,
//!   HTML import/serialization and a mutation observer
//! - [`matcher`]: literal substring matching with optional case folding
//! - [`PostLocator`]: boundary-marker heuristic with a selector fallback
//! - [`TextExtractor`]: visible text plus accessibility attributes and hashtags
//! - [`HideShowEngine`]: the hidden annotation, reveal control and counter
//! - [`PostFilter`]: full, incremental and reset passes
//!
//! ## Quick Start
//!
//! ```rust
//! use feedfilter_config::{MemorySettingsStore, RulesConfig};
//! use feedfilter_core::{Document, PostFilter};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> feedfilter_core::Result<()> {
//! let mut doc = Document::parse_html(
//!     r#"<body><h2 class="feed-skip-link__container">Feed post</h2><div>Promoted by Acme</div></body>"#,
//! );
//! let store = Arc::new(MemorySettingsStore::new());
//! let mut filter = PostFilter::start(store, &RulesConfig::default()).await?;
//!
//! let report = filter.full_pass(&mut doc).await?;
//! assert_eq!(report.hidden, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dom;
pub mod engine;
pub mod error;
mod extractor;
mod locator;
pub mod matcher;
mod pipeline;

pub use dom::{Document, MutationRecord, NodeId, Selector, SelectorError};
pub use engine::HideShowEngine;
pub use error::{Error, Result};
pub use extractor::TextExtractor;
pub use locator::{LocateStrategy, PostLocator};
pub use pipeline::{ClickOutcome, PassReport, PostFilter, PostOutcome};
