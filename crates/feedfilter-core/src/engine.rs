//! Hide/show engine.
//!
//! A hidden post keeps its place in the tree. It carries a marker attribute
//! (the idempotence check), a presentation class (the styling hook), and a
//! reveal control inserted as its first child:
//!
//! ```text
//! div.feed-filter-notice
//!   └─ div.feed-filter-notice-content
//!        ├─ span  "Post hidden by feed filter"
//!        └─ button.feed-filter-show-btn  "Show"
//! ```
//!
//! The hidden-post counter lives here and is mirrored to the settings store
//! on every change. Store failures are logged; the in-memory count stays
//! authoritative.
//!
//! The document never frees detached nodes, so reveal controls removed by
//! [`HideShowEngine::show`] are kept and reused by the next hide instead of
//! building a fresh one each time.

use crate::dom::{Document, NodeId, Selector};
use crate::error::Result;
use feedfilter_config::{RulesConfig, SettingsStore, StoredSettings};
use std::sync::Arc;
use tracing::{debug, warn};

/// Marker attribute set on hidden posts.
pub const HIDDEN_ATTR: &str = "data-feed-filter";
/// Value of [`HIDDEN_ATTR`] on hidden posts.
pub const HIDDEN_VALUE: &str = "hidden";
/// Presentation class applied to hidden posts.
pub const HIDDEN_CLASS: &str = "feed-filter-hidden";
/// Class of the reveal control.
pub const NOTICE_CLASS: &str = "feed-filter-notice";
/// Class of the reveal control's inner wrapper.
pub const NOTICE_CONTENT_CLASS: &str = "feed-filter-notice-content";
/// Class of the reveal button.
pub const SHOW_BUTTON_CLASS: &str = "feed-filter-show-btn";

/// Applies and clears the hidden annotation and keeps the counter.
pub struct HideShowEngine {
    store: Arc<dyn SettingsStore>,
    hidden_count: u64,
    notice_label: String,
    reveal_label: String,
    hidden_marker: Selector,
    notice: Selector,
    show_button: Selector,
    spare_notices: Vec<NodeId>,
}

impl HideShowEngine {
    /// Create an engine starting from a persisted `hidden_count`.
    pub fn new(store: Arc<dyn SettingsStore>, hidden_count: u64, rules: &RulesConfig) -> Result<Self> {
        Ok(Self {
            store,
            hidden_count,
            notice_label: rules.notice_label.clone(),
            reveal_label: rules.reveal_label.clone(),
            hidden_marker: Selector::parse(&format!("[{}=\"{}\"]", HIDDEN_ATTR, HIDDEN_VALUE))?,
            notice: Selector::parse(&format!(".{}", NOTICE_CLASS))?,
            show_button: Selector::parse(&format!(".{}", SHOW_BUTTON_CLASS))?,
            spare_notices: Vec::new(),
        })
    }

    /// Current hidden-post counter.
    pub fn hidden_count(&self) -> u64 {
        self.hidden_count
    }

    /// Whether `post` carries the hidden marker.
    pub fn is_hidden(&self, doc: &Document, post: NodeId) -> bool {
        doc.attr(post, HIDDEN_ATTR) == Some(HIDDEN_VALUE)
    }

    /// Every node in the document carrying the hidden marker.
    pub fn hidden_posts(&self, doc: &Document) -> Vec<NodeId> {
        doc.select(doc.root(), &self.hidden_marker)
    }

    /// Hide `post`. Returns false if it was already hidden.
    pub async fn hide(&mut self, doc: &mut Document, post: NodeId) -> Result<bool> {
        if self.is_hidden(doc, post) {
            return Ok(false);
        }

        doc.add_class(post, HIDDEN_CLASS)?;
        doc.set_attr(post, HIDDEN_ATTR, HIDDEN_VALUE)?;

        self.hidden_count += 1;
        self.persist_count().await;

        self.attach_notice(doc, post)?;
        debug!(%post, hidden_count = self.hidden_count, "Post hidden");
        Ok(true)
    }

    /// Clear the annotation and remove the reveal control.
    ///
    /// Unconditional; does not touch the counter. Returns whether the post
    /// was marked hidden.
    pub fn show(&mut self, doc: &mut Document, post: NodeId) -> bool {
        let was_hidden = self.is_hidden(doc, post);
        doc.remove_attr(post, HIDDEN_ATTR);
        doc.remove_class(post, HIDDEN_CLASS);
        if let Some(notice) = doc.select_first(post, &self.notice) {
            doc.detach(notice);
            self.spare_notices.push(notice);
        }
        was_hidden
    }

    /// Show `post` and decrement the counter (floored at 0).
    pub async fn reveal(&mut self, doc: &mut Document, post: NodeId) {
        self.show(doc, post);
        self.hidden_count = self.hidden_count.saturating_sub(1);
        self.persist_count().await;
        debug!(%post, hidden_count = self.hidden_count, "Post revealed");
    }

    /// The post whose reveal button is `target` or contains `target`.
    pub fn reveal_target(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        let button = std::iter::once(target)
            .chain(doc.ancestors(target))
            .find(|&n| self.show_button.matches(doc, n))?;
        let notice = doc
            .ancestors(button)
            .find(|&n| self.notice.matches(doc, n))?;
        doc.parent(notice)
    }

    fn attach_notice(&mut self, doc: &mut Document, post: NodeId) -> Result<()> {
        if doc.select_first(post, &self.notice).is_some() {
            return Ok(());
        }

        let notice = match self.take_spare_notice(doc) {
            Some(notice) => notice,
            None => self.build_notice(doc)?,
        };
        doc.prepend_child(post, notice)
    }

    /// A detached reveal control from an earlier `show`, if one is still
    /// free in `doc`.
    fn take_spare_notice(&mut self, doc: &Document) -> Option<NodeId> {
        while let Some(notice) = self.spare_notices.pop() {
            if doc.contains_node(notice)
                && doc.parent(notice).is_none()
                && self.notice.matches(doc, notice)
            {
                return Some(notice);
            }
        }
        None
    }

    fn build_notice(&self, doc: &mut Document) -> Result<NodeId> {
        let notice = doc.create_element("div");
        doc.set_attr(notice, "class", NOTICE_CLASS)?;

        let content = doc.create_element("div");
        doc.set_attr(content, "class", NOTICE_CONTENT_CLASS)?;

        let label = doc.create_element("span");
        let label_text = doc.create_text(&self.notice_label);
        doc.append_child(label, label_text)?;

        let button = doc.create_element("button");
        doc.set_attr(button, "class", SHOW_BUTTON_CLASS)?;
        let button_text = doc.create_text(&self.reveal_label);
        doc.append_child(button, button_text)?;

        doc.append_child(content, label)?;
        doc.append_child(content, button)?;
        doc.append_child(notice, content)?;
        Ok(notice)
    }

    async fn persist_count(&self) {
        if let Err(e) = self
            .store
            .save(StoredSettings::hidden_count(self.hidden_count))
            .await
        {
            warn!(error = %e, "Failed to persist hidden count");
        }
    }
}
