//! Feed fixtures shared by the core integration tests.

#![allow(dead_code)]

use feedfilter_config::{FilterSettings, MemorySettingsStore, RulesConfig, Settings};
use feedfilter_core::{Document, NodeId, PostFilter, Selector};
use std::sync::Arc;

/// One boundary marker followed by a post container tagged `data-post="{id}"`.
pub fn entry(id: &str, body: &str) -> String {
    format!(
        r#"<h2 class="feed-skip-link__container">Feed post</h2><div data-post="{}"><div class="update-components-text"><span dir="ltr">{}</span></div></div>"#,
        id, body
    )
}

/// A full page whose `main.feed` holds the given `(id, text)` entries.
pub fn feed_page(entries: &[(&str, &str)]) -> String {
    let body: String = entries.iter().map(|(id, text)| entry(id, text)).collect();
    format!(
        r#"<html><head><title>Feed</title></head><body><nav>Home</nav><main class="feed">{}</main></body></html>"#,
        body
    )
}

/// The `main.feed` element.
pub fn feed_root(doc: &Document) -> NodeId {
    doc.select_first(doc.root(), &Selector::parse("main.feed").unwrap())
        .expect("feed root")
}

/// The post tagged `data-post="{id}"`.
pub fn post(doc: &Document, id: &str) -> NodeId {
    let selector = Selector::parse(&format!(r#"[data-post="{}"]"#, id)).unwrap();
    doc.select_first(doc.root(), &selector)
        .unwrap_or_else(|| panic!("no post {}", id))
}

/// The reveal button inside `post`, if any.
pub fn show_button(doc: &Document, post: NodeId) -> Option<NodeId> {
    doc.select_first(post, &Selector::parse(".feed-filter-show-btn").unwrap())
}

/// Number of reveal controls inside `post`.
pub fn notice_count(doc: &Document, post: NodeId) -> usize {
    doc.select(post, &Selector::parse(".feed-filter-notice").unwrap())
        .len()
}

/// A filter over an in-memory store with the given keywords.
pub fn filter_with(keywords: &[&str], case_sensitive: bool) -> (Arc<MemorySettingsStore>, PostFilter) {
    let store = Arc::new(MemorySettingsStore::new());
    let settings = Settings {
        filter: FilterSettings::with_keywords(keywords.iter().copied()).case_sensitive(case_sensitive),
        hidden_count: 0,
    };
    let filter = PostFilter::new(settings, store.clone(), &RulesConfig::default()).unwrap();
    (store, filter)
}
