//! End-to-end tests for the processing pipeline.
//!
//! These drive [`PostFilter`] over parsed feed pages the way a session does:
//! full pass on load, incremental passes for inserted content, clicks, and
//! settings resets.

mod common;

use common::{entry, feed_page, feed_root, filter_with, notice_count, post, show_button};
use feedfilter_config::{FilterSettings, MemorySettingsStore, RulesConfig, Settings};
use feedfilter_core::engine::{HIDDEN_ATTR, HIDDEN_CLASS};
use feedfilter_core::{ClickOutcome, Document, LocateStrategy, PostFilter, PostOutcome};
use std::sync::Arc;

// ============================================================================
// Hiding and revealing
// ============================================================================

#[tokio::test]
async fn test_matching_post_is_hidden_with_notice() {
    let (store, mut filter) = filter_with(&["promoted by"], false);
    let mut doc = Document::parse_html(&feed_page(&[
        ("a", "... Promoted By Acme ..."),
        ("b", "Weekend hiking photos"),
    ]));

    let report = filter.full_pass(&mut doc).await.unwrap();

    assert_eq!(report.located, 2);
    assert_eq!(report.evaluated, 2);
    assert_eq!(report.hidden, 1);

    let hidden = post(&doc, "a");
    assert_eq!(doc.attr(hidden, HIDDEN_ATTR), Some("hidden"));
    assert!(doc.has_class(hidden, HIDDEN_CLASS));
    assert_eq!(notice_count(&doc, hidden), 1);
    assert_eq!(filter.hidden_count(), 1);
    assert_eq!(store.snapshot().hidden_count, Some(1));

    let visible = post(&doc, "b");
    assert_eq!(doc.attr(visible, HIDDEN_ATTR), None);
    assert_eq!(notice_count(&doc, visible), 0);
}

#[tokio::test]
async fn test_reveal_click_restores_post() {
    let (store, mut filter) = filter_with(&["promoted by"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "... Promoted By Acme ...")]));
    filter.full_pass(&mut doc).await.unwrap();
    let hidden = post(&doc, "a");
    let button = show_button(&doc, hidden).expect("reveal button");

    let outcome = filter.handle_click(&mut doc, button).await;

    assert_eq!(outcome, ClickOutcome::Consumed);
    assert_eq!(doc.attr(hidden, HIDDEN_ATTR), None);
    assert!(!doc.has_class(hidden, HIDDEN_CLASS));
    assert_eq!(notice_count(&doc, hidden), 0);
    assert_eq!(filter.hidden_count(), 0);
    assert_eq!(store.snapshot().hidden_count, Some(0));

    // Revealed posts stay ledgered; a later pass leaves them visible
    assert!(filter.is_processed(hidden));
    let report = filter.full_pass(&mut doc).await.unwrap();
    assert_eq!(report.evaluated, 0);
    assert_eq!(doc.attr(hidden, HIDDEN_ATTR), None);
}

#[tokio::test]
async fn test_case_sensitive_matching() {
    let (_store, mut filter) = filter_with(&["Promoted by"], true);
    let mut doc = Document::parse_html(&feed_page(&[
        ("exact", "Promoted by Acme"),
        ("lower", "promoted by acme"),
    ]));

    filter.full_pass(&mut doc).await.unwrap();

    assert!(filter.engine().is_hidden(&doc, post(&doc, "exact")));
    assert!(!filter.engine().is_hidden(&doc, post(&doc, "lower")));
}

#[tokio::test]
async fn test_attribute_only_keyword_hides_post() {
    let (_store, mut filter) = filter_with(&["Promotert av"], false);
    let mut doc = Document::parse_html(
        r#"<body><main class="feed"><h2 class="feed-skip-link__container">Feed post</h2><div data-post="ad"><img src="logo.png" aria-label="Promotert av Banken"></div></main></body>"#,
    );

    filter.full_pass(&mut doc).await.unwrap();

    assert!(filter.engine().is_hidden(&doc, post(&doc, "ad")));
}

// ============================================================================
// Idempotence
// ============================================================================

#[tokio::test]
async fn test_repeated_passes_do_not_double_count() {
    let (_store, mut filter) = filter_with(&["formueskatt"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "Ny formueskatt")]));
    let a = post(&doc, "a");

    filter.full_pass(&mut doc).await.unwrap();
    let second = filter.full_pass(&mut doc).await.unwrap();

    assert_eq!(second.located, 1);
    assert_eq!(second.evaluated, 0);
    assert_eq!(
        filter.process_post(&mut doc, a).await.unwrap(),
        PostOutcome::AlreadyProcessed
    );
    assert_eq!(filter.hidden_count(), 1);
    assert_eq!(notice_count(&doc, a), 1);
}

#[tokio::test]
async fn test_reset_with_unchanged_keywords_round_trips() {
    let (_store, mut filter) = filter_with(&["crypto", "Promoted by"], false);
    let mut doc = Document::parse_html(&feed_page(&[
        ("a", "Buy crypto now"),
        ("b", "Team offsite recap"),
        ("c", "Promoted by Acme"),
        ("d", "New job announcement"),
    ]));
    filter.full_pass(&mut doc).await.unwrap();
    let before = doc.to_html();
    let settings = filter.settings().clone();

    let report = filter.reset_and_reprocess(&mut doc, settings).await.unwrap();

    assert_eq!(report.evaluated, 4);
    assert_eq!(report.hidden, 2);
    assert_eq!(filter.ledger_len(), 4);
    assert_eq!(filter.hidden_count(), 2);
    assert_eq!(doc.to_html(), before);
}

#[tokio::test]
async fn test_reveal_restores_original_markup() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let source = feed_page(&[("a", "Buy crypto now")]);
    let mut doc = Document::parse_html(&source);
    let original = doc.to_html();
    filter.full_pass(&mut doc).await.unwrap();
    let a = post(&doc, "a");
    let button = show_button(&doc, a).expect("reveal button");

    filter.handle_click(&mut doc, button).await;

    assert_eq!(doc.attr(a, "class"), None);
    assert_eq!(doc.to_html(), original);
}

#[tokio::test]
async fn test_empty_content_selectors_still_filter() {
    let store = Arc::new(MemorySettingsStore::new());
    let rules = RulesConfig {
        content_selectors: Vec::new(),
        ..RulesConfig::default()
    };
    let settings = Settings {
        filter: FilterSettings::with_keywords(["crypto"]),
        hidden_count: 0,
    };
    let mut filter = PostFilter::new(settings, store, &rules).unwrap();
    let mut doc = Document::parse_html(&feed_page(&[
        ("a", "Buy crypto now"),
        ("b", "Team offsite recap"),
    ]));

    let report = filter.full_pass(&mut doc).await.unwrap();

    assert_eq!(report.hidden, 1);
    assert!(filter.engine().is_hidden(&doc, post(&doc, "a")));
}

// ============================================================================
// Settings reset
// ============================================================================

#[tokio::test]
async fn test_reset_to_empty_keywords_reveals_everything() {
    let (store, mut filter) = filter_with(&["crypto", "Promoted by"], false);
    let mut doc = Document::parse_html(&feed_page(&[
        ("a", "Buy crypto now"),
        ("b", "Promoted by Acme"),
        ("c", "Team offsite recap"),
    ]));
    filter.full_pass(&mut doc).await.unwrap();
    assert_eq!(filter.hidden_count(), 2);

    let report = filter
        .reset_and_reprocess(&mut doc, FilterSettings::with_keywords(Vec::<String>::new()))
        .await
        .unwrap();

    assert_eq!(report.hidden, 0);
    assert_eq!(filter.hidden_count(), 0);
    assert_eq!(store.snapshot().hidden_count, Some(0));
    for id in ["a", "b", "c"] {
        let p = post(&doc, id);
        assert!(!filter.engine().is_hidden(&doc, p), "post {} still hidden", id);
        assert_eq!(notice_count(&doc, p), 0);
    }
}

#[tokio::test]
async fn test_reset_reveals_marked_nodes_outside_ledger() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "Buy crypto now")]));
    filter.full_pass(&mut doc).await.unwrap();

    // Marker on a node the filter never processed
    let nav = doc.children(doc.body())[0];
    doc.set_attr(nav, HIDDEN_ATTR, "hidden").unwrap();

    filter
        .reset_and_reprocess(&mut doc, FilterSettings::with_keywords(["nothing"]))
        .await
        .unwrap();

    assert_eq!(doc.attr(nav, HIDDEN_ATTR), None);
    assert!(!filter.engine().is_hidden(&doc, post(&doc, "a")));
    assert_eq!(filter.hidden_count(), 0);
}

#[tokio::test]
async fn test_reset_hides_newly_matching_posts() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[
        ("a", "Buy crypto now"),
        ("b", "Promoted by Acme"),
    ]));
    filter.full_pass(&mut doc).await.unwrap();

    filter
        .reset_and_reprocess(&mut doc, FilterSettings::with_keywords(["acme"]))
        .await
        .unwrap();

    assert!(!filter.engine().is_hidden(&doc, post(&doc, "a")));
    assert!(filter.engine().is_hidden(&doc, post(&doc, "b")));
    assert_eq!(filter.hidden_count(), 1);
}

// ============================================================================
// Incremental passes
// ============================================================================

#[tokio::test]
async fn test_wrapper_with_two_new_posts() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "Old news")]));
    filter.full_pass(&mut doc).await.unwrap();
    assert_eq!(filter.ledger_len(), 1);

    let feed = feed_root(&doc);
    let fragment = format!(
        r#"<div class="load-more">{}{}</div>"#,
        entry("b", "Buy crypto now"),
        entry("c", "Lunch photos")
    );
    let added = doc.append_html(feed, &fragment).unwrap();
    assert_eq!(added.len(), 1);

    let report = filter.incremental_pass(&mut doc, added[0]).await.unwrap();

    assert_eq!(report.located, 2);
    assert_eq!(report.evaluated, 2);
    assert_eq!(report.hidden, 1);
    assert_eq!(filter.ledger_len(), 3);
    assert!(filter.engine().is_hidden(&doc, post(&doc, "b")));
    assert!(!filter.engine().is_hidden(&doc, post(&doc, "c")));

    let again = filter.incremental_pass(&mut doc, added[0]).await.unwrap();
    assert_eq!(again.evaluated, 0);
    assert_eq!(filter.ledger_len(), 3);
}

#[tokio::test]
async fn test_inserted_post_itself() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "Old news")]));
    filter.full_pass(&mut doc).await.unwrap();

    let feed = feed_root(&doc);
    let added = doc.append_html(feed, &entry("b", "crypto tips")).unwrap();
    assert_eq!(added.len(), 2);

    let mut hidden = 0;
    for node in added {
        hidden += filter.incremental_pass(&mut doc, node).await.unwrap().hidden;
    }

    assert_eq!(hidden, 1);
    assert!(filter.engine().is_hidden(&doc, post(&doc, "b")));
}

#[tokio::test]
async fn test_non_element_insertions_are_ignored() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[]));
    let feed = feed_root(&doc);
    let added = doc.append_html(feed, "crypto text node<!-- crypto -->").unwrap();

    for node in added {
        let report = filter.incremental_pass(&mut doc, node).await.unwrap();
        assert_eq!(report, Default::default());
    }
    assert_eq!(filter.ledger_len(), 0);
}

#[tokio::test]
async fn test_reveal_control_insertion_adds_no_ledger_entries() {
    let (_store, mut filter) = filter_with(&["crypto"], false);
    let mut doc = Document::parse_html(&feed_page(&[("a", "crypto"), ("b", "news")]));
    doc.observe();

    filter.full_pass(&mut doc).await.unwrap();
    let records = doc.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target, post(&doc, "a"));

    for record in records {
        for node in record.added {
            let report = filter.incremental_pass(&mut doc, node).await.unwrap();
            assert_eq!(report.located, 0);
        }
    }
    assert_eq!(filter.ledger_len(), 2);
}

// ============================================================================
// Location
// ============================================================================

#[tokio::test]
async fn test_one_post_per_boundary_marker() {
    let entries: Vec<(String, String)> = (0..7)
        .map(|i| (format!("p{}", i), format!("Post number {}", i)))
        .collect();
    let refs: Vec<(&str, &str)> = entries
        .iter()
        .map(|(id, text)| (id.as_str(), text.as_str()))
        .collect();
    let doc = Document::parse_html(&feed_page(&refs));
    let (_store, filter) = filter_with(&[], false);

    let (strategy, posts) = filter.locator().locate_with(&doc);

    assert_eq!(strategy, LocateStrategy::Boundary);
    let expected: Vec<_> = entries.iter().map(|(id, _)| post(&doc, id)).collect();
    assert_eq!(posts, expected);
}

#[tokio::test]
async fn test_selector_fallback_without_markers() {
    let store = Arc::new(MemorySettingsStore::new());
    let mut filter = PostFilter::start(store.clone(), &RulesConfig::default())
        .await
        .unwrap();
    let mut doc = Document::parse_html(
        r#"<body><main>
            <div class="feed-shared-update-v2" data-urn="urn:li:activity:1">Promoted by Acme</div>
            <div class="feed-shared-update-v2" data-urn="urn:li:activity:2">Holiday photos</div>
        </main></body>"#,
    );

    let report = filter.full_pass(&mut doc).await.unwrap();

    assert_eq!(report.located, 2);
    assert_eq!(report.hidden, 1);
    // Default keywords were seeded on first load
    assert_eq!(
        store.snapshot().keywords,
        Some(FilterSettings::default().keywords)
    );
}
