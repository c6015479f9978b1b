//! Post location.
//!
//! Posts are found by two strategies tried in a fixed order:
//!
//! 1. [`LocateStrategy::Boundary`]: the feed renders a skip-navigation
//!    landmark before every entry. The first container after each landmark
//!    (walking element siblings, stopping at the next landmark) is the
//!    post. Sponsored and organic entries are handled the same way.
//! 2. [`LocateStrategy::Selector`]: used only when the boundary strategy
//!    finds nothing. Elements matching any of the known feed-entry
//!    selectors, deduplicated, in first-seen order.

use crate::dom::{Document, NodeId, Selector};
use crate::error::Result;
use feedfilter_config::RulesConfig;
use std::collections::HashSet;
use tracing::trace;

/// Post classification strategies, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// Container following a boundary marker.
    Boundary,
    /// Element matching a fallback feed-entry selector.
    Selector,
}

impl LocateStrategy {
    /// Every strategy, highest priority first.
    pub const ORDER: [LocateStrategy; 2] = [LocateStrategy::Boundary, LocateStrategy::Selector];
}

/// Finds post elements in a document.
#[derive(Debug, Clone)]
pub struct PostLocator {
    boundary: Selector,
    container_tag: String,
    post_selectors: Vec<Selector>,
}

impl PostLocator {
    /// Compile the locator from filter rules.
    pub fn from_rules(rules: &RulesConfig) -> Result<Self> {
        let post_selectors = rules
            .post_selectors
            .iter()
            .map(|s| Selector::parse(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            boundary: Selector::parse(&rules.boundary_selector)?,
            container_tag: rules.container_tag.trim().to_ascii_lowercase(),
            post_selectors,
        })
    }

    /// Every post in the document, in document order.
    pub fn locate_all(&self, doc: &Document) -> Vec<NodeId> {
        self.locate_with(doc).1
    }

    /// Every post in the document together with the strategy that found them.
    ///
    /// When no strategy finds anything the fallback strategy is reported.
    pub fn locate_with(&self, doc: &Document) -> (LocateStrategy, Vec<NodeId>) {
        for strategy in LocateStrategy::ORDER {
            let posts = match strategy {
                LocateStrategy::Boundary => self.by_boundaries(doc),
                LocateStrategy::Selector => self.by_selectors(doc),
            };
            if !posts.is_empty() {
                trace!(?strategy, count = posts.len(), "Located posts");
                return (strategy, posts);
            }
        }
        (LocateStrategy::Selector, Vec::new())
    }

    /// Posts at or under `node`.
    ///
    /// Mutation batches deliver arbitrary inserted nodes: a post itself, a
    /// wrapper around several posts, or unrelated content. Non-elements
    /// yield nothing.
    pub fn locate_within(&self, doc: &Document, node: NodeId) -> Vec<NodeId> {
        if !doc.is_element(node) {
            return Vec::new();
        }
        if self.is_post(doc, node) {
            return vec![node];
        }
        self.locate_all(doc)
            .into_iter()
            .filter(|&post| doc.contains(node, post))
            .collect()
    }

    /// Whether `node` qualifies as a post under either strategy.
    pub fn is_post(&self, doc: &Document, node: NodeId) -> bool {
        LocateStrategy::ORDER.iter().any(|strategy| match strategy {
            LocateStrategy::Boundary => {
                self.is_container(doc, node)
                    && doc
                        .previous_element_sibling(node)
                        .is_some_and(|prev| self.is_boundary(doc, prev))
            }
            LocateStrategy::Selector => self.post_selectors.iter().any(|s| s.matches(doc, node)),
        })
    }

    /// Whether `node` is a boundary marker.
    pub fn is_boundary(&self, doc: &Document, node: NodeId) -> bool {
        self.boundary.matches(doc, node)
    }

    fn is_container(&self, doc: &Document, node: NodeId) -> bool {
        doc.tag_name(node) == Some(self.container_tag.as_str())
    }

    fn by_boundaries(&self, doc: &Document) -> Vec<NodeId> {
        let markers = doc.select(doc.root(), &self.boundary);
        let mut posts = Vec::with_capacity(markers.len());

        for (i, &marker) in markers.iter().enumerate() {
            let next_marker = markers.get(i + 1).copied();
            let mut current = doc.next_element_sibling(marker);
            while let Some(node) = current {
                if Some(node) == next_marker {
                    break;
                }
                if self.is_container(doc, node) {
                    posts.push(node);
                    break;
                }
                current = doc.next_element_sibling(node);
            }
        }

        posts
    }

    fn by_selectors(&self, doc: &Document) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut posts = Vec::new();
        for selector in &self.post_selectors {
            for node in doc.select(doc.root(), selector) {
                if seen.insert(node) {
                    posts.push(node);
                }
            }
        }
        posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> PostLocator {
        PostLocator::from_rules(&RulesConfig::default()).unwrap()
    }

    fn divs(doc: &Document, class: &str) -> Vec<NodeId> {
        doc.select(doc.root(), &Selector::parse(&format!("div.{}", class)).unwrap())
    }

    #[test]
    fn test_one_post_per_boundary_in_document_order() {
        let doc = Document::parse_html(
            r#"<body><main>
                <h2 class="feed-skip-link__container">Feed post 1</h2>
                <span>divider</span>
                <div class="p">first</div>
                <div class="extra">not a post</div>
                <h2 class="feed-skip-link__container">Feed post 2</h2>
                <div class="p">second</div>
                <h2 class="feed-skip-link__container">Feed post 3</h2>
                <div class="p">third</div>
            </main></body>"#,
        );

        let posts = locator().locate_all(&doc);

        assert_eq!(posts, divs(&doc, "p"));
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn test_segment_without_container_contributes_nothing() {
        let doc = Document::parse_html(
            r#"<body>
                <h2 class="feed-skip-link__container">a</h2>
                <section>no container</section>
                <h2 class="feed-skip-link__container">b</h2>
                <div class="p">post</div>
                <h2 class="feed-skip-link__container">c</h2>
                <span>trailing</span>
            </body>"#,
        );

        let (strategy, posts) = locator().locate_with(&doc);

        assert_eq!(strategy, LocateStrategy::Boundary);
        assert_eq!(posts, divs(&doc, "p"));
    }

    #[test]
    fn test_fallback_selectors_without_boundaries() {
        let doc = Document::parse_html(
            r#"<body>
                <article data-id="urn:li:activity:3">three</article>
                <div class="feed-shared-update-v2 occludable-update" data-urn="urn:li:activity:1">one</div>
                <div class="occludable-update">two</div>
            </body>"#,
        );

        let (strategy, posts) = locator().locate_with(&doc);

        assert_eq!(strategy, LocateStrategy::Selector);
        let texts: Vec<String> = posts.iter().map(|&p| doc.text_content(p)).collect();
        // Selector order first, then document order; no duplicates
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_no_posts_at_all() {
        let doc = Document::parse_html("<body><p>quiet</p></body>");

        assert!(locator().locate_all(&doc).is_empty());
    }

    #[test]
    fn test_locate_within_post_and_wrapper() {
        let doc = Document::parse_html(
            r#"<body>
                <div class="wrapper">
                    <h2 class="feed-skip-link__container">a</h2>
                    <div class="p">one</div>
                    <h2 class="feed-skip-link__container">b</h2>
                    <div class="p">two</div>
                </div>
                <h2 class="feed-skip-link__container">c</h2>
                <div class="p">three</div>
            </body>"#,
        );
        let locator = locator();
        let posts = divs(&doc, "p");
        let wrapper = divs(&doc, "wrapper")[0];

        assert_eq!(locator.locate_within(&doc, posts[2]), vec![posts[2]]);
        assert_eq!(locator.locate_within(&doc, wrapper), posts[..2].to_vec());
    }

    #[test]
    fn test_locate_within_ignores_non_elements() {
        let doc = Document::parse_html(
            r#"<body><h2 class="feed-skip-link__container">a</h2>text<div>post</div></body>"#,
        );
        let text = doc
            .descendants(doc.body())
            .find(|&n| !doc.is_element(n))
            .unwrap();

        assert!(locator().locate_within(&doc, text).is_empty());
    }
}
