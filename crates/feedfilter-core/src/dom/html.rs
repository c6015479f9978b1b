//! HTML import and serialization, both through `scraper`.

use super::{Document, NodeId};
use crate::error::Result;
use scraper::{Html, Node};

impl Document {
    /// Parse a full HTML document.
    ///
    /// The parser is lenient: malformed markup is repaired the way a
    /// browser would, so this never fails.
    pub fn parse_html(source: &str) -> Self {
        Self::from_html(Html::parse_document(source))
    }

    /// Parse `fragment` and append its top-level nodes to `parent`.
    ///
    /// The insertion is reported as a single mutation record. Returns the
    /// inserted top-level nodes.
    pub fn append_html(&mut self, parent: NodeId, fragment: &str) -> Result<Vec<NodeId>> {
        let fragment = Html::parse_fragment(fragment);
        let grafted = self.html.tree.extend_tree(fragment.tree).id();

        // Fragment root > <html> context element > parsed nodes
        let top_level: Vec<NodeId> = self
            .html
            .tree
            .get(grafted)
            .into_iter()
            .flat_map(|root| root.children())
            .filter(|n| n.value().is_element())
            .flat_map(|context| context.children())
            .filter(|n| matches!(n.value(), Node::Element(_) | Node::Text(_) | Node::Comment(_)))
            .map(|n| NodeId(n.id()))
            .collect();

        self.insert_all(parent, &top_level, None)?;
        Ok(top_level)
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Serialize element `id` and its subtree. Empty for non-elements.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id)
            .map(|element| element.html())
            .unwrap_or_default()
    }
}
