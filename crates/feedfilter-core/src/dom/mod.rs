//! Owned document tree.
//!
//! A [`scraper::Html`] tree standing in for the host page. Nodes live in
//! the tree's arena for as long as the document does, so a [`NodeId`] is a
//! stable identity for the whole session, even after the node is detached.
//!
//! The filter reads the tree (sibling walks, selector queries, text
//! content) and annotates it (attributes, classes, an inserted reveal
//! control). The host mutates it by inserting markup; insertions into the
//! connected tree are reported through the mutation observer.
//!
//! Ids past the end of the tree are treated as absent nodes: queries return
//! nothing and edits fail.

mod html;
mod mutation;
mod selector;

pub use mutation::MutationRecord;
pub use selector::{Selector, SelectorError};

use crate::error::{Error, Result};
use ego_tree::{NodeMut, NodeRef};
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{CaseSensitivity, ElementRef, Html, Node};
use std::fmt;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Identity of a node within one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(ego_tree::NodeId);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Document backed by a `scraper` tree.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    body: NodeId,
    observer: Option<Vec<MutationRecord>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty `<html><head></head><body></body></html>` document.
    pub fn new() -> Self {
        Self::parse_html("")
    }

    fn from_html(html: Html) -> Self {
        let root = html.tree.root();
        let body = root
            .descendants()
            .find(|n| n.value().as_element().is_some_and(|e| e.name() == "body"))
            .unwrap_or(root)
            .id();
        Self {
            html,
            body: NodeId(body),
            observer: None,
        }
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// The document root node.
    pub fn root(&self) -> NodeId {
        NodeId(self.html.tree.root().id())
    }

    /// The `<body>` element, or the root when the document has none.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Whether `id` names a node in this document's tree.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.html.tree.get(id.0).is_some()
    }

    fn get(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, Node>> {
        self.html.tree.get_mut(id.0)
    }

    /// Payload of a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.get(id).map(|n| n.value())
    }

    /// Element payload, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id)?.as_element()
    }

    pub(crate) fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::wrap(self.get(id)?)
    }

    /// Whether `id` is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Lowercase tag name of an element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    /// Parent node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent().map(|p| NodeId(p.id()))
    }

    /// Children in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.children())
            .map(|c| NodeId(c.id()))
            .collect()
    }

    /// First child node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child().map(|c| NodeId(c.id()))
    }

    /// Next sibling that is an element.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?
            .next_siblings()
            .find(|s| s.value().is_element())
            .map(|s| NodeId(s.id()))
    }

    /// Previous sibling that is an element.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?
            .prev_siblings()
            .find(|s| s.value().is_element())
            .map(|s| NodeId(s.id()))
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.ancestors())
            .map(|a| NodeId(a.id()))
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(scope)
            .into_iter()
            .flat_map(|n| n.descendants().skip(1))
            .map(|d| NodeId(d.id()))
    }

    /// Whether `other` is `id` or one of its descendants.
    pub fn contains(&self, id: NodeId, other: NodeId) -> bool {
        id == other || self.ancestors(other).any(|a| a == id)
    }

    /// Whether `id` is attached to the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Concatenated text of every text node at or under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.descendants())
            .filter_map(|n| n.value().as_text())
            .map(|t| &**t)
            .collect()
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Attribute value of an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set an attribute on an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = attribute_name(name);
        self.edit_attrs(id, |attrs| {
            match attrs.iter_mut().find(|a| a.name == name) {
                Some(existing) => existing.value = value.into(),
                None => attrs.push(Attribute {
                    name,
                    value: value.into(),
                }),
            }
            true
        })
        .map(|_| ())
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        let name = attribute_name(name);
        self.edit_attrs(id, |attrs| {
            let before = attrs.len();
            attrs.retain(|a| a.name != name);
            attrs.len() != before
        })
        .unwrap_or(false)
    }

    /// Whether an element's class list contains `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.has_class(class, CaseSensitivity::CaseSensitive))
    }

    /// Add `class` to an element's class list.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        if !self.is_element(id) {
            return Err(Error::NotAnElement(id));
        }
        if self.has_class(id, class) {
            return Ok(());
        }
        let value = match self.attr(id, "class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim_end(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr(id, "class", &value)
    }

    /// Remove `class` from an element's class list.
    ///
    /// The `class` attribute itself is dropped once the list is empty.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let value = self
            .attr(id, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if value.is_empty() {
            self.remove_attr(id, "class");
        } else if let Err(e) = self.set_attr(id, "class", &value) {
            tracing::warn!(node = %id, error = %e, "Failed to update class list");
        }
    }

    /// Rewrite an element's attribute list.
    ///
    /// `scraper` caches the id and class list inside each element, so the
    /// element is rebuilt rather than patched in place. Attribute order is
    /// kept.
    fn edit_attrs<R>(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Vec<Attribute>) -> R,
    ) -> Result<R> {
        let mut node = self.get_mut(id).ok_or(Error::NotAnElement(id))?;
        let Node::Element(element) = node.value() else {
            return Err(Error::NotAnElement(id));
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: (&**value).into(),
            })
            .collect();
        let result = edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Construction and mutation
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from(tag.to_ascii_lowercase()),
        );
        let node = self
            .html
            .tree
            .orphan(Node::Element(Element::new(name, Vec::new())));
        NodeId(node.id())
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let node = self.html.tree.orphan(Node::Text(Text { text: text.into() }));
        NodeId(node.id())
    }

    /// Remove a node from its parent. The node and its subtree stay valid.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.get_mut(id) {
            node.detach();
        }
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let first = self.first_child(parent);
        self.insert_before(parent, child, first)
    }

    /// Insert `child` under `parent` before `reference` (or last when `None`).
    ///
    /// A node that is already attached is moved. Inserting a node into its
    /// own subtree is rejected.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.insert_all(parent, &[child], reference)
    }

    /// Insert several nodes at one position, reported as one mutation record.
    fn insert_all(
        &mut self,
        parent: NodeId,
        children: &[NodeId],
        reference: Option<NodeId>,
    ) -> Result<()> {
        match self.node(parent) {
            Some(Node::Document | Node::Fragment | Node::Element(_)) => {}
            _ => return Err(Error::NotAnElement(parent)),
        }
        for &child in children {
            if !self.contains_node(child) || child == self.root() || self.contains(child, parent) {
                return Err(Error::HierarchyRequest(child));
            }
        }
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) || children.contains(&reference) {
                return Err(Error::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }

        let anchor = reference.unwrap_or(parent);
        for &child in children {
            let mut node = self.get_mut(anchor).ok_or(Error::NotAChild {
                parent,
                child: anchor,
            })?;
            if reference.is_some() {
                node.insert_id_before(child.0);
            } else {
                node.append_id(child.0);
            }
        }

        self.record_insertion(parent, children);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether element `id` matches `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// First descendant of `scope` matching `selector`.
    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).find(|&n| selector.matches(self, n))
    }
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(""),
        LocalName::from(name.to_ascii_lowercase()),
    )
}
