//! Error types for the filtering core.

use crate::dom::{NodeId, SelectorError};
use thiserror::Error;

/// Errors raised by document edits and rule compilation.
#[derive(Error, Debug)]
pub enum Error {
    /// A configured selector did not parse.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// The insertion would make a node its own ancestor.
    #[error("Cannot insert {0} into its own subtree")]
    HierarchyRequest(NodeId),

    /// The reference node for an insertion is not a child of the parent.
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// Intended parent.
        parent: NodeId,
        /// Reference node.
        child: NodeId,
    },

    /// The node is not an element (or cannot hold children).
    #[error("{0} is not an element")]
    NotAnElement(NodeId),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
