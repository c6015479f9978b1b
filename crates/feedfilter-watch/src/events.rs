//! Events delivered to a feed session.

use feedfilter_config::ControlMessage;
use feedfilter_core::{ClickOutcome, MutationRecord, NodeId, PassReport};
use std::fmt;

/// Where a render inserts its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// The document body.
    Body,
    /// A specific node.
    Node(NodeId),
    /// The first element matching a selector.
    Selector(String),
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Body => write!(f, "body"),
            RenderTarget::Node(id) => write!(f, "{}", id),
            RenderTarget::Selector(selector) => write!(f, "{}", selector),
        }
    }
}

/// One unit of work for the session, processed in arrival order.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The host page appends markup (for example a lazily loaded batch).
    Render {
        /// Insertion point.
        parent: RenderTarget,
        /// HTML fragment to append.
        html: String,
    },
    /// Insertions observed by the host since the last batch.
    Mutations(Vec<MutationRecord>),
    /// A message from the configuration surface.
    Control(ControlMessage),
    /// The user clicked a node.
    Click(NodeId),
}

impl FeedEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEvent::Render { .. } => "render",
            FeedEvent::Mutations(_) => "mutations",
            FeedEvent::Control(_) => "control",
            FeedEvent::Click(_) => "click",
        }
    }
}

/// What processing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Markup was appended and the inserted content filtered.
    Rendered {
        /// Top-level nodes inserted.
        added: usize,
        /// Incremental passes over the insertion.
        report: PassReport,
    },
    /// A mutation batch was filtered.
    Processed(PassReport),
    /// Settings were replaced and the page reprocessed.
    Reset(PassReport),
    /// A click was routed.
    Click(ClickOutcome),
}
