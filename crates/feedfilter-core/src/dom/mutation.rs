//! Mutation observation.
//!
//! Once [`Document::observe`] is called, every insertion into the connected
//! tree appends a [`MutationRecord`]. Records accumulate until drained with
//! [`Document::take_records`]; draining is the delivery of one batch.

use super::{Document, NodeId};

/// One insertion: `added` nodes were placed under `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Parent the nodes were inserted into.
    pub target: NodeId,
    /// Top-level inserted nodes, in order. May include text and comments.
    pub added: Vec<NodeId>,
}

impl Document {
    /// Start recording insertions. Calling it again keeps pending records.
    pub fn observe(&mut self) {
        if self.observer.is_none() {
            self.observer = Some(Vec::new());
        }
    }

    /// Whether insertions are being recorded.
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Drain pending records.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        self.observer.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Number of records waiting to be drained.
    pub fn pending_records(&self) -> usize {
        self.observer.as_ref().map_or(0, Vec::len)
    }

    pub(super) fn record_insertion(&mut self, target: NodeId, added: &[NodeId]) {
        if added.is_empty() || self.observer.is_none() || !self.is_connected(target) {
            return;
        }
        if let Some(records) = self.observer.as_mut() {
            records.push(MutationRecord {
                target,
                added: added.to_vec(),
            });
        }
    }
}
