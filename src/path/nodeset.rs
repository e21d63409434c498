//! Insertion-ordered node set
//!
//! Keeps nodes in first-insertion order and drops repeats by identity.

use crate::dom::NodeId;
use std::collections::HashSet;

/// Ordered set of node IDs
#[derive(Debug, Default, Clone)]
pub struct NodeSet {
    seen: HashSet<NodeId>,
    order: Vec<NodeId>,
}

impl NodeSet {
    pub fn new() -> Self {
        NodeSet::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeSet {
            seen: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Add a node; returns false if it was already present
    #[inline]
    pub fn insert(&mut self, id: NodeId) -> bool {
        if self.seen.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn contains(&self, id: NodeId) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in insertion order
    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.order
    }
}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        set.extend(iter);
        set
    }
}
