//! DOM Module - Arena-based element tree
//!
//! Implements the element tree using:
//! - Arena allocation for elements
//! - NodeId (u32) indices for parent/child links
//! - XML name validation for tags

pub mod element_ref;
pub mod names;
pub mod node;
pub mod tree;

pub use element_ref::ElementRef;
pub use node::{Element, NodeId};
pub use tree::{DescendantIter, ElementTree};

/// Read-only navigation contract used by the path matcher
///
/// Implementations must return consistent links: `parent_of(c) == Some(p)`
/// exactly when `children_of(p)` contains `c`. Unknown IDs behave as absent
/// nodes (no tag, no parent, no children).
pub trait TreeAccess {
    /// Tag name of a node
    fn tag_of(&self, id: NodeId) -> Option<&str>;

    /// Parent of a node
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Children of a node in document order
    fn children_of(&self, id: NodeId) -> &[NodeId];

    /// Attribute value by name
    fn attribute_of(&self, id: NodeId, name: &str) -> Option<&str>;

    /// Topmost ancestor of a node
    fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        current
    }
}
