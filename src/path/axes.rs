//! Operator application
//!
//! Applies one compiled operator to one node, appending the resulting
//! nodes to the step's output set. Filters yield the node or nothing;
//! axes yield zero or more related nodes.

use super::compiler::Op;
use super::nodeset::NodeSet;
use crate::dom::{NodeId, TreeAccess};

/// Apply `op` to `node`, adding results to `out`
pub fn apply<T: TreeAccess + ?Sized>(tree: &T, node: NodeId, op: &Op, out: &mut NodeSet) {
    match op {
        Op::Parent => {
            if let Some(parent) = tree.parent_of(node) {
                out.insert(parent);
            }
        }
        Op::DescendantOrSelf => descendant_or_self_axis(tree, node, out),
        Op::Children => out.extend(tree.children_of(node).iter().copied()),
        Op::Tag(tag) => {
            if tree.tag_of(node) == Some(tag.as_str()) {
                out.insert(node);
            }
        }
        Op::HasAttribute(name) => {
            if tree.attribute_of(node, name).is_some() {
                out.insert(node);
            }
        }
        Op::AttributeEquals(name, value) => {
            if tree.attribute_of(node, name) == Some(value.as_str()) {
                out.insert(node);
            }
        }
        Op::HasChild(tag) => {
            let has_child = tree
                .children_of(node)
                .iter()
                .any(|&child| tree.tag_of(child) == Some(tag.as_str()));
            if has_child {
                out.insert(node);
            }
        }
    }
}

/// descendant-or-self - the node, then each child's expansion in order
///
/// A node already in `out` had its whole subtree added when it was first
/// emitted, so it is not expanded again.
fn descendant_or_self_axis<T: TreeAccess + ?Sized>(tree: &T, node: NodeId, out: &mut NodeSet) {
    if tree.tag_of(node).is_none() {
        return;
    }
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if !out.insert(current) {
            continue;
        }
        // Reverse order so the first child is visited first
        stack.extend(tree.children_of(current).iter().rev().copied());
    }
}
