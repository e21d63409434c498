//! Path Matching Engine
//!
//! Runs a compiled path against a tree: seed a node set from the seed mode,
//! then fold every operator over it. Each step keeps first-encounter order
//! and drops nodes already produced in that step.

use super::axes::apply;
use super::compiler::{CompiledPath, SeedMode};
use super::nodeset::NodeSet;
use crate::dom::{NodeId, TreeAccess};
use crate::error::PathError;

/// Compile `expr` and match it from `start`
#[must_use = "path matching result should be used"]
pub fn evaluate<T: TreeAccess + ?Sized>(
    tree: &T,
    start: NodeId,
    expr: &str,
) -> Result<Vec<NodeId>, PathError> {
    let compiled = super::compiler::compile(expr)?;
    Ok(find_all_compiled(tree, start, &compiled))
}

/// Match a compiled path from `start`
pub fn find_all_compiled<T: TreeAccess + ?Sized>(
    tree: &T,
    start: NodeId,
    path: &CompiledPath,
) -> Vec<NodeId> {
    let mut current = seed(tree, start, path.seed());

    for op in path.ops() {
        if current.is_empty() {
            break;
        }
        let mut next = NodeSet::with_capacity(current.len());
        for &node in current.as_slice() {
            apply(tree, node, op, &mut next);
        }
        log::trace!(
            "path '{}': {:?} mapped {} nodes to {}",
            path.source(),
            op,
            current.len(),
            next.len()
        );
        current = next;
    }

    current.into_vec()
}

/// Initial node set for a seed mode; empty when `start` is not in the tree
fn seed<T: TreeAccess + ?Sized>(tree: &T, start: NodeId, mode: SeedMode) -> NodeSet {
    if tree.tag_of(start).is_none() {
        return NodeSet::new();
    }
    match mode {
        SeedMode::Root => std::iter::once(tree.root_of(start)).collect(),
        SeedMode::SelfNode => std::iter::once(start).collect(),
        SeedMode::Children => tree.children_of(start).iter().copied().collect(),
    }
}
