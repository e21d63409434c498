//! Parallel Path Evaluation
//!
//! Uses Rayon to run independent queries over one shared tree. Each query
//! is matched sequentially; only separate queries run concurrently.

use crate::dom::{NodeId, TreeAccess};
use crate::error::PathError;
use crate::path::{cache, find_all_compiled, CompiledPath};
use rayon::prelude::*;

/// Evaluate multiple path expressions from `start` in parallel
///
/// Results are in the same order as `exprs`.
pub fn find_all_parallel<T: TreeAccess + Sync + ?Sized>(
    tree: &T,
    start: NodeId,
    exprs: &[&str],
) -> Vec<Result<Vec<NodeId>, PathError>> {
    exprs
        .par_iter()
        .map(|expr| {
            let compiled = cache::global().get_or_compile(expr)?;
            Ok(find_all_compiled(tree, start, &compiled))
        })
        .collect()
}

/// Match one compiled path from many start nodes in parallel
pub fn find_all_from<T: TreeAccess + Sync + ?Sized>(
    tree: &T,
    starts: &[NodeId],
    path: &CompiledPath,
) -> Vec<Vec<NodeId>> {
    starts
        .par_iter()
        .map(|&start| find_all_compiled(tree, start, path))
        .collect()
}

/// Evaluate a path expression and map the matched nodes in parallel
pub fn find_map<T, F, R>(tree: &T, start: NodeId, expr: &str, mapper: F) -> Result<Vec<R>, PathError>
where
    T: TreeAccess + Sync + ?Sized,
    F: Fn(NodeId) -> R + Sync + Send,
    R: Send,
{
    let compiled = cache::global().get_or_compile(expr)?;
    let nodes = find_all_compiled(tree, start, &compiled);
    Ok(nodes.par_iter().map(|&n| mapper(n)).collect())
}

/// Evaluate keyed path expressions in parallel; fails on the first invalid one
pub fn find_keyed<T: TreeAccess + Sync + ?Sized>(
    tree: &T,
    start: NodeId,
    queries: &[(&str, &str)], // (key, expr)
) -> Result<Vec<(String, Vec<NodeId>)>, PathError> {
    queries
        .par_iter()
        .map(|(key, expr)| {
            let compiled = cache::global().get_or_compile(expr)?;
            Ok((key.to_string(), find_all_compiled(tree, start, &compiled)))
        })
        .collect()
}
