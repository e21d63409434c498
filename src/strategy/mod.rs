//! Evaluation Strategy Module
//!
//! - Sequential: `path::find_all_compiled` (one query, one start node)
//! - Parallel: many queries or many start nodes over a shared tree (rayon)

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::{find_all_from, find_all_parallel, find_keyed, find_map};
