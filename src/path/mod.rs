//! Path Query Engine
//!
//! A compact subset of XPath:
//! - `/`, `//`, `.`, `..` axes
//! - `*` and tag-name tests
//! - `[@attr]`, `[@attr='value']` and `[tag]` predicates
//! - Compiled expression caching

pub mod axes;
pub mod cache;
pub mod compiler;
pub mod lexer;
pub mod matcher;
pub mod nodeset;

pub use cache::PathCache;
pub use compiler::{compile, CompiledPath, Op, SeedMode};
pub use matcher::{evaluate, find_all_compiled};
pub use nodeset::NodeSet;
