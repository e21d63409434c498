//! RustyETree - Element tree with a compact path query engine
//!
//! Components:
//! - `dom`: arena-backed element tree (`ElementTree`, `NodeId`, `ElementRef`)
//! - `path`: path compiler, matcher and compiled-path cache
//! - `strategy`: parallel evaluation of independent queries (feature `parallel`)
//!
//! ```
//! use rustyetree::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let root = tree.create_element("root")?;
//! let a = tree.create_child(root, "a")?;
//! let b = tree.create_child(root, "b")?;
//! let c = tree.create_child(b, "c")?;
//! tree.get_mut(c).unwrap().set_text("hello");
//!
//! assert_eq!(tree.find_all(root, "/a")?, vec![a]);
//! assert_eq!(tree.find_all(root, "//c")?, vec![c]);
//! assert_eq!(tree.find_all(c, "..")?, vec![b]);
//! assert_eq!(tree.find_all(root, "[c]")?, vec![b]);
//! assert_eq!(tree.find_text(root, "b/c")?, Some("hello"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dom;
pub mod error;
pub mod path;
pub mod strategy;

pub use dom::{Element, ElementRef, ElementTree, NodeId, TreeAccess};
pub use error::{PathError, TreeError};
pub use path::{compile, CompiledPath, Op, PathCache, SeedMode};
