//! Error types for tree mutation and path compilation.
//!
//! Absent structure (no parent, no such attribute, no first child) is never
//! an error: accessors return `None` and path operators yield zero nodes.

use crate::dom::NodeId;
use thiserror::Error;

/// Failures raised by tree accessors and mutators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),

    #[error("child index {index} out of range for {len} children")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("insert position {position} out of range for {len} children")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("node {node} is already attached to parent {parent}")]
    AlreadyAttached { node: NodeId, parent: NodeId },

    #[error("attaching node {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("invalid element name '{0}'")]
    InvalidName(String),

    #[error("tree is full: node IDs are exhausted at {len} elements")]
    ArenaFull { len: usize },
}

/// Failures raised while compiling a path expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path syntax at offset {position}: '{remainder}'")]
    InvalidSyntax { position: usize, remainder: String },
}
