//! Path Expression Compiler
//!
//! Compiles a path expression into a seed mode plus an operator pipeline.
//! The result does not depend on any tree and can be cached and shared.

use super::lexer::{Lexer, Token};
use crate::error::PathError;

/// Where the matcher takes its initial node set from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Root of the start node's tree (leading `/`)
    Root,
    /// The start node itself (leading `.`)
    SelfNode,
    /// Direct children of the start node
    Children,
}

/// Compiled operation, applied to each node of the working set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Navigate to parent
    Parent,
    /// Node followed by all its descendants, pre-order
    DescendantOrSelf,
    /// Navigate to children
    Children,
    /// Keep nodes with this tag
    Tag(String),
    /// Keep nodes carrying the attribute
    HasAttribute(String),
    /// Keep nodes whose attribute equals the value exactly
    AttributeEquals(String, String),
    /// Keep nodes with at least one child of this tag
    HasChild(String),
}

/// Compiled path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    source: String,
    seed: SeedMode,
    ops: Vec<Op>,
}

impl CompiledPath {
    /// Compile a path expression
    pub fn compile(expr: &str) -> Result<Self, PathError> {
        let seed = if expr.starts_with('/') {
            SeedMode::Root
        } else if expr.starts_with('.') {
            SeedMode::SelfNode
        } else {
            SeedMode::Children
        };

        let tokens = Lexer::new(expr).tokenize()?;
        let ops: Vec<Op> = tokens.into_iter().filter_map(Self::compile_token).collect();

        log::debug!(
            "compiled path '{}': seed={:?}, {} ops",
            expr,
            seed,
            ops.len()
        );

        Ok(CompiledPath {
            source: expr.to_string(),
            seed,
            ops,
        })
    }

    fn compile_token(token: Token) -> Option<Op> {
        match token {
            Token::Parent => Some(Op::Parent),
            // Self is already covered by the seed mode, `*` filters nothing
            Token::SelfAxis | Token::Star => None,
            Token::DoubleSlash => Some(Op::DescendantOrSelf),
            Token::Name(name) => Some(Op::Tag(name)),
            Token::AttrPredicate { name, value: None } => Some(Op::HasAttribute(name)),
            Token::AttrPredicate {
                name,
                value: Some(value),
            } => Some(Op::AttributeEquals(name, value)),
            Token::ChildPredicate(name) => Some(Op::HasChild(name)),
            Token::Slash => Some(Op::Children),
        }
    }

    /// The expression this path was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn seed(&self) -> SeedMode {
        self.seed
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }
}

/// Compile a path expression string
pub fn compile(expr: &str) -> Result<CompiledPath, PathError> {
    CompiledPath::compile(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_modes() {
        assert_eq!(compile("/a").unwrap().seed(), SeedMode::Root);
        assert_eq!(compile("//a").unwrap().seed(), SeedMode::Root);
        assert_eq!(compile(".").unwrap().seed(), SeedMode::SelfNode);
        assert_eq!(compile("..").unwrap().seed(), SeedMode::SelfNode);
        assert_eq!(compile(".//a").unwrap().seed(), SeedMode::SelfNode);
        assert_eq!(compile("a/b").unwrap().seed(), SeedMode::Children);
        assert_eq!(compile("*").unwrap().seed(), SeedMode::Children);
        assert_eq!(compile("").unwrap().seed(), SeedMode::Children);
    }

    #[test]
    fn test_compile_simple() {
        let compiled = compile("/root").unwrap();
        assert_eq!(
            compiled.ops(),
            &[Op::Children, Op::Tag("root".to_string())]
        );
        assert_eq!(compiled.source(), "/root");
    }

    #[test]
    fn test_compile_descendant() {
        let compiled = compile("//item").unwrap();
        assert_eq!(
            compiled.ops(),
            &[Op::DescendantOrSelf, Op::Tag("item".to_string())]
        );
    }

    #[test]
    fn test_noops_emit_nothing() {
        assert!(compile(".").unwrap().ops().is_empty());
        assert!(compile("*").unwrap().ops().is_empty());
        assert_eq!(
            compile("./*/.").unwrap().ops(),
            &[Op::Children]
        );
    }

    #[test]
    fn test_compile_predicates() {
        let compiled = compile("a[@id][@lang='en'][b]").unwrap();
        assert_eq!(
            compiled.ops(),
            &[
                Op::Tag("a".to_string()),
                Op::HasAttribute("id".to_string()),
                Op::AttributeEquals("lang".to_string(), "en".to_string()),
                Op::HasChild("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_literal_is_equality() {
        assert_eq!(
            compile("[@k='']").unwrap().ops(),
            &[Op::AttributeEquals("k".to_string(), String::new())]
        );
    }

    #[test]
    fn test_compile_parent() {
        assert_eq!(compile("..").unwrap().ops(), &[Op::Parent]);
        assert_eq!(
            compile("a/../b").unwrap().ops(),
            &[
                Op::Tag("a".to_string()),
                Op::Parent,
                Op::Children,
                Op::Tag("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_compile_error() {
        let err = compile("a/@b").unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidSyntax {
                position: 2,
                remainder: "@b".to_string(),
            }
        );
    }
}
