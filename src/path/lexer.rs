//! Path Lexer
//!
//! Splits a path expression into tokens. At every position the rules are
//! tried in a fixed priority order and the first match wins:
//!
//! 1. `/..` or `..`   parent axis
//! 2. `/.` or `.`     self axis
//! 3. `//`            descendant-or-self axis
//! 4. `*`             wildcard
//! 5. `name`          tag test
//! 6. `[@name]`, `[@name='value']`  attribute predicate
//! 7. `[name]`        child-tag predicate
//! 8. `/`             child axis
//!
//! Longer, more specific rules come first: `..` before `.`, `//` before `/`.

use crate::dom::names::scan_name;
use crate::error::PathError;
use memchr::memchr;

/// Path token types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Parent,      // .. or /..
    SelfAxis,    // . or /.
    DoubleSlash, // //
    Star,        // *
    Name(String),
    AttrPredicate {
        name: String,
        value: Option<String>,
    },
    ChildPredicate(String),
    Slash, // /
}

/// Path lexer
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// Get the remaining input
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Result<Token, PathError>> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        let scanned = scan_parent(rest)
            .or_else(|| scan_self(rest))
            .or_else(|| scan_literal(rest, "//", Token::DoubleSlash))
            .or_else(|| scan_literal(rest, "*", Token::Star))
            .or_else(|| scan_name(rest).map(|len| (Token::Name(rest[..len].to_string()), len)))
            .or_else(|| scan_attr_predicate(rest))
            .or_else(|| scan_child_predicate(rest))
            .or_else(|| scan_literal(rest, "/", Token::Slash));

        match scanned {
            Some((token, len)) => {
                self.pos += len;
                Some(Ok(token))
            }
            None => Some(Err(PathError::InvalidSyntax {
                position: self.pos,
                remainder: rest.to_string(),
            })),
        }
    }

    /// Tokenize entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, PathError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token?);
        }
        Ok(tokens)
    }
}

fn scan_literal(rest: &str, literal: &str, token: Token) -> Option<(Token, usize)> {
    rest.starts_with(literal).then(|| (token, literal.len()))
}

fn scan_parent(rest: &str) -> Option<(Token, usize)> {
    scan_literal(rest, "/..", Token::Parent).or_else(|| scan_literal(rest, "..", Token::Parent))
}

fn scan_self(rest: &str) -> Option<(Token, usize)> {
    scan_literal(rest, "/.", Token::SelfAxis).or_else(|| scan_literal(rest, ".", Token::SelfAxis))
}

/// `[@name]` or `[@name='value']`
fn scan_attr_predicate(rest: &str) -> Option<(Token, usize)> {
    let body = rest.strip_prefix("[@")?;
    let name_len = scan_name(body)?;
    let name = body[..name_len].to_string();
    let after_name = &body[name_len..];

    if after_name.starts_with(']') {
        let len = 2 + name_len + 1;
        return Some((Token::AttrPredicate { name, value: None }, len));
    }

    // Value runs to the next quote; no escapes
    let literal = after_name.strip_prefix("='")?;
    let value_len = memchr(b'\'', literal.as_bytes())?;
    if !literal[value_len + 1..].starts_with(']') {
        return None;
    }
    let value = literal[..value_len].to_string();
    let len = 2 + name_len + 2 + value_len + 2;
    Some((
        Token::AttrPredicate {
            name,
            value: Some(value),
        },
        len,
    ))
}

/// `[name]`
fn scan_child_predicate(rest: &str) -> Option<(Token, usize)> {
    let body = rest.strip_prefix('[')?;
    let name_len = scan_name(body)?;
    if !body[name_len..].starts_with(']') {
        return None;
    }
    let name = body[..name_len].to_string();
    Some((Token::ChildPredicate(name), 1 + name_len + 1))
}
