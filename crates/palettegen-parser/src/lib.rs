//! palettegen Parser
//!
//! Parses a token stream into a stylesheet tree: rules, at-rules,
//! declarations and comments. The tree is the mutable document the palette
//! generator writes into, the way a CSS post-processor hands its plugins a
//! root node.

pub mod ast;
pub mod parser;

pub use ast::{AtRule, Comment, Declaration, Node, Position, Rule, Stylesheet};
pub use parser::Parser;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
