//! Parser module for the markup dialect
//!
//! An LL(1) recursive-descent parser driven by current-token lookahead. It
//! pulls tokens on demand from the lexer, builds the tree, and owns the three
//! side tables (targets, section list, footnote definitions). The inline
//! markup engine lives in [`inline`] and operates on raw text spans.

pub mod inline;
pub mod parser_impl;

use std::fmt;

use crate::lexer::TokenKind;

pub use inline::parse_inline;
pub use parser_impl::Parser;

/// The parser's single fatal fault: an expectation check failed against the
/// current token. Unreachable for token streams produced by the lexer; it
/// exists as a defensive invariant, not a recovery point.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, expected } => {
                write!(f, "Unexpected token: {}, expected: {}", found, expected)
            }
        }
    }
}

impl std::error::Error for ParseError {}
