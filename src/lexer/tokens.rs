//! Token types emitted by the lexer
//!
//! Tokens are transient: the parser consumes them as they are produced and
//! never retains them. Payload fields carry the line content each token kind
//! needs; `TokenKind` is the payload-free tag backing the parser's
//! expectation checks.

use std::fmt;

/// A lexical token. One structural decision per source line, except for list
/// items (marker + trailing text) and indentation changes, which share a line
/// with their content token.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Token {
    /// A section heading together with its level (1-13), derived from the
    /// underline character. The underline line itself is consumed.
    Section { title: String, level: usize },
    /// A plain paragraph line.
    Paragraph(String),
    /// Trailing text of a list item line.
    Text(String),
    /// A list marker: `*` or `<digits>.`.
    ListItemMarker(String),
    /// A grid-table separator line like `+----+----+`.
    TableSeparatorLine(String),
    /// A grid-table data row starting with `|`.
    TableDataRow(String),
    /// A cross-reference target: `.. _name:`. Carries the verbatim name.
    Target(String),
    /// A footnote definition `.. [label] text`, continuation lines joined in.
    FootnoteDefinition { label: String, value: String },
    /// A generic directive `.. name:: value`, continuation lines joined in.
    Directive { name: String, value: String },
    /// A definition-list term (a line whose next line is more indented).
    DefinitionTerm(String),
    /// Indentation increased.
    Indent,
    /// Indentation decreased by one stack entry.
    Dedent,
    /// End of input. Returned forever once reached.
    Eof,
}

impl Token {
    /// The payload-free tag of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Section { .. } => TokenKind::Section,
            Token::Paragraph(_) => TokenKind::Paragraph,
            Token::Text(_) => TokenKind::Text,
            Token::ListItemMarker(_) => TokenKind::ListItemMarker,
            Token::TableSeparatorLine(_) => TokenKind::TableSeparatorLine,
            Token::TableDataRow(_) => TokenKind::TableDataRow,
            Token::Target(_) => TokenKind::Target,
            Token::FootnoteDefinition { .. } => TokenKind::FootnoteDefinition,
            Token::Directive { .. } => TokenKind::Directive,
            Token::DefinitionTerm(_) => TokenKind::DefinitionTerm,
            Token::Indent => TokenKind::Indent,
            Token::Dedent => TokenKind::Dedent,
            Token::Eof => TokenKind::Eof,
        }
    }
}

/// The tag of a token, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Section,
    Paragraph,
    Text,
    ListItemMarker,
    TableSeparatorLine,
    TableDataRow,
    Target,
    FootnoteDefinition,
    Directive,
    DefinitionTerm,
    Indent,
    Dedent,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
