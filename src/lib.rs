//! # rst2html
//!
//! A renderer for a reStructuredText-inspired markup format.
//!
//! The pipeline has three stages: an indentation-sensitive [`lexer`], a
//! recursive-descent [`parser`] with an embedded inline-markup engine, and an
//! AST-to-HTML [`render`]er with cross-document bookkeeping (anchors, table
//! of contents, footnotes). [`pipeline::render_to_html`] wires them together:
//!
//! ```ignore
//! use rst2html::{render_to_html, RenderOptions};
//!
//! let html = render_to_html("Title\n=====\n\nBody.", RenderOptions::default())?;
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod render;

pub use ast::{Node, NodeKind, SectionInfo};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use pipeline::{render_to_html, RenderOptions};
pub use render::{CustomRenderers, HtmlRenderer, RenderFn};
