//! AST module for the rst2html pipeline
//!
//! This module contains the node definitions for the parse tree plus the
//! side tables that carry cross-document bookkeeping (targets, section list,
//! footnote definitions). The tree is immutable once the parser has built it;
//! the renderer only ever borrows it.

pub mod nodes;
pub mod tables;

pub use nodes::{Node, NodeKind};
pub use tables::{FootnoteDefinitions, SectionInfo, Targets};
