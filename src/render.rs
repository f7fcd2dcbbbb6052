//! Rendering module
//!
//! Walks the parse tree once and produces HTML, consulting the parser's side
//! tables (borrowed read-only) and an optional per-node-kind override table.
//! All render-time mutable state (footnote first-reference order and the
//! pending style class) is private to one renderer instance.

pub mod html;

pub use html::{CustomRenderers, HtmlRenderer, RenderFn};
