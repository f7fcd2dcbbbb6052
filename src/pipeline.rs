//! High-level pipeline API
//!
//! Wires the three stages together: text -> Lexer -> Parser -> HtmlRenderer
//! -> output string. Every stage owns private state, so independent
//! documents can go through separate pipelines concurrently without any
//! synchronization.

use crate::lexer::Lexer;
use crate::parser::{ParseError, Parser};
use crate::render::{CustomRenderers, HtmlRenderer};

/// Options for one rendering run.
#[derive(Default)]
pub struct RenderOptions {
    /// Per-node-kind replacement rendering functions. An entry fully
    /// replaces builtin rendering for that kind.
    pub custom_renderers: CustomRenderers,
}

/// Render a markup source string to HTML.
///
/// Never fails for lexer-produced token streams; the `Err` case guards the
/// lexer/parser contract and signals a structurally invalid token sequence.
pub fn render_to_html(source: &str, options: RenderOptions) -> Result<String, ParseError> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let document = parser.parse()?;

    let mut renderer = HtmlRenderer::new(
        &parser.targets,
        &parser.sections,
        &parser.footnote_definitions,
        options.custom_renderers,
    );
    Ok(renderer.render(&document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_document() {
        let html = render_to_html("Title\n=====\n\nBody text.\n", RenderOptions::default())
            .expect("renders");
        assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Body text.</p>");
    }

    #[test]
    fn test_empty_document() {
        let html = render_to_html("", RenderOptions::default()).expect("renders");
        assert_eq!(html, "");
    }
}
