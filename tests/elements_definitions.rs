//! Definition list tests

use rst2html::{render_to_html, RenderOptions};

fn render(source: &str) -> String {
    render_to_html(source, RenderOptions::default()).expect("valid document")
}

#[test]
fn test_single_term() {
    assert_eq!(
        render("term\n    meaning\n"),
        "<dl>\n<dt>term</dt>\n<dd><p>meaning</p></dd>\n</dl>"
    );
}

#[test]
fn test_consecutive_terms_share_one_list() {
    let html = render("first\n    one\nsecond\n    two\n");
    assert_eq!(html.matches("<dl>").count(), 1, "got: {}", html);
    assert_eq!(html.matches("<dt>").count(), 2, "got: {}", html);
}

#[test]
fn test_term_and_body_are_inline_parsed() {
    let html = render("*term*\n    has ``code``\n");
    assert!(html.contains("<dt><em>term</em></dt>"), "got: {}", html);
    assert!(html.contains("has <code>code</code>"), "got: {}", html);
}

#[test]
fn test_nested_definition_list() {
    let html = render("outer\n    inner\n        deep meaning\n");
    assert_eq!(html.matches("<dl>").count(), 2, "got: {}", html);
    assert!(html.contains("<dt>inner</dt>"), "got: {}", html);
    assert!(html.contains("deep meaning"), "got: {}", html);
}
