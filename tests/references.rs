//! Cross-reference tests: targets, the ref role, and the contents directive

use rst2html::{render_to_html, RenderOptions};

fn render(source: &str) -> String {
    render_to_html(source, RenderOptions::default()).expect("valid document")
}

#[test]
fn test_target_renders_an_anchor() {
    assert_eq!(render(".. _Some Place:\n"), "<a id=\"some-place\"></a>");
}

#[test]
fn test_ref_role_resolves_to_the_target_anchor() {
    assert_eq!(
        render(".. _My Target:\n\nSee :ref:`My Target`.\n"),
        "<a id=\"my-target\"></a>\n<p>See <a href=\"#my-target\">My Target</a>.</p>"
    );
}

#[test]
fn test_ref_role_with_display_text() {
    let html = render(".. _My Target:\n\nGo :ref:`here <My Target>`.\n");
    assert!(
        html.contains("<a href=\"#my-target\">here</a>"),
        "got: {}",
        html
    );
}

#[test]
fn test_target_lookup_is_verbatim_not_slugged() {
    // The role names the target by its original title, exactly as written
    let html = render(".. _My Target:\n\nSee :ref:`my target`.\n");
    assert!(html.contains("<p>See my target.</p>"), "got: {}", html);
}

#[test]
fn test_unresolved_role_renders_inner_text_only() {
    assert_eq!(render(":ref:`Nowhere`.\n"), "<p>Nowhere.</p>");
}

#[test]
fn test_non_ref_role_renders_inner_text_only() {
    assert_eq!(render(":emphasis:`inner`.\n"), "<p>inner.</p>");
}

#[test]
fn test_contents_lists_every_section_flat() {
    let source = "\
.. contents::

One
===

Two
---
";
    assert_eq!(
        render(source),
        "<div class=\"contents\">\n<ul>\n<li><a href=\"#one\">One</a></li>\n<li><a href=\"#two\">Two</a></li>\n</ul>\n</div>\n<h1 id=\"one\">One</h1>\n<h2 id=\"two\">Two</h2>"
    );
}

#[test]
fn test_equal_titles_get_equal_slugs() {
    let html = render("Same Name\n=========\n\nSame Name\n---------\n");
    assert_eq!(html.matches("id=\"same-name\"").count(), 2, "got: {}", html);
}
