//! Whole-document tokenization tests
//!
//! These exercise the lexer over complete documents, checking the one
//! structural decision per line and the Indent/Dedent bookkeeping around it.

use rst2html::lexer::{lex, Token};
use rstest::rstest;

#[test]
fn test_mixed_document_token_stream() {
    let source = "\
Title
=====

Intro paragraph.

* first
* second

.. note:: Watch out.

.. _Anchor:
";
    assert_eq!(
        lex(source),
        vec![
            Token::Section {
                title: "Title".to_string(),
                level: 1
            },
            Token::Paragraph("Intro paragraph.".to_string()),
            Token::ListItemMarker("*".to_string()),
            Token::Text("first".to_string()),
            Token::ListItemMarker("*".to_string()),
            Token::Text("second".to_string()),
            Token::Directive {
                name: "note".to_string(),
                value: "Watch out.".to_string()
            },
            Token::Target("Anchor".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_nested_list_gets_indent_tokens() {
    let source = "* two\n  * a\n";
    assert_eq!(
        lex(source),
        vec![
            Token::ListItemMarker("*".to_string()),
            Token::Text("two".to_string()),
            Token::Indent,
            Token::ListItemMarker("*".to_string()),
            Token::Text("a".to_string()),
            Token::Dedent,
            Token::Eof,
        ]
    );
}

#[rstest]
#[case("===", 1)]
#[case("---", 2)]
#[case("```", 3)]
#[case(":::", 4)]
#[case("'''", 5)]
#[case("...", 6)]
#[case("\"\"\"", 7)]
#[case("~~~", 8)]
#[case("^^^", 9)]
#[case("___", 10)]
#[case("***", 11)]
#[case("+++", 12)]
#[case("###", 13)]
fn test_underline_rank_sets_heading_level(#[case] underline: &str, #[case] level: usize) {
    let tokens = lex(&format!("Heading\n{}\n", underline));
    assert_eq!(
        tokens[0],
        Token::Section {
            title: "Heading".to_string(),
            level
        }
    );
}

#[test]
fn test_degenerate_input_tokenizes_as_paragraphs() {
    let tokens = lex("just\nsome\nlines\n");
    assert_eq!(
        tokens,
        vec![
            Token::Paragraph("just".to_string()),
            Token::Paragraph("some".to_string()),
            Token::Paragraph("lines".to_string()),
            Token::Eof,
        ]
    );
}
