//! Core tokenization implementation
//!
//! The lexer walks the source one physical line at a time. Each non-blank
//! line produces one structural decision, but may yield several tokens (an
//! Indent plus a content token, or a list marker plus its trailing text), so
//! surplus tokens go through an explicit pending-output queue drained before
//! any further input is read. No coroutine machinery is needed.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexer::tokens::Token;

/// Ordered underline alphabet; a heading's level is the 1-based rank of its
/// underline character in this string.
const UNDERLINE_ALPHABET: &str = "=-`:'.\"~^_*+#";

static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*|\d+\.)[ \t]+(.*)$").expect("valid regex"));
static TABLE_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[=-]+(\+[=-]+)*\+$").expect("valid regex"));
static UNDERLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[=\-`:'."~^_*+#]{3,}$"#).expect("valid regex"));
static TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\. _([^:]+):").expect("valid regex"));
static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\. \[([^\]]+)\](.*)$").expect("valid regex"));
static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\. (\w+)::(.*)$").expect("valid regex"));

/// Width of the leading run of spaces and tabs, in characters.
fn leading_indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// The pull-based tokenizer.
///
/// `next_token()` is total over any input: it never fails, and after end of
/// input it flushes outstanding Dedents and then returns `Eof` forever.
pub struct Lexer {
    lines: Vec<String>,
    line_index: usize,
    indent_stack: Vec<usize>,
    queue: VecDeque<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            lines: input.split('\n').map(|l| l.to_string()).collect(),
            line_index: 0,
            indent_stack: vec![0],
            queue: VecDeque::new(),
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return token;
            }

            if self.line_index >= self.lines.len() {
                while self.indent_stack.len() > 1 {
                    self.indent_stack.pop();
                    self.queue.push_back(Token::Dedent);
                }
                if let Some(token) = self.queue.pop_front() {
                    return token;
                }
                return Token::Eof;
            }

            let line = self.lines[self.line_index].clone();
            self.line_index += 1;

            // Blank lines emit nothing
            if line.trim().is_empty() {
                continue;
            }

            self.lex_line(&line);
        }
    }

    fn lex_line(&mut self, line: &str) {
        let indent = leading_indent_width(line);
        let content = line.trim();

        let last_indent = *self.indent_stack.last().unwrap_or(&0);
        if indent > last_indent {
            self.indent_stack.push(indent);
            self.queue.push_back(Token::Indent);
        } else {
            // Pop until the stack top no longer exceeds the new width. A
            // width matching no remaining entry is tolerated silently.
            while indent < *self.indent_stack.last().unwrap_or(&0) {
                self.indent_stack.pop();
                self.queue.push_back(Token::Dedent);
            }
        }

        if let Some(caps) = LIST_ITEM_RE.captures(content) {
            self.queue
                .push_back(Token::ListItemMarker(caps[1].to_string()));
            self.queue.push_back(Token::Text(caps[2].trim().to_string()));
        } else if TABLE_SEPARATOR_RE.is_match(content) {
            self.queue
                .push_back(Token::TableSeparatorLine(content.to_string()));
        } else if content.starts_with('|') {
            self.queue
                .push_back(Token::TableDataRow(content.to_string()));
        } else if self.next_line_is_underline() {
            let underline = self.lines[self.line_index].trim();
            let level = UNDERLINE_ALPHABET
                .chars()
                .position(|c| underline.starts_with(c))
                .map(|rank| rank + 1)
                .unwrap_or(1);
            self.queue.push_back(Token::Section {
                title: content.to_string(),
                level,
            });
            // Consume the underline line
            self.line_index += 1;
        } else if content.starts_with(".. _") {
            match TARGET_RE.captures(content) {
                Some(caps) => self.queue.push_back(Token::Target(caps[1].to_string())),
                None => self.queue.push_back(Token::Paragraph(content.to_string())),
            }
        } else if content.starts_with(".. [") {
            match FOOTNOTE_RE.captures(content) {
                Some(caps) => {
                    let label = caps[1].to_string();
                    let value = self.gather_block(caps[2].trim().to_string(), indent);
                    self.queue.push_back(Token::FootnoteDefinition { label, value });
                }
                None => self.queue.push_back(Token::Paragraph(content.to_string())),
            }
        } else if content.starts_with(".. ") {
            match DIRECTIVE_RE.captures(content) {
                Some(caps) => {
                    let name = caps[1].to_string();
                    let value = self.gather_block(caps[2].trim().to_string(), indent);
                    self.queue.push_back(Token::Directive { name, value });
                }
                None => self.queue.push_back(Token::Paragraph(content.to_string())),
            }
        } else if self.next_line_opens_definition(indent) {
            self.queue
                .push_back(Token::DefinitionTerm(content.to_string()));
        } else {
            self.queue.push_back(Token::Paragraph(content.to_string()));
        }
    }

    /// Gather the continuation block of a directive or footnote definition:
    /// every immediately following line that is blank or indented deeper than
    /// the directive's own line. Blank lines are permitted inside the block
    /// but contribute nothing; non-blank lines are trimmed and joined onto
    /// the first-line value with newlines.
    fn gather_block(&mut self, first_line_value: String, indent: usize) -> String {
        let mut block: Vec<String> = Vec::new();
        while self.line_index < self.lines.len() {
            let next = &self.lines[self.line_index];
            let blank = next.trim().is_empty();
            if !blank && leading_indent_width(next) <= indent {
                break;
            }
            if !blank {
                block.push(next.trim().to_string());
            }
            self.line_index += 1;
        }

        if block.is_empty() {
            return first_line_value;
        }
        if first_line_value.is_empty() {
            block.join("\n")
        } else {
            format!("{}\n{}", first_line_value, block.join("\n"))
        }
    }

    fn next_line_is_underline(&self) -> bool {
        self.line_index < self.lines.len()
            && UNDERLINE_RE.is_match(self.lines[self.line_index].trim())
    }

    fn next_line_opens_definition(&self, indent: usize) -> bool {
        match self.lines.get(self.line_index) {
            Some(next) => !next.trim().is_empty() && leading_indent_width(next) > indent,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![Token::Eof]);
    }

    #[test]
    fn test_blank_lines_emit_nothing() {
        assert_eq!(lex("\n\n   \n\t\n"), vec![Token::Eof]);
    }

    #[test]
    fn test_paragraph_line() {
        assert_eq!(
            lex("Just some text."),
            vec![Token::Paragraph("Just some text.".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_list_marker_yields_two_tokens() {
        assert_eq!(
            lex("* one"),
            vec![
                Token::ListItemMarker("*".to_string()),
                Token::Text("one".to_string()),
                Token::Eof
            ]
        );
        assert_eq!(
            lex("12. twelve"),
            vec![
                Token::ListItemMarker("12.".to_string()),
                Token::Text("twelve".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_marker_without_trailing_space_is_a_paragraph() {
        assert_eq!(
            lex("*bold start"),
            vec![Token::Paragraph("*bold start".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_table_lines() {
        assert_eq!(
            lex("+----+----+\n| a  | b  |"),
            vec![
                Token::TableSeparatorLine("+----+----+".to_string()),
                Token::TableDataRow("| a  | b  |".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_section_consumes_underline() {
        assert_eq!(
            lex("Title\n====="),
            vec![
                Token::Section {
                    title: "Title".to_string(),
                    level: 1
                },
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_section_levels_follow_underline_alphabet() {
        let cases = [
            ("===", 1),
            ("---", 2),
            ("```", 3),
            (":::", 4),
            ("'''", 5),
            ("...", 6),
            ("\"\"\"", 7),
            ("~~~", 8),
            ("^^^", 9),
        ];
        for (underline, level) in cases {
            let tokens = lex(&format!("Title\n{}", underline));
            assert_eq!(
                tokens[0],
                Token::Section {
                    title: "Title".to_string(),
                    level
                },
                "underline {:?}",
                underline
            );
        }
    }

    #[test]
    fn test_short_underline_is_not_a_section() {
        // Two characters is below the 3+ threshold
        assert_eq!(
            lex("Title\n=="),
            vec![
                Token::Paragraph("Title".to_string()),
                Token::Paragraph("==".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_target_line() {
        assert_eq!(
            lex(".. _My Target:"),
            vec![Token::Target("My Target".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_malformed_target_degrades_to_paragraph() {
        assert_eq!(
            lex(".. _no closing colon"),
            vec![
                Token::Paragraph(".. _no closing colon".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_footnote_definition_single_line() {
        assert_eq!(
            lex(".. [1] The footnote."),
            vec![
                Token::FootnoteDefinition {
                    label: "1".to_string(),
                    value: "The footnote.".to_string()
                },
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_footnote_definition_gathers_indented_continuation() {
        let source = ".. [note] First line.\n\n   Continues here.\n   And here.\nAfter.";
        assert_eq!(
            lex(source),
            vec![
                Token::FootnoteDefinition {
                    label: "note".to_string(),
                    value: "First line.\nContinues here.\nAnd here.".to_string()
                },
                Token::Paragraph("After.".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_directive_with_block_content() {
        let source = ".. code:: rust\n\n    fn main() {}\n";
        assert_eq!(
            lex(source),
            vec![
                Token::Directive {
                    name: "code".to_string(),
                    value: "rust\nfn main() {}".to_string()
                },
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_directive_without_double_colon_degrades_to_paragraph() {
        assert_eq!(
            lex(".. just a comment"),
            vec![
                Token::Paragraph(".. just a comment".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_definition_term_requires_indented_follower() {
        assert_eq!(
            lex("term\n    meaning"),
            vec![
                Token::DefinitionTerm("term".to_string()),
                Token::Indent,
                Token::Paragraph("meaning".to_string()),
                Token::Dedent,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_indent_and_dedent_tokens() {
        let tokens = lex("a\n    b\nc");
        assert_eq!(
            tokens,
            vec![
                // "a" opens a definition list shape ("b" is deeper)
                Token::DefinitionTerm("a".to_string()),
                Token::Indent,
                Token::Paragraph("b".to_string()),
                Token::Dedent,
                Token::Paragraph("c".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_eof_flushes_outstanding_dedents() {
        let tokens = lex("term\n    a\n        b");
        let dedents = tokens.iter().filter(|t| **t == Token::Dedent).count();
        assert_eq!(dedents, 2);
        assert_eq!(tokens.last(), Some(&Token::Eof));
    }

    #[test]
    fn test_dedent_mismatch_is_tolerated() {
        // The middle line dedents to width 2, which matches no stack entry
        // (stack is [0, 4]); popping stops at 0 with a single Dedent and no
        // error is raised.
        let tokens = lex("term\n    deep\n  shallow");
        assert_eq!(
            tokens,
            vec![
                Token::DefinitionTerm("term".to_string()),
                Token::Indent,
                Token::Paragraph("deep".to_string()),
                Token::Dedent,
                Token::Paragraph("shallow".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("text");
        assert_eq!(
            lexer.next_token(),
            Token::Paragraph("text".to_string())
        );
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
    }
}
