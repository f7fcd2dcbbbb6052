//! Inline markup engine
//!
//! Parses a flat text span into an ordered sequence of inline nodes. At each
//! scan position the recognizers run in fixed priority order: footnote
//! reference, interpreted role, closing delimiter, external link, inline
//! literal, emphasis. Links and roles recurse the engine over their inner
//! text, so labels may themselves contain emphasis.
//!
//! Emphasis is a bounded recursive call parameterized by its closing
//! delimiter. When end-of-text arrives before the terminator, the recursion
//! unwinds by restoring an explicit saved cursor; the opening delimiter
//! characters degrade to plain text and scanning resumes after them. The
//! recursion is delimiter-parameterized rather than type-parameterized, which
//! is what allows bold-inside-italic and vice versa at any depth.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Node;

static FOOTNOTE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\w+)\]_").expect("valid regex"));
static ROLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([\w-]+):`([^`<]+)(?: <([^>]+)>)?`").expect("valid regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^`([^`]+) <([^>]+)>`_").expect("valid regex"));

/// Parse a text span into inline nodes. Total: any input yields a node
/// sequence, with unterminated markup degrading to plain text.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut cursor = 0;
    parse_span(text, &mut cursor, None).unwrap_or_default()
}

fn flush_buffer(buffer: &mut String, nodes: &mut Vec<Node>) {
    if !buffer.is_empty() {
        nodes.push(Node::Text {
            text: std::mem::take(buffer),
        });
    }
}

/// Scan from `cursor` until end of text or until `delimiter` closes the span.
/// Returns `None` (with the cursor restored to its entry value) when a
/// delimiter was requested but never found.
fn parse_span(text: &str, cursor: &mut usize, delimiter: Option<&str>) -> Option<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut buffer = String::new();
    let start_cursor = *cursor;

    while *cursor < text.len() {
        let rest = &text[*cursor..];

        if let Some(caps) = FOOTNOTE_REF_RE.captures(rest) {
            flush_buffer(&mut buffer, &mut nodes);
            nodes.push(Node::FootnoteReference {
                label: caps[1].to_string(),
            });
            *cursor += caps[0].len();
            continue;
        }

        if let Some(caps) = ROLE_RE.captures(rest) {
            flush_buffer(&mut buffer, &mut nodes);
            let name = caps[1].to_string();
            let visible = caps[2].to_string();
            // Target defaults to the visible text
            let target = caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| visible.clone());
            nodes.push(Node::Role {
                name,
                target,
                children: parse_inline(&visible),
            });
            *cursor += caps[0].len();
            continue;
        }

        if let Some(delim) = delimiter {
            // A lone `*` terminator must not consume the start of `**`
            let is_double_star_opener = delim == "*" && rest.starts_with("**");
            if !is_double_star_opener && rest.starts_with(delim) {
                flush_buffer(&mut buffer, &mut nodes);
                *cursor += delim.len();
                return Some(nodes);
            }
        }

        if let Some(caps) = LINK_RE.captures(rest) {
            flush_buffer(&mut buffer, &mut nodes);
            nodes.push(Node::Link {
                url: caps[2].to_string(),
                children: parse_inline(&caps[1]),
            });
            *cursor += caps[0].len();
            continue;
        }

        if rest.starts_with("``") {
            flush_buffer(&mut buffer, &mut nodes);
            *cursor += 2;
            match text[*cursor..].find("``") {
                Some(rel_end) => {
                    nodes.push(Node::Literal {
                        text: text[*cursor..*cursor + rel_end].to_string(),
                    });
                    *cursor += rel_end + 2;
                }
                None => {
                    // Unterminated literal: the backticks re-join the text
                    buffer.push_str("``");
                }
            }
            continue;
        }

        let opener = if rest.starts_with("**") {
            Some("**")
        } else if rest.starts_with('*') {
            Some("*")
        } else {
            None
        };
        if let Some(opener) = opener {
            flush_buffer(&mut buffer, &mut nodes);
            let saved = *cursor;
            *cursor += opener.len();
            match parse_span(text, cursor, Some(opener)) {
                Some(children) => {
                    nodes.push(if opener == "**" {
                        Node::Bold { children }
                    } else {
                        Node::Italic { children }
                    });
                }
                None => {
                    // Unwind: no terminator ahead, so the opener degrades to
                    // plain text and scanning resumes just past it.
                    *cursor = saved + opener.len();
                    buffer.push_str(opener);
                }
            }
            continue;
        }

        match rest.chars().next() {
            Some(ch) => {
                buffer.push(ch);
                *cursor += ch.len_utf8();
            }
            None => break,
        }
    }

    if delimiter.is_some() {
        *cursor = start_cursor;
        return None;
    }
    flush_buffer(&mut buffer, &mut nodes);
    Some(nodes)
}
