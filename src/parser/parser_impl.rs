//! Recursive-descent parser implementation
//!
//! The parser pulls tokens on demand, builds the tree, and records the side
//! tables as it goes: section entries in document order, verbatim target
//! titles mapped to slugs, and footnote definitions keyed by label (which
//! never enter the main tree). `expect` failures are the single fatal fault
//! and should be unreachable for lexer-produced token streams.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::ast::tables::{slugify, FootnoteDefinitions, SectionInfo, Targets};
use crate::ast::Node;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::parser::inline::parse_inline;
use crate::parser::ParseError;

/// Directive option line: `:key: value`.
static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*:(\w+):[ \t]*(.*)$").expect("valid regex"));

pub struct Parser {
    lexer: Lexer,
    current: Token,
    /// Verbatim target title -> slug.
    pub targets: Targets,
    /// Section entries in document order.
    pub sections: Vec<SectionInfo>,
    /// Footnote label -> definition node.
    pub footnote_definitions: FootnoteDefinitions,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            targets: Targets::new(),
            sections: Vec::new(),
            footnote_definitions: FootnoteDefinitions::new(),
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Advance past the current token if it has the expected kind; the
    /// mismatch case is the parser's only fatal fault.
    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.current.kind() == kind {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                found: self.current.kind(),
                expected: kind,
            })
        }
    }

    /// Parse the whole token stream into a `Document` node.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();
        while self.current.kind() != TokenKind::Eof {
            match self.current.kind() {
                TokenKind::Section => children.push(self.parse_section()?),
                TokenKind::Paragraph => children.push(self.parse_paragraph()?),
                TokenKind::ListItemMarker => children.push(self.parse_list()?),
                TokenKind::Directive => children.push(self.parse_directive()?),
                TokenKind::Target => children.push(self.parse_target()?),
                TokenKind::TableSeparatorLine => children.push(self.parse_table()?),
                TokenKind::FootnoteDefinition => self.parse_footnote_definition()?,
                TokenKind::DefinitionTerm => children.push(self.parse_definition_list()?),
                // Stray structure tokens at the top level carry no content
                _ => self.advance(),
            }
        }
        Ok(Node::Document { children })
    }

    fn parse_section(&mut self) -> Result<Node, ParseError> {
        let (title, level) = match &self.current {
            Token::Section { title, level } => (title.clone(), *level),
            _ => unreachable!("caller checked the token kind"),
        };
        let id = slugify(&title);
        self.sections.push(SectionInfo {
            title: title.clone(),
            level,
            id: id.clone(),
        });
        self.expect(TokenKind::Section)?;
        Ok(Node::Section {
            level,
            id,
            children: vec![Node::text(title)],
        })
    }

    fn parse_paragraph(&mut self) -> Result<Node, ParseError> {
        let children = match &self.current {
            Token::Paragraph(text) => parse_inline(text),
            _ => unreachable!("caller checked the token kind"),
        };
        self.expect(TokenKind::Paragraph)?;
        Ok(Node::Paragraph { children })
    }

    fn parse_target(&mut self) -> Result<Node, ParseError> {
        let title = match &self.current {
            Token::Target(title) => title.clone(),
            _ => unreachable!("caller checked the token kind"),
        };
        let identifier = slugify(&title);
        // Lookup key stays verbatim; only the slug is normalized
        self.targets.insert(title, identifier.clone());
        self.expect(TokenKind::Target)?;
        Ok(Node::Target { identifier })
    }

    fn parse_footnote_definition(&mut self) -> Result<(), ParseError> {
        let (label, value) = match &self.current {
            Token::FootnoteDefinition { label, value } => (label.clone(), value.clone()),
            _ => unreachable!("caller checked the token kind"),
        };
        let children = parse_inline(&value);
        self.footnote_definitions.insert(
            label.clone(),
            Node::FootnoteDefinition { label, children },
        );
        self.expect(TokenKind::FootnoteDefinition)
    }

    fn parse_list(&mut self) -> Result<Node, ParseError> {
        let bulleted = matches!(&self.current, Token::ListItemMarker(marker) if marker == "*");
        let mut children = Vec::new();
        while self.current.kind() == TokenKind::ListItemMarker {
            children.push(self.parse_list_item()?);
        }
        Ok(if bulleted {
            Node::BulletedList { children }
        } else {
            Node::EnumeratedList { children }
        })
    }

    fn parse_list_item(&mut self) -> Result<Node, ParseError> {
        self.expect(TokenKind::ListItemMarker)?;
        let text = match &self.current {
            Token::Text(text) => text.clone(),
            _ => String::new(),
        };
        self.expect(TokenKind::Text)?;
        let mut children = parse_inline(&text);
        // An item may be followed by exactly one nested list block
        if self.current.kind() == TokenKind::Indent {
            self.expect(TokenKind::Indent)?;
            children.push(self.parse_list()?);
            self.expect(TokenKind::Dedent)?;
        }
        Ok(Node::ListItem { children })
    }

    fn parse_table(&mut self) -> Result<Node, ParseError> {
        let separator = match &self.current {
            Token::TableSeparatorLine(line) => line.clone(),
            _ => unreachable!("caller checked the token kind"),
        };
        self.expect(TokenKind::TableSeparatorLine)?;

        // The first separator fixes the column widths for the whole table;
        // data rows are sliced at these exact offsets, never re-measured.
        let segments: Vec<&str> = separator.split('+').collect();
        let widths: Vec<usize> = segments[1..segments.len().saturating_sub(1)]
            .iter()
            .map(|s| s.chars().count())
            .collect();

        let mut leading: Vec<Vec<Node>> = Vec::new();
        let mut trailing: Vec<Vec<Node>> = Vec::new();
        let mut saw_second_separator = false;
        loop {
            match &self.current {
                Token::TableDataRow(row) => {
                    let cells: Vec<Node> = slice_row(row, &widths)
                        .into_iter()
                        .map(|content| Node::TableCell {
                            children: parse_inline(&content),
                        })
                        .collect();
                    if saw_second_separator {
                        trailing.push(cells);
                    } else {
                        leading.push(cells);
                    }
                    self.expect(TokenKind::TableDataRow)?;
                }
                Token::TableSeparatorLine(_) => {
                    saw_second_separator = true;
                    self.expect(TokenKind::TableSeparatorLine)?;
                }
                _ => break,
            }
        }

        // Leading rows form the header only when a second separator closed
        // them off; a table without one has no header and is entirely body.
        let mut children: Vec<Node> = Vec::new();
        if saw_second_separator {
            children.extend(
                leading
                    .into_iter()
                    .map(|cells| Node::TableHeader { children: cells }),
            );
        } else {
            children.extend(
                leading
                    .into_iter()
                    .map(|cells| Node::TableRow { children: cells }),
            );
        }
        children.extend(
            trailing
                .into_iter()
                .map(|cells| Node::TableRow { children: cells }),
        );

        Ok(Node::Table { children })
    }

    fn parse_directive(&mut self) -> Result<Node, ParseError> {
        let (name, value) = match &self.current {
            Token::Directive { name, value } => (name.clone(), value.clone()),
            _ => unreachable!("caller checked the token kind"),
        };
        self.expect(TokenKind::Directive)?;

        Ok(match name.as_str() {
            "class" => Node::Class { name: value },
            "raw" => {
                let mut lines = value.split('\n');
                let format = lines.next().unwrap_or("").trim().to_string();
                let content = lines.collect::<Vec<_>>().join("\n");
                Node::Raw { format, content }
            }
            "contents" => Node::Contents { depth: 2 },
            "code" => {
                let mut lines = value.split('\n');
                let language = lines.next().unwrap_or("").trim().to_string();
                let text = lines.collect::<Vec<_>>().join("\n").trim().to_string();
                Node::Code { language, text }
            }
            "image" => parse_image_directive(&value),
            "figure" => parse_figure_directive(&value),
            _ => Node::Directive {
                name,
                children: parse_inline(&value),
            },
        })
    }

    fn parse_definition_list(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();
        while self.current.kind() == TokenKind::DefinitionTerm {
            children.push(self.parse_definition_list_item()?);
        }
        Ok(Node::DefinitionList { children })
    }

    fn parse_definition_list_item(&mut self) -> Result<Node, ParseError> {
        let term_text = match &self.current {
            Token::DefinitionTerm(text) => text.clone(),
            _ => unreachable!("caller checked the token kind"),
        };
        let term = Node::DefinitionTerm {
            children: parse_inline(&term_text),
        };
        self.expect(TokenKind::DefinitionTerm)?;

        // The definition body is exactly one Indent-delimited block
        self.expect(TokenKind::Indent)?;
        let mut body = Vec::new();
        while self.current.kind() != TokenKind::Dedent && self.current.kind() != TokenKind::Eof {
            match self.current.kind() {
                TokenKind::Paragraph => body.push(self.parse_paragraph()?),
                TokenKind::DefinitionTerm => body.push(self.parse_definition_list()?),
                // Skip anything else rather than loop forever on it
                _ => self.advance(),
            }
        }
        self.expect(TokenKind::Dedent)?;

        Ok(Node::DefinitionListItem {
            children: vec![term, Node::Definition { children: body }],
        })
    }
}

/// Slice a table data row at fixed column offsets. Offsets are counted in
/// Unicode scalar values, starting one past the leading `|`; each slice is
/// trimmed. Out-of-range columns yield empty cells.
fn slice_row(row: &str, widths: &[usize]) -> Vec<String> {
    let chars: Vec<char> = row.chars().collect();
    let mut cells = Vec::with_capacity(widths.len());
    let mut pos = 1usize;
    for &width in widths {
        let start = pos.min(chars.len());
        let end = (pos + width).min(chars.len());
        let cell: String = chars[start..end].iter().collect();
        cells.push(cell.trim().to_string());
        pos += width + 1;
    }
    cells
}

fn parse_directive_options(lines: &[&str]) -> HashMap<String, String> {
    let mut options = HashMap::new();
    for line in lines {
        if let Some(caps) = OPTION_RE.captures(line) {
            options.insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }
    options
}

fn parse_image_directive(value: &str) -> Node {
    let lines: Vec<&str> = value.split('\n').collect();
    let src = lines[0].trim().to_string();
    let mut options = parse_directive_options(&lines[1..]);
    Node::Image {
        src,
        alt: options.remove("alt"),
        width: options.remove("width"),
        height: options.remove("height"),
    }
}

fn parse_figure_directive(value: &str) -> Node {
    let lines: Vec<&str> = value.split('\n').collect();
    let src = lines[0].trim().to_string();

    // Options run until the first non-option line; the rest is the caption
    let mut options = HashMap::new();
    let mut caption_start = 1;
    for (index, line) in lines.iter().enumerate().skip(1) {
        match OPTION_RE.captures(line) {
            Some(caps) => {
                options.insert(caps[1].to_string(), caps[2].trim().to_string());
                caption_start = index + 1;
            }
            None => break,
        }
    }

    let caption = lines[caption_start.min(lines.len())..]
        .join("\n")
        .trim()
        .to_string();

    Node::Figure {
        src,
        alt: options.remove("alt"),
        width: options.remove("width"),
        height: options.remove("height"),
        children: parse_inline(&caption),
    }
}
