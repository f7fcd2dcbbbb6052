//! HTML renderer implementation
//!
//! A single match over the node tag drives all builtin rendering; the
//! override table is a plain mapping from node kind to replacement function
//! with fallthrough to the builtin when absent. When an override exists for
//! a kind, the builtin never runs for nodes of that kind.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::tables::{FootnoteDefinitions, SectionInfo, Targets};
use crate::ast::{Node, NodeKind};

/// Directive names rendered as fixed-style admonition callouts. A pure
/// set-membership test, not a type distinction.
const ADMONITION_NAMES: [&str; 9] = [
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
];

/// First opening tag of a block's markup, for pending-class injection.
static FIRST_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)").expect("valid regex"));

/// A replacement rendering function for one node kind.
pub type RenderFn = Box<dyn Fn(&Node) -> String>;

/// Node kind -> override function. Absent kinds fall through to the builtin.
pub type CustomRenderers = HashMap<NodeKind, RenderFn>;

/// The AST-to-HTML renderer.
///
/// Borrows the parser's side tables read-only for one render pass. The
/// footnote reference list and the pending style class are pass-scoped
/// mutable state; use one renderer instance per document.
pub struct HtmlRenderer<'a> {
    targets: &'a Targets,
    sections: &'a [SectionInfo],
    footnote_definitions: &'a FootnoteDefinitions,
    custom_renderers: CustomRenderers,
    /// Labels in first-reference order; position defines the display number.
    footnote_references: Vec<String>,
    /// Set by a Class marker, consumed by the next class-applying block.
    next_element_class: Option<String>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(
        targets: &'a Targets,
        sections: &'a [SectionInfo],
        footnote_definitions: &'a FootnoteDefinitions,
        custom_renderers: CustomRenderers,
    ) -> Self {
        HtmlRenderer {
            targets,
            sections,
            footnote_definitions,
            custom_renderers,
            footnote_references: Vec::new(),
            next_element_class: None,
        }
    }

    /// Render one node (and its subtree) to HTML.
    pub fn render(&mut self, node: &Node) -> String {
        self.render_node(node, false)
    }

    fn render_node(&mut self, node: &Node, is_header: bool) -> String {
        if let Some(custom) = self.custom_renderers.get(&node.kind()) {
            return custom(node);
        }

        match node {
            Node::Document { children } => self.render_document(children),
            Node::Section {
                level,
                id,
                children,
            } => self.render_section(*level, id, children),
            Node::Paragraph { children } => {
                let text = self.render_children(children, "");
                self.apply_class(format!("<p>{}</p>", text))
            }
            Node::Code { language, text } => self.apply_class(format!(
                "<pre><code class=\"lang-{}\">{}</code></pre>",
                language, text
            )),
            Node::Text { text } => text.clone(),
            Node::Bold { children } => {
                format!("<strong>{}</strong>", self.render_children(children, ""))
            }
            Node::Italic { children } => {
                format!("<em>{}</em>", self.render_children(children, ""))
            }
            Node::Literal { text } => format!("<code>{}</code>", text),
            Node::BulletedList { children } => {
                let items = self.render_children(children, "");
                self.apply_class(format!("<ul>\n{}</ul>", items))
            }
            Node::EnumeratedList { children } => {
                let items = self.render_children(children, "");
                self.apply_class(format!("<ol>\n{}</ol>", items))
            }
            Node::ListItem { children } => self.render_list_item(children),
            Node::Directive { name, children } => self.render_directive(name, children),
            Node::Link { url, children } => {
                format!("<a href=\"{}\">{}</a>", url, self.render_children(children, ""))
            }
            Node::Image {
                src,
                alt,
                width,
                height,
            } => format!("<img {}>", image_attributes(src, alt, width, height)),
            Node::Role {
                name,
                target,
                children,
            } => self.render_role(name, target, children),
            Node::Target { identifier } => format!("<a id=\"{}\"></a>", identifier),
            Node::Contents { .. } => self.render_contents(),
            Node::Figure {
                src,
                alt,
                width,
                height,
                children,
            } => self.render_figure(src, alt, width, height, children),
            Node::Table { children } => self.render_table(children),
            Node::TableHeader { children } => self.render_table_row(children, true),
            Node::TableRow { children } => self.render_table_row(children, false),
            Node::TableCell { children } => {
                let content = self.render_children(children, "");
                let tag = if is_header { "th" } else { "td" };
                format!("<{}>{}</{}>", tag, content, tag)
            }
            // Definitions render only in the footnote block at document end
            Node::FootnoteDefinition { .. } => String::new(),
            Node::FootnoteReference { label } => self.render_footnote_reference(label),
            Node::DefinitionList { children } => {
                let items = self.render_children(children, "\n");
                self.apply_class(format!("<dl>\n{}\n</dl>", items))
            }
            Node::DefinitionListItem { children } => self.render_children(children, "\n"),
            Node::DefinitionTerm { children } => {
                format!("<dt>{}</dt>", self.render_children(children, ""))
            }
            Node::Definition { children } => {
                format!("<dd>{}</dd>", self.render_children(children, ""))
            }
            Node::Class { name } => {
                self.next_element_class = Some(name.clone());
                String::new()
            }
            Node::Raw { format, content } => {
                if format == "html" {
                    content.clone()
                } else {
                    String::new()
                }
            }
        }
    }

    fn render_children(&mut self, children: &[Node], separator: &str) -> String {
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            parts.push(self.render(child));
        }
        parts.join(separator)
    }

    fn render_document(&mut self, children: &[Node]) -> String {
        let content = self.render_children(children, "\n");
        let footnotes = self.render_footnotes();
        format!("{}{}", content, footnotes)
    }

    fn render_section(&mut self, level: usize, id: &str, children: &[Node]) -> String {
        let title = self.render_children(children, "");
        self.apply_class(format!("<h{} id=\"{}\">{}</h{}>", level, id, title, level))
    }

    fn render_footnote_reference(&mut self, label: &str) -> String {
        if !self.footnote_definitions.contains_key(label) {
            // Unresolved references stay in the output verbatim
            return format!("[{}]_", label);
        }
        let index = match self.footnote_references.iter().position(|l| l == label) {
            Some(position) => position + 1,
            None => {
                self.footnote_references.push(label.to_string());
                self.footnote_references.len()
            }
        };
        format!(
            "<sup><a href=\"#fn-{}\" id=\"fnref-{}\">{}</a></sup>",
            label, label, index
        )
    }

    fn render_footnotes(&mut self) -> String {
        if self.footnote_references.is_empty() {
            return String::new();
        }
        // Numbering is first-reference order, which is exactly the order of
        // this list; unreferenced definitions never show up here.
        let labels = self.footnote_references.clone();
        let mut items = Vec::with_capacity(labels.len());
        for label in labels {
            let definition = match self.footnote_definitions.get(&label) {
                Some(Node::FootnoteDefinition { children, .. }) => children.clone(),
                _ => continue,
            };
            let content = self.render_children(&definition, "");
            items.push(format!(
                "<li id=\"fn-{}\">{} <a href=\"#fnref-{}\">\u{21a9}</a></li>",
                label, content, label
            ));
        }
        format!(
            "\n<hr>\n<ol class=\"footnotes\">\n{}\n</ol>",
            items.join("\n")
        )
    }

    fn render_list_item(&mut self, children: &[Node]) -> String {
        let mut content = String::new();
        let mut sublists = String::new();
        for child in children {
            match child.kind() {
                NodeKind::BulletedList | NodeKind::EnumeratedList => {
                    sublists.push_str(&self.render(child))
                }
                _ => content.push_str(&self.render(child)),
            }
        }
        format!("<li>{}{}</li>\n", content, sublists)
    }

    fn render_directive(&mut self, name: &str, children: &[Node]) -> String {
        let text = self.render_children(children, "");

        if ADMONITION_NAMES.contains(&name) {
            let title = capitalize(name);
            return self.apply_class(format!(
                "<div class=\"admonition {}\">\n<p class=\"admonition-title\">{}</p>\n<p>{}</p>\n</div>",
                name, title, text
            ));
        }

        self.apply_class(format!(
            "<div class=\"directive {}\">\n<p>{}</p>\n</div>",
            name, text
        ))
    }

    fn render_role(&mut self, name: &str, target: &str, children: &[Node]) -> String {
        if name == "ref" {
            if let Some(target_id) = self.targets.get(target) {
                let target_id = target_id.clone();
                let text = self.render_children(children, "");
                return format!("<a href=\"#{}\">{}</a>", target_id, text);
            }
        }
        // Unknown role or missing target: the inner content, markup stripped
        self.render_children(children, "")
    }

    fn render_contents(&mut self) -> String {
        // Flat list of every section regardless of nesting level
        let items: Vec<String> = self
            .sections
            .iter()
            .map(|section| {
                format!("<li><a href=\"#{}\">{}</a></li>", section.id, section.title)
            })
            .collect();
        format!(
            "<div class=\"contents\">\n<ul>\n{}\n</ul>\n</div>",
            items.join("\n")
        )
    }

    fn render_figure(
        &mut self,
        src: &str,
        alt: &Option<String>,
        width: &Option<String>,
        height: &Option<String>,
        children: &[Node],
    ) -> String {
        let img = format!("<img {}>", image_attributes(src, alt, width, height));
        let caption = self.render_children(children, "");
        let figcaption = if caption.is_empty() {
            String::new()
        } else {
            format!("<figcaption>{}</figcaption>", caption)
        };
        self.apply_class(format!("<figure>\n{}\n{}\n</figure>", img, figcaption))
    }

    fn render_table(&mut self, children: &[Node]) -> String {
        let headers: Vec<&Node> = children
            .iter()
            .filter(|child| child.kind() == NodeKind::TableHeader)
            .collect();
        let rows: Vec<&Node> = children
            .iter()
            .filter(|child| child.kind() == NodeKind::TableRow)
            .collect();

        let thead = if headers.is_empty() {
            String::new()
        } else {
            let mut head = String::new();
            for header in headers {
                head.push_str(&self.render(header));
            }
            format!("<thead>\n{}</thead>", head)
        };
        let tbody = if rows.is_empty() {
            String::new()
        } else {
            let mut body = String::new();
            for row in rows {
                body.push_str(&self.render(row));
            }
            format!("<tbody>\n{}</tbody>", body)
        };

        self.apply_class(format!("<table>\n{}\n{}\n</table>", thead, tbody))
    }

    fn render_table_row(&mut self, cells: &[Node], is_header: bool) -> String {
        let mut rendered = String::new();
        for cell in cells {
            rendered.push_str(&self.render_node(cell, is_header));
        }
        format!("<tr>\n{}</tr>\n", rendered)
    }

    /// Inject the pending style class into the first opening tag of `html`,
    /// consuming it. Blocks that never call this leave the class pending.
    fn apply_class(&mut self, html: String) -> String {
        match self.next_element_class.take() {
            Some(class) => FIRST_TAG_RE
                .replace(&html, |caps: &regex::Captures| {
                    format!("<{} class=\"{}\"", &caps[1], class)
                })
                .into_owned(),
            None => html,
        }
    }
}

fn image_attributes(
    src: &str,
    alt: &Option<String>,
    width: &Option<String>,
    height: &Option<String>,
) -> String {
    let mut attrs = format!("src=\"{}\"", src);
    if let Some(alt) = alt {
        attrs.push_str(&format!(" alt=\"{}\"", alt));
    }
    if let Some(width) = width {
        attrs.push_str(&format!(" width=\"{}\"", width));
    }
    if let Some(height) = height {
        attrs.push_str(&format!(" height=\"{}\"", height));
    }
    attrs
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
