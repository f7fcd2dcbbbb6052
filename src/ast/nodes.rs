//! Node definitions for the parse tree
//!
//! Every node is a variant of the `Node` enum. Container variants hold an
//! ordered child sequence; leaf variants hold only scalar data. `NodeKind` is
//! the payload-free tag used to key the renderer's override table.

use std::fmt;

/// A node of the parse tree.
///
/// `Target`, `Role` and `FootnoteReference` are cross-reference kinds: they
/// are resolved against the parser's side tables at render time, never
/// against other nodes directly. `FootnoteDefinition` nodes live only in the
/// footnote side table, never in the main tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node {
    Document {
        children: Vec<Node>,
    },
    /// A titled section. `level` is 1-13 depending on which underline
    /// character was used; `id` is the slug derived from the title.
    Section {
        level: usize,
        id: String,
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    /// A literal code block from a `code` directive. `language` may be empty.
    Code {
        language: String,
        text: String,
    },
    Text {
        text: String,
    },
    Bold {
        children: Vec<Node>,
    },
    Italic {
        children: Vec<Node>,
    },
    /// Inline literal (double-backtick) text.
    Literal {
        text: String,
    },
    BulletedList {
        children: Vec<Node>,
    },
    EnumeratedList {
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    /// A directive with no dedicated node kind. Admonition styling is a
    /// render-time decision, so admonitions also land here.
    Directive {
        name: String,
        children: Vec<Node>,
    },
    Link {
        url: String,
        children: Vec<Node>,
    },
    Image {
        src: String,
        alt: Option<String>,
        width: Option<String>,
        height: Option<String>,
    },
    /// Interpreted text, e.g. `:ref:`title``. `target` defaults to the
    /// visible text when no explicit `<target>` was given.
    Role {
        name: String,
        target: String,
        children: Vec<Node>,
    },
    /// A named cross-reference anchor. `identifier` is the slug.
    Target {
        identifier: String,
    },
    /// Table-of-contents marker from a `contents` directive.
    Contents {
        depth: usize,
    },
    Figure {
        src: String,
        alt: Option<String>,
        width: Option<String>,
        height: Option<String>,
        /// Caption content.
        children: Vec<Node>,
    },
    Table {
        children: Vec<Node>,
    },
    TableHeader {
        children: Vec<Node>,
    },
    TableRow {
        children: Vec<Node>,
    },
    TableCell {
        children: Vec<Node>,
    },
    FootnoteDefinition {
        label: String,
        children: Vec<Node>,
    },
    FootnoteReference {
        label: String,
    },
    DefinitionList {
        children: Vec<Node>,
    },
    DefinitionListItem {
        children: Vec<Node>,
    },
    DefinitionTerm {
        children: Vec<Node>,
    },
    Definition {
        children: Vec<Node>,
    },
    /// Marker emitted by a `class` directive. Renders to nothing; sets the
    /// pending style class consumed by the next block-level node.
    Class {
        name: String,
    },
    /// Raw passthrough from a `raw` directive.
    Raw {
        format: String,
        content: String,
    },
}

impl Node {
    /// The payload-free tag of this node, used for override-table lookup.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Section { .. } => NodeKind::Section,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Code { .. } => NodeKind::Code,
            Node::Text { .. } => NodeKind::Text,
            Node::Bold { .. } => NodeKind::Bold,
            Node::Italic { .. } => NodeKind::Italic,
            Node::Literal { .. } => NodeKind::Literal,
            Node::BulletedList { .. } => NodeKind::BulletedList,
            Node::EnumeratedList { .. } => NodeKind::EnumeratedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Directive { .. } => NodeKind::Directive,
            Node::Link { .. } => NodeKind::Link,
            Node::Image { .. } => NodeKind::Image,
            Node::Role { .. } => NodeKind::Role,
            Node::Target { .. } => NodeKind::Target,
            Node::Contents { .. } => NodeKind::Contents,
            Node::Figure { .. } => NodeKind::Figure,
            Node::Table { .. } => NodeKind::Table,
            Node::TableHeader { .. } => NodeKind::TableHeader,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::FootnoteDefinition { .. } => NodeKind::FootnoteDefinition,
            Node::FootnoteReference { .. } => NodeKind::FootnoteReference,
            Node::DefinitionList { .. } => NodeKind::DefinitionList,
            Node::DefinitionListItem { .. } => NodeKind::DefinitionListItem,
            Node::DefinitionTerm { .. } => NodeKind::DefinitionTerm,
            Node::Definition { .. } => NodeKind::Definition,
            Node::Class { .. } => NodeKind::Class,
            Node::Raw { .. } => NodeKind::Raw,
        }
    }

    /// Convenience constructor for the most common leaf.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text { text: text.into() }
    }
}

/// The tag of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NodeKind {
    Document,
    Section,
    Paragraph,
    Code,
    Text,
    Bold,
    Italic,
    Literal,
    BulletedList,
    EnumeratedList,
    ListItem,
    Directive,
    Link,
    Image,
    Role,
    Target,
    Contents,
    Figure,
    Table,
    TableHeader,
    TableRow,
    TableCell,
    FootnoteDefinition,
    FootnoteReference,
    DefinitionList,
    DefinitionListItem,
    DefinitionTerm,
    Definition,
    Class,
    Raw,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
