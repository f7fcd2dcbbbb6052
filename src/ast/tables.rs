//! Side tables produced alongside the parse tree
//!
//! The parser owns these three tables for the lifetime of one parse; the
//! renderer borrows them read-only. Keeping them on the parser instance (not
//! in any global state) is what makes independent documents safe to process
//! concurrently.

use std::collections::HashMap;

use crate::ast::Node;

/// Verbatim target title -> slug. The key stays case-sensitive and verbatim;
/// only the stored slug is case-normalized.
pub type Targets = HashMap<String, String>;

/// Footnote label -> its `Node::FootnoteDefinition`. Definitions never appear
/// in the main tree.
pub type FootnoteDefinitions = HashMap<String, Node>;

/// One entry of the ordered section list, in document order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionInfo {
    pub title: String,
    pub level: usize,
    pub id: String,
}

/// Derive a slug from a section or target title: lowercase, with interior
/// whitespace runs collapsed to single hyphens. Pure and deterministic, so
/// equal titles always yield equal slugs.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Section One"), "section-one");
        assert_eq!(slugify("My   Target"), "my-target");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        assert_eq!(slugify("Some Title"), slugify("Some Title"));
    }
}
