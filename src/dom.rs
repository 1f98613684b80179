//! DOM Access Adapter
//!
//! A typed, read-only view over a parsed `dom_query` document. Detection code
//! never touches raw attributes: it asks an [`Element`] for its tag, class
//! tokens, id, children or text, and finds elements through the document
//! queries below. Nothing in this module mutates the tree.

use std::fmt;

use dom_query::{NodeId, NodeRef};
use regex::Regex;

// Re-export core types for external use
pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

use crate::encoding;

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Parsing never fails: malformed markup yields whatever tree html5ever
/// recovers.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse raw page bytes, honouring a declared `<meta charset>`.
#[must_use]
pub fn parse_bytes(html: &[u8]) -> Document {
    Document::from(encoding::transcode_to_utf8(html))
}

// === Element ===

/// A single element node borrowed from a [`Document`].
///
/// Cheap to copy. Two `Element`s are equal when they refer to the same node.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    node: NodeRef<'a>,
}

impl<'a> Element<'a> {
    /// Wrap a node. Returns `None` for text, comment and document nodes.
    #[must_use]
    pub fn from_node(node: NodeRef<'a>) -> Option<Self> {
        node.is_element().then_some(Self { node })
    }

    /// Node identity within its document.
    #[inline]
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.node.id
    }

    /// The element as a one-node `dom_query` selection.
    #[inline]
    #[must_use]
    pub fn selection(&self) -> Selection<'a> {
        Selection::from(self.node)
    }

    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self) -> String {
        self.node
            .node_name()
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Any attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        self.selection().attr(name).map(|v| v.to_string())
    }

    /// Class tokens in attribute order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether one of the class tokens equals `name` exactly.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|token| token == name))
    }

    /// The id attribute, if present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Non-empty `href`, if any.
    #[must_use]
    pub fn href(&self) -> Option<String> {
        self.attr("href").filter(|h| !h.trim().is_empty())
    }

    /// Direct element children in document order.
    #[must_use]
    pub fn children(&self) -> Vec<Element<'a>> {
        elements_of(&self.selection().children())
    }

    /// Concatenated text of all descendant text nodes.
    #[inline]
    #[must_use]
    pub fn text(&self) -> StrTendril {
        self.selection().text()
    }

    /// Descendants matching a built-in CSS selector, in document order.
    ///
    /// Only for selectors known to be valid; see [`Element::try_select_one`]
    /// for operator-supplied input.
    #[must_use]
    pub fn select(&self, css: &str) -> Vec<Element<'a>> {
        elements_of(&self.selection().select(css))
    }

    /// First descendant matching a built-in CSS selector.
    #[must_use]
    pub fn select_one(&self, css: &str) -> Option<Element<'a>> {
        first_element(&self.selection().select_single(css))
    }

    /// First descendant matching an untrusted CSS selector.
    ///
    /// Invalid selectors yield `None` instead of panicking.
    #[must_use]
    pub fn try_select_one(&self, css: &str) -> Option<Element<'a>> {
        self.selection()
            .try_select(css)
            .and_then(|sel| first_element(&sel))
    }

    /// Whether any descendant has one of the given tags.
    #[must_use]
    pub fn contains_tag(&self, tags: &[&str]) -> bool {
        self.descendants().any(|el| tags.contains(&el.tag().as_str()))
    }

    /// All element descendants in document order (excluding `self`).
    pub fn descendants(&self) -> impl Iterator<Item = Element<'a>> {
        self.select("*").into_iter()
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id == other.node.id
    }
}

impl Eq for Element<'_> {}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("classes", &self.classes())
            .field("id", &self.id())
            .finish()
    }
}

fn elements_of<'a>(sel: &Selection<'a>) -> Vec<Element<'a>> {
    sel.nodes().iter().copied().filter_map(Element::from_node).collect()
}

fn first_element<'a>(sel: &Selection<'a>) -> Option<Element<'a>> {
    sel.nodes().iter().copied().find_map(Element::from_node)
}

// === Document Queries ===

/// Every element of the document in document order.
#[must_use]
pub fn all_elements(doc: &Document) -> Vec<Element<'_>> {
    elements_of(&doc.select("*"))
}

/// Elements whose tag is one of `tags`.
#[must_use]
pub fn find_all_by_tags<'a>(doc: &'a Document, tags: &[&str]) -> Vec<Element<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|el| tags.contains(&el.tag().as_str()))
        .collect()
}

/// Elements with at least one class token matching `pattern`.
#[must_use]
pub fn find_all_by_class<'a>(doc: &'a Document, pattern: &Regex) -> Vec<Element<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|el| el.classes().iter().any(|c| pattern.is_match(c)))
        .collect()
}

/// Elements carrying exactly the class token `name`.
#[must_use]
pub fn find_all_by_class_name<'a>(doc: &'a Document, name: &str) -> Vec<Element<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|el| el.has_class(name))
        .collect()
}

/// Elements whose id matches `pattern`.
#[must_use]
pub fn find_all_by_id<'a>(doc: &'a Document, pattern: &Regex) -> Vec<Element<'a>> {
    all_elements(doc)
        .into_iter()
        .filter(|el| el.id().is_some_and(|id| pattern.is_match(&id)))
        .collect()
}

/// Elements matching an untrusted CSS selector. Invalid CSS matches nothing.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, css: &str) -> Vec<Element<'a>> {
    doc.try_select(css)
        .map(|sel| elements_of(&sel))
        .unwrap_or_default()
}

/// Text of the document's first `<title>`, trimmed; `None` when absent or
/// blank. Later `<title>`s (inline SVG icons) are ignored.
#[must_use]
pub fn page_title(doc: &Document) -> Option<String> {
    let title = first_element(&doc.select("title"))?.text();
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}
