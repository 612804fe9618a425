//! Parsed response envelope
//!
//! Thin wrapper over a `roxmltree` document with the lookups the decoders
//! need: first descendant by tag, direct child by tag, attribute and text
//! reads, plus lenient integer and millisecond-epoch parsing. Missing
//! elements read as empty text so decoders never have to special-case them.

use chrono::{DateTime, Utc};
use qbase_domain::{QuickBaseError, Result};
use roxmltree::{Document, Node};

// Lenient integer parsing shared with `ErrorCode::parse`.
pub use qbase_domain::utils::parse_leading_int as parse_int;

/// Structured API response
pub struct Envelope<'a> {
    doc: Document<'a>,
}

impl<'a> Envelope<'a> {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`QuickBaseError::MalformedResponse`] when the body is not
    /// well-formed XML.
    pub fn parse(body: &'a str) -> Result<Self> {
        Document::parse(body)
            .map(|doc| Self { doc })
            .map_err(|err| QuickBaseError::MalformedResponse(err.to_string()))
    }

    /// Document element (`<qdbapi>` for every structured action).
    pub fn root(&self) -> Node<'_, 'a> {
        self.doc.root_element()
    }

    /// First element named `tag` anywhere below the root.
    pub fn find(&self, tag: &str) -> Option<Node<'_, 'a>> {
        find(self.root(), tag)
    }

    /// All elements named `tag` below the root, in document order.
    pub fn find_all<'s>(&'s self, tag: &'s str) -> impl Iterator<Item = Node<'s, 'a>> + 's {
        find_all(self.root(), tag)
    }

    /// Text of the first `tag` element, empty when absent.
    pub fn text(&self, tag: &str) -> String {
        self.find(tag).map(text).unwrap_or_default()
    }

    /// Text of the first `tag` element, `None` when absent.
    pub fn opt_text(&self, tag: &str) -> Option<String> {
        self.find(tag).map(text)
    }

    /// Leading integer of the first `tag` element.
    pub fn int(&self, tag: &str) -> Option<i64> {
        self.find(tag).and_then(|node| parse_int(&text(node)))
    }

    /// Millisecond epoch timestamp of the first `tag` element.
    pub fn date(&self, tag: &str) -> Option<DateTime<Utc>> {
        self.find(tag).and_then(|node| parse_millis(&text(node)))
    }
}

/// First descendant of `node` (excluding itself) named `tag`.
pub fn find<'a, 'i>(node: Node<'a, 'i>, tag: &str) -> Option<Node<'a, 'i>> {
    node.descendants().skip(1).find(|n| n.has_tag_name(tag))
}

/// All descendants of `node` named `tag`, in document order.
pub fn find_all<'a, 'i: 'a, 't>(
    node: Node<'a, 'i>,
    tag: &'t str,
) -> impl Iterator<Item = Node<'a, 'i>> + 't
where
    'a: 't,
{
    node.descendants().skip(1).filter(move |n| n.has_tag_name(tag))
}

/// First direct child element of `node` named `tag`.
pub fn child<'a, 'i>(node: Node<'a, 'i>, tag: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Concatenated text content of `node` and its descendants.
pub fn text(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}

/// Text of the direct child `tag`, empty when absent.
pub fn child_text(node: Node<'_, '_>, tag: &str) -> String {
    child(node, tag).map(text).unwrap_or_default()
}

/// Attribute value, empty when absent.
pub fn attr(node: Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

/// Parse a millisecond epoch timestamp.
pub fn parse_millis(text: &str) -> Option<DateTime<Utc>> {
    parse_int(text).and_then(DateTime::from_timestamp_millis)
}

/// Parse a `1`/`0` flag.
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
