//! Element node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

use std::collections::BTreeMap;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// An element in the arena
///
/// Structural links (`parent`, `children`) are owned by the arena and only
/// change through [`ElementTree`](super::ElementTree) so both sides stay in
/// sync. Everything else is freely mutable through the setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    /// Attributes sorted by name
    attributes: BTreeMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Text before the first child
    text: Option<String>,
    /// Text after the closing tag
    tail: Option<String>,
}

impl Element {
    /// Create a new detached element. The caller validates `tag`.
    pub(crate) fn new(tag: String) -> Self {
        Element {
            tag,
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            text: None,
            tail: None,
        }
    }

    /// Copy of tag, attributes, text and tail with no structural links
    pub(crate) fn detached_copy(&self) -> Self {
        Element {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            parent: None,
            children: Vec::new(),
            text: self.text.clone(),
            tail: self.tail.clone(),
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Read-only view of the children in document order
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Get attribute value by name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// All attributes, ordered by name
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Check if this element has children
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Add or replace an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn set_tail(&mut self, tail: impl Into<String>) -> &mut Self {
        self.tail = Some(tail.into());
        self
    }

    /// Declare the default namespace (`xmlns` attribute)
    pub fn set_namespace(&mut self, uri: impl Into<String>) -> &mut Self {
        self.set_attribute("xmlns", uri)
    }

    /// Declare a prefixed namespace (`xmlns:prefix` attribute)
    pub fn set_prefixed_namespace(&mut self, prefix: &str, uri: impl Into<String>) -> &mut Self {
        self.set_attribute(format!("xmlns:{}", prefix), uri)
    }
}
