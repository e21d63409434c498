//! Borrowed element handle
//!
//! `ElementRef` pairs a tree with one of its node IDs so navigation reads
//! like walking linked nodes: `elem.parent()?.children()`, `elem.find("b")`.

use super::node::{Element, NodeId};
use super::tree::ElementTree;
use crate::error::{PathError, TreeError};
use std::collections::BTreeMap;
use std::fmt;

/// A node of an [`ElementTree`] together with the tree it belongs to
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ElementTree,
    id: NodeId,
    element: &'a Element,
}

impl<'a> ElementRef<'a> {
    pub(crate) fn new(tree: &'a ElementTree, id: NodeId, element: &'a Element) -> Self {
        ElementRef { tree, id, element }
    }

    fn wrap(&self, id: NodeId) -> Option<ElementRef<'a>> {
        self.tree.element(id)
    }

    fn wrap_all(&self, ids: Vec<NodeId>) -> Vec<ElementRef<'a>> {
        let tree = self.tree;
        ids.into_iter().filter_map(|id| tree.element(id)).collect()
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    #[inline]
    pub fn value(&self) -> &'a Element {
        self.element
    }

    #[inline]
    pub fn tag(&self) -> &'a str {
        self.element.tag()
    }

    #[inline]
    pub fn text(&self) -> Option<&'a str> {
        self.element.text()
    }

    #[inline]
    pub fn tail(&self) -> Option<&'a str> {
        self.element.tail()
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.element.attribute(key)
    }

    pub fn attributes(&self) -> &'a BTreeMap<String, String> {
        self.element.attributes()
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.wrap(self.element.parent()?)
    }

    pub fn root(&self) -> ElementRef<'a> {
        self.wrap(self.tree.root(self.id)).unwrap_or(*self)
    }

    /// Children in document order
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        self.element
            .children()
            .iter()
            .filter_map(move |&id| tree.element(id))
    }

    /// Child at `index`; negative values count from the end
    pub fn child(&self, index: isize) -> Result<ElementRef<'a>, TreeError> {
        let id = self.tree.child(self.id, index)?;
        self.wrap(id).ok_or(TreeError::UnknownNode(id))
    }

    pub fn first_child(&self) -> Option<ElementRef<'a>> {
        self.wrap(*self.element.children().first()?)
    }

    pub fn last_child(&self) -> Option<ElementRef<'a>> {
        self.wrap(*self.element.children().last()?)
    }

    /// All descendants in document order
    pub fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        tree.descendants(self.id).filter_map(move |id| tree.element(id))
    }

    /// All elements matching `expr` from this element
    pub fn find_all(&self, expr: &str) -> Result<Vec<ElementRef<'a>>, PathError> {
        let ids = self.tree.find_all(self.id, expr)?;
        Ok(self.wrap_all(ids))
    }

    /// First element matching `expr`
    pub fn find(&self, expr: &str) -> Result<Option<ElementRef<'a>>, PathError> {
        Ok(self.tree.find(self.id, expr)?.and_then(|id| self.wrap(id)))
    }

    /// Text of the first element matching `expr`
    pub fn find_text(&self, expr: &str) -> Result<Option<&'a str>, PathError> {
        Ok(self.find(expr)?.and_then(|found| found.text()))
    }
}

/// Identity comparison: same tree, same node
impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .finish()
    }
}
