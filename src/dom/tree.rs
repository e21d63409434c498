//! Element Tree - Arena-based element storage
//!
//! Every element lives in one `Vec<Element>` and is addressed by its
//! `NodeId`. Parent and child links are indices, so the structure has a single
//! owner and no reference cycles. Attaching a node enforces the tree shape:
//! one parent at a time, and never under one of its own descendants.

use super::element_ref::ElementRef;
use super::names::is_valid_name;
use super::node::{Element, NodeId};
use super::TreeAccess;
use crate::error::{PathError, TreeError};
use crate::path;

/// An arena of elements forming one or more trees
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    /// Arena of elements
    nodes: Vec<Element>,
}

impl ElementTree {
    /// Create an empty arena
    pub fn new() -> Self {
        ElementTree { nodes: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        ElementTree {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Get total number of elements, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if `id` belongs to this arena
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        (id as usize) < self.nodes.len()
    }

    /// Get an element by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id as usize)
    }

    /// Get a mutable element by ID (attributes, text, tail)
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id as usize)
    }

    /// Borrowed handle for navigation and queries
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.get(id).map(|element| ElementRef::new(self, id, element))
    }

    fn node(&self, id: NodeId) -> Result<&Element, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    fn push(&mut self, element: Element) -> Result<NodeId, TreeError> {
        let id = next_id(self.nodes.len())?;
        self.nodes.push(element);
        Ok(id)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Create a new detached element
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, TreeError> {
        if !is_valid_name(tag) {
            return Err(TreeError::InvalidName(tag.to_string()));
        }
        self.push(Element::new(tag.to_string()))
    }

    /// Create a new element and append it as the last child of `parent`
    pub fn create_child(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, TreeError> {
        self.node(parent)?;
        let child = self.create_element(tag)?;
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Append `child` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let len = self.node(parent)?.children.len();
        self.insert_child(parent, len, child)
    }

    /// Insert `child` among the children of `parent` at `position`
    ///
    /// All checks run before either side is touched, so a failed insert
    /// leaves the tree unchanged.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        position: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        let len = self.node(parent)?.children.len();
        if let Some(current) = self.node(child)?.parent {
            return Err(TreeError::AlreadyAttached {
                node: child,
                parent: current,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::CycleDetected { parent, child });
        }
        if position > len {
            return Err(TreeError::PositionOutOfRange { position, len });
        }

        self.nodes[child as usize].parent = Some(parent);
        self.nodes[parent as usize].children.insert(position, child);
        log::trace!("attached node {} under {} at {}", child, parent, position);
        Ok(())
    }

    /// Unlink `child` from its parent, returning the former parent
    pub fn detach(&mut self, child: NodeId) -> Result<Option<NodeId>, TreeError> {
        let parent = match self.node(child)?.parent {
            Some(parent) => parent,
            None => return Ok(None),
        };
        self.nodes[parent as usize].children.retain(|&id| id != child);
        self.nodes[child as usize].parent = None;
        log::trace!("detached node {} from {}", child, parent);
        Ok(Some(parent))
    }

    /// Copy the subtree rooted at `id` into new, detached elements
    ///
    /// Attributes, text and tail are copied and every descendant is
    /// duplicated, so the copy shares nothing with the source.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        let root_copy = self.node(id)?.detached_copy();
        let copy = self.push(root_copy)?;

        let mut stack = vec![(id, copy)];
        while let Some((source, target)) = stack.pop() {
            for i in 0..self.nodes[source as usize].children.len() {
                let child = self.nodes[source as usize].children[i];
                let mut child_copy = self.nodes[child as usize].detached_copy();
                child_copy.parent = Some(target);
                let child_copy_id = self.push(child_copy)?;
                self.nodes[target as usize].children.push(child_copy_id);
                stack.push((child, child_copy_id));
            }
        }

        Ok(copy)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Children of a node in document order (empty for unknown IDs)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Child at `index`; negative values count from the end
    pub fn child(&self, id: NodeId, index: isize) -> Result<NodeId, TreeError> {
        let children = &self.node(id)?.children;
        let len = children.len();
        let normalized = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if normalized < 0 || normalized as usize >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        Ok(children[normalized as usize])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Get attribute value by name
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.get(id)?.attribute(key)
    }

    /// Parent of a node (None for roots and detached nodes)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Topmost ancestor of a node
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Check if `ancestor` is `node` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        // Children in reverse order so the first child is visited first
        let stack = self.children(id).iter().rev().copied().collect();
        DescendantIter { tree: self, stack }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All nodes matching `expr` from `id`, in first-encounter order
    pub fn find_all(&self, id: NodeId, expr: &str) -> Result<Vec<NodeId>, PathError> {
        let compiled = path::cache::global().get_or_compile(expr)?;
        Ok(path::find_all_compiled(self, id, &compiled))
    }

    /// First node matching `expr` from `id`
    pub fn find(&self, id: NodeId, expr: &str) -> Result<Option<NodeId>, PathError> {
        Ok(self.find_all(id, expr)?.into_iter().next())
    }

    /// Text of the first node matching `expr` from `id`
    pub fn find_text(&self, id: NodeId, expr: &str) -> Result<Option<&str>, PathError> {
        Ok(self
            .find(id, expr)?
            .and_then(|found| self.get(found))
            .and_then(Element::text))
    }
}

/// Iterator over descendant nodes (depth-first, pre-order)
pub struct DescendantIter<'a> {
    tree: &'a ElementTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

impl TreeAccess for ElementTree {
    fn tag_of(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Element::tag)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children(id)
    }

    fn attribute_of(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attribute(id, name)
    }
}

/// ID for the slot at `len`; fails once `NodeId` can no longer address it
fn next_id(len: usize) -> Result<NodeId, TreeError> {
    NodeId::try_from(len).map_err(|_| TreeError::ArenaFull { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> (a, b -> (c))
    fn sample() -> (ElementTree, [NodeId; 4]) {
        let mut tree = ElementTree::new();
        let root = tree.create_element("root").unwrap();
        let a = tree.create_child(root, "a").unwrap();
        let b = tree.create_child(root, "b").unwrap();
        let c = tree.create_child(b, "c").unwrap();
        (tree, [root, a, b, c])
    }

    #[test]
    fn test_create_and_link() {
        let (tree, [root, a, b, c]) = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(b));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.get(c).unwrap().tag(), "c");
    }

    #[test]
    fn test_invalid_name() {
        let mut tree = ElementTree::new();
        assert_eq!(
            tree.create_element("1st"),
            Err(TreeError::InvalidName("1st".to_string()))
        );
        assert_eq!(
            tree.create_element(""),
            Err(TreeError::InvalidName(String::new()))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_child_negative_index() {
        let mut tree = ElementTree::new();
        let p = tree.create_element("p").unwrap();
        let x = tree.create_child(p, "x").unwrap();
        let _y = tree.create_child(p, "y").unwrap();
        let z = tree.create_child(p, "z").unwrap();

        assert_eq!(tree.child(p, 0), Ok(x));
        assert_eq!(tree.child(p, -1), Ok(z));
        assert_eq!(tree.child(p, -3), Ok(x));
        assert_eq!(
            tree.child(p, -4),
            Err(TreeError::IndexOutOfRange { index: -4, len: 3 })
        );
        assert_eq!(
            tree.child(p, 3),
            Err(TreeError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_first_last_child() {
        let (tree, [root, a, b, c]) = sample();
        assert_eq!(tree.first_child(root), Some(a));
        assert_eq!(tree.last_child(root), Some(b));
        assert_eq!(tree.first_child(c), None);
        assert_eq!(tree.last_child(c), None);
    }

    #[test]
    fn test_root_walk() {
        let (tree, [root, a, _, c]) = sample();
        assert_eq!(tree.root(c), root);
        assert_eq!(tree.root(a), root);
        assert_eq!(tree.root(root), root);
    }

    #[test]
    fn test_insert_at_position() {
        let (mut tree, [root, a, b, _]) = sample();
        let first = tree.create_element("first").unwrap();
        tree.insert_child(root, 0, first).unwrap();
        assert_eq!(tree.children(root), &[first, a, b]);

        let middle = tree.create_element("middle").unwrap();
        tree.insert_child(root, 2, middle).unwrap();
        assert_eq!(tree.children(root), &[first, a, middle, b]);
        assert_eq!(tree.parent(middle), Some(root));
    }

    #[test]
    fn test_insert_out_of_range_is_atomic() {
        let (mut tree, [root, a, b, _]) = sample();
        let orphan = tree.create_element("orphan").unwrap();
        assert_eq!(
            tree.insert_child(root, 3, orphan),
            Err(TreeError::PositionOutOfRange { position: 3, len: 2 })
        );
        assert_eq!(tree.parent(orphan), None);
        assert_eq!(tree.children(root), &[a, b]);
    }

    #[test]
    fn test_reject_second_parent() {
        let (mut tree, [root, a, b, c]) = sample();
        assert_eq!(
            tree.add_child(a, c),
            Err(TreeError::AlreadyAttached { node: c, parent: b })
        );
        assert_eq!(tree.children(a), &[] as &[NodeId]);

        // Moving requires an explicit detach
        assert_eq!(tree.detach(c), Ok(Some(b)));
        tree.add_child(a, c).unwrap();
        assert_eq!(tree.parent(c), Some(a));
        assert!(tree.children(b).is_empty());
        assert_eq!(tree.root(c), root);
    }

    #[test]
    fn test_reject_cycles() {
        let (mut tree, [root, _, b, c]) = sample();
        assert_eq!(
            tree.add_child(root, root),
            Err(TreeError::CycleDetected { parent: root, child: root })
        );
        assert_eq!(
            tree.add_child(c, root),
            Err(TreeError::CycleDetected { parent: c, child: root })
        );

        // A detached subtree cannot be hung below its own descendant either
        tree.detach(b).unwrap();
        assert_eq!(
            tree.add_child(c, b),
            Err(TreeError::CycleDetected { parent: c, child: b })
        );
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn test_unknown_nodes() {
        let (mut tree, [root, ..]) = sample();
        assert_eq!(tree.add_child(root, 99), Err(TreeError::UnknownNode(99)));
        assert_eq!(tree.add_child(99, root), Err(TreeError::UnknownNode(99)));
        assert_eq!(tree.child(99, 0), Err(TreeError::UnknownNode(99)));
        assert!(tree.children(99).is_empty());
        assert_eq!(tree.parent(99), None);
        assert_eq!(tree.attribute(99, "x"), None);
    }

    #[test]
    fn test_detach_root_is_noop() {
        let (mut tree, [root, ..]) = sample();
        assert_eq!(tree.detach(root), Ok(None));
    }

    #[test]
    fn test_descendants() {
        let (tree, [root, a, b, c]) = sample();
        let descendants: Vec<_> = tree.descendants(root).collect();
        assert_eq!(descendants, vec![a, b, c]);
        assert_eq!(tree.descendants(c).count(), 0);
    }

    #[test]
    fn test_deep_clone() {
        let (mut tree, [_, _, b, c]) = sample();
        tree.get_mut(b).unwrap().set_attribute("k", "v").set_text("bee");
        tree.get_mut(c).unwrap().set_tail("tail");

        let copy = tree.deep_clone(b).unwrap();
        assert_ne!(copy, b);
        assert_eq!(tree.parent(copy), None);
        assert_eq!(tree.get(copy).unwrap().tag(), "b");
        assert_eq!(tree.attribute(copy, "k"), Some("v"));
        assert_eq!(tree.get(copy).unwrap().text(), Some("bee"));

        let copy_child = tree.first_child(copy).unwrap();
        assert_ne!(copy_child, c);
        assert_eq!(tree.parent(copy_child), Some(copy));
        assert_eq!(tree.get(copy_child).unwrap().tail(), Some("tail"));

        // Copies are independent of the source
        tree.get_mut(copy).unwrap().set_attribute("k", "changed");
        tree.get_mut(copy_child).unwrap().set_text("changed");
        assert_eq!(tree.attribute(b, "k"), Some("v"));
        assert_eq!(tree.get(c).unwrap().text(), None);
    }

    #[test]
    fn test_deep_clone_preserves_child_order() {
        let mut tree = ElementTree::new();
        let p = tree.create_element("p").unwrap();
        for tag in ["x", "y", "z"] {
            let child = tree.create_child(p, tag).unwrap();
            tree.create_child(child, "leaf").unwrap();
        }
        let copy = tree.deep_clone(p).unwrap();
        let tags: Vec<_> = tree
            .children(copy)
            .iter()
            .map(|&id| tree.get(id).unwrap().tag())
            .collect();
        assert_eq!(tags, vec!["x", "y", "z"]);
        assert_eq!(tree.descendants(copy).count(), 6);
    }

    #[test]
    fn test_find_convenience() {
        let (mut tree, [root, a, b, c]) = sample();
        tree.get_mut(c).unwrap().set_text("hello");

        assert_eq!(tree.find_all(root, "/a").unwrap(), vec![a]);
        assert_eq!(tree.find(root, "//c").unwrap(), Some(c));
        assert_eq!(tree.find(root, "//missing").unwrap(), None);
        assert_eq!(tree.find_text(root, "b/c").unwrap(), Some("hello"));
        assert_eq!(tree.find_text(root, "a").unwrap(), None);
        assert_eq!(tree.find(c, "..").unwrap(), Some(b));
        assert!(tree.find_all(root, "a b").is_err());
    }

    #[test]
    fn test_next_id_bounds() {
        assert_eq!(next_id(0), Ok(0));
        assert_eq!(next_id(u32::MAX as usize), Ok(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_next_id_exhausted() {
        let len = u32::MAX as usize + 1;
        assert_eq!(next_id(len), Err(TreeError::ArenaFull { len }));
    }

    #[test]
    fn test_find_from_unknown_node() {
        let (tree, _) = sample();
        assert_eq!(tree.find_all(999, ".").unwrap(), Vec::<NodeId>::new());
        assert_eq!(tree.find(999, "//*").unwrap(), None);
    }
}
