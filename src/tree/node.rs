//! Node type and related structures.
//!
//! A node carries three groups of state:
//! - Structure: payload, parent, ordered children, and its slot among siblings
//! - Layout scratch: thread, ancestor, offset, preliminary position, number,
//!   change, and shift (only meaningful while a layout is running)
//! - Output: final horizontal position and depth level

use std::fmt;

use serde::Serialize;

/// Stable node identifier.
///
/// The id is the node's index in its tree's arena. It wraps a u32 for
/// compact storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Arena slot of this node.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A tree node with an opaque payload.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) data: T,
    pub(crate) parent: Option<NodeId>,
    /// `None` means the child list is absent, which is distinct from empty.
    pub(crate) children: Option<Vec<NodeId>>,
    /// Position of this node in its parent's child list.
    pub(crate) sibling_index: usize,

    /// Subtree root currently representing this node's contour.
    pub(crate) ancestor: NodeId,
    /// Contour successor installed when subtrees of unequal height merge.
    pub(crate) thread: Option<NodeId>,
    /// Displacement applied to all descendants in the second walk.
    pub(crate) offset: f64,
    pub(crate) preliminary: f64,
    pub(crate) number: usize,
    pub(crate) change: f64,
    pub(crate) shift: f64,

    pub(crate) pos: f64,
    pub(crate) level: u32,
}

impl<T> Node<T> {
    pub(crate) fn new(id: NodeId, data: T, parent: Option<NodeId>, sibling_index: usize) -> Self {
        Self {
            data,
            parent,
            children: None,
            sibling_index,
            ancestor: id,
            thread: None,
            offset: 0.0,
            preliminary: 0.0,
            number: 0,
            change: 0.0,
            shift: 0.0,
            pos: 0.0,
            level: 0,
        }
    }

    /// The caller's payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Parent node, or `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True iff this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Ordered children. Empty when the child list is absent.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether a child list exists at all, even an empty one.
    #[inline]
    pub fn has_child_list(&self) -> bool {
        self.children.is_some()
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.children().first().copied()
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.children().last().copied()
    }

    /// Final horizontal coordinate. Meaningful after a layout run.
    #[inline]
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Depth from the root (root = 0). Meaningful after a layout run.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Clear every layout field, binding the node to `parent` at `sibling_index`.
    pub(crate) fn reset_layout(&mut self, id: NodeId, parent: Option<NodeId>, sibling_index: usize) {
        self.parent = parent;
        self.sibling_index = sibling_index;
        self.ancestor = id;
        self.thread = None;
        self.offset = 0.0;
        self.preliminary = 0.0;
        self.number = 0;
        self.change = 0.0;
        self.shift = 0.0;
        self.pos = 0.0;
        self.level = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "Node(42)");
    }

    #[test]
    fn test_node_id_conversion() {
        let id: NodeId = 123.into();
        let raw: u32 = id.into();
        assert_eq!(raw, 123);
    }

    #[test]
    fn test_new_node_has_absent_child_list() {
        let node = Node::new(NodeId(0), "root", None, 0);
        assert!(node.is_root());
        assert!(!node.has_child_list());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.first_child(), None);
        assert_eq!(node.last_child(), None);
        assert_eq!(node.ancestor, NodeId(0));
    }

    #[test]
    fn test_reset_layout_clears_scratch() {
        let mut node = Node::new(NodeId(3), (), Some(NodeId(1)), 2);
        node.thread = Some(NodeId(9));
        node.offset = 4.0;
        node.change = -1.5;
        node.shift = 2.0;
        node.ancestor = NodeId(8);
        node.pos = 10.0;
        node.level = 4;

        node.reset_layout(NodeId(3), Some(NodeId(2)), 0);

        assert_eq!(node.parent, Some(NodeId(2)));
        assert_eq!(node.sibling_index, 0);
        assert_eq!(node.ancestor, NodeId(3));
        assert_eq!(node.thread, None);
        assert_eq!(node.offset, 0.0);
        assert_eq!(node.change, 0.0);
        assert_eq!(node.shift, 0.0);
        assert_eq!(node.pos, 0.0);
        assert_eq!(node.level, 0);
    }
}
