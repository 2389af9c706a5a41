//! Arena-backed rooted tree.
//!
//! All nodes live in one vector and refer to each other by [`NodeId`], so
//! the parent, ancestor, and thread relations never form ownership cycles.
//! Nodes can only be appended under an existing parent, which keeps the
//! structure acyclic with exactly one parent per non-root node.

use std::ops::Index;

use serde::Serialize;

use super::node::{Node, NodeId};
use crate::error::TreeError;

/// Layout output for one node, in a serializable form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub pos: f64,
    pub level: u32,
}

/// A rooted, ordered tree of payload-carrying nodes.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    root: NodeId,
}

impl<T> Tree<T> {
    /// Create a tree holding only a root. The root's child list is absent
    /// until a child is added or space is reserved.
    pub fn new(root_data: T) -> Self {
        Self::with_capacity(root_data, 1)
    }

    /// Create a tree with room for `capacity` nodes.
    pub fn with_capacity(root_data: T, capacity: usize) -> Self {
        let root = NodeId(0);
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(root, root_data, None, 0));
        Self { nodes, root }
    }

    /// The root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether `id` belongs to this tree.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(Node::data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.data)
    }

    /// Append a child as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> Result<NodeId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }

        let id = NodeId(self.nodes.len() as u32);
        let children = self.nodes[parent.index()].children.get_or_insert_with(Vec::new);
        let sibling_index = children.len();
        children.push(id);

        self.nodes.push(Node::new(id, data, Some(parent), sibling_index));
        Ok(id)
    }

    /// Append several children under `parent`, in order.
    pub fn add_children<I>(&mut self, parent: NodeId, data: I) -> Result<Vec<NodeId>, TreeError>
    where
        I: IntoIterator<Item = T>,
    {
        data.into_iter()
            .map(|item| self.add_child(parent, item))
            .collect()
    }

    /// Make sure `id` has a child list with room for `additional` children.
    ///
    /// Calling this with `additional = 0` turns an absent child list into an
    /// empty one.
    pub fn reserve_children(&mut self, id: NodeId, additional: usize) -> Result<(), TreeError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(TreeError::UnknownNode(id))?;
        node.children
            .get_or_insert_with(Vec::new)
            .reserve(additional);
        Ok(())
    }

    // =========================================================================
    // Structural accessors
    //
    // These index the arena directly and panic on ids from another tree,
    // the same way slice indexing does.
    // =========================================================================

    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        self[id].is_root()
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self[id].children()
    }

    #[inline]
    pub fn child_count(&self, id: NodeId) -> usize {
        self[id].child_count()
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].first_child()
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].last_child()
    }

    /// The sibling immediately before `id`, or `None` for a first child or the root.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = &self[id];
        let parent = node.parent?;
        let index = node.sibling_index.checked_sub(1)?;
        self[parent].children().get(index).copied()
    }

    /// The first child of `id`'s parent (`id` itself for a first child).
    pub fn first_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self[id].parent?;
        self[parent].first_child()
    }

    /// Number of parent edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = self[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    // =========================================================================
    // Iteration and output
    // =========================================================================

    /// All nodes in arena (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    /// Node ids in pre-order, children visited left to right.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self[id].children().iter().rev().copied());
        }
        order
    }

    /// Final position and level of every node, in arena order.
    pub fn placements(&self) -> Vec<NodePlacement> {
        self.iter()
            .map(|(id, node)| NodePlacement {
                id,
                parent: node.parent,
                pos: node.pos,
                level: node.level,
            })
            .collect()
    }

    /// Translate every final position by `dx`, e.g. to anchor the root elsewhere.
    pub fn translate(&mut self, dx: f64) {
        for node in &mut self.nodes {
            node.pos += dx;
        }
    }

    /// Horizontal extent `(min, max)` of the final positions.
    pub fn extent(&self) -> (f64, f64) {
        self.nodes.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), node| (min.min(node.pos), max.max(node.pos)),
        )
    }
}

impl<T> Index<NodeId> for Tree<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }
}
