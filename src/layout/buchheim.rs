//! Buchheim-Junger-Leipert tidy tree layout algorithm.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) over a [`Tree`] arena.
//!
//! # Algorithm Overview
//!
//! 1. **Initialize (pre-order):** Bind parent links and clear all layout
//!    scratch so repeated runs on one tree are identical.
//! 2. **First walk (post-order):** Assign preliminary x-coordinates by
//!    placing each node `spacing` right of its previous sibling, then
//!    apportioning its subtree against the contours of earlier siblings.
//!    Threads make the contour walk O(1) amortized per step.
//! 3. **Second walk (pre-order):** Accumulate offsets down the tree to turn
//!    preliminary positions into absolute positions, and record levels.
//!
//! Both walks use explicit stacks so deep chains do not exhaust the call
//! stack; visitation order matches the recursive formulation.

use log::{debug, trace};

use super::config::validate_spacing;
use crate::error::LayoutError;
use crate::tree::{NodeId, Tree};

/// Lay out `tree` in place with the given minimum sibling spacing.
///
/// After this returns, every node's [`pos`](crate::tree::Node::pos) and
/// [`level`](crate::tree::Node::level) are set. The root ends at position 0.
///
/// # Errors
///
/// Fails without touching the tree when the root's child list is absent or
/// empty, or when `spacing` is not a finite positive number.
pub fn generate_tree<T>(tree: &mut Tree<T>, spacing: f64) -> Result<(), LayoutError> {
    validate_spacing(spacing)?;

    let root = tree.root();
    if !tree[root].has_child_list() {
        return Err(LayoutError::RootChildrenAbsent);
    }
    if tree.child_count(root) == 0 {
        return Err(LayoutError::RootHasNoChildren);
    }

    let mut walker = Buchheim::new(tree, spacing);
    walker.initialize();
    walker.first_walk();
    let origin = -walker.tree[root].preliminary;
    walker.second_walk(origin);

    debug!(
        nodes = walker.tree.node_count(),
        spacing = spacing,
        threads = walker.threads,
        moves = walker.moves;
        "Computed tidy tree layout"
    );
    Ok(())
}

/// Pending child iteration for one node of the first walk.
struct Frame {
    node: NodeId,
    next_child: usize,
    default_ancestor: NodeId,
}

/// Per-run state of the engine.
struct Buchheim<'t, T> {
    tree: &'t mut Tree<T>,
    spacing: f64,
    threads: usize,
    moves: usize,
}

impl<'t, T> Buchheim<'t, T> {
    fn new(tree: &'t mut Tree<T>, spacing: f64) -> Self {
        Self {
            tree,
            spacing,
            threads: 0,
            moves: 0,
        }
    }

    /// Bind parents and sibling slots, reset all scratch fields.
    fn initialize(&mut self) {
        let root = self.tree.root();
        let mut stack = vec![(root, None, 0)];
        while let Some((id, parent, sibling_index)) = stack.pop() {
            let node = &mut self.tree.nodes[id.index()];
            node.reset_layout(id, parent, sibling_index);
            stack.extend(
                node.children()
                    .iter()
                    .enumerate()
                    .map(|(index, &child)| (child, Some(id), index)),
            );
        }
    }

    /// Post-order pass computing preliminary positions and offsets.
    fn first_walk(&mut self) {
        let root = self.tree.root();
        let mut stack = vec![self.enter(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let v = frame.node;
            let children = self.tree.children(v);

            if let Some(&child) = children.get(frame.next_child) {
                let number = frame.next_child;
                frame.next_child += 1;
                let child_frame = self.enter(child, number);
                stack.push(child_frame);
                continue;
            }

            stack.pop();
            if self.tree.child_count(v) == 0 {
                self.place_leaf(v);
            } else {
                self.execute_shifts(v);
                self.place_internal(v);
            }

            // v is complete: reconcile it with its earlier siblings.
            if let Some(parent) = stack.last_mut() {
                parent.default_ancestor = self.apportion(v, parent.default_ancestor);
            }
        }
    }

    fn enter(&mut self, v: NodeId, number: usize) -> Frame {
        self.tree.nodes[v.index()].number = number;
        Frame {
            node: v,
            next_child: 0,
            default_ancestor: self.tree.first_child(v).unwrap_or(v),
        }
    }

    fn place_leaf(&mut self, v: NodeId) {
        let preliminary = match self.tree.previous_sibling(v) {
            Some(left) => self.tree[left].preliminary + self.spacing,
            None => 0.0,
        };
        self.tree.nodes[v.index()].preliminary = preliminary;
    }

    fn place_internal(&mut self, v: NodeId) {
        let (Some(first), Some(last)) = (self.tree.first_child(v), self.tree.last_child(v)) else {
            return;
        };
        let midpoint = 0.5 * (self.tree[first].preliminary + self.tree[last].preliminary);

        match self.tree.previous_sibling(v) {
            Some(left) => {
                let preliminary = self.tree[left].preliminary + self.spacing;
                let node = &mut self.tree.nodes[v.index()];
                node.preliminary = preliminary;
                node.offset = preliminary - midpoint;
            }
            None => self.tree.nodes[v.index()].preliminary = midpoint,
        }
    }

    /// Reconcile `v`'s subtree with the subtrees of its left siblings.
    ///
    /// Four cursors descend level by level: the inner pair walks the facing
    /// contours of the left forest and of `v`, the outer pair walks the far
    /// contours and receives threads when one side runs out of depth.
    fn apportion(&mut self, v: NodeId, mut default_ancestor: NodeId) -> NodeId {
        let Some(left_sibling) = self.tree.previous_sibling(v) else {
            return default_ancestor;
        };

        let mut inner_right = v;
        let mut outer_right = v;
        let mut inner_left = left_sibling;
        let mut outer_left = self.tree.first_sibling(v).unwrap_or(left_sibling);

        let mut sum_inner_right = self.tree[inner_right].offset;
        let mut sum_outer_right = self.tree[outer_right].offset;
        let mut sum_inner_left = self.tree[inner_left].offset;
        let mut sum_outer_left = self.tree[outer_left].offset;

        let mut next_right = self.next_right(inner_left);
        let mut next_left = self.next_left(inner_right);

        while let (Some(right), Some(left)) = (next_right, next_left) {
            inner_left = right;
            inner_right = left;
            if let Some(next) = self.next_left(outer_left) {
                outer_left = next;
            }
            if let Some(next) = self.next_right(outer_right) {
                outer_right = next;
            }
            self.tree.nodes[outer_right.index()].ancestor = v;

            let shift = (self.tree[inner_left].preliminary + sum_inner_left)
                - (self.tree[inner_right].preliminary + sum_inner_right)
                + self.spacing;
            if shift > 0.0 {
                let ancestor = self.ancestor(inner_left, v, default_ancestor);
                self.move_subtree(ancestor, v, shift);
                sum_inner_right += shift;
                sum_outer_right += shift;
            }

            sum_inner_left += self.tree[inner_left].offset;
            sum_inner_right += self.tree[inner_right].offset;
            sum_outer_left += self.tree[outer_left].offset;
            sum_outer_right += self.tree[outer_right].offset;

            next_right = self.next_right(inner_left);
            next_left = self.next_left(inner_right);
        }

        match (next_right, next_left) {
            (Some(right), _) if self.next_right(outer_right).is_none() => {
                let node = &mut self.tree.nodes[outer_right.index()];
                node.thread = Some(right);
                node.offset += sum_inner_left - sum_outer_right;
                self.threads += 1;
                trace!(from = outer_right.raw(), to = right.raw(); "Installed right thread");
            }
            (_, Some(left)) if self.next_left(outer_left).is_none() => {
                let node = &mut self.tree.nodes[outer_left.index()];
                node.thread = Some(left);
                node.offset += sum_inner_right - sum_outer_left;
                default_ancestor = v;
                self.threads += 1;
                trace!(from = outer_left.raw(), to = left.raw(); "Installed left thread");
            }
            _ => {}
        }

        default_ancestor
    }

    /// The sibling of `v` whose subtree `inner_left` currently belongs to.
    ///
    /// Falls back to `default_ancestor` when the recorded ancestor is stale,
    /// i.e. no longer a child of `v`'s parent.
    fn ancestor(&self, inner_left: NodeId, v: NodeId, default_ancestor: NodeId) -> NodeId {
        let candidate = self.tree[inner_left].ancestor;
        let parent = self.tree.parent(v);
        if parent.is_some() && self.tree.parent(candidate) == parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Shift the subtree at `right` by `shift`, spreading the same correction
    /// linearly across the siblings between `left` and `right`.
    fn move_subtree(&mut self, left: NodeId, right: NodeId, shift: f64) {
        let left_number = self.tree[left].number;
        let right_number = self.tree[right].number;
        assert!(
            right_number > left_number,
            "move_subtree between {left} (#{left_number}) and {right} (#{right_number}) spans no siblings"
        );
        let subtrees = (right_number - left_number) as f64;
        let per_subtree = shift / subtrees;

        let right_node = &mut self.tree.nodes[right.index()];
        right_node.change -= per_subtree;
        right_node.shift += shift;
        right_node.preliminary += shift;
        right_node.offset += shift;
        self.tree.nodes[left.index()].change += per_subtree;
        self.moves += 1;
    }

    /// Apply the shifts accumulated by `move_subtree` to the children of `v`.
    fn execute_shifts(&mut self, v: NodeId) {
        let mut shift = 0.0;
        let mut change = 0.0;

        for i in (0..self.tree.child_count(v)).rev() {
            let child = self.tree.children(v)[i];
            let node = &mut self.tree.nodes[child.index()];
            node.preliminary += shift;
            node.offset += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }

    /// Pre-order pass resolving absolute positions and levels.
    fn second_walk(&mut self, origin: f64) {
        let root = self.tree.root();
        let mut stack = vec![(root, origin, 0u32)];

        while let Some((id, offset, level)) = stack.pop() {
            let node = &mut self.tree.nodes[id.index()];
            node.pos = node.preliminary + offset;
            node.level = level;

            let child_offset = offset + node.offset;
            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .map(|&child| (child, child_offset, level + 1)),
            );
        }
    }

    /// Next node on the left contour: first child, else the thread.
    fn next_left(&self, v: NodeId) -> Option<NodeId> {
        self.tree.first_child(v).or(self.tree[v].thread)
    }

    /// Next node on the right contour: last child, else the thread.
    fn next_right(&self, v: NodeId) -> Option<NodeId> {
        self.tree.last_child(v).or(self.tree[v].thread)
    }
}
