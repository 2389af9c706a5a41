//! Building trees from parent→child edge lists.
//!
//! Edges are loaded into a petgraph `StableGraph`, checked for the shape the
//! layout engine requires (one parent per node, a parentless root, no self
//! loops), and then copied into a [`Tree`] arena by a walk from the root.
//! Child order follows edge index order.

use std::collections::HashMap;

use log::debug;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use super::arena::Tree;
use crate::error::TreeError;

impl<N: Clone> Tree<N> {
    /// Build a tree from the subgraph reachable from `root`.
    ///
    /// Node weights become payloads. Children are ordered by edge index,
    /// which is insertion order unless edges were removed from the graph
    /// (a `StableGraph` hands freed indices to later edges). Nodes that
    /// cannot be reached from the root are left out.
    pub fn from_graph<E>(graph: &StableGraph<N, E>, root: NodeIndex) -> Result<Self, TreeError> {
        let root_weight = graph
            .node_weight(root)
            .ok_or(TreeError::NodeOutOfBounds {
                node: root.index() as u32,
                node_count: graph.node_count(),
            })?;

        let mut parent_count: HashMap<NodeIndex, usize> = HashMap::new();
        for edge in graph.edge_indices() {
            let Some((source, target)) = graph.edge_endpoints(edge) else {
                continue;
            };
            if source == target {
                return Err(TreeError::SelfLoop(source.index() as u32));
            }
            if target == root {
                return Err(TreeError::RootHasParent(root.index() as u32));
            }
            let count = parent_count.entry(target).or_default();
            *count += 1;
            if *count > 1 {
                return Err(TreeError::MultipleParents(target.index() as u32));
            }
        }

        let mut tree = Tree::with_capacity(root_weight.clone(), graph.node_count());
        let tree_root = tree.root();
        tree.reserve_children(tree_root, 0)?;

        // Every node has at most one parent and the root has none, so each
        // reachable node is pushed exactly once.
        let mut stack = vec![(root, tree_root)];
        while let Some((index, id)) = stack.pop() {
            let mut edges: Vec<_> = graph.edges_directed(index, Direction::Outgoing).collect();
            edges.sort_by_key(|edge| edge.id());

            for edge in edges {
                let child = edge.target();
                let child_id = tree.add_child(id, graph[child].clone())?;
                stack.push((child, child_id));
            }
        }

        let skipped = graph.node_count() - tree.node_count();
        if skipped > 0 {
            debug!(skipped = skipped, reached = tree.node_count(); "Skipped nodes unreachable from the root");
        }

        Ok(tree)
    }
}

impl Tree<u32> {
    /// Build a tree from `(parent, child)` pairs over nodes `0..node_count`.
    ///
    /// Payloads are the original node ids. With `root = None` the root is the
    /// single node that has children but no parent.
    pub fn from_edges(
        node_count: usize,
        edges: &[(u32, u32)],
        root: Option<u32>,
    ) -> Result<Self, TreeError> {
        let check_bounds = |node: u32| {
            if node as usize >= node_count {
                Err(TreeError::NodeOutOfBounds { node, node_count })
            } else {
                Ok(node)
            }
        };

        let mut graph: StableGraph<u32, ()> = StableGraph::with_capacity(node_count, edges.len());
        for id in 0..node_count {
            graph.add_node(id as u32);
        }

        let mut has_parent = vec![false; node_count];
        let mut has_children = vec![false; node_count];
        for &(parent, child) in edges {
            check_bounds(parent)?;
            check_bounds(child)?;
            if parent == child {
                return Err(TreeError::SelfLoop(parent));
            }
            has_parent[child as usize] = true;
            has_children[parent as usize] = true;
            graph.add_edge(NodeIndex::new(parent as usize), NodeIndex::new(child as usize), ());
        }

        let root = match root {
            Some(root) => check_bounds(root)?,
            None => {
                let candidates: Vec<u32> = (0..node_count)
                    .filter(|&id| has_children[id] && !has_parent[id])
                    .map(|id| id as u32)
                    .collect();
                match candidates.as_slice() {
                    [] => return Err(TreeError::NoRoot),
                    [root] => *root,
                    _ => return Err(TreeError::AmbiguousRoot(candidates.len())),
                }
            }
        };

        Self::from_graph(&graph, NodeIndex::new(root as usize))
    }

    /// Build a tree from a flat `[parent0, child0, parent1, child1, ...]` array.
    pub fn from_flat_edges(
        node_count: usize,
        edges: &[u32],
        root: Option<u32>,
    ) -> Result<Self, TreeError> {
        if edges.len() % 2 != 0 {
            return Err(TreeError::OddEdgeArray(edges.len()));
        }
        let pairs: Vec<(u32, u32)> = edges
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self::from_edges(node_count, &pairs, root)
    }
}
