//! Error types for tree construction and layout.
//!
//! Both enums describe caller contract violations. The layout engine itself
//! has no recoverable failure modes: once the root checks pass, every finite
//! tree produces a layout.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors reported by the layout entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The root was created without a child list.
    #[error("the children list of the tree's root is absent")]
    RootChildrenAbsent,

    /// The root has a child list, but it holds no nodes.
    #[error("the children list of the tree's root is empty")]
    RootHasNoChildren,

    /// Sibling spacing must be a finite, strictly positive number.
    #[error("invalid sibling spacing {0}: expected a finite value greater than zero")]
    InvalidSpacing(f64),

    /// Level separation must be a finite, non-negative number.
    #[error("invalid level separation {0}: expected a finite value of zero or more")]
    InvalidLevelSeparation(f64),
}

/// Errors reported while building a [`Tree`](crate::tree::Tree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node id does not belong to the tree it was used with.
    #[error("{0} does not exist in this tree")]
    UnknownNode(NodeId),

    /// A flat edge array must hold `[parent, child]` pairs.
    #[error("edge array has odd length {0}")]
    OddEdgeArray(usize),

    /// An edge endpoint lies outside `0..node_count`.
    #[error("node {node} is out of bounds for {node_count} nodes")]
    NodeOutOfBounds { node: u32, node_count: usize },

    /// An edge connects a node to itself.
    #[error("node {0} links to itself")]
    SelfLoop(u32),

    /// A node is the target of more than one edge.
    #[error("node {0} has more than one parent")]
    MultipleParents(u32),

    /// The requested root is the target of an edge.
    #[error("root node {0} has a parent")]
    RootHasParent(u32),

    /// No node without a parent exists, so no root can be chosen.
    #[error("no root candidate: every node has a parent")]
    NoRoot,

    /// Several parentless nodes exist and no root was specified.
    #[error("{0} root candidates found; specify the root explicitly")]
    AmbiguousRoot(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_errors_are_distinct() {
        assert_ne!(LayoutError::RootChildrenAbsent, LayoutError::RootHasNoChildren);
        assert_eq!(
            LayoutError::RootChildrenAbsent.to_string(),
            "the children list of the tree's root is absent"
        );
        assert_eq!(
            LayoutError::RootHasNoChildren.to_string(),
            "the children list of the tree's root is empty"
        );
    }

    #[test]
    fn test_tree_error_messages() {
        let err = TreeError::NodeOutOfBounds {
            node: 999,
            node_count: 3,
        };
        assert_eq!(err.to_string(), "node 999 is out of bounds for 3 nodes");
        assert_eq!(
            TreeError::UnknownNode(NodeId(7)).to_string(),
            "Node(7) does not exist in this tree"
        );
    }
}
