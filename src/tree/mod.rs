//! Tree data structures.
//!
//! Trees are stored as an arena of nodes addressed by [`NodeId`]. Parent,
//! ancestor, and thread links are plain indices, so the layout engine can
//! walk and rewrite them without reference cycles.

mod arena;
mod edges;
mod node;

pub use arena::{NodePlacement, Tree};
pub use node::{Node, NodeId};
