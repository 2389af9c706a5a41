//! Spatial indexing for O(log n) hit testing on laid-out trees.
//!
//! This module provides an R-tree based spatial index for efficient
//! nearest-neighbor and range queries on projected node positions.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
