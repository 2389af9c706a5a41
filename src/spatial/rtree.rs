//! Hit testing over projected node positions.
//!
//! Points are stored in an rstar R*-tree as `[x, y]` geometries tagged with
//! their [`NodeId`], so a pointer position maps back to a tree node in
//! O(log n).

use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

use crate::layout::TidyTreeResult;
use crate::tree::NodeId;

/// A projected node position tagged with its id.
pub type NodePoint = GeomWithData<[f64; 2], NodeId>;

/// Spatial index over laid-out tree nodes.
pub struct SpatialIndex {
    points: RTree<NodePoint>,
}

impl SpatialIndex {
    /// An empty index. Every query returns nothing.
    pub fn new() -> Self {
        Self {
            points: RTree::new(),
        }
    }

    /// Bulk load `(id, [x, y])` pairs.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, [f64; 2])>,
    {
        let points = points
            .into_iter()
            .map(|(id, position)| NodePoint::new(position, id))
            .collect();
        Self {
            points: RTree::bulk_load(points),
        }
    }

    /// Index the projected positions of a layout result, in arena order.
    pub fn from_result(result: &TidyTreeResult) -> Self {
        Self::from_points(
            result
                .positions_x
                .iter()
                .zip(&result.positions_y)
                .enumerate()
                .map(|(index, (&x, &y))| (NodeId(index as u32), [x, y])),
        )
    }

    pub fn nearest(&self, x: f64, y: f64) -> Option<NodeId> {
        self.points.nearest_neighbor(&[x, y]).map(|point| point.data)
    }

    /// Nearest node, provided it lies no further than `max_distance` away.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<NodeId> {
        self.points
            .nearest_neighbor_iter_with_distance_2(&[x, y])
            .next()
            .filter(|&(_, distance_2)| distance_2 <= max_distance * max_distance)
            .map(|(point, _)| point.data)
    }

    /// Nodes inside the axis-aligned rectangle, borders included.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.points
            .locate_in_envelope(&envelope)
            .map(|point| point.data)
            .collect()
    }

    /// Nodes no further than `radius` from `(x, y)`.
    pub fn in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<NodeId> {
        self.points
            .locate_within_distance([x, y], radius * radius)
            .map(|point| point.data)
            .collect()
    }

    pub fn clear(&mut self) {
        self.points = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.points.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
