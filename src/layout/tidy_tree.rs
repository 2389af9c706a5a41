//! Config-driven tidy tree layout with coordinate projection.
//!
//! [`generate_tree`] produces a horizontal position and a depth level per
//! node. This module runs it with a [`LayoutConfig`] and transforms the
//! `(pos, level)` pairs into either linear (top-down) or radial (polar)
//! `(x, y)` coordinates for drawing.

use std::f64::consts::TAU;

use log::debug;

use super::buchheim::generate_tree;
use super::config::{CoordinateMode, LayoutConfig};
use crate::error::LayoutError;
use crate::tree::Tree;

/// Result of the tidy tree layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTreeResult {
    /// X positions, one per node in arena order.
    pub positions_x: Vec<f64>,
    /// Y positions, one per node in arena order.
    pub positions_y: Vec<f64>,
    /// Depth level per node.
    pub levels: Vec<u32>,
    /// Number of nodes laid out.
    pub node_count: usize,
}

impl TidyTreeResult {
    /// Interleaved `[x0, y0, x1, y1, ...]` positions.
    pub fn interleaved(&self) -> Vec<f64> {
        self.positions_x
            .iter()
            .zip(&self.positions_y)
            .flat_map(|(&x, &y)| [x, y])
            .collect()
    }
}

/// The tidy tree layout engine.
#[derive(Debug, Clone, Default)]
pub struct TidyTreeLayout {
    config: LayoutConfig,
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run the layout engine, setting `pos` and `level` on every node.
    pub fn apply<T>(&self, tree: &mut Tree<T>) -> Result<(), LayoutError> {
        self.config.validate()?;
        generate_tree(tree, self.config.spacing)
    }

    /// Run the layout engine and project the result into `(x, y)` coordinates.
    pub fn compute<T>(&self, tree: &mut Tree<T>) -> Result<TidyTreeResult, LayoutError> {
        self.apply(tree)?;
        let result = self.project(tree);
        debug!(
            nodes = result.node_count,
            mode:? = self.config.coordinate_mode;
            "Projected tidy tree layout"
        );
        Ok(result)
    }

    /// Project an already laid-out tree.
    pub fn project<T>(&self, tree: &Tree<T>) -> TidyTreeResult {
        let node_count = tree.node_count();
        let mut positions_x = Vec::with_capacity(node_count);
        let mut positions_y = Vec::with_capacity(node_count);
        let mut levels = Vec::with_capacity(node_count);
        let level_separation = self.config.level_separation;

        match self.config.coordinate_mode {
            CoordinateMode::Linear => {
                for (_, node) in tree.iter() {
                    positions_x.push(node.pos());
                    positions_y.push(f64::from(node.level()) * level_separation);
                    levels.push(node.level());
                }
            }
            CoordinateMode::Radial => {
                // Map the x range onto a full turn, leaving one spacing of
                // slack so the first and last nodes do not coincide.
                let (min_x, max_x) = tree.extent();
                let divisor = max_x - min_x + self.config.spacing;
                let angular_scale = if max_x > min_x { TAU / divisor } else { 0.0 };

                for (_, node) in tree.iter() {
                    let angle = (node.pos() - min_x) * angular_scale;
                    let radius = f64::from(node.level()) * level_separation;
                    positions_x.push(radius * angle.cos());
                    positions_y.push(radius * angle.sin());
                    levels.push(node.level());
                }
            }
        }

        TidyTreeResult {
            positions_x,
            positions_y,
            levels,
            node_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn star(leaves: u32) -> Tree<u32> {
        let mut tree = Tree::new(0);
        let root = tree.root();
        tree.add_children(root, 1..=leaves).unwrap();
        tree
    }

    #[test]
    fn test_simple_tree() {
        let layout = TidyTreeLayout::new(LayoutConfig {
            level_separation: 100.0,
            ..Default::default()
        });

        // Tree:  0 → 1, 0 → 2
        let mut tree = star(2);
        let result = layout.compute(&mut tree).unwrap();

        assert_eq!(result.node_count, 3);

        // Root should be centered over children
        let midpoint = (result.positions_x[1] + result.positions_x[2]) / 2.0;
        assert_approx_eq!(f64, result.positions_x[0], midpoint);

        // Children on level 1 (y = 100), root on level 0
        assert_approx_eq!(f64, result.positions_y[0], 0.0);
        assert_approx_eq!(f64, result.positions_y[1], 100.0);
        assert_approx_eq!(f64, result.positions_y[2], 100.0);
        assert_eq!(result.levels, vec![0, 1, 1]);

        // Children separated by exactly the spacing
        assert_approx_eq!(f64, result.positions_x[2] - result.positions_x[1], 1.0);
    }

    #[test]
    fn test_deeper_tree() {
        let layout = TidyTreeLayout::new(LayoutConfig {
            level_separation: 50.0,
            ..Default::default()
        });

        // Tree:  0 → 1, 0 → 2, 1 → 3, 1 → 4, 2 → 5
        let mut tree = Tree::from_edges(6, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5)], Some(0))
            .unwrap();
        let result = layout.compute(&mut tree).unwrap();

        assert_eq!(result.node_count, 6);
        for (id, node) in tree.iter() {
            let expected_y = match *node.data() {
                0 => 0.0,
                1 | 2 => 50.0,
                _ => 100.0,
            };
            assert_approx_eq!(f64, result.positions_y[id.raw() as usize], expected_y);
        }
    }

    #[test]
    fn test_radial_layout() {
        let layout = TidyTreeLayout::new(LayoutConfig {
            coordinate_mode: CoordinateMode::Radial,
            level_separation: 100.0,
            ..Default::default()
        });

        // Tree: 0 → 1, 0 → 2, 0 → 3, 0 → 4
        let mut tree = star(4);
        let result = layout.compute(&mut tree).unwrap();

        assert_eq!(result.node_count, 5);

        // Root at the center
        assert_approx_eq!(f64, result.positions_x[0], 0.0);
        assert_approx_eq!(f64, result.positions_y[0], 0.0);

        // Children on the first ring, at distinct angles
        for i in 1..5 {
            let dist = result.positions_x[i].hypot(result.positions_y[i]);
            assert_approx_eq!(f64, dist, 100.0, epsilon = 1e-9);
        }
        // Leaves span 3 units plus 1 of slack: a quarter turn apart.
        assert_approx_eq!(f64, result.positions_x[2], 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, result.positions_y[2], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radial_single_column() {
        let layout = TidyTreeLayout::new(LayoutConfig {
            coordinate_mode: CoordinateMode::Radial,
            level_separation: 10.0,
            ..Default::default()
        });

        // Single-child chain: every node at x = 0, so every angle is 0.
        let mut tree = Tree::new(0);
        let root = tree.root();
        let child = tree.add_child(root, 1).unwrap();
        tree.add_child(child, 2).unwrap();
        let result = layout.compute(&mut tree).unwrap();

        assert_approx_eq!(f64, result.positions_x[2], 20.0);
        assert_approx_eq!(f64, result.positions_y[2], 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let layout = TidyTreeLayout::new(LayoutConfig::with_spacing(0.0));
        let mut tree = star(2);
        assert_eq!(
            layout.compute(&mut tree),
            Err(LayoutError::InvalidSpacing(0.0))
        );
    }

    #[test]
    fn test_root_errors_propagate() {
        let layout = TidyTreeLayout::with_defaults();
        let mut tree = Tree::new(0);
        assert_eq!(
            layout.compute(&mut tree),
            Err(LayoutError::RootChildrenAbsent)
        );
    }

    #[test]
    fn test_interleaved() {
        let layout = TidyTreeLayout::with_defaults();
        let mut tree = star(2);
        let result = layout.compute(&mut tree).unwrap();

        assert_eq!(
            result.interleaved(),
            vec![0.0, 0.0, -0.5, 1.0, 0.5, 1.0]
        );
    }
}
