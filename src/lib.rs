//! Tidy Tree - WASM Module
//!
//! This crate lays out arbitrary rooted trees with the linear-time
//! Buchheim-Junger-Leipert improvement of Walker's algorithm: sibling
//! subtrees never overlap, parents are centered over their children, and
//! the cost stays O(n) regardless of how irregular the tree is. It compiles
//! natively and to WebAssembly, where it exposes a JavaScript-friendly API
//! via wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: Arena-backed tree with opaque payloads, built by hand or from edges
//! - `layout`: The layout engine and coordinate projection
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `error`: Error types for tree building and layout
//!
//! # Example
//!
//! ```
//! use tidy_tree_wasm::{generate_tree, Tree};
//!
//! let mut tree = Tree::new("root");
//! let root = tree.root();
//! let left = tree.add_child(root, "left")?;
//! let right = tree.add_child(root, "right")?;
//!
//! generate_tree(&mut tree, 1.0)?;
//!
//! assert_eq!(tree[root].pos(), 0.0);
//! assert_eq!(tree[left].pos(), -0.5);
//! assert_eq!(tree[right].level(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod layout;
mod logging;
pub mod spatial;
pub mod tree;

pub use error::{LayoutError, TreeError};
pub use layout::{CoordinateMode, LayoutConfig, TidyTreeLayout, TidyTreeResult, generate_tree};
pub use logging::init_console_logging;
pub use spatial::SpatialIndex;
pub use tree::{Node, NodeId, NodePlacement, Tree};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_console_logging(log::LevelFilter::Info);
}

/// Main entry point for tree layout from JavaScript.
///
/// Holds one tree whose nodes carry a numeric tag chosen by the caller,
/// plus the most recent layout result and its spatial index.
#[wasm_bindgen]
pub struct TidyTreeWasm {
    tree: Tree<u32>,
    layout: TidyTreeLayout,
    result: Option<TidyTreeResult>,
    spatial: SpatialIndex,
}

#[wasm_bindgen]
impl TidyTreeWasm {
    /// Create a tree holding only a root with the given tag.
    #[wasm_bindgen(constructor)]
    pub fn new(root_tag: u32) -> Self {
        Self::from_tree(Tree::new(root_tag))
    }

    /// Build a tree from a Uint32Array of parent→child pairs.
    ///
    /// The edges array should be [parent0, child0, parent1, child1, ...].
    /// Node tags are the original node ids. Pass `undefined` as `rootId`
    /// to pick the only node that has children but no parent.
    #[wasm_bindgen(js_name = fromEdges)]
    pub fn from_edges(
        node_count: usize,
        edges: &[u32],
        root_id: Option<u32>,
    ) -> Result<TidyTreeWasm, JsError> {
        let tree = Tree::from_flat_edges(node_count, edges, root_id)?;
        Ok(Self::from_tree(tree))
    }

    // =========================================================================
    // Tree Building
    // =========================================================================

    /// Append a child under `parent`. Returns the new node ID.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(&mut self, parent: u32, tag: u32) -> Result<u32, JsError> {
        let id = self.tree.add_child(NodeId(parent), tag)?;
        self.invalidate();
        Ok(id.raw())
    }

    /// Get the number of nodes, root included.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.tree.node_count() as u32
    }

    /// Get the number of children of a node.
    #[wasm_bindgen(js_name = childCount)]
    pub fn child_count(&self, node_id: u32) -> Option<u32> {
        self.tree
            .get(NodeId(node_id))
            .map(|node| node.child_count() as u32)
    }

    /// Get the caller tag of a node.
    #[wasm_bindgen(js_name = getTag)]
    pub fn tag(&self, node_id: u32) -> Option<u32> {
        self.tree.data(NodeId(node_id)).copied()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the layout configuration.
    ///
    /// Accepts a partial object such as `{ spacing: 2, coordinateMode: "radial" }`.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: LayoutConfig = serde_wasm_bindgen::from_value(config)?;
        self.configure(config)?;
        Ok(())
    }

    /// Set only the minimum sibling spacing.
    #[wasm_bindgen(js_name = setSpacing)]
    pub fn set_spacing(&mut self, spacing: f64) -> Result<(), JsError> {
        let config = LayoutConfig {
            spacing,
            ..self.layout.config().clone()
        };
        self.configure(config)?;
        Ok(())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Compute the layout and rebuild the spatial index.
    #[wasm_bindgen(js_name = computeLayout)]
    pub fn compute_layout(&mut self) -> Result<(), JsError> {
        self.run_layout()?;
        Ok(())
    }

    /// Get projected positions as a Float64Array [x0, y0, x1, y1, ...].
    ///
    /// Empty until a layout has been computed.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn positions(&self) -> Float64Array {
        let positions = self
            .result
            .as_ref()
            .map(TidyTreeResult::interleaved)
            .unwrap_or_default();
        Float64Array::from(&positions[..])
    }

    /// Get the level of each node as a Uint32Array.
    #[wasm_bindgen(js_name = getLevels)]
    pub fn levels(&self) -> Vec<u32> {
        self.result
            .as_ref()
            .map(|result| result.levels.clone())
            .unwrap_or_default()
    }

    /// Get `{ id, parent, pos, level }` objects for every node.
    ///
    /// Empty until a layout has been computed, like the typed arrays.
    #[wasm_bindgen(js_name = getLayout)]
    pub fn placements(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.current_placements())?)
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the nearest node to a point.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f64, y: f64) -> Option<u32> {
        self.spatial.nearest(x, y).map(NodeId::raw)
    }

    /// Find the nearest node within a maximum distance.
    #[wasm_bindgen(js_name = findNearestNodeWithin)]
    pub fn find_nearest_node_within(&self, x: f64, y: f64, max_distance: f64) -> Option<u32> {
        self.spatial
            .nearest_within(x, y, max_distance)
            .map(NodeId::raw)
    }

    /// Find all nodes within a rectangular region.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        self.spatial
            .in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    /// Find all nodes within `radius` of a point.
    #[wasm_bindgen(js_name = findNodesInRadius)]
    pub fn find_nodes_in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<u32> {
        self.spatial
            .in_radius(x, y, radius)
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }
}

impl TidyTreeWasm {
    fn from_tree(tree: Tree<u32>) -> Self {
        Self {
            tree,
            layout: TidyTreeLayout::with_defaults(),
            result: None,
            spatial: SpatialIndex::new(),
        }
    }

    fn configure(&mut self, config: LayoutConfig) -> Result<(), LayoutError> {
        config.validate()?;
        self.layout = TidyTreeLayout::new(config);
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.result = None;
        self.spatial.clear();
    }

    fn run_layout(&mut self) -> Result<&TidyTreeResult, LayoutError> {
        let result = self.layout.compute(&mut self.tree)?;
        self.spatial = SpatialIndex::from_result(&result);
        Ok(self.result.insert(result))
    }

    /// Placements of the last computed layout, or none while it is stale.
    fn current_placements(&self) -> Vec<NodePlacement> {
        match self.result {
            Some(_) => self.tree.placements(),
            None => Vec::new(),
        }
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree<u32> {
        &self.tree
    }
}

#[cfg(test)]
mod integration_tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    /// Test the full pipeline: edges → tree → layout → spatial index.
    /// This exercises what fromEdges/computeLayout do, without JS types.
    #[test]
    fn test_edges_to_layout_to_hit_test() {
        // Tree: 0→1, 0→2, 1→3, 1→4
        let mut wasm = TidyTreeWasm::from_edges(5, &[0, 1, 0, 2, 1, 3, 1, 4], Some(0))
            .unwrap_or_else(|_| panic!("valid edges"));
        assert_eq!(wasm.node_count(), 5);

        let result = wasm.run_layout().unwrap().clone();
        assert_eq!(result.node_count, 5);

        let tree = wasm.tree();
        let root = tree.root();
        let children = tree.children(root).to_vec();
        assert_approx_eq!(f64, tree[root].pos(), 0.0);
        assert_approx_eq!(
            f64,
            tree[root].pos(),
            0.5 * (tree[children[0]].pos() + tree[children[1]].pos())
        );

        // Hit-test each node at its own projected position.
        for (id, _) in tree.iter() {
            let i = id.raw() as usize;
            let found = wasm.find_nearest_node(result.positions_x[i], result.positions_y[i]);
            assert_eq!(found, Some(id.raw()));
        }
        assert_eq!(wasm.levels(), result.levels);
    }

    #[test]
    fn test_built_tree_layout() {
        let mut wasm = TidyTreeWasm::new(100);
        let a = wasm.add_child(0, 101).unwrap_or_else(|_| panic!("root exists"));
        let b = wasm.add_child(0, 102).unwrap_or_else(|_| panic!("root exists"));
        wasm.add_child(a, 103).unwrap_or_else(|_| panic!("node exists"));

        assert_eq!(wasm.child_count(0), Some(2));
        assert_eq!(wasm.child_count(b), Some(0));
        assert_eq!(wasm.child_count(99), None);
        assert_eq!(wasm.tag(a), Some(101));

        wasm.run_layout().unwrap();
        let tree = wasm.tree();
        assert_eq!(tree[NodeId(a)].level(), 1);
        assert_eq!(tree[NodeId(3)].level(), 2);
        assert!(tree[NodeId(b)].pos() - tree[NodeId(a)].pos() >= 1.0);
    }

    #[test]
    fn test_adding_a_child_invalidates_layout() {
        let mut wasm = TidyTreeWasm::new(0);
        wasm.add_child(0, 1).unwrap_or_else(|_| panic!("root exists"));
        wasm.run_layout().unwrap();
        assert_eq!(wasm.levels().len(), 2);

        wasm.add_child(0, 2).unwrap_or_else(|_| panic!("root exists"));
        assert!(wasm.levels().is_empty());
        assert!(wasm.current_placements().is_empty());
        assert_eq!(wasm.find_nearest_node(0.0, 0.0), None);
    }

    #[test]
    fn test_placements_only_after_layout() {
        // 0 → 1 → 2: before any layout the deep node has no level yet.
        let mut wasm = TidyTreeWasm::new(0);
        let child = wasm.add_child(0, 1).unwrap_or_else(|_| panic!("root exists"));
        wasm.add_child(child, 2).unwrap_or_else(|_| panic!("node exists"));
        assert!(wasm.current_placements().is_empty());

        wasm.run_layout().unwrap();
        let placements = wasm.current_placements();
        assert_eq!(placements.len(), 3);
        assert_eq!(placements[2].level, 2);
        assert_eq!(placements[2].parent, Some(NodeId(child)));
    }

    #[test]
    fn test_radius_query_after_layout() {
        let mut wasm = TidyTreeWasm::from_edges(4, &[0, 1, 0, 2, 0, 3], Some(0))
            .unwrap_or_else(|_| panic!("valid edges"));
        wasm.run_layout().unwrap();

        // Leaves at (-1, 1), (0, 1), (1, 1); the root at the origin.
        let mut near_middle = wasm.find_nodes_in_radius(0.0, 1.0, 1.0);
        near_middle.sort();
        assert_eq!(near_middle, vec![0, 1, 2, 3]);
        assert_eq!(wasm.find_nodes_in_radius(0.0, 1.0, 0.5), vec![2]);
    }

    #[test]
    fn test_lone_root_fails_loudly() {
        let mut wasm = TidyTreeWasm::new(0);
        assert!(matches!(
            wasm.run_layout(),
            Err(LayoutError::RootChildrenAbsent)
        ));
    }

    #[test]
    fn test_configure_validates_and_keeps_mode() {
        let mut wasm = TidyTreeWasm::new(0);
        wasm.configure(LayoutConfig {
            spacing: 3.0,
            coordinate_mode: CoordinateMode::Radial,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(wasm.layout.config().coordinate_mode, CoordinateMode::Radial);

        assert!(
            wasm.configure(LayoutConfig::with_spacing(f64::NAN))
                .is_err()
        );
        assert_approx_eq!(f64, wasm.layout.config().spacing, 3.0);
    }
}
