//! Tree layout algorithms.
//!
//! [`buchheim`] holds the linear-time layout engine that assigns each node a
//! horizontal position and a depth level. [`tidy_tree`] wraps it with a
//! [`LayoutConfig`] and projects the result into drawable coordinates.

pub mod buchheim;
pub mod config;
pub mod tidy_tree;

pub use buchheim::generate_tree;
pub use config::{CoordinateMode, LayoutConfig};
pub use tidy_tree::{TidyTreeLayout, TidyTreeResult};
