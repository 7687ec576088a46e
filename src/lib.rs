//! Graph algorithms for the graph theory visualizer.
//!
//! This crate provides WASM-compiled analyses that run in the browser over
//! the graph drawn in the editor: depth-first traversal with edge
//! classification, strongly connected components, bridges and articulation
//! points, shortest paths and minimum spanning forests.
//!
//! Every analysis takes an immutable [`Graph`] and returns a result keyed by
//! node id and edge id, ready for the view to style. Degenerate inputs
//! (empty graph, missing node, unreachable target) come back as empty or
//! explicit "no result" values, never as errors.

use wasm_bindgen::prelude::*;

pub mod algorithms;
mod error;
mod graph;

pub use algorithms::articulation::{articulation_points, bridge_edge_ids, bridges};
pub use algorithms::dfs::{dfs, DfsResult, EdgeClass, EdgeClassification};
pub use algorithms::mst::{minimum_spanning_forest, MstResult};
pub use algorithms::scc::{strongly_connected_components, SccResult};
pub use algorithms::shortest_path::{
    shortest_path, shortest_path_edges, PathAlgorithm, PathOutcome, ShortestPath,
};
pub use error::{GraphError, GraphResult};
pub use graph::{EdgeSpec, Graph, GraphSettings, GraphSnapshot, NodeSpec};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the crate version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
