//! Graph algorithm implementations.
//!
//! Each analysis is a pure function over a borrowed [`Graph`](crate::Graph)
//! returning a fresh, serializable result keyed by node and edge ids.

pub mod articulation;
pub mod dfs;
pub mod mst;
pub mod scc;
pub mod shortest_path;
