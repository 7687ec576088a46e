//! Strongly connected components via Kosaraju's two-pass algorithm.
//!
//! Pass 1 records post-order finish times over the forward adjacency.
//! Pass 2 walks the reversed adjacency in decreasing finish order; every
//! tree it grows is one component.
//!
//! Both passes read edges as source -> target whatever the directed
//! setting says, so an undirected edge A-B still leaves A and B in
//! separate components.

use crate::graph::Graph;
use serde::Serialize;
use tracing::{debug, trace};

/// Result of SCC detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SccResult {
    /// Components in the order their roots were taken from the finish list.
    /// Members are in pass-2 discovery order.
    pub components: Vec<Vec<String>>,
}

impl SccResult {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Position of the component containing `node_id`.
    pub fn component_of(&self, node_id: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.iter().any(|id| id == node_id))
    }
}

/// Find strongly connected components (Kosaraju).
///
/// Every node lands in exactly one component; isolated nodes form their
/// own singleton. The empty graph yields no components.
pub fn strongly_connected_components(graph: &Graph) -> SccResult {
    let n = graph.len();
    debug!(nodes = n, edges = graph.edge_count(), "running kosaraju scc");
    if n == 0 {
        return SccResult::default();
    }

    // Pass 1: finish order over source -> target edges
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);
    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (u, pos) = *top;
            match graph.out_edges(u).get(pos) {
                Some(&(v, _)) => {
                    top.1 += 1;
                    if !visited[v] {
                        visited[v] = true;
                        stack.push((v, 0));
                    }
                }
                None => {
                    stack.pop();
                    finish_order.push(u);
                }
            }
        }
    }

    // Pass 2: target -> source edges, decreasing finish time
    visited.fill(false);
    let mut components = Vec::new();
    for &root in finish_order.iter().rev() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut component = vec![root];
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (u, pos) = *top;
            match graph.in_edges(u).get(pos) {
                Some(&(v, _)) => {
                    top.1 += 1;
                    if !visited[v] {
                        visited[v] = true;
                        component.push(v);
                        stack.push((v, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        components.push(component);
    }
    trace!(count = components.len(), "scc complete");

    SccResult {
        components: components
            .into_iter()
            .map(|c| c.into_iter().map(|v| graph.id(v).to_string()).collect())
            .collect(),
    }
}
