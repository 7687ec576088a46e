//! Articulation points (cut vertices) and bridges (cut edges).
//!
//! Both come out of one low-link DFS over the undirected view of the
//! graph, whatever the directedness setting says.
//!
//! In the visualizer these mark the fragile spots of a graph: the single
//! nodes or edges holding two regions together.

use crate::graph::Graph;
use tracing::{debug, trace};

/// Per-run outcome of the low-link walk.
struct LowLink {
    /// is_bridge[e]: edge e is a cut edge
    is_bridge: Vec<bool>,
    /// is_ap[v]: node v is a cut vertex
    is_ap: Vec<bool>,
}

/// Stack frame of the iterative walk.
struct Frame {
    node: usize,
    /// Edge the walk arrived through (None for a root)
    via: Option<usize>,
    /// Next position in the node's adjacency list
    pos: usize,
}

/// Tarjan's low-link computation.
///
/// - tin[v]: discovery order of v (1-based, 0 = unvisited)
/// - low[v]: smallest tin reachable from v's subtree through one back edge
///
/// The parent is excluded by the edge walked in on, not by node, so a
/// second parallel edge to the parent counts as a back edge and keeps the
/// pair from being reported as a bridge. Self-loops are skipped.
fn low_link(graph: &Graph) -> LowLink {
    let n = graph.len();
    let mut tin = vec![0usize; n];
    let mut low = vec![0usize; n];
    let mut is_bridge = vec![false; graph.edge_count()];
    let mut is_ap = vec![false; n];
    let mut time = 0usize;

    // Run DFS from each unvisited node (handles disconnected components)
    for root in 0..n {
        if tin[root] != 0 {
            continue;
        }
        time += 1;
        tin[root] = time;
        low[root] = time;
        let mut root_children = 0;
        let mut stack = vec![Frame {
            node: root,
            via: None,
            pos: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            if let Some(&(v, e)) = graph.undirected_edges(u).get(frame.pos) {
                frame.pos += 1;
                if Some(e) == frame.via || v == u {
                    continue;
                }
                if tin[v] == 0 {
                    time += 1;
                    tin[v] = time;
                    low[v] = time;
                    stack.push(Frame {
                        node: v,
                        via: Some(e),
                        pos: 0,
                    });
                } else {
                    // Back edge (not the one we came in on)
                    low[u] = low[u].min(tin[v]);
                }
                continue;
            }

            let via = frame.via;
            stack.pop();
            let (Some(e), Some(parent)) = (via, stack.last()) else {
                continue;
            };
            let p = parent.node;
            low[p] = low[p].min(low[u]);

            // Bridge condition: u's subtree cannot reach p or above
            if low[u] > tin[p] {
                is_bridge[e] = true;
            }

            if p == root {
                root_children += 1;
            } else if low[u] >= tin[p] {
                is_ap[p] = true;
            }
        }

        // A root is a cut vertex only when it splits >1 DFS subtrees
        if root_children > 1 {
            is_ap[root] = true;
        }
    }

    LowLink { is_bridge, is_ap }
}

/// Find articulation points (cut vertices) using Tarjan's algorithm.
///
/// An articulation point is a vertex whose removal increases the number
/// of connected components in the graph.
///
/// # Algorithm
/// A vertex v is an articulation point if:
/// 1. v is root of DFS tree and has >1 children, OR
/// 2. v is not root and has child u with low[u] >= tin[v]
///
/// # Returns
/// Node ids in node order.
pub fn articulation_points(graph: &Graph) -> Vec<String> {
    debug!(nodes = graph.len(), edges = graph.edge_count(), "finding articulation points");
    if graph.is_empty() {
        return Vec::new();
    }

    let ll = low_link(graph);
    let points: Vec<String> = ll
        .is_ap
        .iter()
        .enumerate()
        .filter_map(|(v, &ap)| ap.then(|| graph.id(v).to_string()))
        .collect();
    trace!(count = points.len(), "articulation points found");
    points
}

/// Edge indices of all bridges, in edge order.
fn bridge_indices(graph: &Graph) -> Vec<usize> {
    debug!(nodes = graph.len(), edges = graph.edge_count(), "finding bridges");
    if graph.is_empty() {
        return Vec::new();
    }

    let ll = low_link(graph);
    let bridges: Vec<usize> = ll
        .is_bridge
        .iter()
        .enumerate()
        .filter_map(|(e, &b)| b.then_some(e))
        .collect();
    trace!(count = bridges.len(), "bridges found");
    bridges
}

/// Find bridges (cut edges) in the graph.
/// A bridge is an edge whose removal disconnects the graph.
///
/// Returns `(source, target)` as supplied for each bridge edge, in edge order.
pub fn bridges(graph: &Graph) -> Vec<(String, String)> {
    bridge_indices(graph)
        .into_iter()
        .map(|e| {
            let edge = graph.edge(e);
            (graph.id(edge.from).to_string(), graph.id(edge.to).to_string())
        })
        .collect()
}

/// Bridges by edge id, in edge order.
pub fn bridge_edge_ids(graph: &Graph) -> Vec<String> {
    bridge_indices(graph)
        .into_iter()
        .map(|e| graph.edge(e).id.clone())
        .collect()
}
