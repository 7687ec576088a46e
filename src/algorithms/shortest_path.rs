//! Single-pair shortest path.
//!
//! Weighted graphs use Dijkstra with a linear-scan selection (the graphs
//! drawn in the editor are small, and the scan makes tie-breaking follow
//! node order). Unweighted graphs use breadth-first search, so the distance
//! is the hop count.
//!
//! Both record the edge each node was reached through, so the returned edge
//! list names the exact edges walked, parallel edges included.

use crate::graph::Graph;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Algorithm that produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    Bfs,
    Dijkstra,
}

/// A shortest path from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPath {
    /// Node ids from start to end
    pub path: Vec<String>,
    /// Sum of edge weights (hop count when unweighted)
    pub distance: f64,
    /// Edge ids between consecutive path nodes
    pub edges: Vec<String>,
    pub algorithm: PathAlgorithm,
}

/// Outcome of a shortest path query.
///
/// `NoPath` covers an unreachable end as well as a start or end missing
/// from the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PathOutcome {
    Found(ShortestPath),
    NoPath,
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&ShortestPath> {
        match self {
            PathOutcome::Found(p) => Some(p),
            PathOutcome::NoPath => None,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        self.path().map(|p| p.distance)
    }
}

/// How each reached node was entered: (previous node, edge index).
type Predecessors = Vec<Option<(usize, usize)>>;

/// Find the shortest path from `start` to `end`.
///
/// Dispatches on the weighted setting: Dijkstra when weighted (absent
/// weights count as 1), BFS otherwise. Edges are followed as the directed
/// setting says. `start == end` gives a one-node path of distance 0.
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> PathOutcome {
    let algorithm = if graph.is_weighted() {
        PathAlgorithm::Dijkstra
    } else {
        PathAlgorithm::Bfs
    };
    debug!(start, end, ?algorithm, nodes = graph.len(), "running shortest path");

    let (Some(s), Some(t)) = (graph.node_idx(start), graph.node_idx(end)) else {
        trace!("endpoint missing from graph");
        return PathOutcome::NoPath;
    };

    let searched = match algorithm {
        PathAlgorithm::Dijkstra => dijkstra(graph, s, t),
        PathAlgorithm::Bfs => bfs(graph, s, t),
    };
    let Some((distance, pred)) = searched else {
        trace!("end unreachable");
        return PathOutcome::NoPath;
    };

    let mut nodes = vec![t];
    let mut edges = Vec::new();
    let mut v = t;
    while let Some((u, e)) = pred[v] {
        edges.push(e);
        nodes.push(u);
        v = u;
    }
    nodes.reverse();
    edges.reverse();

    PathOutcome::Found(ShortestPath {
        path: nodes.into_iter().map(|v| graph.id(v).to_string()).collect(),
        distance,
        edges: edges.into_iter().map(|e| graph.edge(e).id.clone()).collect(),
        algorithm,
    })
}

/// Edge ids along the shortest path, empty when there is none.
pub fn shortest_path_edges(graph: &Graph, start: &str, end: &str) -> Vec<String> {
    match shortest_path(graph, start, end) {
        PathOutcome::Found(p) => p.edges,
        PathOutcome::NoPath => Vec::new(),
    }
}

/// Dijkstra with linear-scan selection.
///
/// Assumes non-negative weights. A negative weight does not loop: a settled
/// node is never relaxed again, so the search still ends after at most n
/// selections, but the reported distance may not be minimal.
fn dijkstra(graph: &Graph, s: usize, t: usize) -> Option<(f64, Predecessors)> {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut pred: Predecessors = vec![None; n];
    dist[s] = 0.0;

    loop {
        // min_by keeps the first of equal minimums, i.e. the lowest node index
        let next = (0..n)
            .filter(|&v| !settled[v] && dist[v].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else {
            break;
        };
        settled[u] = true;
        if u == t {
            break;
        }
        for &(v, e) in graph.neighbors(u) {
            if settled[v] {
                continue;
            }
            let candidate = dist[u] + graph.effective_weight(e);
            if candidate < dist[v] {
                dist[v] = candidate;
                pred[v] = Some((u, e));
            }
        }
    }

    dist[t].is_finite().then_some((dist[t], pred))
}

/// Breadth-first search over unit-weight edges.
fn bfs(graph: &Graph, s: usize, t: usize) -> Option<(f64, Predecessors)> {
    let n = graph.len();
    let mut hops = vec![usize::MAX; n];
    let mut pred: Predecessors = vec![None; n];
    let mut queue = VecDeque::new();

    hops[s] = 0;
    queue.push_back(s);

    while let Some(u) = queue.pop_front() {
        if u == t {
            return Some((hops[t] as f64, pred));
        }
        for &(v, e) in graph.neighbors(u) {
            if hops[v] == usize::MAX {
                hops[v] = hops[u] + 1;
                pred[v] = Some((u, e));
                queue.push_back(v);
            }
        }
    }

    None
}
