//! Depth-first traversal with edge classification.
//!
//! Walks the graph as the settings interpret it, stamping each node with a
//! discovery and a finish time from one shared counter, and tags every edge
//! met on the way as tree, back, forward or cross.
//!
//! The walk uses an explicit `(node, adjacency position)` stack, so depth is
//! bounded by the heap rather than the call stack. Discovery order, finish
//! order and classifications are identical to the recursive formulation.

use crate::graph::Graph;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Classification of an edge relative to the depth-first forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Target was undiscovered; the walk descended through this edge.
    Tree,
    /// Target is an ancestor still on the stack (includes self-loops).
    Back,
    /// Target is finished and was discovered before the current node.
    Forward,
    /// Target is finished and was discovered no earlier than the current node.
    Cross,
}

impl EdgeClass {
    /// Lowercase name used as the styling key.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeClass::Tree => "tree",
            EdgeClass::Back => "back",
            EdgeClass::Forward => "forward",
            EdgeClass::Cross => "cross",
        }
    }
}

/// One classified edge, keyed by the caller's edge id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeClassification {
    pub edge_id: String,
    #[serde(rename = "type")]
    pub class: EdgeClass,
}

/// Result of a full depth-first sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DfsResult {
    /// Node ids in discovery order
    pub visited: Vec<String>,
    /// Classified edges in the order the walk met them
    pub edge_classifications: Vec<EdgeClassification>,
    /// Node id -> discovery timestamp (1-indexed)
    pub discovery_time: BTreeMap<String, u32>,
    /// Node id -> finish timestamp
    pub finish_time: BTreeMap<String, u32>,
}

impl DfsResult {
    /// Classification assigned to an edge id, if the walk met it.
    pub fn classification_of(&self, edge_id: &str) -> Option<EdgeClass> {
        self.edge_classifications
            .iter()
            .find(|c| c.edge_id == edge_id)
            .map(|c| c.class)
    }

    /// Number of edges carrying the given class.
    pub fn count(&self, class: EdgeClass) -> usize {
        self.edge_classifications
            .iter()
            .filter(|c| c.class == class)
            .count()
    }

    /// A back edge exists, i.e. the walked graph has a cycle.
    pub fn has_cycle(&self) -> bool {
        self.count(EdgeClass::Back) > 0
    }
}

/// Per-run traversal state, indexed by node (and edge for `seen_edge`).
struct DfsState {
    disc: Vec<u32>,
    finish: Vec<u32>,
    seen_edge: Vec<bool>,
    order: Vec<usize>,
    classified: Vec<(usize, EdgeClass)>,
}

impl DfsState {
    fn new(nodes: usize, edges: usize) -> Self {
        DfsState {
            disc: vec![0; nodes],
            finish: vec![0; nodes],
            seen_edge: vec![false; edges],
            order: Vec::with_capacity(nodes),
            classified: Vec::with_capacity(edges),
        }
    }

    fn discovered(&self, node: usize) -> bool {
        self.disc[node] != 0
    }
}

/// Run a depth-first sweep with edge classification.
///
/// Starts at `start` when it names a node of the graph, otherwise at the
/// first node, then sweeps the remaining undiscovered nodes in node order.
/// Timestamps continue across roots.
///
/// On an undirected graph each edge is classified once, on its first
/// sighting; the walk only ever yields tree and back edges there.
pub fn dfs(graph: &Graph, start: Option<&str>) -> DfsResult {
    let n = graph.len();
    debug!(
        nodes = n,
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "running dfs"
    );
    if n == 0 {
        return DfsResult::default();
    }

    let mut state = DfsState::new(n, graph.edge_count());
    let mut time = 0u32;

    if let Some(root) = start.and_then(|id| graph.node_idx(id)) {
        time = visit(graph, root, &mut state, time);
    }
    for root in 0..n {
        if !state.discovered(root) {
            time = visit(graph, root, &mut state, time);
        }
    }
    trace!(final_time = time, "dfs complete");

    DfsResult {
        visited: state.order.iter().map(|&v| graph.id(v).to_string()).collect(),
        edge_classifications: state
            .classified
            .iter()
            .map(|&(e, class)| EdgeClassification {
                edge_id: graph.edge(e).id.clone(),
                class,
            })
            .collect(),
        discovery_time: (0..n)
            .map(|v| (graph.id(v).to_string(), state.disc[v]))
            .collect(),
        finish_time: (0..n)
            .map(|v| (graph.id(v).to_string(), state.finish[v]))
            .collect(),
    }
}

/// Walk the tree rooted at `root`. Takes the last timestamp handed out and
/// returns the last one this walk handed out.
fn visit(graph: &Graph, root: usize, state: &mut DfsState, mut time: u32) -> u32 {
    time += 1;
    state.disc[root] = time;
    state.order.push(root);
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (u, pos) = *top;
        let Some(&(v, e)) = graph.neighbors(u).get(pos) else {
            stack.pop();
            time += 1;
            state.finish[u] = time;
            continue;
        };
        top.1 += 1;

        // Symmetric adjacency lists every undirected edge at both ends.
        if state.seen_edge[e] {
            continue;
        }
        state.seen_edge[e] = true;

        let class = if !state.discovered(v) {
            EdgeClass::Tree
        } else if state.finish[v] == 0 {
            EdgeClass::Back
        } else if state.disc[v] < state.disc[u] {
            EdgeClass::Forward
        } else {
            EdgeClass::Cross
        };
        state.classified.push((e, class));

        if class == EdgeClass::Tree {
            time += 1;
            state.disc[v] = time;
            state.order.push(v);
            stack.push((v, 0));
        }
    }

    time
}
