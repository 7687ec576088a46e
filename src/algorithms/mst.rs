//! Minimum spanning forest via Kruskal's algorithm.
//!
//! Uses union-find with path compression and union by rank. Direction is
//! ignored; a disconnected graph yields one tree per component.

use crate::graph::Graph;
use serde::Serialize;
use tracing::{debug, trace};

/// Union-Find data structure with path compression and union by rank.
///
/// Scoped to a single forest computation.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of `x` and `y`. False when already in the same set.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let px = self.find(x);
        let py = self.find(y);

        if px == py {
            return false;
        }

        // Union by rank
        if self.rank[px] < self.rank[py] {
            self.parent[px] = py;
        } else if self.rank[px] > self.rank[py] {
            self.parent[py] = px;
        } else {
            self.parent[py] = px;
            self.rank[px] += 1;
        }

        true
    }
}

/// Result of the spanning forest computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MstResult {
    /// Accepted edge ids, in acceptance order
    pub edges: Vec<String>,
    /// Sum of accepted edge weights
    pub total_weight: f64,
    /// Trees in the forest, isolated nodes included
    pub component_count: usize,
}

/// Kruskal's minimum spanning forest.
///
/// Edges are sorted ascending by effective weight (1 when unweighted or
/// absent); the sort is stable so ties keep snapshot order. An edge is
/// accepted iff its endpoints are still in different sets, which always
/// rejects self-loops and all but one of a bundle of parallel edges.
///
/// Time: O(E log E) for sorting + O(E α(V)) for union-find.
pub fn minimum_spanning_forest(graph: &Graph) -> MstResult {
    let n = graph.len();
    debug!(nodes = n, edges = graph.edge_count(), "running kruskal");
    if n == 0 {
        return MstResult::default();
    }

    let mut order: Vec<(f64, usize)> = (0..graph.edge_count())
        .map(|e| (graph.effective_weight(e), e))
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut uf = UnionFind::new(n);
    let mut edges = Vec::new();
    let mut total_weight = 0.0;

    for (weight, e) in order {
        let record = graph.edge(e);
        if uf.union(record.from, record.to) {
            trace!(edge = %record.id, weight, "accepted");
            edges.push(record.id.clone());
            total_weight += weight;

            // A spanning tree of n nodes has n-1 edges
            if edges.len() == n - 1 {
                break;
            }
        }
    }

    MstResult {
        component_count: n - edges.len(),
        edges,
        total_weight,
    }
}
