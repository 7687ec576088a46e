//! Graph snapshot types and the indexed graph every analysis runs on.

use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Interpretation switches chosen in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphSettings {
    /// Edges are traversed source -> target only.
    pub is_directed: bool,
    /// Edge weights are meaningful (absent weights still count as 1).
    pub is_weighted: bool,
}

/// Node as produced by the editor. Label and position are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>) -> Self {
        NodeSpec {
            id: id.into(),
            label: None,
            x: None,
            y: None,
        }
    }
}

/// Edge as produced by the editor. The id is echoed back in results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeSpec {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        EdgeSpec {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            weight: None,
            label: None,
        }
    }

    /// Builder: attach a weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Serializable graph snapshot exchanged with the editor.
///
/// Settings are flattened, so `{"nodes": [...], "edges": [...], "isDirected": true}`
/// parses directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(flatten)]
    pub settings: GraphSettings,
}

impl GraphSnapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> GraphResult<GraphSnapshot> {
        Ok(serde_json::from_str(json)?)
    }

    /// Strict check: every node id and edge id unique, every edge endpoint
    /// declared, every weight finite. Reports the first violation found.
    pub fn validate(&self) -> GraphResult<()> {
        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(GraphError::DuplicateEdge(edge.id.clone()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(GraphError::UnknownNode {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            if let Some(weight) = edge.weight {
                if !weight.is_finite() {
                    return Err(GraphError::InvalidWeight {
                        edge: edge.id.clone(),
                        weight,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Edge stored by index. Endpoints refer to positions in the node list.
#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord {
    pub(crate) id: String,
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) weight: Option<f64>,
    label: Option<String>,
}

/// Indexed graph built from a snapshot.
///
/// Adjacency lists hold `(neighbor, edge index)` pairs so parallel edges
/// keep their own identity.
#[wasm_bindgen]
pub struct Graph {
    /// Node specs in snapshot order (implicit nodes appended)
    nodes: Vec<NodeSpec>,

    /// Reverse lookup: ID string -> index
    node_index: HashMap<String, usize>,

    /// Edges in snapshot order
    edges: Vec<EdgeRecord>,

    /// out_adj[u] = edges leaving u (source -> target)
    out_adj: Vec<Vec<(usize, usize)>>,

    /// in_adj[v] = edges entering v, stored as (source, edge)
    in_adj: Vec<Vec<(usize, usize)>>,

    /// Symmetric view. A self-loop is listed once.
    sym_adj: Vec<Vec<(usize, usize)>>,

    settings: GraphSettings,
}

#[wasm_bindgen]
impl Graph {
    /// Create an empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new(is_directed: bool, is_weighted: bool) -> Graph {
        Graph::with_settings(GraphSettings {
            is_directed,
            is_weighted,
        })
    }

    /// Add a node, returns its index. Idempotent - returns existing index if already present.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, id: &str) -> usize {
        self.insert_node(NodeSpec::new(id))
    }

    /// Add an edge, registering missing endpoints. Parallel edges and
    /// self-loops are kept. Returns the edge index.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, id: &str, source: &str, target: &str, weight: Option<f64>) -> usize {
        let from = self.add_node(source);
        let to = self.add_node(target);
        self.insert_edge(id.to_string(), from, to, weight, None)
    }

    /// Number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[wasm_bindgen(getter, js_name = isDirected)]
    pub fn is_directed(&self) -> bool {
        self.settings.is_directed
    }

    #[wasm_bindgen(getter, js_name = isWeighted)]
    pub fn is_weighted(&self) -> bool {
        self.settings.is_weighted
    }

    /// Get node ID by index.
    #[wasm_bindgen(js_name = nodeId)]
    pub fn node_id(&self, idx: usize) -> Option<String> {
        self.nodes.get(idx).map(|n| n.id.clone())
    }

    /// Get node index by ID.
    #[wasm_bindgen(js_name = nodeIdx)]
    pub fn node_idx(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// All node IDs in index order.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> js_sys::Array {
        self.nodes
            .iter()
            .map(|n| JsValue::from_str(&n.id))
            .collect()
    }

    /// Export graph as JSON snapshot. Empty string if serialization fails.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> String {
        match serde_json::to_string(&self.to_snapshot()) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize graph snapshot");
                String::new()
            }
        }
    }

    /// Import graph from JSON snapshot. Undeclared edge endpoints become
    /// implicit nodes.
    ///
    /// wasm only: building a `JsError` panics on native targets. Native
    /// callers use [`GraphSnapshot::from_json`] with [`Graph::from_snapshot`].
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<Graph, JsError> {
        let snapshot = GraphSnapshot::from_json(json)?;
        Ok(Graph::from_snapshot(&snapshot))
    }

    /// Import graph from JSON snapshot, rejecting malformed snapshots.
    ///
    /// wasm only, like [`Graph::from_json`]. Native callers use
    /// [`GraphSnapshot::from_json`] with [`Graph::try_from_snapshot`].
    #[wasm_bindgen(js_name = fromJsonStrict)]
    pub fn from_json_strict(json: &str) -> Result<Graph, JsError> {
        let snapshot = GraphSnapshot::from_json(json)?;
        Ok(Graph::try_from_snapshot(&snapshot)?)
    }

    /// Depth-first traversal with edge classification.
    /// Returns JSON: { visited, edgeClassifications, discoveryTime, finishTime }
    #[wasm_bindgen(js_name = dfs)]
    pub fn dfs_js(&self, start: Option<String>) -> JsValue {
        use crate::algorithms::dfs::dfs;
        to_js(&dfs(self, start.as_deref()))
    }

    /// Strongly connected components (Kosaraju).
    /// Returns JSON: { components: string[][] }
    #[wasm_bindgen(js_name = scc)]
    pub fn scc_js(&self) -> JsValue {
        use crate::algorithms::scc::strongly_connected_components;
        to_js(&strongly_connected_components(self))
    }

    /// Bridges as [source, target] pairs.
    #[wasm_bindgen(js_name = bridges)]
    pub fn bridges_js(&self) -> JsValue {
        use crate::algorithms::articulation::bridges;
        to_js(&bridges(self))
    }

    /// Bridges as edge ids.
    #[wasm_bindgen(js_name = bridgeEdgeIds)]
    pub fn bridge_edge_ids_js(&self) -> JsValue {
        use crate::algorithms::articulation::bridge_edge_ids;
        to_js(&bridge_edge_ids(self))
    }

    /// Articulation points (cut vertices) as node ids.
    #[wasm_bindgen(js_name = articulationPoints)]
    pub fn articulation_points_js(&self) -> JsValue {
        use crate::algorithms::articulation::articulation_points;
        to_js(&articulation_points(self))
    }

    /// Shortest path between two nodes (Dijkstra when weighted, BFS otherwise).
    /// Returns JSON: { status: "found", path, distance, edges, algorithm } or { status: "noPath" }
    #[wasm_bindgen(js_name = shortestPath)]
    pub fn shortest_path_js(&self, start: &str, end: &str) -> JsValue {
        use crate::algorithms::shortest_path::shortest_path;
        to_js(&shortest_path(self, start, end))
    }

    /// Minimum spanning forest (Kruskal).
    /// Returns JSON: { edges, totalWeight, componentCount }
    #[wasm_bindgen(js_name = mst)]
    pub fn mst_js(&self) -> JsValue {
        use crate::algorithms::mst::minimum_spanning_forest;
        to_js(&minimum_spanning_forest(self))
    }
}

// Internal methods (not exposed to WASM)
impl Graph {
    /// Create an empty graph with the given settings.
    pub fn with_settings(settings: GraphSettings) -> Graph {
        Graph {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
            sym_adj: Vec::new(),
            settings,
        }
    }

    /// Build from a snapshot, lenient about malformed input.
    ///
    /// Duplicate node ids collapse to their first occurrence. Edge endpoints
    /// missing from the node set are registered as implicit nodes after the
    /// declared ones, in order of first reference.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Graph {
        let mut graph = Graph::with_settings(snapshot.settings);
        graph.nodes.reserve(snapshot.nodes.len());
        graph.edges.reserve(snapshot.edges.len());

        for node in &snapshot.nodes {
            graph.insert_node(node.clone());
        }
        for edge in &snapshot.edges {
            let from = graph.endpoint(&edge.id, &edge.source);
            let to = graph.endpoint(&edge.id, &edge.target);
            graph.insert_edge(edge.id.clone(), from, to, edge.weight, edge.label.clone());
        }
        graph
    }

    /// Build from a snapshot after [`GraphSnapshot::validate`] succeeds.
    pub fn try_from_snapshot(snapshot: &GraphSnapshot) -> GraphResult<Graph> {
        snapshot.validate()?;
        Ok(Graph::from_snapshot(snapshot))
    }

    /// Export back into snapshot form. Implicit nodes are included.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSpec {
                    id: e.id.clone(),
                    source: self.nodes[e.from].id.clone(),
                    target: self.nodes[e.to].id.clone(),
                    weight: e.weight,
                    label: e.label.clone(),
                })
                .collect(),
            settings: self.settings,
        }
    }

    pub fn settings(&self) -> GraphSettings {
        self.settings
    }

    /// Weight an algorithm should use for edge `edge`: the stored weight on a
    /// weighted graph, otherwise 1.
    pub fn effective_weight(&self, edge: usize) -> f64 {
        if !self.settings.is_weighted {
            return 1.0;
        }
        self.edges.get(edge).and_then(|e| e.weight).unwrap_or(1.0)
    }

    fn insert_node(&mut self, spec: NodeSpec) -> usize {
        if let Some(&idx) = self.node_index.get(&spec.id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.node_index.insert(spec.id.clone(), idx);
        self.nodes.push(spec);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self.sym_adj.push(Vec::new());
        idx
    }

    fn endpoint(&mut self, edge_id: &str, node_id: &str) -> usize {
        if let Some(&idx) = self.node_index.get(node_id) {
            return idx;
        }
        warn!(edge = edge_id, node = node_id, "registering undeclared node");
        self.add_node(node_id)
    }

    fn insert_edge(
        &mut self,
        id: String,
        from: usize,
        to: usize,
        weight: Option<f64>,
        label: Option<String>,
    ) -> usize {
        let idx = self.edges.len();
        self.edges.push(EdgeRecord {
            id,
            from,
            to,
            weight,
            label,
        });
        self.out_adj[from].push((to, idx));
        self.in_adj[to].push((from, idx));
        self.sym_adj[from].push((to, idx));
        if from != to {
            self.sym_adj[to].push((from, idx));
        }
        idx
    }

    /// Node ID by index (internal use).
    pub(crate) fn id(&self, node: usize) -> &str {
        &self.nodes[node].id
    }

    pub(crate) fn edge(&self, edge: usize) -> &EdgeRecord {
        &self.edges[edge]
    }

    /// Outgoing adjacency, source -> target regardless of settings.
    pub(crate) fn out_edges(&self, node: usize) -> &[(usize, usize)] {
        self.out_adj.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Incoming adjacency, as (source, edge) pairs.
    pub(crate) fn in_edges(&self, node: usize) -> &[(usize, usize)] {
        self.in_adj.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Undirected adjacency regardless of settings.
    pub(crate) fn undirected_edges(&self, node: usize) -> &[(usize, usize)] {
        self.sym_adj.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Adjacency as the settings interpret it.
    pub(crate) fn neighbors(&self, node: usize) -> &[(usize, usize)] {
        if self.settings.is_directed {
            self.out_edges(node)
        } else {
            self.undirected_edges(node)
        }
    }

    /// Get node count (internal, non-WASM).
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::with_settings(GraphSettings::default())
    }
}

impl From<&GraphSnapshot> for Graph {
    fn from(snapshot: &GraphSnapshot) -> Self {
        Graph::from_snapshot(snapshot)
    }
}

/// Serialize a result for JS, maps as plain objects.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}
