//! Property checks against brute-force oracles on a deterministic family of
//! small graphs (self-loops, parallel edges and isolated nodes included).

use graph_theory_wasm::{
    articulation_points, bridge_edge_ids, dfs, minimum_spanning_forest, shortest_path,
    strongly_connected_components, Graph, PathAlgorithm, PathOutcome,
};
use std::collections::{HashMap, HashSet, VecDeque};

/// xorshift64, enough to spread small test graphs around.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

struct Case {
    nodes: usize,
    /// (from, to, weight)
    edges: Vec<(usize, usize, Option<f64>)>,
    directed: bool,
}

impl Case {
    fn build(&self, weighted: bool) -> Graph {
        let mut g = Graph::new(self.directed, weighted);
        for v in 0..self.nodes {
            g.add_node(&node(v));
        }
        for (k, &(a, b, w)) in self.edges.iter().enumerate() {
            g.add_edge(&format!("e{}", k), &node(a), &node(b), w);
        }
        g
    }

    fn weight(&self, k: usize, weighted: bool) -> f64 {
        if weighted {
            self.edges[k].2.unwrap_or(1.0)
        } else {
            1.0
        }
    }
}

fn node(v: usize) -> String {
    format!("n{}", v)
}

fn index(id: &str) -> usize {
    id[1..].parse().unwrap()
}

fn edge_index(id: &str) -> usize {
    id[1..].parse().unwrap()
}

fn cases(count: usize, max_edges: u64) -> Vec<Case> {
    let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
    (0..count)
        .map(|_| {
            let nodes = rng.below(7) as usize;
            let m = if nodes == 0 { 0 } else { rng.below(max_edges + 1) as usize };
            let edges = (0..m)
                .map(|_| {
                    let a = rng.below(nodes as u64) as usize;
                    let b = rng.below(nodes as u64) as usize;
                    let w = match rng.below(6) {
                        0 => None,
                        x => Some((x - 1) as f64),
                    };
                    (a, b, w)
                })
                .collect();
            Case {
                nodes,
                edges,
                directed: rng.below(2) == 0,
            }
        })
        .collect()
}

/// Connected components of the undirected view, skipping one edge or node.
fn component_count(case: &Case, skip_edge: Option<usize>, skip_node: Option<usize>) -> usize {
    let mut parent: Vec<usize> = (0..case.nodes).collect();
    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            let next = parent[x];
            let root = find(parent, next);
            parent[x] = root;
        }
        parent[x]
    }
    for (k, &(a, b, _)) in case.edges.iter().enumerate() {
        if Some(k) == skip_edge || Some(a) == skip_node || Some(b) == skip_node {
            continue;
        }
        let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
        parent[ra] = rb;
    }
    (0..case.nodes)
        .filter(|&v| Some(v) != skip_node)
        .filter(|&v| find(&mut parent, v) == v)
        .count()
}

/// Nodes reachable from `from` along source -> target edges.
fn reachable(case: &Case, from: usize) -> HashSet<usize> {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(u) = queue.pop_front() {
        for &(a, b, _) in &case.edges {
            if a == u && seen.insert(b) {
                queue.push_back(b);
            }
        }
    }
    seen
}

/// Bellman-Ford over non-negative weights.
fn distances(case: &Case, from: usize, weighted: bool) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; case.nodes];
    dist[from] = 0.0;
    for _ in 0..case.nodes {
        for (k, &(a, b, _)) in case.edges.iter().enumerate() {
            let w = case.weight(k, weighted);
            if dist[a] + w < dist[b] {
                dist[b] = dist[a] + w;
            }
            if !case.directed && dist[b] + w < dist[a] {
                dist[a] = dist[b] + w;
            }
        }
    }
    dist
}

#[test]
fn dfs_classifies_every_edge_once() {
    for case in cases(300, 10) {
        let g = case.build(false);
        let result = dfs(&g, None);

        assert_eq!(result.visited.len(), case.nodes);
        let ids: HashSet<&str> = result
            .edge_classifications
            .iter()
            .map(|c| c.edge_id.as_str())
            .collect();
        assert_eq!(ids.len(), case.edges.len());
        assert_eq!(result.edge_classifications.len(), case.edges.len());

        let mut stamps: Vec<u32> = result
            .discovery_time
            .values()
            .chain(result.finish_time.values())
            .copied()
            .collect();
        stamps.sort_unstable();
        let expected: Vec<u32> = (1..=(2 * case.nodes) as u32).collect();
        assert_eq!(stamps, expected);
        for (id, &d) in &result.discovery_time {
            assert!(d < result.finish_time[id]);
        }
    }
}

#[test]
fn dfs_edge_classes_match_interval_nesting() {
    use graph_theory_wasm::EdgeClass;
    for case in cases(300, 10).into_iter().filter(|c| c.directed) {
        let g = case.build(false);
        let result = dfs(&g, None);
        let d = &result.discovery_time;
        let f = &result.finish_time;
        for c in &result.edge_classifications {
            let (a, b, _) = case.edges[edge_index(&c.edge_id)];
            let (u, v) = (node(a), node(b));
            // v's interval nested in u's <=> v is a descendant of u
            let descendant = d[&u] < d[&v] && f[&v] < f[&u];
            let ancestor = d[&v] <= d[&u] && f[&u] <= f[&v];
            // Finished targets split on discovery order alone
            match c.class {
                EdgeClass::Tree | EdgeClass::Cross => assert!(descendant),
                EdgeClass::Back => assert!(ancestor),
                EdgeClass::Forward => assert!(!descendant && !ancestor && f[&v] < d[&u]),
            }
        }
    }
}

#[test]
fn scc_is_a_mutual_reachability_partition() {
    for case in cases(300, 10) {
        let g = case.build(false);
        let result = strongly_connected_components(&g);

        let mut owner = HashMap::new();
        for (i, component) in result.components.iter().enumerate() {
            for id in component {
                assert!(owner.insert(index(id), i).is_none(), "node in two components");
            }
        }
        assert_eq!(owner.len(), case.nodes);

        let reach: Vec<HashSet<usize>> = (0..case.nodes).map(|v| reachable(&case, v)).collect();
        for u in 0..case.nodes {
            for v in 0..case.nodes {
                let mutual = reach[u].contains(&v) && reach[v].contains(&u);
                assert_eq!(owner[&u] == owner[&v], mutual);
            }
        }
    }
}

#[test]
fn bridges_are_exactly_the_cut_edges() {
    for case in cases(300, 9) {
        let g = case.build(false);
        let reported: HashSet<usize> = bridge_edge_ids(&g).iter().map(|id| edge_index(id)).collect();
        let base = component_count(&case, None, None);
        for k in 0..case.edges.len() {
            let cut = component_count(&case, Some(k), None) > base;
            assert_eq!(reported.contains(&k), cut, "edge e{}", k);
        }
    }
}

#[test]
fn articulation_points_are_exactly_the_cut_vertices() {
    for case in cases(300, 9) {
        let g = case.build(false);
        let reported: HashSet<usize> = articulation_points(&g).iter().map(|id| index(id)).collect();
        let base = component_count(&case, None, None);
        for v in 0..case.nodes {
            // Removing v also removes v's own component when v was isolated
            let cut = component_count(&case, None, Some(v)) > base;
            assert_eq!(reported.contains(&v), cut, "node n{}", v);
        }
    }
}

#[test]
fn shortest_paths_are_optimal_and_well_formed() {
    for weighted in [false, true] {
        for case in cases(200, 10) {
            let g = case.build(weighted);
            for s in 0..case.nodes {
                let oracle = distances(&case, s, weighted);
                for t in 0..case.nodes {
                    let outcome = shortest_path(&g, &node(s), &node(t));
                    let Some(p) = outcome.path() else {
                        assert!(oracle[t].is_infinite());
                        continue;
                    };
                    assert_eq!(p.distance, oracle[t]);
                    assert_eq!(
                        p.algorithm,
                        if weighted { PathAlgorithm::Dijkstra } else { PathAlgorithm::Bfs }
                    );
                    assert_eq!(p.path.first(), Some(&node(s)));
                    assert_eq!(p.path.last(), Some(&node(t)));
                    assert_eq!(p.edges.len() + 1, p.path.len());

                    let mut total = 0.0;
                    for (i, id) in p.edges.iter().enumerate() {
                        let k = edge_index(id);
                        let (a, b, _) = case.edges[k];
                        let (u, v) = (index(&p.path[i]), index(&p.path[i + 1]));
                        assert!((a, b) == (u, v) || (!case.directed && (b, a) == (u, v)));
                        total += case.weight(k, weighted);
                    }
                    assert_eq!(total, p.distance);
                }
            }
        }
    }
}

#[test]
fn missing_endpoints_are_no_path() {
    let case = &cases(1, 4)[0];
    let g = case.build(true);
    assert_eq!(shortest_path(&g, "missing", "n0"), PathOutcome::NoPath);
}

#[test]
fn spanning_forest_is_minimal() {
    for case in cases(200, 8) {
        let g = case.build(true);
        let result = minimum_spanning_forest(&g);
        let components = component_count(&case, None, None);
        let k = case.nodes - components;

        assert_eq!(result.edges.len(), k);
        assert_eq!(result.component_count, components);

        // Brute force: lightest acyclic subset of size k
        let m = case.edges.len();
        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << m) {
            if mask.count_ones() as usize != k {
                continue;
            }
            let mut parent: Vec<usize> = (0..case.nodes).collect();
            let mut acyclic = true;
            let mut weight = 0.0;
            for e in (0..m).filter(|e| mask & (1 << e) != 0) {
                let (mut a, mut b, _) = case.edges[e];
                while parent[a] != a {
                    a = parent[a];
                }
                while parent[b] != b {
                    b = parent[b];
                }
                if a == b {
                    acyclic = false;
                    break;
                }
                parent[a] = b;
                weight += case.weight(e, true);
            }
            if acyclic && weight < best {
                best = weight;
            }
        }
        assert_eq!(result.total_weight, best);
    }
}

#[test]
fn results_are_deterministic() {
    for case in cases(50, 10) {
        let a = case.build(true);
        let b = case.build(true);
        let json = |g: &Graph| {
            serde_json::to_string(&(
                dfs(g, None),
                strongly_connected_components(g),
                bridge_edge_ids(g),
                articulation_points(g),
                minimum_spanning_forest(g),
                shortest_path(g, "n0", "n1"),
            ))
            .unwrap()
        };
        assert_eq!(json(&a), json(&b));
    }
}
