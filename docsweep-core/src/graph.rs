//! Dependency-graph view of the reference edges.
//!
//! The usage pass accumulates edges as a plain mapping; this module lifts
//! them into a petgraph `DiGraphMap` for consumers that want graph queries
//! or a machine-readable export. Uses `DiGraphMap<&Path, ()>` so nodes
//! borrow the mapping's keys and edges carry no payload.

use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Builds the reference graph from the per-file dependency mapping.
///
/// Every source and target becomes a node; an edge means "source's content
/// textually names target as used". Targets are always inventory members,
/// so the graph never points at nonexistent files.
pub fn build_graph(deps: &BTreeMap<PathBuf, BTreeSet<PathBuf>>) -> DiGraphMap<&Path, ()> {
    let mut g = DiGraphMap::new();
    for (source, targets) in deps {
        g.add_node(source.as_path());
        for target in targets {
            g.add_edge(source.as_path(), target.as_path(), ());
        }
    }
    g
}

/// Export the reference graph in visualizer-compatible JSON format.
///
/// ```json
/// {
///   "nodes": [{ "id": 0, "path": "draft/main.tex" }],
///   "edges": [{ "from": 0, "to": 1 }]
/// }
/// ```
pub fn graph_to_json(deps: &BTreeMap<PathBuf, BTreeSet<PathBuf>>) -> serde_json::Value {
    let g = build_graph(deps);

    // sorted nodes for deterministic output
    let mut nodes: Vec<&Path> = g.nodes().collect();
    nodes.sort();
    let ids: BTreeMap<&Path, usize> = nodes.iter().enumerate().map(|(i, p)| (*p, i)).collect();

    let node_json: Vec<serde_json::Value> = nodes
        .iter()
        .enumerate()
        .map(|(i, p)| serde_json::json!({ "id": i, "path": p.display().to_string() }))
        .collect();

    let mut edge_json: Vec<serde_json::Value> = Vec::new();
    for (source, targets) in deps {
        for target in targets {
            edge_json.push(serde_json::json!({
                "from": ids[source.as_path()],
                "to": ids[target.as_path()],
            }));
        }
    }

    serde_json::json!({ "nodes": node_json, "edges": edge_json })
}

/// Total number of recorded reference edges.
pub fn edge_count(deps: &BTreeMap<PathBuf, BTreeSet<PathBuf>>) -> usize {
    deps.values().map(|t| t.len()).sum()
}
