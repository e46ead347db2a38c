//! Graph construction from node and edge tables.
//!
//! # Overview
//!
//! [`FamilyGraph::build`] registers every node record, then every edge
//! record, into a [`petgraph`] directed graph. The edge direction is the
//! one stored in the edge table (`source -> target`); the symmetric view
//! used by the metrics lives in [`crate::graph::undirected`].
//!
//! ## Validation
//!
//! Registration is all-or-nothing. The whole input is checked before any
//! graph structure is created, so a rejected input leaves nothing behind:
//!
//! - node names must be non-empty and unique,
//! - popularity must lie in `[0, 1]`,
//! - every edge endpoint must name a registered node,
//! - self-loops are rejected.
//!
//! Parallel edges between the same pair (e.g. `father` and `spouse`, or the
//! same kind stored twice) are kept as separate directed edges.
//!
//! ## Content Hash
//!
//! The graph carries a BLAKE3 hash over the sorted node names and sorted
//! `(source, target, kind)` triples. It does not depend on input row order,
//! so it identifies a dataset in reports.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use kindred_core::{Edge, Node, ValidationError};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// FamilyGraph
// ---------------------------------------------------------------------------

/// A validated, directed family graph.
///
/// Node weights are the full [`Node`] records; edge weights are the
/// [`Edge`] records. Node indices follow input row order.
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    /// Directed graph: nodes = characters, edges = recorded ties.
    pub graph: DiGraph<Node, Edge>,
    /// Mapping from node name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 content hash of the node and edge sets.
    pub content_hash: String,
}

impl FamilyGraph {
    /// Validate and register `nodes` and `edges`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found. Nodes are checked before
    /// edges, each in input order.
    #[instrument(skip(nodes, edges), fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn build(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, ValidationError> {
        validate(&nodes, &edges)?;

        let content_hash = compute_content_hash(&nodes, &edges);

        let mut graph = DiGraph::<Node, Edge>::with_capacity(nodes.len(), edges.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let name = node.name.clone();
            let idx = graph.add_node(node);
            node_map.insert(name, idx);
        }

        for edge in edges {
            // Endpoints were checked by `validate`.
            if let (Some(&a), Some(&b)) = (node_map.get(&edge.source), node_map.get(&edge.target)) {
                graph.add_edge(a, b, edge);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "family graph registered"
        );

        Ok(Self {
            graph,
            node_map,
            content_hash,
        })
    }

    /// Return the number of nodes (characters) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of directed edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for a node name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Return the node record for a name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_index(name).and_then(|idx| self.graph.node_weight(idx))
    }

    /// Node records in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edge records in registration order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// All node names, sorted ascending.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes().map(|n| n.name.clone()).collect();
        names.sort_unstable();
        names
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(nodes: &[Node], edges: &[Edge]) -> Result<(), ValidationError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());

    for (row, node) in nodes.iter().enumerate() {
        if node.name.trim().is_empty() {
            return Err(ValidationError::EmptyName(row + 1));
        }
        if seen.insert(node.name.as_str(), row).is_some() {
            return Err(ValidationError::DuplicateNode(node.name.clone()));
        }
        if !(0.0..=1.0).contains(&node.popularity) {
            return Err(ValidationError::PopularityOutOfRange {
                name: node.name.clone(),
                value: node.popularity,
            });
        }
    }

    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !seen.contains_key(endpoint.as_str()) {
                return Err(ValidationError::DanglingEdge {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        if edge.source == edge.target {
            return Err(ValidationError::SelfLoop(edge.source.clone()));
        }
    }

    Ok(())
}

/// Compute a BLAKE3 hash of the sorted node names and sorted edge triples.
fn compute_content_hash(nodes: &[Node], edges: &[Edge]) -> String {
    let mut names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    names.sort_unstable();

    let mut triples: Vec<(&str, &str, &str)> = edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.relation.as_str()))
        .collect();
    triples.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (source, target, kind) in triples {
        hasher.update(source.as_bytes());
        hasher.update(b"\x00");
        hasher.update(target.as_bytes());
        hasher.update(b"\x00");
        hasher.update(kind.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
