//! Basic graph statistics for the family graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Total number of characters.
//! - **edge_count**: Directed edges as stored, parallel edges included.
//! - **connection_count**: Distinct undirected ties after collapsing.
//! - **density**: `connection_count / (n * (n - 1) / 2)`. Zero for graphs
//!   with 0 or 1 node.
//! - **component_count**: Connected components of the undirected view.
//! - **largest_component_size**: Node count of the biggest component.
//! - **isolated_node_count**: Nodes with no tie at all.
//! - **max_degree**: Highest number of distinct neighbours.
//! - **circuit_rank**: `connections - nodes + components`, the number of
//!   independent cycles in the undirected view (0 for a forest).
//! - **relation_counts**: Stored edges per relation kind.

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::FamilyGraph;
use crate::graph::components::largest_component;
use crate::graph::undirected::UndirectedGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a family graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connection_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub largest_component_size: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    pub circuit_rank: usize,
    pub relation_counts: BTreeMap<String, usize>,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics from a [`FamilyGraph`] and its undirected view.
    #[must_use]
    pub fn compute(g: &FamilyGraph, ug: &UndirectedGraph) -> Self {
        let node_count = g.node_count();
        let connection_count = ug.connection_count();

        let component_count = connected_components(&ug.graph);
        let degrees: Vec<usize> = ug.neighbor_lists().iter().map(Vec::len).collect();

        let mut relation_counts = BTreeMap::new();
        for edge in g.edges() {
            *relation_counts
                .entry(edge.relation.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            node_count,
            edge_count: g.edge_count(),
            connection_count,
            density: compute_density(node_count, connection_count),
            component_count,
            largest_component_size: largest_component(ug).len(),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            circuit_rank: (connection_count + component_count).saturating_sub(node_count),
            relation_counts,
            content_hash: g.content_hash.clone(),
        }
    }
}

/// Undirected density: `connections / (n * (n - 1) / 2)`.
#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, connection_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_pairs = (node_count * (node_count - 1) / 2) as f64;
    connection_count as f64 / max_pairs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
