//! Closeness centrality.
//!
//! For node `v`, closeness is `1 / Σ d(v, u)` over every node `u` reachable
//! from `v`. Unreachable nodes are skipped rather than treated as infinitely
//! far, so a character in a small family branch can still score highly
//! within it. A node with no reachable peers scores 0.
//!
//! With `normalized`, the raw value is multiplied by `N - 1`. On a connected
//! graph this yields values in `(0, 1]`; on a disconnected graph a node in
//! a small component may exceed 1, because the distance sum only covers
//! its own component.

use tracing::instrument;

use crate::graph::undirected::UndirectedGraph;
use crate::metrics::paths::bfs_distances;
use crate::metrics::{MetricKind, MetricRecord, as_f64};

/// Closeness of every node.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn closeness(g: &UndirectedGraph, normalized: bool) -> MetricRecord {
    let nbrs = g.neighbor_lists();
    let n = nbrs.len();
    let scale = if normalized { as_f64(n.saturating_sub(1)) } else { 1.0 };

    let values: Vec<Option<f64>> = (0..n)
        .map(|v| {
            let total: usize = bfs_distances(&nbrs, v).into_iter().flatten().sum();
            let score = if total == 0 { 0.0 } else { scale / as_f64(total) };
            Some(score)
        })
        .collect();

    MetricRecord::from_positions(MetricKind::Closeness.name(), g, &values)
}
