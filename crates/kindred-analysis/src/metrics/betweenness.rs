//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a character lies on shortest routes
//! between two other characters. High-betweenness characters are the
//! marriages and births that bridge otherwise separate family branches.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source `s`, run BFS to count shortest paths (`sigma`) and
//!    record predecessors.
//! 2. Accumulate dependencies in reverse BFS order (farthest nodes first).
//!    Edge dependencies fall out of the same pass: the tie `(v, w)` receives
//!    `sigma[v] / sigma[w] * (1 + delta[w])`.
//! 3. Sum across all sources.
//!
//! When several shortest paths exist, each one gets an equal fraction of
//! the pair's credit. Every unordered pair is visited from both ends, so
//! the totals are halved at the end and each pair counts once.
//!
//! Complexity: O(V * E).

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::graph::undirected::UndirectedGraph;
use crate::metrics::{EdgeKey, EdgeRecord, MetricKind, MetricRecord, as_f64};

/// Raw Brandes accumulators over neighbour lists.
///
/// Edge keys are `(min, max)` node positions. Both accumulators are
/// already halved.
#[derive(Debug, Clone, Default)]
pub(crate) struct Brandes {
    pub vertex: Vec<f64>,
    pub edge: HashMap<(usize, usize), f64>,
}

pub(crate) fn brandes(nbrs: &[Vec<usize>]) -> Brandes {
    let n = nbrs.len();
    let mut cb = vec![0.0; n];
    let mut eb: HashMap<(usize, usize), f64> = HashMap::new();

    for s in 0..n {
        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        let mut sigma = vec![0.0_f64; n];
        sigma[s] = 1.0;

        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = dist[v].unwrap_or(0);

            for &w in &nbrs[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                let c = (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                *eb.entry((v.min(w), v.max(w))).or_insert(0.0) += c;
                delta[v] += c;
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    for score in &mut cb {
        *score /= 2.0;
    }
    for score in eb.values_mut() {
        *score /= 2.0;
    }

    Brandes { vertex: cb, edge: eb }
}

/// Vertex betweenness of every node.
///
/// With `normalized`, values are divided by `(N - 1)(N - 2) / 2`, the
/// number of pairs that can route through a node; graphs with fewer than
/// three nodes are left unscaled (all zeros).
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn betweenness(g: &UndirectedGraph, normalized: bool) -> MetricRecord {
    let n = g.node_count();
    let b = brandes(&g.neighbor_lists());

    let scale = if normalized && n > 2 {
        2.0 / (as_f64(n - 1) * as_f64(n - 2))
    } else {
        1.0
    };

    let values: Vec<Option<f64>> = b.vertex.iter().map(|v| Some(v * scale)).collect();
    MetricRecord::from_positions(MetricKind::Betweenness.name(), g, &values)
}

/// Edge betweenness of every connection, keyed by canonical name pair.
#[must_use]
#[instrument(skip(g), fields(connections = g.connection_count()))]
pub fn edge_betweenness(g: &UndirectedGraph) -> EdgeRecord {
    let nbrs = g.neighbor_lists();
    let b = brandes(&nbrs);

    let mut out = EdgeRecord::new();
    for (v, list) in nbrs.iter().enumerate() {
        for &w in list.iter().filter(|&&w| w > v) {
            let score = b.edge.get(&(v, w)).copied().unwrap_or(0.0);
            out.insert(EdgeKey::new(g.name(v), g.name(w)), score);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
