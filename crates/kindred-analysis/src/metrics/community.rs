//! Community detection and modularity.
//!
//! Two partitioning methods, both deterministic:
//!
//! - **Label propagation**: every node starts in its own community and
//!   repeatedly adopts the label most common among its neighbours. Nodes
//!   are visited in name order and updated in place; a node keeps its
//!   label when it is among the most common, otherwise ties go to the
//!   smallest label. Stops after a pass with no change.
//! - **Edge betweenness** (Girvan–Newman): repeatedly remove the tie with
//!   the highest edge betweenness. Each time the graph splits, the new
//!   component partition is scored; the best-scoring partition wins, the
//!   earliest one on ties.
//!
//! Partitions are always disjoint covers of the node set. Communities are
//! sorted internally by name and listed by size descending, then first
//! member.
//!
//! Modularity follows Newman:
//!
//! ```text
//! Q = Σ_c [ L_c / m - (D_c / 2m)² ]
//! ```
//!
//! where `m` is the number of connections, `L_c` the connections inside
//! community `c`, and `D_c` the summed degree of its members.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{MetricsError, Result};
use crate::graph::components::labels_from_neighbors;
use crate::graph::undirected::UndirectedGraph;
use crate::metrics::as_f64;
use crate::metrics::betweenness::brandes;

/// Passes after which label propagation stops even if labels still move.
const MAX_PROPAGATION_PASSES: usize = 1000;

/// Method selector for [`detect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommunityMethod {
    #[default]
    LabelPropagation,
    EdgeBetweenness,
}

/// A disjoint cover of the nodes with its modularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub communities: Vec<Vec<String>>,
    /// `None` when the graph has no connections.
    pub modularity: Option<f64>,
}

impl Partition {
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Community index of `node`.
    #[must_use]
    pub fn community_of(&self, node: &str) -> Option<usize> {
        self.communities
            .iter()
            .position(|c| c.binary_search_by(|m| m.as_str().cmp(node)).is_ok())
    }
}

/// Run the selected method.
#[must_use]
pub fn detect(g: &UndirectedGraph, method: CommunityMethod) -> Partition {
    match method {
        CommunityMethod::LabelPropagation => label_propagation(g),
        CommunityMethod::EdgeBetweenness => edge_betweenness_communities(g),
    }
}

// ---------------------------------------------------------------------------
// Modularity
// ---------------------------------------------------------------------------

/// Modularity from a membership vector (community id per position).
fn membership_modularity(nbrs: &[Vec<usize>], membership: &[usize]) -> Option<f64> {
    let twice_m: usize = nbrs.iter().map(Vec::len).sum();
    if twice_m == 0 {
        return None;
    }
    let two_m = as_f64(twice_m);

    let count = membership.iter().copied().max().map_or(0, |c| c + 1);
    let mut inside = vec![0_usize; count];
    let mut degree = vec![0_usize; count];

    for (v, list) in nbrs.iter().enumerate() {
        let c = membership[v];
        degree[c] += list.len();
        inside[c] += list.iter().filter(|&&w| membership[w] == c).count();
    }

    // `inside` counts each internal connection twice.
    let q = inside
        .iter()
        .zip(&degree)
        .map(|(&l2, &d)| as_f64(l2) / two_m - (as_f64(d) / two_m).powi(2))
        .sum();
    Some(q)
}

/// Modularity of `communities` on `g`.
///
/// # Errors
///
/// [`MetricsError::InvalidArgument`] when a name is unknown, appears twice,
/// or a node of `g` is missing from every community.
pub fn modularity(g: &UndirectedGraph, communities: &[Vec<String>]) -> Result<Option<f64>> {
    let n = g.node_count();
    let mut membership = vec![usize::MAX; n];

    for (c, members) in communities.iter().enumerate() {
        for name in members {
            let idx = g
                .node_index(name)
                .ok_or_else(|| MetricsError::invalid(format!("unknown node '{name}' in partition")))?
                .index();
            if membership[idx] != usize::MAX {
                return Err(MetricsError::invalid(format!("node '{name}' appears in more than one community")));
            }
            membership[idx] = c;
        }
    }

    if let Some(missing) = membership.iter().position(|&c| c == usize::MAX) {
        return Err(MetricsError::invalid(format!(
            "node '{}' is not assigned to any community",
            g.name(missing)
        )));
    }

    Ok(membership_modularity(&g.neighbor_lists(), &membership))
}

/// Group positions by membership id into sorted name lists.
fn to_communities(g: &UndirectedGraph, membership: &[usize]) -> Vec<Vec<String>> {
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (v, &c) in membership.iter().enumerate() {
        groups.entry(c).or_default().push(g.name(v).to_string());
    }
    let mut communities: Vec<Vec<String>> = groups.into_values().collect();
    for c in &mut communities {
        c.sort_unstable();
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
    communities
}

/// Attach the modularity of a cover built by this module.
fn scored(g: &UndirectedGraph, communities: Vec<Vec<String>>) -> Partition {
    Partition {
        modularity: modularity(g, &communities).ok().flatten(),
        communities,
    }
}

// ---------------------------------------------------------------------------
// Label propagation
// ---------------------------------------------------------------------------

/// Deterministic label propagation.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn label_propagation(g: &UndirectedGraph) -> Partition {
    let nbrs = g.neighbor_lists();
    let n = nbrs.len();

    // Labels are ranks in name order, so "smallest label" is stable under
    // input reordering.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| g.name(a).cmp(g.name(b)));
    let mut labels = vec![0_usize; n];
    for (rank, &v) in order.iter().enumerate() {
        labels[v] = rank;
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;

        for &v in &order {
            if nbrs[v].is_empty() {
                continue;
            }
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for &w in &nbrs[v] {
                *counts.entry(labels[w]).or_insert(0) += 1;
            }
            let top = counts.values().copied().max().unwrap_or(0);
            if counts.get(&labels[v]) == Some(&top) {
                continue;
            }
            let best = counts
                .iter()
                .filter(|&(_, &c)| c == top)
                .map(|(&label, _)| label)
                .min()
                .unwrap_or(labels[v]);
            labels[v] = best;
            changed = true;
        }

        if !changed || passes >= MAX_PROPAGATION_PASSES {
            break;
        }
    }
    debug!(passes, "label propagation settled");

    scored(g, to_communities(g, &labels))
}

// ---------------------------------------------------------------------------
// Girvan–Newman
// ---------------------------------------------------------------------------

/// Girvan–Newman divisive clustering, scored against the original graph.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn edge_betweenness_communities(g: &UndirectedGraph) -> Partition {
    let original = g.neighbor_lists();
    let mut working = original.clone();

    let (mut membership, mut components) = labels_from_neighbors(&working);
    let mut best_membership = membership.clone();
    let mut best_q = membership_modularity(&original, &membership);

    let mut removed = 0;
    loop {
        let scores = brandes(&working).edge;
        // Highest score; ties go to the smallest name pair.
        let Some(&(a, b)) = scores
            .iter()
            .max_by(|(ka, va), (kb, vb)| {
                va.total_cmp(vb).then_with(|| {
                    let name_a = (g.name(ka.0).min(g.name(ka.1)), g.name(ka.0).max(g.name(ka.1)));
                    let name_b = (g.name(kb.0).min(g.name(kb.1)), g.name(kb.0).max(g.name(kb.1)));
                    name_b.cmp(&name_a)
                })
            })
            .map(|(k, _)| k)
        else {
            break;
        };

        working[a].retain(|&w| w != b);
        working[b].retain(|&w| w != a);
        removed += 1;

        let (next, count) = labels_from_neighbors(&working);
        if count > components {
            components = count;
            membership = next;
            let q = membership_modularity(&original, &membership);
            if q.unwrap_or(f64::NEG_INFINITY) > best_q.unwrap_or(f64::NEG_INFINITY) {
                best_q = q;
                best_membership = membership.clone();
            }
        }
    }
    debug!(removed, best = ?best_q, "girvan-newman finished");
    scored(g, to_communities(g, &best_membership))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
