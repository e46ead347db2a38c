//! Transitivity (clustering coefficient).
//!
//! - **Local**: for node `v` with degree `k >= 2`, the share of its
//!   `C(k, 2)` neighbour pairs that are themselves connected. Undefined
//!   (absent from the record) for `k < 2`.
//! - **Global**: `3 * triangles / connected triples`, i.e. the share of
//!   two-step paths that close into a triangle. `None` when the graph has
//!   no connected triple.

use tracing::instrument;

use crate::graph::undirected::UndirectedGraph;
use crate::metrics::{MetricKind, MetricRecord, as_f64};

/// Triangles through each node position.
fn triangles_per_node(nbrs: &[Vec<usize>]) -> Vec<usize> {
    nbrs.iter()
        .map(|list| {
            let mut closed = 0;
            for (i, &u) in list.iter().enumerate() {
                for &w in &list[i + 1..] {
                    if nbrs[u].binary_search(&w).is_ok() {
                        closed += 1;
                    }
                }
            }
            closed
        })
        .collect()
}

const fn pairs(k: usize) -> usize {
    k * k.saturating_sub(1) / 2
}

/// Number of triangles in the graph.
#[must_use]
pub fn triangle_count(g: &UndirectedGraph) -> usize {
    triangles_per_node(&g.neighbor_lists()).iter().sum::<usize>() / 3
}

/// Local transitivity of every node with at least two neighbours.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn transitivity_local(g: &UndirectedGraph) -> MetricRecord {
    let nbrs = g.neighbor_lists();
    let values: Vec<Option<f64>> = nbrs
        .iter()
        .zip(triangles_per_node(&nbrs))
        .map(|(list, closed)| {
            (list.len() >= 2).then(|| as_f64(closed) / as_f64(pairs(list.len())))
        })
        .collect();
    MetricRecord::from_positions(MetricKind::Transitivity.name(), g, &values)
}

/// Global transitivity of the graph.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn transitivity_global(g: &UndirectedGraph) -> Option<f64> {
    let nbrs = g.neighbor_lists();
    let triples: usize = nbrs.iter().map(|l| pairs(l.len())).sum();
    if triples == 0 {
        return None;
    }
    // Each triangle closes three triples, one per corner.
    let closed: usize = triangles_per_node(&nbrs).iter().sum();
    Some(as_f64(closed) / as_f64(triples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_fully_transitive() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let local = transitivity_local(&ug);
        for name in ["A", "B", "C"] {
            assert_eq!(local.get(name), Some(1.0));
        }
        assert_eq!(transitivity_global(&ug), Some(1.0));
        assert_eq!(triangle_count(&ug), 1);
    }

    #[test]
    fn star_center_is_zero_and_leaves_undefined() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")]);
        let local = transitivity_local(&ug);
        assert_eq!(local.get("C"), Some(0.0));
        assert_eq!(local.get("A"), None);
        assert_eq!(transitivity_global(&ug), Some(0.0));
    }

    #[test]
    fn no_triples_means_undefined_global() {
        let ug = UndirectedGraph::from_pairs(&["Solo"], &[("A", "B")]);
        assert_eq!(transitivity_global(&ug), None);
        assert!(transitivity_local(&ug).is_empty());
    }

    #[test]
    fn triangle_with_tail() {
        // A-B-C triangle, C-D tail.
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
        let local = transitivity_local(&ug);
        assert!((local.get("C").unwrap_or_default() - 1.0 / 3.0).abs() < 1e-12);
        // triples: A1 B1 C3 D0 = 5; closed: 3.
        assert!((transitivity_global(&ug).unwrap_or_default() - 0.6).abs() < 1e-12);
    }
}
