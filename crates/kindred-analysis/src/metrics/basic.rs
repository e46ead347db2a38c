//! Degree centrality on the undirected view.
//!
//! Degree is the number of *distinct* neighbours: reciprocal and parallel
//! edges between the same pair were already collapsed into one connection,
//! so a spouse pair stored in both directions contributes 1, not 2.

use tracing::instrument;

use crate::graph::undirected::UndirectedGraph;
use crate::metrics::{MetricKind, MetricRecord, as_f64};

/// Degree of every node.
///
/// With `normalized`, values are divided by `N - 1`; a graph with a single
/// node gets 0.
#[must_use]
#[instrument(skip(g), fields(nodes = g.node_count()))]
pub fn degree(g: &UndirectedGraph, normalized: bool) -> MetricRecord {
    let n = g.node_count();
    let scale = if normalized {
        if n > 1 { 1.0 / as_f64(n - 1) } else { 0.0 }
    } else {
        1.0
    };

    let values: Vec<Option<f64>> = g
        .neighbor_lists()
        .iter()
        .map(|nbrs| Some(as_f64(nbrs.len()) * scale))
        .collect();

    MetricRecord::from_positions(MetricKind::Degree.name(), g, &values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> UndirectedGraph {
        UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")])
    }

    #[test]
    fn star_degrees() {
        let d = degree(&star(), false);
        assert_eq!(d.get("C"), Some(3.0));
        for leaf in ["A", "B", "D"] {
            assert_eq!(d.get(leaf), Some(1.0));
        }
    }

    #[test]
    fn normalized_star_center_is_one() {
        let d = degree(&star(), true);
        assert!((d.get("C").unwrap_or_default() - 1.0).abs() < 1e-12);
        assert!((d.get("A").unwrap_or_default() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_node_has_zero_degree() {
        let d = degree(&UndirectedGraph::from_pairs(&["Solo"], &[]), true);
        assert_eq!(d.get("Solo"), Some(0.0));
    }

    #[test]
    fn repeated_pairs_count_once() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "A"), ("A", "B")]);
        assert_eq!(degree(&ug, false).get("A"), Some(1.0));
    }
}
