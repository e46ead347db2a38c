//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! A character scores highly when their relatives score highly. The score
//! vector is the principal eigenvector of the symmetric adjacency matrix,
//! scaled so the largest component is exactly 1.
//!
//! # Algorithm
//!
//! Power iteration on `A + I` rather than `A`:
//!
//! 1. Start from the all-ones vector.
//! 2. `x ← (A + I) x`, then divide by the largest component.
//! 3. Stop once `Σ |x_new - x_old| < N * tolerance`.
//!
//! `A + I` has the same eigenvectors as `A` with every eigenvalue shifted
//! by one. The shift breaks the `±λ` symmetry of bipartite graphs (stars,
//! paths, and most parent/child trees), on which plain power iteration
//! oscillates forever.
//!
//! In a disconnected graph the components not containing the dominant
//! eigenvalue decay towards zero; they are not reported as missing.

use nalgebra::DVector;
use tracing::{debug, instrument, warn};

use crate::error::{MetricsError, Result};
use crate::graph::adjacency::AdjacencyMatrix;
use crate::graph::undirected::UndirectedGraph;
use crate::metrics::{MetricKind, MetricRecord, as_f64};

/// Power-iteration parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenvectorConfig {
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Scores, max component = 1.
    pub scores: MetricRecord,
    /// Largest eigenvalue of `A`, estimated by the Rayleigh quotient.
    pub eigenvalue: f64,
    pub iterations: usize,
}

/// Eigenvector centrality of every node.
///
/// # Errors
///
/// - [`MetricsError::EmptyGraph`] when the graph has no nodes.
/// - [`MetricsError::InvalidArgument`] for a non-positive tolerance.
/// - [`MetricsError::NotConverged`] when `max_iter` iterations do not reach
///   the tolerance.
///
/// A graph with nodes but no connections has no meaningful principal
/// eigenvector; every node scores 1.0 and a warning is logged.
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn eigenvector_centrality(g: &UndirectedGraph, config: &EigenvectorConfig) -> Result<EigenvectorResult> {
    let metric = MetricKind::Eigenvector.name();
    let adj = AdjacencyMatrix::undirected(g);
    let n = adj.len();

    if n == 0 {
        return Err(MetricsError::EmptyGraph { metric });
    }
    if config.tolerance.is_nan() || config.tolerance <= 0.0 {
        return Err(MetricsError::invalid(format!(
            "eigenvector tolerance must be positive, got {}",
            config.tolerance
        )));
    }

    if g.connection_count() == 0 {
        warn!(nodes = n, "graph has no connections; eigenvector scores are uniform");
        let values = vec![Some(1.0); n];
        return Ok(EigenvectorResult {
            scores: MetricRecord::from_positions(metric, g, &values),
            eigenvalue: 0.0,
            iterations: 0,
        });
    }

    let threshold = as_f64(n) * config.tolerance;
    let mut x = DVector::from_element(n, 1.0);

    for iter in 1..=config.max_iter {
        let mut next = adj.mul_vec(&x) + &x;
        let peak = next.amax();
        if peak > 0.0 {
            next /= peak;
        }

        let change = (&next - &x).abs().sum();
        x = next;

        if change < threshold {
            let ax = adj.mul_vec(&x);
            let eigenvalue = x.dot(&ax) / x.dot(&x);
            debug!(iterations = iter, eigenvalue, "eigenvector converged");

            let values: Vec<Option<f64>> = x.iter().map(|&v| Some(v)).collect();
            return Ok(EigenvectorResult {
                scores: MetricRecord::from_positions(metric, g, &values),
                eigenvalue,
                iterations: iter,
            });
        }
    }

    warn!(max_iter = config.max_iter, "eigenvector centrality did not converge");
    Err(MetricsError::NotConverged {
        metric,
        iterations: config.max_iter,
        tolerance: config.tolerance,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::SymmetricEigen;

    fn run(ug: &UndirectedGraph) -> EigenvectorResult {
        eigenvector_centrality(ug, &EigenvectorConfig::default()).expect("converges")
    }

    #[test]
    fn empty_graph_is_an_error() {
        let ug = UndirectedGraph::from_pairs(&[], &[]);
        let err = eigenvector_centrality(&ug, &EigenvectorConfig::default()).unwrap_err();
        assert!(matches!(err, MetricsError::EmptyGraph { .. }));
    }

    #[test]
    fn edgeless_graph_scores_uniform() {
        let ug = UndirectedGraph::from_pairs(&["A", "B"], &[]);
        let r = run(&ug);
        assert_eq!(r.scores.get("A"), Some(1.0));
        assert_eq!(r.scores.get("B"), Some(1.0));
    }

    #[test]
    fn triangle_is_uniform() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let r = run(&ug);
        for name in ["A", "B", "C"] {
            assert!((r.scores.get(name).unwrap_or_default() - 1.0).abs() < 1e-6);
        }
        assert!((r.eigenvalue - 2.0).abs() < 1e-6);
    }

    #[test]
    fn star_converges_despite_bipartite_structure() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")]);
        let r = run(&ug);
        assert!((r.scores.get("C").unwrap_or_default() - 1.0).abs() < 1e-6);
        // Leaves: 1 / sqrt(3).
        let leaf = 1.0 / 3.0_f64.sqrt();
        assert!((r.scores.get("A").unwrap_or_default() - leaf).abs() < 1e-4);
    }

    #[test]
    fn matches_dense_symmetric_eigensolver() {
        let ug = UndirectedGraph::from_pairs(
            &[],
            &[("A", "B"), ("A", "C"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "F"), ("D", "F")],
        );
        let r = run(&ug);

        let adj = AdjacencyMatrix::undirected(&ug);
        let eig = SymmetricEigen::new(adj.matrix().clone());
        let top = eig.eigenvalues.imax();
        let column = eig.eigenvectors.column(top).abs();
        let expected = &column / column.amax();

        for (i, id) in adj.ids().iter().enumerate() {
            let got = r.scores.get(id).unwrap_or_default();
            assert!((got - expected[i]).abs() < 1e-4, "{id}: {got} vs {}", expected[i]);
        }
        assert!((r.eigenvalue - eig.eigenvalues[top]).abs() < 1e-6);
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "D")]);
        let config = EigenvectorConfig {
            max_iter: 1,
            tolerance: 1e-12,
        };
        let err = eigenvector_centrality(&ug, &config).unwrap_err();
        assert!(matches!(err, MetricsError::NotConverged { iterations: 1, .. }));
    }
}
