//! PageRank over the undirected family graph.
//!
//! # Overview
//!
//! PageRank is the stationary distribution of a random walk that follows
//! a family tie with probability `d` (the damping factor) and teleports to
//! a uniformly random character otherwise. Every connection carries walk
//! traffic in both directions.
//!
//! # Algorithm
//!
//! Power method:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / deg(u)   for each neighbour u of v
//!                     + d * Σ PR(i) / N         for each isolated node i
//! ```
//!
//! Isolated characters have no tie to follow, so their rank is spread
//! uniformly over the whole graph. Scores always sum to 1.
//!
//! Iteration stops once the L1 norm of the change drops below
//! `N * tolerance`. Running out of iterations first is an error rather than a
//! silently truncated result.

use tracing::{debug, instrument, warn};

use crate::error::{MetricsError, Result};
use crate::graph::undirected::UndirectedGraph;
use crate::metrics::{MetricKind, MetricRecord, as_f64};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Probability of following a tie vs teleporting. Must lie in `(0, 1)`.
    /// Default: 0.85.
    pub damping: f64,
    /// Per-node tolerance: stop when the L1 norm of the rank delta falls
    /// below `N * tolerance`. Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl PageRankConfig {
    /// Reject parameters the power method cannot use.
    ///
    /// # Errors
    ///
    /// [`MetricsError::InvalidArgument`] when damping is outside `(0, 1)`,
    /// tolerance is not positive, or `max_iter` is 0.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(MetricsError::invalid(format!(
                "pagerank damping must lie in (0, 1), got {}",
                self.damping
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(MetricsError::invalid(format!(
                "pagerank tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(MetricsError::invalid("pagerank max_iter must be at least 1"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub scores: MetricRecord,
    /// Iterations performed before convergence.
    pub iterations: usize,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank for every node.
///
/// An empty graph yields an empty record.
///
/// # Errors
///
/// - [`MetricsError::InvalidArgument`] from [`PageRankConfig::validate`].
/// - [`MetricsError::NotConverged`] when `max_iter` is exhausted.
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn pagerank(g: &UndirectedGraph, config: &PageRankConfig) -> Result<PageRankResult> {
    config.validate()?;

    let metric = MetricKind::PageRank.name();
    let nbrs = g.neighbor_lists();
    let n = nbrs.len();

    if n == 0 {
        return Ok(PageRankResult {
            scores: MetricRecord::new(metric),
            iterations: 0,
        });
    }

    let n_f64 = as_f64(n);
    let base = (1.0 - config.damping) / n_f64;
    let threshold = n_f64 * config.tolerance;

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    for iter in 1..=config.max_iter {
        // Mass held by isolated nodes is spread uniformly.
        let dangling: f64 = nbrs
            .iter()
            .zip(&ranks)
            .filter(|(list, _)| list.is_empty())
            .map(|(_, r)| r)
            .sum();
        let teleport = base + config.damping * dangling / n_f64;

        for r in &mut new_ranks {
            *r = teleport;
        }

        for (v, list) in nbrs.iter().enumerate() {
            if list.is_empty() {
                continue;
            }
            let share = config.damping * ranks[v] / as_f64(list.len());
            for &w in list {
                new_ranks[w] += share;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < threshold {
            debug!(iterations = iter, "pagerank converged");
            let values: Vec<Option<f64>> = ranks.iter().map(|&r| Some(r)).collect();
            return Ok(PageRankResult {
                scores: MetricRecord::from_positions(metric, g, &values),
                iterations: iter,
            });
        }
    }

    warn!(max_iter = config.max_iter, "pagerank did not converge");
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

    fn run(ug: &UndirectedGraph) -> PageRankResult {
        pagerank(ug, &PageRankConfig::default()).expect("converges")
    }

    fn total(r: &PageRankResult) -> f64 {
        r.scores.iter().map(|(_, v)| v).sum()
    }

    #[test]
    fn empty_graph() {
        let r = run(&UndirectedGraph::from_pairs(&[], &[]));
        assert!(r.scores.is_empty());
        assert_eq!(r.iterations, 0);
    }

    #[test]
    fn single_node_gets_everything() {
        let r = run(&UndirectedGraph::from_pairs(&["Solo"], &[]));
        assert!((r.scores.get("Solo").unwrap_or_default() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_graph_is_uniform() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let r = run(&ug);
        for name in ["A", "B", "C"] {
            assert!((r.scores.get(name).unwrap_or_default() - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn star_center_ranks_highest() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")]);
        let r = run(&ug);
        let c = r.scores.get("C").unwrap_or_default();
        for leaf in ["A", "B", "D"] {
            assert!(c > r.scores.get(leaf).unwrap_or_default());
        }
        assert!((total(&r) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn isolated_nodes_keep_scores_summing_to_one() {
        let ug = UndirectedGraph::from_pairs(&["X", "Y"], &[("A", "B"), ("B", "C")]);
        let r = run(&ug);
        assert_eq!(r.scores.len(), 5);
        assert!((total(&r) - 1.0).abs() < 1e-6);
        assert!(r.scores.get("X").unwrap_or_default() > 0.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B")]);
        for config in [
            PageRankConfig { damping: 0.0, ..PageRankConfig::default() },
            PageRankConfig { damping: 1.0, ..PageRankConfig::default() },
            PageRankConfig { damping: f64::NAN, ..PageRankConfig::default() },
            PageRankConfig { tolerance: 0.0, ..PageRankConfig::default() },
            PageRankConfig { max_iter: 0, ..PageRankConfig::default() },
        ] {
            let err = pagerank(&ug, &config).unwrap_err();
            assert!(matches!(err, MetricsError::InvalidArgument(_)), "{config:?}");
        }
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let ug = UndirectedGraph::from_pairs(&[], &[("C", "A"), ("C", "B"), ("C", "D")]);
        let config = PageRankConfig {
            max_iter: 1,
            tolerance: 1e-15,
            ..PageRankConfig::default()
        };
        let err = pagerank(&ug, &config).unwrap_err();
        assert!(matches!(err, MetricsError::NotConverged { metric: "pagerank", .. }));
    }
}
