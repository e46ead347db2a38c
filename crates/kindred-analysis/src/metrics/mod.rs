//! Network metrics over the undirected family graph.
//!
//! # Overview
//!
//! Every metric reads an [`UndirectedGraph`] (the census reads an
//! [`AdjacencyMatrix`](crate::graph::AdjacencyMatrix)) and returns a fresh
//! mapping; nothing here mutates the graph. Each one answers a different
//! question about a character's place in the family:
//!
//! - **Degree** (`basic`): how many relatives are directly tied to them?
//! - **Closeness** (`closeness`): how few steps separate them from everyone
//!   they can reach?
//! - **Betweenness** (`betweenness`): how often do they sit on the shortest
//!   route between two other relatives? Also computed per tie.
//! - **Eigenvector centrality** (`eigenvector`): are they tied to other
//!   well-connected characters?
//! - **PageRank** (`pagerank`): where does a random walk along family ties
//!   spend its time?
//! - **Transitivity** (`transitivity`): are their relatives also related to
//!   each other?
//!
//! Whole-graph structure lives in `distance` (diameter, mean path length),
//! `census` (dyad/triad census), `cliques`, and `community`.
//!
//! # Disconnected Graphs
//!
//! Family graphs are rarely connected. All metrics treat components
//! independently: cross-component distances are infinite and simply never
//! enter a sum. A node that has no value for a metric is absent from the
//! [`MetricRecord`], which the reporter renders as "not applicable".
//!
//! # Usage
//!
//! ```rust,ignore
//! use kindred_analysis::metrics::{MetricKind, MetricsConfig, compute_all};
//!
//! let ug = family.to_undirected();
//! for run in compute_all(&ug, &MetricsConfig::default()) {
//!     match run.result {
//!         Ok(record) => println!("{}: {} values", run.kind, record.len()),
//!         Err(e) => eprintln!("{}: {e}", run.kind),
//!     }
//! }
//! ```

pub mod basic;
pub mod betweenness;
pub mod census;
pub mod cliques;
pub mod closeness;
pub mod community;
pub mod distance;
pub mod eigenvector;
pub mod pagerank;
pub mod transitivity;

mod paths;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::{MetricsError, Result};
use crate::graph::undirected::UndirectedGraph;

use self::eigenvector::EigenvectorConfig;
use self::pagerank::PageRankConfig;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Node-level scores for one metric: node name → value.
///
/// A node missing from `values` has no defined value for this metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub name: String,
    pub values: BTreeMap<String, f64>,
}

impl MetricRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Build a record from per-position values; `None` entries are left out.
    #[must_use]
    pub fn from_positions(name: impl Into<String>, g: &UndirectedGraph, values: &[Option<f64>]) -> Self {
        let values = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (g.name(i).to_string(), v)))
            .collect();
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn get(&self, node: &str) -> Option<f64> {
        self.values.get(node).copied()
    }

    /// Number of nodes with a defined value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Canonical key of an undirected tie: `a <= b`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub a: String,
    pub b: String,
}

impl EdgeKey {
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.a, self.b)
    }
}

/// Edge-level scores: tie → value.
pub type EdgeRecord = BTreeMap<EdgeKey, f64>;

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

/// The node-level metrics the reporter can merge and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
    PageRank,
    Transitivity,
}

impl MetricKind {
    pub const ALL: [Self; 6] = [
        Self::Degree,
        Self::Closeness,
        Self::Betweenness,
        Self::Eigenvector,
        Self::PageRank,
        Self::Transitivity,
    ];

    /// Column name used in records and merged tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
            Self::PageRank => "pagerank",
            Self::Transitivity => "transitivity",
        }
    }

    /// Compute this metric on `g`.
    ///
    /// # Errors
    ///
    /// Eigenvector centrality and PageRank may fail with
    /// [`MetricsError::NotConverged`], [`MetricsError::EmptyGraph`], or
    /// [`MetricsError::InvalidArgument`]; the other kinds always succeed.
    pub fn compute(self, g: &UndirectedGraph, config: &MetricsConfig) -> Result<MetricRecord> {
        match self {
            Self::Degree => Ok(basic::degree(g, config.normalized)),
            Self::Closeness => Ok(closeness::closeness(g, config.normalized)),
            Self::Betweenness => Ok(betweenness::betweenness(g, config.normalized)),
            Self::Eigenvector => {
                eigenvector::eigenvector_centrality(g, &config.eigenvector).map(|r| r.scores)
            }
            Self::PageRank => pagerank::pagerank(g, &config.pagerank).map(|r| r.scores),
            Self::Transitivity => Ok(transitivity::transitivity_local(g)),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "degree" => Ok(Self::Degree),
            "closeness" => Ok(Self::Closeness),
            "betweenness" => Ok(Self::Betweenness),
            "eigenvector" | "eigen" => Ok(Self::Eigenvector),
            "pagerank" | "page_rank" => Ok(Self::PageRank),
            "transitivity" | "clustering" => Ok(Self::Transitivity),
            other => Err(MetricsError::invalid(format!("unknown metric '{other}'"))),
        }
    }
}

/// Parameters shared by a full metrics run.
#[derive(Debug, Clone, Default)]
pub struct MetricsConfig {
    /// Normalise degree, closeness, and betweenness.
    pub normalized: bool,
    pub pagerank: PageRankConfig,
    pub eigenvector: EigenvectorConfig,
}

/// Outcome of one metric in a [`compute_all`] run.
#[derive(Debug, Clone)]
pub struct MetricRun {
    pub kind: MetricKind,
    pub result: Result<MetricRecord>,
}

/// Compute every [`MetricKind`]. A failing metric is reported in its own
/// [`MetricRun`] and does not stop the others.
#[must_use]
#[instrument(skip(g, config), fields(nodes = g.node_count()))]
pub fn compute_all(g: &UndirectedGraph, config: &MetricsConfig) -> Vec<MetricRun> {
    MetricKind::ALL
        .iter()
        .map(|&kind| {
            let result = kind.compute(g, config);
            if let Err(ref e) = result {
                warn!(metric = kind.name(), error = %e, "metric failed");
            }
            MetricRun { kind, result }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
pub(crate) const fn as_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_kind_parses_aliases() {
        assert_eq!("PageRank".parse::<MetricKind>(), Ok(MetricKind::PageRank));
        assert_eq!("page-rank".parse::<MetricKind>(), Ok(MetricKind::PageRank));
        assert_eq!("clustering".parse::<MetricKind>(), Ok(MetricKind::Transitivity));
        assert!("katz".parse::<MetricKind>().is_err());
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.name().parse::<MetricKind>(), Ok(kind));
        }
    }

    #[test]
    fn edge_key_is_canonical() {
        assert_eq!(EdgeKey::new("B", "A"), EdgeKey::new("A", "B"));
        assert_eq!(EdgeKey::new("B", "A").to_string(), "A -- B");
    }

    #[test]
    fn from_positions_skips_undefined() {
        let ug = UndirectedGraph::from_pairs(&["A", "B", "C"], &[]);
        let rec = MetricRecord::from_positions("x", &ug, &[Some(1.0), None, Some(0.5)]);
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.get("A"), Some(1.0));
        assert_eq!(rec.get("B"), None);
    }

    #[test]
    fn compute_all_reports_each_failure_separately() {
        // Empty graph: eigenvector fails, everything else yields empty records.
        let ug = UndirectedGraph::from_pairs(&[], &[]);
        let runs = compute_all(&ug, &MetricsConfig::default());
        assert_eq!(runs.len(), MetricKind::ALL.len());
        for run in runs {
            if run.kind == MetricKind::Eigenvector {
                assert!(matches!(run.result, Err(MetricsError::EmptyGraph { .. })));
            } else {
                assert!(run.result.expect("metric succeeds").is_empty());
            }
        }
    }

    #[test]
    fn compute_all_isolates_pagerank_argument_error() {
        let ug = UndirectedGraph::from_pairs(&[], &[("A", "B")]);
        let mut config = MetricsConfig::default();
        config.pagerank.damping = 1.5;
        let runs = compute_all(&ug, &config);
        let failed: Vec<MetricKind> = runs
            .iter()
            .filter(|r| r.result.is_err())
            .map(|r| r.kind)
            .collect();
        assert_eq!(failed, vec![MetricKind::PageRank]);
    }
}
