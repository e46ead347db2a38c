//! Top-N views over node and edge records.
//!
//! Scores compare with `f64::total_cmp` after folding `-0.0` into `0.0`, so
//! a signed zero ties with zero and falls through to the name order. NaN
//! sorts above every real score.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{MetricsError, Result};
use crate::metrics::{EdgeKey, EdgeRecord, MetricRecord};

/// A node's position in a ranking (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub value: f64,
}

/// A tie's position in an edge ranking (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEdge {
    pub rank: usize,
    #[serde(flatten)]
    pub edge: EdgeKey,
    pub value: f64,
}

fn descending(a: f64, b: f64) -> Ordering {
    let fold = |v: f64| if v == 0.0 { 0.0 } else { v };
    fold(b).total_cmp(&fold(a))
}

fn check_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(MetricsError::invalid("top-N size must be at least 1"));
    }
    Ok(())
}

/// The `n` highest-scoring nodes of `record`.
///
/// Sorted by value descending, ties broken by name ascending. Nodes without a value are skipped, so the
/// result has exactly `min(n, record.len())` entries.
///
/// # Errors
///
/// [`MetricsError::InvalidArgument`] when `n` is 0.
pub fn top_n(record: &MetricRecord, n: usize) -> Result<Vec<RankedEntry>> {
    check_size(n)?;

    let mut entries: Vec<(&str, f64)> = record.iter().collect();
    entries.sort_by(|a, b| descending(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    Ok(entries
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (name, value))| RankedEntry {
            rank: i + 1,
            name: name.to_string(),
            value,
        })
        .collect())
}

/// The `n` highest-scoring ties of `record`, ties broken by name pair.
///
/// # Errors
///
/// [`MetricsError::InvalidArgument`] when `n` is 0.
pub fn top_edges(record: &EdgeRecord, n: usize) -> Result<Vec<RankedEdge>> {
    check_size(n)?;

    let mut entries: Vec<(&EdgeKey, f64)> = record.iter().map(|(k, &v)| (k, v)).collect();
    entries.sort_by(|a, b| descending(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    Ok(entries
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (edge, value))| RankedEdge {
            rank: i + 1,
            edge: edge.clone(),
            value,
        })
        .collect())
}
