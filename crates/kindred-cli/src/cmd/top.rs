//! `kin top`: the highest-scoring nodes for one metric.
//!
//! With `--edges` it ranks ties by edge betweenness instead.

use std::io::{self, Write};

use clap::Args;
use anyhow::bail;
use kindred_analysis::metrics::betweenness::edge_betweenness;
use kindred_analysis::report::{RankedEdge, RankedEntry, top_edges, top_n};
use kindred_analysis::{MetricKind, MetricsError};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_section, render_mode};

/// Arguments for `kin top`.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Metric to rank by: degree, closeness, betweenness, eigenvector,
    /// pagerank, or transitivity.
    #[arg(required_unless_present = "edges")]
    pub metric: Option<String>,

    /// Number of entries (default: `[report].top_n`).
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Rank by the normalized score.
    #[arg(long, conflicts_with = "edges")]
    pub normalized: bool,

    /// Rank ties by edge betweenness.
    #[arg(long)]
    pub edges: bool,
}

/// Report payload for `kin top`.
#[derive(Debug, Serialize)]
pub struct TopReport {
    pub metric: &'static str,
    pub limit: usize,
    pub entries: Vec<RankedEntry>,
}

/// Report payload for `kin top --edges`.
#[derive(Debug, Serialize)]
pub struct TopEdgesReport {
    pub metric: &'static str,
    pub limit: usize,
    pub entries: Vec<RankedEdge>,
}

/// Execute `kin top`.
///
/// # Errors
///
/// Fails on an unknown metric, a zero limit, a solver failure, or an input
/// that cannot be loaded.
pub fn run_top(args: &TopArgs, ctx: &Context) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.report.top_n);
    if args.edges {
        return run_top_edges(args.metric.as_deref(), limit, ctx);
    }

    let Some(metric) = args.metric.as_deref() else {
        bail!(MetricsError::InvalidArgument("a metric name is required".to_string()));
    };
    let kind: MetricKind = metric.parse()?;

    let graph = ctx.load_family()?;
    let ug = graph.to_undirected();
    let record = kind.compute(&ug, &ctx.metrics_config(args.normalized))?;
    let entries = top_n(&record, limit)?;

    let report = TopReport {
        metric: kind.name(),
        limit,
        entries,
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_top_text(r, w),
        |r, w| render_top_pretty(r, w),
    )
}

fn run_top_edges(metric: Option<&str>, limit: usize, ctx: &Context) -> anyhow::Result<()> {
    if let Some(metric) = metric {
        let kind: MetricKind = metric.parse()?;
        if kind != MetricKind::Betweenness {
            bail!(MetricsError::InvalidArgument(format!(
                "--edges ranks by betweenness, not {}",
                kind.name()
            )));
        }
    }

    let graph = ctx.load_family()?;
    let record = edge_betweenness(&graph.to_undirected());
    let report = TopEdgesReport {
        metric: "edge_betweenness",
        limit,
        entries: top_edges(&record, limit)?,
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_edges_text(r, w),
        |r, w| render_edges_pretty(r, w),
    )
}

fn render_edges_text(r: &TopEdgesReport, w: &mut dyn Write) -> io::Result<()> {
    for e in &r.entries {
        writeln!(w, "{}\t{}\t{}\t{:.6}", e.rank, e.edge.a, e.edge.b, e.value)?;
    }
    Ok(())
}

fn render_edges_pretty(r: &TopEdgesReport, w: &mut dyn Write) -> io::Result<()> {
    let labels: Vec<String> = r.entries.iter().map(|e| e.edge.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);
    pretty_section(w, &format!("Top {} ties by edge betweenness", r.entries.len()))?;
    for (e, label) in r.entries.iter().zip(&labels) {
        writeln!(w, "{:>3}. {label:<width$}  {:.6}", e.rank, e.value)?;
    }
    Ok(())
}

fn render_top_text(r: &TopReport, w: &mut dyn Write) -> io::Result<()> {
    for e in &r.entries {
        writeln!(w, "{}\t{}\t{:.6}", e.rank, e.name, e.value)?;
    }
    Ok(())
}

fn render_top_pretty(r: &TopReport, w: &mut dyn Write) -> io::Result<()> {
    let width = r.entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    pretty_section(w, &format!("Top {} by {}", r.entries.len(), r.metric))?;
    for e in &r.entries {
        writeln!(w, "{:>3}. {:<width$}  {:.6}", e.rank, e.name, e.value)?;
    }
    Ok(())
}
