//! `kin analyze`: every node-level metric merged onto the node table.
//!
//! A metric that fails (non-convergence, bad solver settings) is listed under
//! `failures`; the remaining metrics are still reported and the command
//! exits 0.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use kindred_analysis::metrics::compute_all;
use kindred_analysis::report::{NodeRow, merge, write_csv};
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::output::{fmt_score, pretty_rule, pretty_section, render_mode};

/// Arguments for `kin analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Report normalized degree, closeness, and betweenness.
    #[arg(long)]
    pub normalized: bool,

    /// Also write the merged node table to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// A metric that could not be computed.
#[derive(Debug, Serialize)]
pub struct MetricFailure {
    pub metric: &'static str,
    pub error_code: &'static str,
    pub message: String,
}

/// Report payload for `kin analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    /// Metric columns present on every row, sorted by name.
    pub metrics: Vec<String>,
    pub nodes: Vec<NodeRow>,
    pub failures: Vec<MetricFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
}

/// Execute `kin analyze`.
///
/// # Errors
///
/// Fails if the input cannot be loaded or the CSV file cannot be written.
/// Individual metric failures are reported, not returned.
pub fn run_analyze(args: &AnalyzeArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let ug = graph.to_undirected();
    let config = ctx.metrics_config(args.normalized);

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for run in compute_all(&ug, &config) {
        match run.result {
            Ok(record) => records.push(record),
            Err(err) => failures.push(MetricFailure {
                metric: run.kind.name(),
                error_code: err.error_code().code(),
                message: err.to_string(),
            }),
        }
    }

    let rows = merge(&graph, &records);
    let mut metrics: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    metrics.sort();

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_csv(&rows, BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "wrote node table");
    }

    let report = AnalyzeReport {
        metrics,
        nodes: rows,
        failures,
        csv: args.csv.clone(),
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_analyze_text(r, w),
        |r, w| render_analyze_pretty(r, w),
    )
}

fn render_analyze_text(r: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    write!(w, "name")?;
    for metric in &r.metrics {
        write!(w, "\t{metric}")?;
    }
    writeln!(w)?;

    for row in &r.nodes {
        write!(w, "{}", row.node.name)?;
        for metric in &r.metrics {
            write!(w, "\t{}", fmt_score(row.metric(metric)))?;
        }
        writeln!(w)?;
    }

    for f in &r.failures {
        writeln!(w, "# {} failed [{}]: {}", f.metric, f.error_code, f.message)?;
    }
    Ok(())
}

fn render_analyze_pretty(r: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    let name_width = r
        .nodes
        .iter()
        .map(|row| row.node.name.len())
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4);
    let widths: Vec<usize> = r.metrics.iter().map(|m| m.len().max(10)).collect();

    pretty_section(w, &format!("Node metrics ({} nodes)", r.nodes.len()))?;
    write!(w, "{:<name_width$}", "name")?;
    for (metric, width) in r.metrics.iter().zip(&widths) {
        write!(w, "  {metric:>width$}")?;
    }
    writeln!(w)?;
    pretty_rule(w)?;

    for row in &r.nodes {
        write!(w, "{:<name_width$}", row.node.name)?;
        for (metric, width) in r.metrics.iter().zip(&widths) {
            write!(w, "  {:>width$}", fmt_score(row.metric(metric)))?;
        }
        writeln!(w)?;
    }

    if !r.failures.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Failed metrics")?;
        for f in &r.failures {
            writeln!(w, "{:<12} [{}] {}", f.metric, f.error_code, f.message)?;
        }
    }

    if let Some(path) = &r.csv {
        writeln!(w)?;
        writeln!(w, "wrote {} rows to {}", r.nodes.len(), path.display())?;
    }
    Ok(())
}
