//! `kin stats`: structural summary of the loaded family graph.

use std::io::{self, Write};

use clap::Args;
use kindred_analysis::GraphStats;
use kindred_analysis::metrics::transitivity::transitivity_global;
use serde::Serialize;

use super::Context;
use crate::output::{fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `kin stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Report payload for `kin stats`: the graph summary plus the global
/// clustering coefficient (`null` when no node has two ties).
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: GraphStats,
    pub transitivity: Option<f64>,
}

/// Execute `kin stats`.
///
/// # Errors
///
/// Fails if the input tables cannot be loaded or validated.
pub fn run_stats(_args: &StatsArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let ug = graph.to_undirected();
    let report = StatsReport {
        stats: GraphStats::compute(&graph, &ug),
        transitivity: transitivity_global(&ug),
    };

    render_mode(
        ctx.output,
        &report,
        |s, w| render_stats_text(s, w),
        |s, w| render_stats_pretty(s, w),
    )
}

fn render_stats_text(r: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    writeln!(w, "nodes\t{}", s.node_count)?;
    writeln!(w, "edges\t{}", s.edge_count)?;
    writeln!(w, "connections\t{}", s.connection_count)?;
    writeln!(w, "density\t{:.6}", s.density)?;
    writeln!(w, "components\t{}", s.component_count)?;
    writeln!(w, "largest_component\t{}", s.largest_component_size)?;
    writeln!(w, "isolated\t{}", s.isolated_node_count)?;
    writeln!(w, "max_degree\t{}", s.max_degree)?;
    writeln!(w, "circuit_rank\t{}", s.circuit_rank)?;
    writeln!(w, "transitivity\t{}", fmt_score(r.transitivity))?;
    for (kind, count) in &s.relation_counts {
        writeln!(w, "relation.{kind}\t{count}")?;
    }
    writeln!(w, "content_hash\t{}", s.content_hash)
}

fn render_stats_pretty(r: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    pretty_section(w, "Family graph")?;
    pretty_kv(w, "nodes", s.node_count.to_string())?;
    pretty_kv(w, "edges", s.edge_count.to_string())?;
    pretty_kv(w, "connections", s.connection_count.to_string())?;
    pretty_kv(w, "density", format!("{:.4}", s.density))?;
    pretty_kv(w, "components", s.component_count.to_string())?;
    pretty_kv(w, "largest component", s.largest_component_size.to_string())?;
    pretty_kv(w, "isolated", s.isolated_node_count.to_string())?;
    pretty_kv(w, "max degree", s.max_degree.to_string())?;
    pretty_kv(w, "circuit rank", s.circuit_rank.to_string())?;
    pretty_kv(w, "transitivity", fmt_score(r.transitivity))?;
    writeln!(w)?;

    pretty_section(w, "Relations")?;
    for (kind, count) in &s.relation_counts {
        pretty_kv(w, kind, count.to_string())?;
    }
    writeln!(w)?;
    pretty_kv(w, "content hash", &s.content_hash)
}
