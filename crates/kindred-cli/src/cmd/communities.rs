//! `kin communities`: partition the family graph and score it by modularity.

use std::io::{self, Write};

use clap::{Args, ValueEnum};
use kindred_analysis::metrics::community::{CommunityMethod, detect};
use serde::Serialize;

use super::Context;
use crate::output::{fmt_score, pretty_kv, pretty_section, render_mode};

/// Community detection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MethodArg {
    /// Deterministic label propagation.
    #[default]
    LabelPropagation,
    /// Girvan-Newman divisive clustering on edge betweenness.
    EdgeBetweenness,
}

impl MethodArg {
    const fn name(self) -> &'static str {
        match self {
            Self::LabelPropagation => "label-propagation",
            Self::EdgeBetweenness => "edge-betweenness",
        }
    }
}

impl From<MethodArg> for CommunityMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::LabelPropagation => Self::LabelPropagation,
            MethodArg::EdgeBetweenness => Self::EdgeBetweenness,
        }
    }
}

/// Arguments for `kin communities`.
#[derive(Args, Debug, Default)]
pub struct CommunitiesArgs {
    /// Detection algorithm.
    #[arg(long, value_enum, default_value_t = MethodArg::LabelPropagation)]
    pub method: MethodArg,
}

/// Report payload for `kin communities`.
#[derive(Debug, Serialize)]
pub struct CommunitiesReport {
    pub method: &'static str,
    pub count: usize,
    /// `None` on a graph without ties.
    pub modularity: Option<f64>,
    pub communities: Vec<Vec<String>>,
}

/// Execute `kin communities`.
///
/// # Errors
///
/// Fails if the input tables cannot be loaded or validated.
pub fn run_communities(args: &CommunitiesArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let partition = detect(&graph.to_undirected(), args.method.into());

    let report = CommunitiesReport {
        method: args.method.name(),
        count: partition.len(),
        modularity: partition.modularity,
        communities: partition.communities,
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_communities_text(r, w),
        |r, w| render_communities_pretty(r, w),
    )
}

fn render_communities_text(r: &CommunitiesReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "modularity\t{}", fmt_score(r.modularity))?;
    for (i, members) in r.communities.iter().enumerate() {
        writeln!(w, "{i}\t{}\t{}", members.len(), members.join(","))?;
    }
    Ok(())
}

fn render_communities_pretty(r: &CommunitiesReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Communities ({})", r.method))?;
    pretty_kv(w, "count", r.count.to_string())?;
    pretty_kv(w, "modularity", fmt_score(r.modularity))?;
    writeln!(w)?;
    for (i, members) in r.communities.iter().enumerate() {
        writeln!(w, "#{i:<3} ({:>3}) {}", members.len(), members.join(", "))?;
    }
    Ok(())
}
