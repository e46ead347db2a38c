//! `kin census`: dyad and triad census.
//!
//! The default view is the undirected collapse, where only the mutual triad
//! classes can occur. `--directed` runs the census on the stored
//! child-to-parent arcs instead, with spouse ties counted both ways.

use std::io::{self, Write};

use clap::Args;
use kindred_analysis::AdjacencyMatrix;
use kindred_analysis::metrics::census::{DyadCensus, TriadCensus, dyad_census, triad_census};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `kin census`.
#[derive(Args, Debug, Default)]
pub struct CensusArgs {
    /// Use the directed child-to-parent view.
    #[arg(long)]
    pub directed: bool,
}

/// Report payload for `kin census`.
#[derive(Debug, Serialize)]
pub struct CensusReport {
    pub view: &'static str,
    pub nodes: usize,
    pub dyads: DyadCensus,
    pub triads: TriadCensus,
}

/// Execute `kin census`.
///
/// # Errors
///
/// Fails if the input tables cannot be loaded or validated.
pub fn run_census(args: &CensusArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let (view, adj) = if args.directed {
        ("directed", AdjacencyMatrix::directed(&graph))
    } else {
        ("undirected", AdjacencyMatrix::undirected(&graph.to_undirected()))
    };

    let report = CensusReport {
        view,
        nodes: adj.len(),
        dyads: dyad_census(&adj),
        triads: triad_census(&adj),
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_census_text(r, w),
        |r, w| render_census_pretty(r, w),
    )
}

fn render_census_text(r: &CensusReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "dyad\tmutual\t{}", r.dyads.mutual)?;
    writeln!(w, "dyad\tasymmetric\t{}", r.dyads.asymmetric)?;
    writeln!(w, "dyad\tnull\t{}", r.dyads.null)?;
    for (kind, count) in r.triads.iter() {
        writeln!(w, "triad\t{kind}\t{count}")?;
    }
    Ok(())
}

fn render_census_pretty(r: &CensusReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Dyads ({} view, {} nodes)", r.view, r.nodes))?;
    pretty_kv(w, "mutual", r.dyads.mutual.to_string())?;
    pretty_kv(w, "asymmetric", r.dyads.asymmetric.to_string())?;
    pretty_kv(w, "null", r.dyads.null.to_string())?;
    pretty_kv(w, "total", r.dyads.total().to_string())?;
    writeln!(w)?;

    pretty_section(w, "Triads")?;
    for (kind, count) in r.triads.iter().filter(|&(_, c)| c > 0) {
        pretty_kv(w, kind.name(), count.to_string())?;
    }
    pretty_kv(w, "total", r.triads.total().to_string())
}
