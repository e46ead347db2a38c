//! `kin cliques`: maximal cliques of the undirected family graph.

use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::Args;
use kindred_analysis::metrics::cliques::{
    clique_number, clique_size_census, largest_cliques, maximal_cliques,
};
use serde::Serialize;

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `kin cliques`.
#[derive(Args, Debug)]
pub struct CliquesArgs {
    /// Only list cliques with at least this many members.
    #[arg(long, value_name = "K", default_value_t = 1)]
    pub min_size: usize,
}

/// Report payload for `kin cliques`.
#[derive(Debug, Serialize)]
pub struct CliquesReport {
    pub clique_number: usize,
    /// Maximal clique count per size, over all cliques.
    pub size_census: BTreeMap<usize, usize>,
    pub largest: Vec<Vec<String>>,
    /// Cliques meeting `--min-size`, largest first.
    pub cliques: Vec<Vec<String>>,
}

/// Execute `kin cliques`.
///
/// # Errors
///
/// Fails if the input tables cannot be loaded or validated.
pub fn run_cliques(args: &CliquesArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let all = maximal_cliques(&graph.to_undirected());

    let report = CliquesReport {
        clique_number: clique_number(&all),
        size_census: clique_size_census(&all),
        largest: largest_cliques(&all),
        cliques: all.into_iter().filter(|c| c.len() >= args.min_size).collect(),
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_cliques_text(r, w),
        |r, w| render_cliques_pretty(r, w),
    )
}

fn render_cliques_text(r: &CliquesReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "clique_number\t{}", r.clique_number)?;
    for clique in &r.cliques {
        writeln!(w, "{}\t{}", clique.len(), clique.join(","))?;
    }
    Ok(())
}

fn render_cliques_pretty(r: &CliquesReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Cliques")?;
    pretty_kv(w, "clique number", r.clique_number.to_string())?;
    for (size, count) in &r.size_census {
        pretty_kv(w, &format!("size {size}"), count.to_string())?;
    }
    writeln!(w)?;

    pretty_section(w, &format!("{} cliques listed", r.cliques.len()))?;
    for clique in &r.cliques {
        writeln!(w, "[{}] {}", clique.len(), clique.join(", "))?;
    }
    Ok(())
}
