//! `kin diameter`: longest shortest path and average path length.

use std::io::{self, Write};

use clap::Args;
use kindred_analysis::metrics::distance::{
    Diameter, DiameterScope, average_path_length, diameter,
};
use serde::Serialize;

use super::Context;
use crate::output::{fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `kin diameter`.
#[derive(Args, Debug, Default)]
pub struct DiameterArgs {
    /// Measure only the largest connected component.
    #[arg(long)]
    pub largest_component: bool,
}

/// Report payload for `kin diameter`.
#[derive(Debug, Serialize)]
pub struct DiameterReport {
    pub scope: &'static str,
    pub diameter: Diameter,
    /// Mean over all connected pairs; `None` when no pair is connected.
    pub average_path_length: Option<f64>,
}

/// Execute `kin diameter`.
///
/// # Errors
///
/// Fails if the input tables cannot be loaded or validated.
pub fn run_diameter(args: &DiameterArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = ctx.load_family()?;
    let ug = graph.to_undirected();
    let (scope_name, scope) = if args.largest_component {
        ("largest_component", DiameterScope::LargestComponent)
    } else {
        ("whole", DiameterScope::Whole)
    };

    let report = DiameterReport {
        scope: scope_name,
        diameter: diameter(&ug, scope),
        average_path_length: average_path_length(&ug),
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_diameter_text(r, w),
        |r, w| render_diameter_pretty(r, w),
    )
}

fn describe(d: &Diameter) -> String {
    match d {
        Diameter::Finite { length, from, to } => format!("{length} ({from} .. {to})"),
        Diameter::Unreachable => "unreachable (graph is disconnected)".to_string(),
        Diameter::Empty => "empty graph".to_string(),
    }
}

fn render_diameter_text(r: &DiameterReport, w: &mut dyn Write) -> io::Result<()> {
    match &r.diameter {
        Diameter::Finite { length, from, to } => writeln!(w, "diameter\t{length}\t{from}\t{to}")?,
        Diameter::Unreachable => writeln!(w, "diameter\tunreachable")?,
        Diameter::Empty => writeln!(w, "diameter\tempty")?,
    }
    writeln!(w, "average_path_length\t{}", fmt_score(r.average_path_length))
}

fn render_diameter_pretty(r: &DiameterReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Distances ({})", r.scope.replace('_', " ")))?;
    pretty_kv(w, "diameter", describe(&r.diameter))?;
    pretty_kv(w, "avg path length", fmt_score(r.average_path_length))
}
