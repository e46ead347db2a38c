#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use kindred_analysis::MetricsError;
use kindred_core::config::resolve_config;
use kindred_core::load::LoadError;
use kindred_core::{ErrorCode, ValidationError};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cmd::Context;
use input::InputError;
use output::{CliError, OutputMode, render_error, resolve_output_mode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kin: network metrics for family-relationship graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for kindred crates (unless KINDRED_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Node table (.csv or .json). Overrides `[data].nodes`.
    #[arg(long, global = true, value_name = "PATH")]
    nodes: Option<PathBuf>,

    /// Edge table (.csv or .json). Overrides `[data].edges`.
    #[arg(long, global = true, value_name = "PATH")]
    edges: Option<PathBuf>,

    /// Project config file (default: ./kindred.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Structure",
        about = "Summarize the family graph",
        long_about = "Count nodes, ties, components, and relation kinds of the loaded family graph.",
        after_help = "EXAMPLES:\n    # Summarize the tables named in kindred.toml\n    kin stats\n\n    # Explicit tables, machine-readable output\n    kin --nodes data/nodes.csv --edges data/edges.csv stats --format json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Compute every node metric",
        long_about = "Compute degree, closeness, betweenness, eigenvector, PageRank, and local transitivity, merged onto the node table. A failing metric is listed without aborting the run.",
        after_help = "EXAMPLES:\n    # Merged table on stdout\n    kin analyze\n\n    # Normalized scores, also saved as CSV\n    kin analyze --normalized --csv metrics.csv"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Rank nodes by one metric",
        long_about = "List the top-N nodes for a metric, highest first; ties are broken by name. With --edges, rank ties by edge betweenness.",
        after_help = "EXAMPLES:\n    # Ten most central characters by betweenness\n    kin top betweenness\n\n    # Top three by PageRank as JSON\n    kin top pagerank -n 3 --format json\n\n    # Five ties that carry the most shortest paths\n    kin top --edges -n 5"
    )]
    Top(cmd::top::TopArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Dyad and triad census",
        long_about = "Count dyads (mutual, asymmetric, null) and the 16 triad isomorphism classes.",
        after_help = "EXAMPLES:\n    # Census of the undirected view\n    kin census\n\n    # Census of the child-to-parent arcs\n    kin census --directed"
    )]
    Census(cmd::census::CensusArgs),

    #[command(
        next_help_heading = "Groups",
        about = "Maximal cliques",
        long_about = "Enumerate maximal cliques of the undirected family graph and report the clique number.",
        after_help = "EXAMPLES:\n    # Every maximal clique\n    kin cliques\n\n    # Only triangles and larger\n    kin cliques --min-size 3"
    )]
    Cliques(cmd::cliques::CliquesArgs),

    #[command(
        next_help_heading = "Groups",
        about = "Community detection",
        long_about = "Partition the family graph into communities and score the partition by modularity.",
        after_help = "EXAMPLES:\n    # Label propagation (default)\n    kin communities\n\n    # Girvan-Newman on edge betweenness\n    kin communities --method edge-betweenness"
    )]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Diameter and average path length",
        long_about = "Report the longest shortest path with its endpoints, plus the mean shortest-path length over connected pairs.",
        after_help = "EXAMPLES:\n    # Whole graph (unreachable if disconnected)\n    kin diameter\n\n    # Largest connected component only\n    kin diameter --largest-component"
    )]
    Diameter(cmd::diameter::DiameterArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        long_about = "Generate a shell completion script for kin.",
        after_help = "EXAMPLES:\n    # Bash\n    kin completions bash > ~/.local/share/bash-completion/completions/kin\n\n    # Zsh\n    kin completions zsh > ~/.zfunc/_kin"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KINDRED_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "kindred=debug,info"
        } else {
            "kindred=info,warn"
        })
    });

    let format = env::var("KINDRED_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load config and settle the output mode for a data command.
fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let working_dir = env::current_dir()?;
    let effective = resolve_config(&working_dir, cli.config.as_deref())?;
    let output = resolve_output_mode(cli.format, cli.json, effective.resolved_output.as_deref());

    let config_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| working_dir.clone(), |dir| working_dir.join(dir));

    debug!(?output, config_dir = %config_dir.display(), "context resolved");

    Ok(Context {
        config: effective.project,
        config_dir,
        nodes: cli.nodes.clone(),
        edges: cli.edges.clone(),
        output,
    })
}

/// Map an error chain onto the stable error code of its first typed cause.
fn classify(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ValidationError>() {
            return e.error_code();
        }
        if let Some(e) = cause.downcast_ref::<LoadError>() {
            return e.error_code();
        }
        if let Some(e) = cause.downcast_ref::<MetricsError>() {
            return e.error_code();
        }
        if let Some(e) = cause.downcast_ref::<InputError>() {
            return e.error_code();
        }
        if cause.is::<toml::de::Error>() {
            return ErrorCode::ConfigParseError;
        }
    }
    ErrorCode::InternalUnexpected
}

fn fail(mode: OutputMode, err: &anyhow::Error) -> ExitCode {
    let cli_error = CliError::with_code(format!("{err:#}"), classify(err));
    if let Err(render_err) = render_error(mode, &cli_error) {
        eprintln!("error: {err:#} ({render_err})");
    }
    ExitCode::FAILURE
}

fn dispatch(command: &Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Stats(args) => cmd::stats::run_stats(args, ctx),
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, ctx),
        Commands::Top(args) => cmd::top::run_top(args, ctx),
        Commands::Census(args) => cmd::census::run_census(args, ctx),
        Commands::Cliques(args) => cmd::cliques::run_cliques(args, ctx),
        Commands::Communities(args) => cmd::communities::run_communities(args, ctx),
        Commands::Diameter(args) => cmd::diameter::run_diameter(args, ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match build_context(&cli) {
        Ok(ctx) => ctx,
        Err(err) => {
            let format_env = env::var("FORMAT").ok();
            let mode = resolve_output_mode(cli.format, cli.json, format_env.as_deref());
            return fail(mode, &err);
        }
    };

    match dispatch(&cli.command, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(ctx.output, &err),
    }
}
