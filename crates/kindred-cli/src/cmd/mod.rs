pub mod analyze;
pub mod census;
pub mod cliques;
pub mod communities;
pub mod completions;
pub mod diameter;
pub mod stats;
pub mod top;

use std::path::PathBuf;

use kindred_analysis::FamilyGraph;
use kindred_analysis::metrics::MetricsConfig;
use kindred_analysis::metrics::eigenvector::EigenvectorConfig;
use kindred_analysis::metrics::pagerank::PageRankConfig;
use kindred_core::config::ProjectConfig;

use crate::input::{InputPaths, load_family};
use crate::output::OutputMode;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ProjectConfig,
    /// Directory that relative `[data]` paths are resolved against.
    pub config_dir: PathBuf,
    pub nodes: Option<PathBuf>,
    pub edges: Option<PathBuf>,
    pub output: OutputMode,
}

impl Context {
    /// Resolve the input tables and build the family graph.
    ///
    /// # Errors
    ///
    /// Fails when no node table is configured, a table cannot be read, or the
    /// tables do not form a valid graph.
    pub fn load_family(&self) -> anyhow::Result<FamilyGraph> {
        let paths = InputPaths::resolve(
            self.nodes.as_deref(),
            self.edges.as_deref(),
            &self.config.data,
            &self.config_dir,
        )?;
        load_family(&paths)
    }

    /// Solver settings from `kindred.toml`, with normalisation switched on
    /// by either the flag or `[report].normalized`.
    pub fn metrics_config(&self, normalized_flag: bool) -> MetricsConfig {
        let cfg = &self.config;
        MetricsConfig {
            normalized: normalized_flag || cfg.report.normalized,
            pagerank: PageRankConfig {
                damping: cfg.pagerank.damping,
                tolerance: cfg.pagerank.tolerance,
                max_iter: cfg.pagerank.max_iter,
            },
            eigenvector: EigenvectorConfig {
                max_iter: cfg.eigenvector.max_iter,
                tolerance: cfg.eigenvector.tolerance,
            },
        }
    }
}
