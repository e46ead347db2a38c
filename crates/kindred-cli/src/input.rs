//! Input resolution: which node/edge tables to read, and loading them into a
//! validated [`FamilyGraph`].
//!
//! Flags win over `[data]` in `kindred.toml`. Relative paths from the config
//! file are taken relative to the directory holding that file; flag paths are
//! used as given.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use kindred_analysis::FamilyGraph;
use kindred_core::ErrorCode;
use kindred_core::config::DataConfig;
use kindred_core::load::{read_edges, read_nodes};
use tracing::{info, instrument, warn};

/// Input problems detected before any table is opened.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no node table given (pass --nodes or set [data].nodes in kindred.toml)")]
    MissingNodes,
}

impl InputError {
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingNodes => ErrorCode::InputReadFailed,
        }
    }
}

/// The tables a run reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub nodes: PathBuf,
    /// Without an edge table every node is isolated.
    pub edges: Option<PathBuf>,
}

impl InputPaths {
    /// Pick the node and edge tables from flags, falling back to config.
    ///
    /// # Errors
    ///
    /// [`InputError::MissingNodes`] when neither source names a node table.
    pub fn resolve(
        nodes_flag: Option<&Path>,
        edges_flag: Option<&Path>,
        data: &DataConfig,
        config_dir: &Path,
    ) -> Result<Self, InputError> {
        let from_config = |p: &PathBuf| config_dir.join(p);

        let nodes = nodes_flag
            .map(Path::to_path_buf)
            .or_else(|| data.nodes.as_ref().map(from_config))
            .ok_or(InputError::MissingNodes)?;
        let edges = edges_flag
            .map(Path::to_path_buf)
            .or_else(|| data.edges.as_ref().map(from_config));

        Ok(Self { nodes, edges })
    }
}

/// Read both tables and register them as a family graph.
///
/// # Errors
///
/// Returns the underlying `LoadError` (with the table path as context) or the
/// `ValidationError` from graph registration.
#[instrument(skip_all, fields(nodes = %paths.nodes.display()))]
pub fn load_family(paths: &InputPaths) -> anyhow::Result<FamilyGraph> {
    let nodes = read_nodes(&paths.nodes)
        .with_context(|| format!("reading node table {}", paths.nodes.display()))?;

    let edges = match &paths.edges {
        Some(path) => {
            read_edges(path).with_context(|| format!("reading edge table {}", path.display()))?
        }
        None => {
            warn!("no edge table configured; every node is isolated");
            Vec::new()
        }
    };

    let graph = FamilyGraph::build(nodes, edges)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "family graph loaded"
    );
    Ok(graph)
}
