//! Family graph module: the store every metric reads from.
//!
//! # Overview
//!
//! This module validates node/edge tables into a petgraph-based directed
//! graph, collapses it into the undirected view the metrics run on, and
//! exposes a dense adjacency matrix for spectral and census computations.
//!
//! ## Pipeline
//!
//! ```text
//! node table + edge table
//!        ↓  build::FamilyGraph::build()
//! FamilyGraph (DiGraph<Node, Edge>, validated)
//!        ↓  FamilyGraph::to_undirected()
//! UndirectedGraph (one connection per tied pair)
//!        ├─ adjacency::AdjacencyMatrix::undirected()
//!        └─ stats::GraphStats::compute()
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use kindred_analysis::graph::{FamilyGraph, GraphStats};
//!
//! let g = FamilyGraph::build(nodes, edges)?;
//! let ug = g.to_undirected();
//! let stats = GraphStats::compute(&g, &ug);
//!
//! println!("nodes={} ties={} components={}",
//!     stats.node_count, stats.connection_count, stats.component_count);
//! ```

pub mod adjacency;
pub mod build;
pub mod components;
pub mod stats;
pub mod undirected;

// Re-export primary types at module level for convenience.
pub use adjacency::AdjacencyMatrix;
pub use build::FamilyGraph;
pub use components::connected_components;
pub use stats::GraphStats;
pub use undirected::{Connection, UndirectedGraph};
