#![forbid(unsafe_code)]
//! kindred-analysis library.
//!
//! Builds the family graph from loaded tables, computes network metrics on
//! its undirected view, and ranks the results.
//!
//! # Conventions
//!
//! - **Errors**: graph construction returns
//!   [`ValidationError`](kindred_core::ValidationError); metrics and
//!   reporting return [`MetricsError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;

pub use error::MetricsError;
pub use graph::{AdjacencyMatrix, FamilyGraph, GraphStats, UndirectedGraph};
pub use metrics::{EdgeKey, MetricKind, MetricRecord, MetricsConfig};
