#![forbid(unsafe_code)]
//! kindred-core library.
//!
//! # Conventions
//!
//! - **Errors**: library errors are typed (`thiserror`); application-level
//!   helpers such as config loading return `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod load;
pub mod model;

pub use error::{ErrorCode, ValidationError};
pub use model::{Edge, Node, RelationKind};
