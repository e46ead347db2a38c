//! Tabular input: node and edge tables as CSV or JSON.
//!
//! CSV tables must carry a header row; column names follow the field names
//! of [`Node`] and [`Edge`] (with the aliases `house2`, `type`, and `lty`).
//! JSON tables are arrays of objects with the same keys.
//!
//! The loader only decodes rows. Referential integrity (unknown endpoints,
//! duplicate names) is checked when the graph is built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::ErrorCode;
use crate::model::{Edge, Node};

/// Errors raised while reading a node or edge table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported table format for {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("csv row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("json table: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::InputReadFailed
    }
}

/// On-disk encoding of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
}

impl TableFormat {
    /// Infer the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Read a node table from `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, has an unknown
/// extension, or a row fails to decode.
#[instrument]
pub fn read_nodes(path: &Path) -> Result<Vec<Node>, LoadError> {
    let rows = read_table(path)?;
    debug!(count = rows.len(), "loaded node table");
    Ok(rows)
}

/// Read an edge table from `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, has an unknown
/// extension, or a row fails to decode.
#[instrument]
pub fn read_edges(path: &Path) -> Result<Vec<Edge>, LoadError> {
    let rows = read_table(path)?;
    debug!(count = rows.len(), "loaded edge table");
    Ok(rows)
}

/// Decode rows of `T` from a reader in the given format.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] with the 1-based data row number, or
/// [`LoadError::Json`] when the array cannot be decoded.
pub fn read_rows<T, R>(reader: R, format: TableFormat) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    match format {
        TableFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_reader(reader);
            rdr.deserialize()
                .enumerate()
                .map(|(i, row)| row.map_err(|source| LoadError::Csv { row: i + 1, source }))
                .collect()
        }
        TableFormat::Json => Ok(serde_json::from_reader(reader)?),
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let format =
        TableFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(BufReader::new(file), format)
}
