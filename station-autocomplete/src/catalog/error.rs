//! Catalog loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be opened or read
    #[error("failed to read station catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog content is not valid CSV
    #[error("malformed station catalog: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog header lacks a required column
    #[error("station catalog has no {column} column")]
    MissingColumn { column: &'static str },

    /// The background load task did not complete
    #[error("station catalog load aborted: {message}")]
    Aborted { message: String },
}
