//! Error types for the Fundamentus snapshot provider.

use thiserror::Error;

/// Errors that can occur when loading the fundamentals snapshot.
#[derive(Debug, Error)]
pub enum FundamentusError {
    /// Missing snapshot URL.
    #[error("FUNDAMENTUS_SNAPSHOT_URL environment variable not set")]
    MissingSnapshotUrl,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The snapshot endpoint answered with a non-success status.
    #[error("Snapshot endpoint error: HTTP {0}")]
    Status(reqwest::StatusCode),

    /// DataFrame operation failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A column the pipeline depends on is absent from the snapshot.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The snapshot contained no rows.
    #[error("Snapshot is empty")]
    Empty,
}
