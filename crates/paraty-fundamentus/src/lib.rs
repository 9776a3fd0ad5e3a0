//! Fundamentus snapshot provider for Paraty.
//!
//! This crate turns the raw full-market fundamentals export into the typed
//! [`paraty_traits::Universe`] the analysis crates consume:
//!
//! - [`normalize`] parses localized numeric text and undoes the source's
//!   fixed ×10/×100 column encodings.
//! - [`snapshot`] maps the raw table onto [`paraty_traits::Security`]
//!   records, derives the historical payout ratio, and applies the quality
//!   screen.
//! - [`client`] downloads the export and maintains a per-day cache file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use paraty_fundamentus::{SnapshotClient, to_universe};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SnapshotClient::from_env("output/cache")?;
//!     let today = Utc::now().date_naive();
//!
//!     let df = client.load(today, true).await?;
//!     let universe = to_universe(&df, Some(today))?;
//!
//!     println!("{} securities loaded", universe.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FUNDAMENTUS_SNAPSHOT_URL` in your environment or `.env` file:
//!
//! ```bash
//! FUNDAMENTUS_SNAPSHOT_URL=https://example.com/fundamentals-export.csv
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
mod error;
pub mod normalize;
pub mod snapshot;

pub use client::{SNAPSHOT_URL_VAR, SnapshotClient, cache_path_for, read_snapshot};
pub use error::FundamentusError;
pub use snapshot::{
    ESSENTIAL_COLUMNS, QualityFilter, apply_quality_filter, columns, derive_payout, to_universe,
    verify_essential_columns,
};

/// Result type for snapshot provider operations.
pub type Result<T> = std::result::Result<T, FundamentusError>;
