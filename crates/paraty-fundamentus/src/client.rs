//! Snapshot download and dated cache.

use crate::Result;
use crate::error::FundamentusError;
use crate::snapshot::verify_essential_columns;
use paraty_traits::Date;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Environment variable holding the snapshot export URL.
pub const SNAPSHOT_URL_VAR: &str = "FUNDAMENTUS_SNAPSHOT_URL";

/// Prefix of cache file names; the snapshot date completes the name.
const CACHE_FILE_PREFIX: &str = "fundamentals_";

/// The cache file a snapshot of `date` lives at under `cache_dir`.
#[must_use]
pub fn cache_path_for(cache_dir: &Path, date: Date) -> PathBuf {
    cache_dir.join(format!("{CACHE_FILE_PREFIX}{}.csv", date.format("%Y%m%d")))
}

/// Read a raw snapshot file into a DataFrame.
///
/// The export is semicolon-delimited with a header row. Every column is
/// read as text; type inference is deliberately disabled so that the
/// normalizer is the single place where cells become numbers.
pub fn read_snapshot(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(b';'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Client for the raw fundamentals snapshot.
///
/// Downloads the full-market export and keeps one cache file per day, so
/// repeated runs within a day never touch the network.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    client: reqwest::Client,
    url: String,
    cache_dir: PathBuf,
}

impl SnapshotClient {
    /// Create a client for the given export URL and cache directory.
    #[must_use]
    pub fn new(url: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Create a client from the `FUNDAMENTUS_SNAPSHOT_URL` environment
    /// variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let url = std::env::var(SNAPSHOT_URL_VAR)
            .map_err(|_| FundamentusError::MissingSnapshotUrl)?;

        Ok(Self::new(url, cache_dir))
    }

    /// The cache file a snapshot of `date` lives at.
    #[must_use]
    pub fn cache_path(&self, date: Date) -> PathBuf {
        cache_path_for(&self.cache_dir, date)
    }

    /// Download the raw snapshot text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FundamentusError::Status(response.status()));
        }

        Ok(response.text().await?)
    }

    /// Load the snapshot for `date`, from cache when possible.
    ///
    /// A cache file missing any essential column is treated as stale and
    /// refetched; `use_cache = false` always refetches.
    ///
    /// # Errors
    ///
    /// Returns an error when both the cache and the download are unusable.
    pub async fn load(&self, date: Date, use_cache: bool) -> Result<DataFrame> {
        let path = self.cache_path(date);

        if use_cache && path.exists() {
            if let Ok(df) = read_snapshot(&path) {
                if verify_essential_columns(&df).is_ok() {
                    return Ok(df);
                }
            }
        }

        let text = self.fetch().await?;
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::write(&path, &text)?;

        read_snapshot(&path)
    }
}
