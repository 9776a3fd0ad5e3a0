//! Universe loading helpers shared by the subcommands.

use anyhow::{Context, Result};
use chrono::Utc;
use paraty_fundamentus::{
    QualityFilter, SnapshotClient, apply_quality_filter, cache_path_for, read_snapshot,
    to_universe,
};
use paraty_methods::apply_margins;
use paraty_traits::Universe;
use paraty_wsm::{ConsolidateConfig, consolidate, with_sector_pe};
use std::path::Path;

/// Default snapshot cache directory.
pub(crate) const DEFAULT_CACHE_DIR: &str = "output/cache";

/// Load the current snapshot and convert it into the typed universe.
///
/// Prefers today's cache file; falls back to downloading when the cache is
/// missing, stale, or bypassed. A configured snapshot URL is only required
/// when a download is actually needed.
pub(crate) async fn load_universe(cache_dir: &Path, use_cache: bool, screen: bool) -> Result<Universe> {
    let today = Utc::now().date_naive();

    let df = match SnapshotClient::from_env(cache_dir) {
        Ok(client) => client.load(today, use_cache).await?,
        Err(env_err) => {
            let path = cache_path_for(cache_dir, today);
            if use_cache && path.exists() {
                read_snapshot(&path)?
            } else {
                return Err(env_err).context("no cached snapshot for today either");
            }
        }
    };

    let universe = to_universe(&df, Some(today))?;
    println!("Loaded {} securities (as of {})", universe.len(), today);

    if screen {
        let screened = apply_quality_filter(&universe, &QualityFilter::default());
        println!(
            "Quality screen: {}/{} securities kept",
            screened.len(),
            universe.len()
        );
        Ok(screened)
    } else {
        Ok(universe)
    }
}

/// Attach subsector P/E references and the three valuation margins.
pub(crate) fn prepare(universe: &Universe) -> Universe {
    let table = consolidate(universe, &ConsolidateConfig::default());
    let universe = with_sector_pe(universe, &table);
    apply_margins(&universe)
}

/// Load a ticker exclusion list: one ticker per line, `#` starts a comment.
///
/// A missing file is not an error; nothing gets excluded.
pub(crate) fn load_ignore_list(path: &Path) -> Vec<String> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        println!("Exclusion file not found: {}", path.display());
        return Vec::new();
    };

    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect()
}
