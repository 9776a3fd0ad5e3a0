//! Fetch command implementation.

use anyhow::Result;
use chrono::Utc;
use paraty_fundamentus::SnapshotClient;
use std::path::Path;

/// Download a fresh snapshot into the cache, bypassing any existing file.
pub(crate) async fn run(cache_dir: &Path) -> Result<()> {
    let client = SnapshotClient::from_env(cache_dir)?;
    let today = Utc::now().date_naive();

    println!("Downloading snapshot for {}...", today);
    let df = client.load(today, false).await?;

    println!(
        "Cached {} rows x {} columns at {}",
        df.height(),
        df.width(),
        client.cache_path(today).display()
    );
    Ok(())
}
