//! Sectors command implementation.

use crate::data;
use anyhow::Result;
use paraty_wsm::{WsmConfig, WsmEngine};
use std::path::Path;

/// Show the per-subsector reference statistics the scores are computed
/// against.
pub(crate) async fn run(use_cache: bool, screen: bool, cache_dir: &Path) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Subsector Reference Values                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let universe = data::load_universe(cache_dir, use_cache, screen).await?;
    let universe = data::prepare(&universe);

    let engine = WsmEngine::new(WsmConfig::recommended())?;
    let references = engine.sector_references(&universe);

    if references.is_empty() {
        println!("No subsector found in the snapshot.");
        return Ok(());
    }

    println!(
        "{:<36} {:>9} {:>9}  {}",
        "Subsector", "Companies", "Avg P/E", "Method"
    );
    println!("{}", "─".repeat(72));

    for (subsector, reference) in &references {
        let avg = reference
            .average_pe
            .map_or_else(|| "-".to_string(), |pe| format!("{pe:.2}"));
        println!(
            "{:<36} {:>9} {:>9}  {}",
            subsector,
            reference.companies,
            avg,
            reference.pe_method.label()
        );
    }

    println!("\n{} subsectors\n", references.len());
    Ok(())
}
