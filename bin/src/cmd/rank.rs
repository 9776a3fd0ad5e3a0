//! Rank command implementation.

use crate::data;
use anyhow::Result;
use paraty_wsm::{Ranking, ScoredCompany, WsmConfig, WsmEngine};
use polars::prelude::*;
use std::path::Path;

/// Run the full scoring pipeline and display the ranking.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run(
    top: usize,
    penalized: bool,
    use_cache: bool,
    screen: bool,
    ignore_file: Option<std::path::PathBuf>,
    export: Option<std::path::PathBuf>,
    format: &str,
    cache_dir: &Path,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Fundamental Ranking (WSM)                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let universe = data::load_universe(cache_dir, use_cache, screen).await?;

    let universe = match ignore_file {
        Some(ref path) => {
            let excluded = data::load_ignore_list(path);
            if !excluded.is_empty() {
                println!("Excluding {} tickers from {}", excluded.len(), path.display());
            }
            universe.filtered(|s| !excluded.contains(&s.ticker.to_uppercase()))
        }
        None => universe,
    };

    let universe = data::prepare(&universe);

    let config = WsmConfig::recommended();
    if !config.is_balanced() {
        println!(
            "Warning: configured weights sum to {:.3}, not 1.0",
            config.total_weight()
        );
    }
    let engine = WsmEngine::new(config)?;
    let ranking = engine.rank(&universe);

    if ranking.is_empty() {
        println!("No company could be scored.");
        return Ok(());
    }

    match format {
        "json" => print_json(&ranking, top, penalized)?,
        _ => print_table(&ranking, top, penalized),
    }

    print_summary(&ranking, &universe);

    if let Some(path) = export {
        export_csv(&ranking, &path)?;
        println!("Full results written to: {}", path.display());
    }

    Ok(())
}

fn print_table(ranking: &Ranking, top: usize, penalized: bool) {
    let view: Vec<&ScoredCompany> = if penalized {
        ranking.by_penalty().into_iter().take(top).collect()
    } else {
        ranking.top(top).iter().collect()
    };

    let score_header = if penalized { "Score(pen)" } else { "Score" };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "{:<4} {:<8} {:<24} {:>10} {:>6} {:>8} {:>8} {:>7}",
        "#", "Ticker", "Subsector", score_header, "Compl", "Graham", "Barsi", "P/E"
    );
    println!("{}", "─".repeat(78));

    for (position, company) in view.iter().enumerate() {
        let score = if penalized {
            company.score_with_penalty
        } else {
            company.score
        };
        println!(
            "{:<4} {:<8} {:<24} {:>10.2} {:>5.0}% {:>8} {:>8} {:>7}",
            position + 1,
            company.ticker,
            truncate(&company.subsector, 24),
            score,
            company.completeness * 100.0,
            fmt_pct(company.graham_margin),
            fmt_pct(company.barsi_margin),
            fmt_num(company.price_earnings),
        );
    }
    println!();
}

fn print_json(ranking: &Ranking, top: usize, penalized: bool) -> Result<()> {
    let view: Vec<&ScoredCompany> = if penalized {
        ranking.by_penalty().into_iter().take(top).collect()
    } else {
        ranking.top(top).iter().collect()
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn print_summary(ranking: &Ranking, universe: &paraty_traits::Universe) {
    let scores: Vec<f64> = ranking.companies().iter().map(|c| c.score).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    println!("Companies scored:  {}", ranking.len());
    println!("Mean score:        {:.2}", mean);
    println!(
        "Score range:       {:.2} to {:.2}",
        scores.last().copied().unwrap_or(0.0),
        scores.first().copied().unwrap_or(0.0)
    );

    let excluded = ranking.excluded_tickers(universe);
    if !excluded.is_empty() {
        println!(
            "Not scored:        {} securities (outlier removal or missing subsector)",
            excluded.len()
        );
    }
    if !ranking.skipped_subsectors().is_empty() {
        println!(
            "Skipped subsectors (empty after outlier removal): {}",
            ranking.skipped_subsectors().join(", ")
        );
    }
    println!();
}

fn export_csv(ranking: &Ranking, path: &Path) -> Result<()> {
    let companies = ranking.companies();

    let mut df = df! {
        "ticker" => companies.iter().map(|c| c.ticker.clone()).collect::<Vec<_>>(),
        "company" => companies.iter().map(|c| c.company_name.clone()).collect::<Vec<_>>(),
        "subsector" => companies.iter().map(|c| c.subsector.clone()).collect::<Vec<_>>(),
        "price" => companies.iter().map(|c| c.price).collect::<Vec<_>>(),
        "market_cap" => companies.iter().map(|c| c.market_cap).collect::<Vec<_>>(),
        "score" => companies.iter().map(|c| c.score).collect::<Vec<_>>(),
        "score_with_penalty" => companies.iter().map(|c| c.score_with_penalty).collect::<Vec<_>>(),
        "completeness" => companies.iter().map(|c| c.completeness).collect::<Vec<_>>(),
        "graham_margin" => companies.iter().map(|c| c.graham_margin).collect::<Vec<_>>(),
        "barsi_margin" => companies.iter().map(|c| c.barsi_margin).collect::<Vec<_>>(),
        "pe_discount" => companies.iter().map(|c| c.pe_discount).collect::<Vec<_>>(),
        "price_earnings" => companies.iter().map(|c| c.price_earnings).collect::<Vec<_>>(),
        "return_on_equity" => companies.iter().map(|c| c.return_on_equity).collect::<Vec<_>>(),
    }?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}%"))
}

fn fmt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}
