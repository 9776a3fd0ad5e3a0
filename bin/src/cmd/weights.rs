//! Weights command implementation.

use paraty_wsm::{IndicatorCategory, WsmConfig, category_of};

const CATEGORIES: [IndicatorCategory; 5] = [
    IndicatorCategory::Valuation,
    IndicatorCategory::Profitability,
    IndicatorCategory::Growth,
    IndicatorCategory::BalanceSheet,
    IndicatorCategory::CeilingMethod,
];

/// Show the indicator weight structure grouped by category.
pub(crate) fn run() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Indicator Weight Structure                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let config = WsmConfig::recommended();

    for category in CATEGORIES {
        let entries: Vec<_> = config
            .entries()
            .iter()
            .filter(|(indicator, _)| category_of(*indicator) == category)
            .collect();
        let category_weight: f64 = entries.iter().map(|(_, spec)| spec.weight).sum();

        println!("{:?} ({:.0}%)", category, category_weight * 100.0);
        println!("  {}", category.description());
        for (indicator, spec) in entries {
            let direction = match spec.direction {
                paraty_traits::Direction::HigherIsBetter => "higher is better",
                paraty_traits::Direction::LowerIsBetter => "lower is better",
            };
            println!(
                "  {:<22} {:>4.0}%  ({})",
                indicator.label(),
                spec.weight * 100.0,
                direction
            );
        }
        println!();
    }

    println!("Total weight: {:.1}%", config.total_weight() * 100.0);
    if !config.is_balanced() {
        println!("Warning: weights do not sum to 100%");
    }
    println!();
}
