//! Methodology registry for discovery and reporting.

use serde::Serialize;

/// Metadata about a valuation methodology.
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    /// Unique identifier for the methodology.
    pub name: &'static str,

    /// Human-readable description.
    pub description: &'static str,

    /// The per-security inputs the methodology requires.
    pub requires: &'static [&'static str],

    /// Whether the methodology depends on subsector reference values.
    pub requires_sector_reference: bool,
}

/// Get information about all available methodologies.
#[must_use]
pub fn available_methods() -> Vec<MethodInfo> {
    vec![
        MethodInfo {
            name: "graham",
            description: "Graham number: sqrt(22.5 x EPS x BVPS) fair-value ceiling",
            requires: &["earnings_per_share", "book_value_per_share", "price"],
            requires_sector_reference: false,
        },
        MethodInfo {
            name: "barsi",
            description: "Dividend ceiling: expected DPA over a 6% target yield",
            requires: &["earnings_per_share", "average_payout", "price"],
            requires_sector_reference: false,
        },
        MethodInfo {
            name: "discounted_pe",
            description: "Target price at the subsector's consolidated average P/E",
            requires: &["earnings_per_share", "sector_pe", "price"],
            requires_sector_reference: true,
        },
    ]
}

/// Get information about a specific methodology by name.
#[must_use]
pub fn get_method_info(name: &str) -> Option<MethodInfo> {
    available_methods().into_iter().find(|info| info.name == name)
}
