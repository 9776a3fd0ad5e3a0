//! Scoring model configuration.
//!
//! The weight table is an explicit value handed to the engine at
//! construction and validated once, rather than a module-level default
//! consulted from many places.

use paraty_traits::{Direction, Indicator, ParatyError, Result};
use serde::{Deserialize, Serialize};

/// Tolerance when checking that configured weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Category an indicator belongs to, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorCategory {
    /// Classic price multiples.
    Valuation,
    /// Returns and margins.
    Profitability,
    /// Revenue, profit and per-share growth.
    Growth,
    /// Leverage and asset efficiency.
    BalanceSheet,
    /// Ceiling-price margins of safety.
    CeilingMethod,
}

impl IndicatorCategory {
    /// Human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Valuation => "Classic price multiples compared to subsector peers",
            Self::Profitability => "Returns on capital and operating margins",
            Self::Growth => "Revenue, profit and per-share growth",
            Self::BalanceSheet => "Leverage and asset efficiency",
            Self::CeilingMethod => "Margins of safety against fair-value ceiling prices",
        }
    }
}

/// Category an indicator is reported under.
#[must_use]
pub const fn category_of(indicator: Indicator) -> IndicatorCategory {
    match indicator {
        Indicator::PriceEarnings
        | Indicator::PriceBook
        | Indicator::EvEbitda
        | Indicator::DividendYield => IndicatorCategory::Valuation,
        Indicator::ReturnOnEquity
        | Indicator::ReturnOnInvestedCapital
        | Indicator::NetMargin
        | Indicator::EbitMargin => IndicatorCategory::Profitability,
        Indicator::RevenueGrowth | Indicator::ProfitGrowth | Indicator::EarningsPerShare => {
            IndicatorCategory::Growth
        }
        Indicator::NetDebtEbitda | Indicator::DebtToEquity | Indicator::EbitOverAssets => {
            IndicatorCategory::BalanceSheet
        }
        Indicator::GrahamMargin | Indicator::BarsiMargin => IndicatorCategory::CeilingMethod,
    }
}

/// Direction and weight of one configured indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Whether higher or lower values score better.
    pub direction: Direction,
    /// Contribution weight; all configured weights should sum to 1.0.
    pub weight: f64,
}

impl IndicatorSpec {
    /// Shorthand constructor.
    #[must_use]
    pub const fn new(direction: Direction, weight: f64) -> Self {
        Self { direction, weight }
    }
}

/// The full weight table of the scoring model.
///
/// Entries keep their insertion order, which also fixes the order in which
/// outlier filtering walks the indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsmConfig {
    entries: Vec<(Indicator, IndicatorSpec)>,
}

impl WsmConfig {
    /// Build a configuration from explicit entries.
    #[must_use]
    pub const fn new(entries: Vec<(Indicator, IndicatorSpec)>) -> Self {
        Self { entries }
    }

    /// The recommended weight structure.
    ///
    /// Valuation 20%, profitability 30%, growth 15%, balance sheet 15%,
    /// ceiling methodologies 20%; weights sum to 1.0.
    #[must_use]
    pub fn recommended() -> Self {
        use Direction::{HigherIsBetter, LowerIsBetter};
        use Indicator::*;

        Self::new(vec![
            // Valuation (20%)
            (PriceEarnings, IndicatorSpec::new(LowerIsBetter, 0.07)),
            (PriceBook, IndicatorSpec::new(LowerIsBetter, 0.06)),
            (EvEbitda, IndicatorSpec::new(LowerIsBetter, 0.05)),
            (DividendYield, IndicatorSpec::new(HigherIsBetter, 0.02)),
            // Profitability (30%)
            (ReturnOnEquity, IndicatorSpec::new(HigherIsBetter, 0.09)),
            (ReturnOnInvestedCapital, IndicatorSpec::new(HigherIsBetter, 0.08)),
            (NetMargin, IndicatorSpec::new(HigherIsBetter, 0.07)),
            (EbitMargin, IndicatorSpec::new(HigherIsBetter, 0.06)),
            // Growth (15%)
            (RevenueGrowth, IndicatorSpec::new(HigherIsBetter, 0.06)),
            (ProfitGrowth, IndicatorSpec::new(HigherIsBetter, 0.05)),
            (EarningsPerShare, IndicatorSpec::new(HigherIsBetter, 0.04)),
            // Balance sheet (15%)
            (NetDebtEbitda, IndicatorSpec::new(LowerIsBetter, 0.06)),
            (DebtToEquity, IndicatorSpec::new(LowerIsBetter, 0.05)),
            (EbitOverAssets, IndicatorSpec::new(HigherIsBetter, 0.04)),
            // Ceiling methodologies (20%)
            (GrahamMargin, IndicatorSpec::new(HigherIsBetter, 0.10)),
            (BarsiMargin, IndicatorSpec::new(HigherIsBetter, 0.10)),
        ])
    }

    /// The configured entries, in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(Indicator, IndicatorSpec)] {
        &self.entries
    }

    /// The configured traditional (non-margin) indicators, in order.
    pub fn traditional_indicators(&self) -> impl Iterator<Item = Indicator> + '_ {
        self.entries
            .iter()
            .map(|(indicator, _)| *indicator)
            .filter(|indicator| !indicator.is_ceiling_margin())
    }

    /// Sum of all configured weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, spec)| spec.weight).sum()
    }

    /// Whether the weights sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
    ///
    /// An unbalanced table is allowed, since the scorer normalizes by the
    /// achieved weight total, but callers should surface it to the user.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (self.total_weight() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Number of configured indicators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject structurally invalid configurations.
    ///
    /// An empty table, a non-finite or negative weight, a duplicate
    /// indicator, or a zero total weight makes scoring meaningless and is the
    /// one fatal condition of the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(ParatyError::InvalidConfig(
                "no indicators configured".to_string(),
            ));
        }

        for (indicator, spec) in &self.entries {
            if !spec.weight.is_finite() || spec.weight < 0.0 {
                return Err(ParatyError::InvalidConfig(format!(
                    "indicator {} has invalid weight {}",
                    indicator.label(),
                    spec.weight
                )));
            }
        }

        let mut seen = Vec::with_capacity(self.entries.len());
        for (indicator, _) in &self.entries {
            if seen.contains(indicator) {
                return Err(ParatyError::InvalidConfig(format!(
                    "indicator {} configured twice",
                    indicator.label()
                )));
            }
            seen.push(*indicator);
        }

        if self.total_weight() <= 0.0 {
            return Err(ParatyError::InvalidConfig(
                "total weight is zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for WsmConfig {
    fn default() -> Self {
        Self::recommended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recommended_is_balanced() {
        let config = WsmConfig::recommended();
        assert!(config.validate().is_ok());
        assert!(config.is_balanced());
        assert_relative_eq!(config.total_weight(), 1.0, epsilon = 1e-12);
        assert_eq!(config.len(), 16);
    }

    #[test]
    fn test_traditional_indicators_exclude_margins() {
        let config = WsmConfig::recommended();
        let traditional: Vec<_> = config.traditional_indicators().collect();
        assert_eq!(traditional.len(), 14);
        assert!(!traditional.contains(&Indicator::GrahamMargin));
        assert!(!traditional.contains(&Indicator::BarsiMargin));
    }

    #[test]
    fn test_empty_config_rejected() {
        let config = WsmConfig::new(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_total_weight_rejected() {
        let config = WsmConfig::new(vec![(
            Indicator::PriceEarnings,
            IndicatorSpec::new(Direction::LowerIsBetter, 0.0),
        )]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = WsmConfig::new(vec![(
            Indicator::ReturnOnEquity,
            IndicatorSpec::new(Direction::HigherIsBetter, -0.5),
        )]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_indicator_rejected() {
        let spec = IndicatorSpec::new(Direction::HigherIsBetter, 0.5);
        let config = WsmConfig::new(vec![
            (Indicator::ReturnOnEquity, spec),
            (Indicator::ReturnOnEquity, spec),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unbalanced_config_is_valid_but_flagged() {
        let config = WsmConfig::new(vec![(
            Indicator::ReturnOnEquity,
            IndicatorSpec::new(Direction::HigherIsBetter, 0.5),
        )]);
        assert!(config.validate().is_ok());
        assert!(!config.is_balanced());
    }

    #[test]
    fn test_categories_cover_all_indicators() {
        for indicator in Indicator::ALL {
            // Every indicator maps to a category with a description.
            assert!(!category_of(indicator).description().is_empty());
        }
        assert_eq!(
            category_of(Indicator::GrahamMargin),
            IndicatorCategory::CeilingMethod
        );
        assert_eq!(
            category_of(Indicator::PriceBook),
            IndicatorCategory::Valuation
        );
    }
}
