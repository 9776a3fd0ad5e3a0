//! Barsi ceiling price.

use paraty_traits::stats::round_dp;
use paraty_traits::{CeilingPrice, Security};
use serde::{Deserialize, Serialize};

/// Configuration for the Barsi ceiling price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarsiConfig {
    /// Dividend yield the purchase price must lock in (default: 0.06).
    pub target_yield: f64,
}

impl Default for BarsiConfig {
    fn default() -> Self {
        Self { target_yield: 0.06 }
    }
}

/// Luiz Barsi's dividend-based ceiling: `DPA / target_yield`, where the
/// expected dividend per share is `payout × EPS`.
///
/// Requires strictly positive earnings and a positive historical payout
/// ratio; a company that pays no dividends has no Barsi ceiling.
///
/// # Example
///
/// ```
/// use paraty_methods::BarsiCeiling;
/// use paraty_traits::{CeilingPrice, Security};
///
/// let mut sec = Security::new("TAEE3");
/// sec.earnings_per_share = Some(3.0);
/// sec.average_payout = Some(0.8);
///
/// // DPA = 0.8 × 3.0 = 2.40; ceiling at 6% = 40.0
/// assert_eq!(BarsiCeiling::default().ceiling_price(&sec), Some(40.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BarsiCeiling {
    config: BarsiConfig,
}

impl BarsiCeiling {
    /// Create a Barsi calculator with the given configuration.
    #[must_use]
    pub const fn new(config: BarsiConfig) -> Self {
        Self { config }
    }

    /// The configured target yield.
    #[must_use]
    pub const fn target_yield(&self) -> f64 {
        self.config.target_yield
    }

    /// Expected dividend per share: `payout × EPS`, rounded to two decimals.
    #[must_use]
    pub fn expected_dividend(&self, security: &Security) -> Option<f64> {
        let eps = security.earnings_per_share.filter(|v| *v > 0.0)?;
        let payout = security.average_payout.filter(|v| *v > 0.0)?;
        Some(round_dp(payout * eps, 2))
    }

    /// Ceiling price at an arbitrary target yield.
    ///
    /// Useful for sensitivity tables across the conventional 5%–8% range.
    #[must_use]
    pub fn ceiling_at(&self, security: &Security, target_yield: f64) -> Option<f64> {
        if !(target_yield.is_finite() && target_yield > 0.0) {
            return None;
        }
        let dpa = self.expected_dividend(security)?;
        Some(round_dp(dpa / target_yield, 2))
    }
}

impl CeilingPrice for BarsiCeiling {
    fn name(&self) -> &str {
        "barsi"
    }

    fn ceiling_price(&self, security: &Security) -> Option<f64> {
        self.ceiling_at(security, self.config.target_yield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dividend_payer() -> Security {
        let mut sec = Security::new("TEST3");
        sec.price = Some(30.0);
        sec.earnings_per_share = Some(3.0);
        sec.average_payout = Some(0.7);
        sec
    }

    #[test]
    fn test_expected_dividend() {
        let barsi = BarsiCeiling::default();
        let dpa = barsi.expected_dividend(&dividend_payer()).unwrap();
        assert_relative_eq!(dpa, 2.1);
    }

    #[test]
    fn test_ceiling_at_default_yield() {
        let barsi = BarsiCeiling::default();
        // 2.10 / 0.06 = 35.0
        assert_relative_eq!(barsi.ceiling_price(&dividend_payer()).unwrap(), 35.0);
    }

    #[test]
    fn test_ceiling_at_alternate_yields() {
        let barsi = BarsiCeiling::default();
        let sec = dividend_payer();

        assert_relative_eq!(barsi.ceiling_at(&sec, 0.05).unwrap(), 42.0);
        assert_relative_eq!(barsi.ceiling_at(&sec, 0.07).unwrap(), 30.0);
        assert!(barsi.ceiling_at(&sec, 0.0).is_none());
    }

    #[test]
    fn test_requires_positive_payout_and_earnings() {
        let barsi = BarsiCeiling::default();

        let mut sec = dividend_payer();
        sec.average_payout = None;
        assert!(barsi.ceiling_price(&sec).is_none());

        let mut sec = dividend_payer();
        sec.average_payout = Some(0.0);
        assert!(barsi.ceiling_price(&sec).is_none());

        let mut sec = dividend_payer();
        sec.earnings_per_share = Some(-2.0);
        assert!(barsi.ceiling_price(&sec).is_none());
    }

    #[test]
    fn test_margin_against_price() {
        let appraisal = BarsiCeiling::default().appraise(&dividend_payer()).unwrap();
        assert_relative_eq!(appraisal.margin, 5.0);
        assert_relative_eq!(appraisal.margin_pct, 16.67);
    }
}
