//! Subsector-P/E target price.

use paraty_traits::stats::round_dp;
use paraty_traits::{CeilingPrice, Security};

/// Target price assuming the security re-rates to its subsector's
/// consolidated average P/E: `EPS × sector_pe`.
///
/// The margin of this methodology measures the P/E discount (or premium) a
/// security trades at relative to its peers. Requires strictly positive
/// earnings and an attached sector P/E (see
/// [`paraty_wsm::with_sector_pe`](https://docs.rs/paraty-wsm)).
///
/// # Example
///
/// ```
/// use paraty_methods::DiscountedPe;
/// use paraty_traits::{CeilingPrice, Security};
///
/// let mut sec = Security::new("CMIN3");
/// sec.earnings_per_share = Some(2.0);
/// sec.sector_pe = Some(8.5);
///
/// assert_eq!(DiscountedPe.ceiling_price(&sec), Some(17.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountedPe;

impl CeilingPrice for DiscountedPe {
    fn name(&self) -> &str {
        "discounted_pe"
    }

    fn ceiling_price(&self, security: &Security) -> Option<f64> {
        let eps = security.earnings_per_share.filter(|v| *v > 0.0)?;
        let sector_pe = security.sector_pe.filter(|v| v.is_finite())?;
        Some(round_dp(eps * sector_pe, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_price() {
        let mut sec = Security::new("TEST3");
        sec.earnings_per_share = Some(1.5);
        sec.sector_pe = Some(12.0);

        assert_relative_eq!(DiscountedPe.ceiling_price(&sec).unwrap(), 18.0);
    }

    #[test]
    fn test_requires_sector_pe_and_earnings() {
        let mut sec = Security::new("TEST3");
        sec.earnings_per_share = Some(1.5);
        assert!(DiscountedPe.ceiling_price(&sec).is_none());

        sec.sector_pe = Some(12.0);
        sec.earnings_per_share = Some(0.0);
        assert!(DiscountedPe.ceiling_price(&sec).is_none());
    }

    #[test]
    fn test_discount_margin() {
        let mut sec = Security::new("TEST3");
        sec.price = Some(12.0);
        sec.earnings_per_share = Some(1.5);
        sec.sector_pe = Some(12.0);

        // Target 18 against price 12: trading at a 50% discount.
        let appraisal = DiscountedPe.appraise(&sec).unwrap();
        assert_relative_eq!(appraisal.margin_pct, 50.0);
    }

    #[test]
    fn test_premium_margin_is_negative() {
        let mut sec = Security::new("TEST3");
        sec.price = Some(24.0);
        sec.earnings_per_share = Some(1.5);
        sec.sector_pe = Some(12.0);

        let appraisal = DiscountedPe.appraise(&sec).unwrap();
        assert_relative_eq!(appraisal.margin_pct, -25.0);
    }
}
