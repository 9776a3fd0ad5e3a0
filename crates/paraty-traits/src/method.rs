//! Ceiling-price methodology trait.
//!
//! A ceiling-price methodology computes, from a security's fundamentals, the
//! highest price at which the security would still be considered fairly
//! valued. The gap between that ceiling and the current price is the margin
//! of safety that feeds the scoring model.

use crate::stats::round_dp;
use crate::types::Security;
use serde::{Deserialize, Serialize};

/// The outcome of appraising one security against a fair-value ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appraisal {
    /// The fair-value ceiling price.
    pub ceiling_price: f64,
    /// Absolute gap between ceiling and current price.
    pub margin: f64,
    /// Gap relative to the current price, in percent. Positive means the
    /// security trades below its ceiling.
    pub margin_pct: f64,
}

/// A valuation methodology that derives a fair-value ceiling price.
///
/// Implementations must be thread-safe (`Send + Sync`). A methodology whose
/// preconditions are not met for a given security (e.g. non-positive
/// earnings) returns `None`; missing inputs are an expected condition, not
/// an error.
///
/// # Example
///
/// ```
/// use paraty_traits::{CeilingPrice, Security};
///
/// struct FixedCeiling(f64);
///
/// impl CeilingPrice for FixedCeiling {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn ceiling_price(&self, _security: &Security) -> Option<f64> {
///         Some(self.0)
///     }
/// }
///
/// let mut sec = Security::new("PETR4");
/// sec.price = Some(30.0);
///
/// let appraisal = FixedCeiling(45.0).appraise(&sec).unwrap();
/// assert_eq!(appraisal.margin, 15.0);
/// assert_eq!(appraisal.margin_pct, 50.0);
/// ```
pub trait CeilingPrice: Send + Sync {
    /// Short identifier for this methodology.
    fn name(&self) -> &str;

    /// The fair-value ceiling for `security`, or `None` when the inputs the
    /// methodology requires are absent or out of domain.
    fn ceiling_price(&self, security: &Security) -> Option<f64>;

    /// Appraise `security` against its ceiling.
    ///
    /// Requires a positive current price in addition to the methodology's
    /// own inputs. Margins are rounded to two decimal places.
    fn appraise(&self, security: &Security) -> Option<Appraisal> {
        let ceiling = self.ceiling_price(security)?;
        let price = security.price.filter(|p| p.is_finite() && *p > 0.0)?;

        let margin = ceiling - price;
        Some(Appraisal {
            ceiling_price: ceiling,
            margin: round_dp(margin, 2),
            margin_pct: round_dp(margin / price * 100.0, 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfBook;

    impl CeilingPrice for HalfBook {
        fn name(&self) -> &str {
            "half_book"
        }

        fn ceiling_price(&self, security: &Security) -> Option<f64> {
            security.book_value_per_share.map(|b| b / 2.0)
        }
    }

    #[test]
    fn test_appraise_requires_positive_price() {
        let mut sec = Security::new("TEST3");
        sec.book_value_per_share = Some(20.0);

        assert!(HalfBook.appraise(&sec).is_none());

        sec.price = Some(0.0);
        assert!(HalfBook.appraise(&sec).is_none());

        sec.price = Some(8.0);
        let appraisal = HalfBook.appraise(&sec).unwrap();
        assert_eq!(appraisal.ceiling_price, 10.0);
        assert_eq!(appraisal.margin, 2.0);
        assert_eq!(appraisal.margin_pct, 25.0);
    }

    #[test]
    fn test_appraise_negative_margin() {
        let mut sec = Security::new("TEST3");
        sec.book_value_per_share = Some(10.0);
        sec.price = Some(10.0);

        let appraisal = HalfBook.appraise(&sec).unwrap();
        assert_eq!(appraisal.margin, -5.0);
        assert_eq!(appraisal.margin_pct, -50.0);
    }

    #[test]
    fn test_trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CeilingPrice>();
    }
}
