//! Universe-wide margin stamping.

use crate::{BarsiCeiling, DiscountedPe, GrahamNumber};
use paraty_traits::{CeilingPrice, Universe, ValuationMargins};

/// Compute the three valuation margins for every security, producing a new
/// universe.
///
/// Securities that fail a methodology's preconditions keep `None` for that
/// margin; they are not dropped. The input universe is left untouched.
#[must_use]
pub fn apply_margins(universe: &Universe) -> Universe {
    let graham = GrahamNumber::default();
    let barsi = BarsiCeiling::default();
    let discounted = DiscountedPe;

    universe.map(|mut security| {
        security.margins = ValuationMargins {
            graham: graham.appraise(&security).map(|a| a.margin_pct),
            barsi: barsi.appraise(&security).map(|a| a.margin_pct),
            pe_discount: discounted.appraise(&security).map(|a| a.margin_pct),
        };
        security
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use paraty_traits::Security;

    #[test]
    fn test_apply_margins_stamps_all_three() {
        let mut sec = Security::new("TEST3");
        sec.price = Some(24.0);
        sec.earnings_per_share = Some(2.5);
        sec.book_value_per_share = Some(16.0);
        sec.average_payout = Some(0.6);
        sec.sector_pe = Some(12.0);

        let stamped = apply_margins(&Universe::from(vec![sec]));
        let margins = stamped.securities()[0].margins;

        // Graham ceiling 30 against price 24.
        assert_relative_eq!(margins.graham.unwrap(), 25.0);
        // DPA = 1.5, Barsi ceiling 25 against price 24.
        assert_relative_eq!(margins.barsi.unwrap(), 4.17);
        // P/E target 30 against price 24.
        assert_relative_eq!(margins.pe_discount.unwrap(), 25.0);
    }

    #[test]
    fn test_unmet_preconditions_leave_margin_absent() {
        let mut sec = Security::new("LOSS3");
        sec.price = Some(10.0);
        sec.earnings_per_share = Some(-1.0);
        sec.book_value_per_share = Some(5.0);

        let stamped = apply_margins(&Universe::from(vec![sec]));
        let margins = stamped.securities()[0].margins;

        assert!(margins.graham.is_none());
        assert!(margins.barsi.is_none());
        assert!(margins.pe_discount.is_none());
    }

    #[test]
    fn test_input_universe_untouched() {
        let mut sec = Security::new("TEST3");
        sec.price = Some(24.0);
        sec.earnings_per_share = Some(2.5);
        sec.book_value_per_share = Some(16.0);

        let universe = Universe::from(vec![sec]);
        let _ = apply_margins(&universe);
        assert!(universe.securities()[0].margins.graham.is_none());
    }
}
