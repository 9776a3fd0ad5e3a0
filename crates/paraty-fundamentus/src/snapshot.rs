//! Snapshot schema and conversion into the typed universe.
//!
//! The raw export is a semicolon-delimited table keyed by the source's own
//! Portuguese column names. Everything is read as text and pushed through
//! the normalizer; the typed [`Universe`] that leaves this module is the
//! last point where the source's encoding quirks exist.

use crate::Result;
use crate::error::FundamentusError;
use crate::normalize::{Scale, parse_scaled};
use paraty_traits::stats::round_dp;
use paraty_traits::{Date, Fundamentals, Security, Universe};
use polars::prelude::*;

/// Raw column names as served by the source.
pub mod columns {
    /// Ticker.
    pub const TICKER: &str = "Papel";
    /// Company trade name.
    pub const NAME: &str = "Empresa";
    /// Industry subsector.
    pub const SUBSECTOR: &str = "Subsetor";
    /// Last traded price.
    pub const PRICE: &str = "Cotacao";
    /// Shares outstanding.
    pub const SHARES: &str = "Nro_Acoes";
    /// Reported market capitalization.
    pub const MARKET_CAP: &str = "Valor_de_mercado";
    /// Two-month average daily liquidity.
    pub const LIQUIDITY: &str = "Liq_2meses";
    /// Price/earnings (×100 encoded).
    pub const PE: &str = "PL";
    /// Price/book.
    pub const PB: &str = "PVP";
    /// Enterprise value / EBITDA.
    pub const EV_EBITDA: &str = "EV_EBITDA";
    /// Dividend yield (×10 encoded).
    pub const DIVIDEND_YIELD: &str = "Div_Yield";
    /// Return on equity (×10 encoded).
    pub const ROE: &str = "ROE";
    /// Return on invested capital (×10 encoded).
    pub const ROIC: &str = "ROIC";
    /// Net margin (×10 encoded).
    pub const NET_MARGIN: &str = "Marg_Liquida";
    /// EBIT margin (×10 encoded).
    pub const EBIT_MARGIN: &str = "Marg_EBIT";
    /// Five-year revenue growth (×10 encoded).
    pub const REVENUE_GROWTH: &str = "Cres_Rec_5a";
    /// Trailing twelve-month profit growth.
    pub const PROFIT_GROWTH: &str = "Lucro_Liquido_12m";
    /// Net debt / EBITDA.
    pub const NET_DEBT_EBITDA: &str = "Div_Liquida";
    /// Gross debt / equity.
    pub const DEBT_TO_EQUITY: &str = "Div_Br_Patrim";
    /// EBIT / total assets (×10 encoded).
    pub const EBIT_OVER_ASSETS: &str = "EBIT_Ativo";
    /// Earnings per share (×100 encoded).
    pub const EPS: &str = "LPA";
    /// Book value per share (×100 encoded).
    pub const BVPS: &str = "VPA";
}

/// Columns the pipeline cannot work without.
pub const ESSENTIAL_COLUMNS: [&str; 5] = [
    columns::TICKER,
    columns::SUBSECTOR,
    columns::PE,
    columns::PRICE,
    columns::SHARES,
];

/// The fixed encoding of each numeric column.
fn scale_for(column: &str) -> Scale {
    match column {
        "PL" | "LPA" | "VPA" => Scale::Hundredth,
        "Div_Yield" | "Marg_Liquida" | "Marg_EBIT" | "EBIT_Ativo" | "ROIC" | "ROE"
        | "Cres_Rec_5a" => Scale::Tenth,
        _ => Scale::Unit,
    }
}

/// Check that every essential column is present.
pub fn verify_essential_columns(df: &DataFrame) -> Result<()> {
    for column in ESSENTIAL_COLUMNS {
        if df.column(column).is_err() {
            return Err(FundamentusError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Quality screen applied to the raw snapshot.
///
/// Defaults mirror the conventional screen for investable rows: profitable
/// companies, growing revenue, and at least R$ 1M of daily liquidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityFilter {
    /// Keep only rows with a positive P/E.
    pub require_positive_earnings: bool,
    /// Keep only rows with positive five-year revenue growth.
    pub require_revenue_growth: bool,
    /// Minimum two-month average daily liquidity, if any.
    pub min_liquidity: Option<f64>,
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self {
            require_positive_earnings: true,
            require_revenue_growth: true,
            min_liquidity: Some(1_000_000.0),
        }
    }
}

impl QualityFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            require_positive_earnings: false,
            require_revenue_growth: false,
            min_liquidity: None,
        }
    }

    /// Whether `security` passes the screen.
    ///
    /// A row missing the figure a criterion needs fails that criterion:
    /// the screen selects rows known to be investable, not rows that might
    /// be.
    #[must_use]
    pub fn accepts(&self, security: &Security) -> bool {
        if self.require_positive_earnings
            && !security
                .fundamentals
                .price_earnings
                .is_some_and(|pe| pe > 0.0)
        {
            return false;
        }
        if self.require_revenue_growth
            && !security
                .fundamentals
                .revenue_growth
                .is_some_and(|g| g > 0.0)
        {
            return false;
        }
        if let Some(min) = self.min_liquidity {
            if !security.liquidity.is_some_and(|l| l >= min) {
                return false;
            }
        }
        true
    }
}

/// Historical payout ratio derived from yield, price and earnings:
/// `(dividend_yield% / 100 × price) / EPS`, rounded to five decimals.
///
/// Requires strictly positive earnings; anything else yields `None`.
#[must_use]
pub fn derive_payout(
    dividend_yield: Option<f64>,
    price: Option<f64>,
    eps: Option<f64>,
) -> Option<f64> {
    let dy = dividend_yield?;
    let price = price?;
    let eps = eps.filter(|e| *e > 0.0)?;
    Some(round_dp(dy / 100.0 * price / eps, 5))
}

/// Convert the raw snapshot into the typed universe.
///
/// Every cell goes through [`parse_scaled`] with its column's scale
/// correction; unparseable cells become `None` on the record. Rows with an
/// empty ticker are dropped, since the ticker is the one field nothing
/// works without.
pub fn to_universe(df: &DataFrame, as_of: Option<Date>) -> Result<Universe> {
    verify_essential_columns(df)?;
    if df.is_empty() {
        return Err(FundamentusError::Empty);
    }

    let text = |name: &str, row: usize| -> Option<String> {
        let column = df.column(name).ok()?;
        let chunked = column.as_materialized_series().str().ok()?;
        chunked.get(row).map(str::to_string)
    };
    let number = |name: &str, row: usize| -> Option<f64> {
        text(name, row).and_then(|raw| parse_scaled(&raw, scale_for(name)))
    };

    let mut securities = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let Some(ticker) = text(columns::TICKER, row).filter(|t| !t.trim().is_empty()) else {
            continue;
        };

        let price = number(columns::PRICE, row);
        let eps = number(columns::EPS, row);
        let dividend_yield = number(columns::DIVIDEND_YIELD, row);

        securities.push(Security {
            ticker: ticker.trim().to_string(),
            company_name: text(columns::NAME, row).unwrap_or_default(),
            subsector: text(columns::SUBSECTOR, row).filter(|s| !s.trim().is_empty()),
            price,
            share_count: number(columns::SHARES, row),
            market_cap: number(columns::MARKET_CAP, row),
            liquidity: number(columns::LIQUIDITY, row),
            earnings_per_share: eps,
            book_value_per_share: number(columns::BVPS, row),
            average_payout: derive_payout(dividend_yield, price, eps),
            sector_pe: None,
            fundamentals: Fundamentals {
                price_earnings: number(columns::PE, row),
                price_book: number(columns::PB, row),
                ev_ebitda: number(columns::EV_EBITDA, row),
                dividend_yield,
                return_on_equity: number(columns::ROE, row),
                return_on_invested_capital: number(columns::ROIC, row),
                net_margin: number(columns::NET_MARGIN, row),
                ebit_margin: number(columns::EBIT_MARGIN, row),
                revenue_growth: number(columns::REVENUE_GROWTH, row),
                profit_growth: number(columns::PROFIT_GROWTH, row),
                net_debt_ebitda: number(columns::NET_DEBT_EBITDA, row),
                debt_to_equity: number(columns::DEBT_TO_EQUITY, row),
                ebit_over_assets: number(columns::EBIT_OVER_ASSETS, row),
            },
            margins: Default::default(),
        });
    }

    Ok(Universe::new(as_of, securities))
}

/// Drop the rows that fail the quality screen, producing a new universe.
#[must_use]
pub fn apply_quality_filter(universe: &Universe, filter: &QualityFilter) -> Universe {
    universe.filtered(|security| filter.accepts(security))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_df() -> DataFrame {
        df! {
            columns::TICKER => &["PETR4", "VALE3", ""],
            columns::NAME => &["PETROBRAS", "VALE", "GHOST"],
            columns::SUBSECTOR => &["Oil & Gas", "Mining", "None"],
            columns::PRICE => &["30,50", "61,20", "1,00"],
            columns::SHARES => &["1.000.000", "500.000", "-"],
            columns::MARKET_CAP => &["-", "-", "-"],
            columns::LIQUIDITY => &["2.000.000,00", "900.000,00", "-"],
            columns::PE => &["450,00", "820,00", "-"],
            columns::PB => &["1,2", "1,8", "-"],
            columns::EV_EBITDA => &["3,1", "4,2", "-"],
            columns::DIVIDEND_YIELD => &["124,0", "80,0", "-"],
            columns::ROE => &["182,0", "240,0", "-"],
            columns::ROIC => &["110,0", "190,0", "-"],
            columns::NET_MARGIN => &["104,0", "260,0", "-"],
            columns::EBIT_MARGIN => &["210,0", "350,0", "-"],
            columns::REVENUE_GROWTH => &["85,0", "-12,0", "-"],
            columns::PROFIT_GROWTH => &["10,0", "5,0", "-"],
            columns::NET_DEBT_EBITDA => &["0,9", "0,4", "-"],
            columns::DEBT_TO_EQUITY => &["0,8", "0,4", "-"],
            columns::EBIT_OVER_ASSETS => &["152,0", "210,0", "-"],
            columns::EPS => &["610,00", "850,00", "-"],
            columns::BVPS => &["2.540,00", "3.400,00", "-"],
        }
        .unwrap()
    }

    #[test]
    fn test_to_universe_parses_and_rescales() {
        let universe = to_universe(&sample_df(), None).unwrap();
        // The empty-ticker row is dropped.
        assert_eq!(universe.len(), 2);

        let petr = &universe.securities()[0];
        assert_eq!(petr.ticker, "PETR4");
        assert_eq!(petr.subsector.as_deref(), Some("Oil & Gas"));
        assert_relative_eq!(petr.price.unwrap(), 30.5);
        assert_relative_eq!(petr.share_count.unwrap(), 1_000_000.0);
        // ×100 encoding undone: "450,00" is a P/E of 4.5.
        assert_relative_eq!(petr.fundamentals.price_earnings.unwrap(), 4.5);
        assert_relative_eq!(petr.earnings_per_share.unwrap(), 6.1);
        assert_relative_eq!(petr.book_value_per_share.unwrap(), 25.4);
        // ×10 encoding undone: "124,0" is a 12.4% yield.
        assert_relative_eq!(petr.fundamentals.dividend_yield.unwrap(), 12.4);
        assert_relative_eq!(petr.fundamentals.return_on_equity.unwrap(), 18.2);
        // Unit columns untouched.
        assert_relative_eq!(petr.fundamentals.net_debt_ebitda.unwrap(), 0.9);
        assert_eq!(petr.market_cap, None);
    }

    #[test]
    fn test_to_universe_derives_payout() {
        let universe = to_universe(&sample_df(), None).unwrap();
        let petr = &universe.securities()[0];
        // (12.4% of 30.50) / 6.10 = 0.62
        assert_relative_eq!(petr.average_payout.unwrap(), 0.62, epsilon = 1e-9);
    }

    #[test]
    fn test_derive_payout_preconditions() {
        assert!(derive_payout(Some(5.0), Some(10.0), None).is_none());
        assert!(derive_payout(Some(5.0), Some(10.0), Some(0.0)).is_none());
        assert!(derive_payout(Some(5.0), Some(10.0), Some(-2.0)).is_none());
        assert_relative_eq!(
            derive_payout(Some(5.0), Some(10.0), Some(1.0)).unwrap(),
            0.5
        );
    }

    #[test]
    fn test_missing_essential_column_rejected() {
        let df = df! {
            columns::TICKER => &["PETR4"],
        }
        .unwrap();

        let err = to_universe(&df, None).unwrap_err();
        assert!(matches!(err, FundamentusError::MissingColumn(_)));
    }

    #[test]
    fn test_quality_filter_defaults() {
        let universe = to_universe(&sample_df(), None).unwrap();
        let filtered = apply_quality_filter(&universe, &QualityFilter::default());

        // VALE3 fails on negative revenue growth and low liquidity.
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.securities()[0].ticker, "PETR4");
    }

    #[test]
    fn test_quality_filter_none_keeps_all() {
        let universe = to_universe(&sample_df(), None).unwrap();
        let filtered = apply_quality_filter(&universe, &QualityFilter::none());
        assert_eq!(filtered.len(), universe.len());
    }

    #[test]
    fn test_quality_filter_missing_figure_fails_criterion() {
        let filter = QualityFilter {
            require_positive_earnings: true,
            require_revenue_growth: false,
            min_liquidity: None,
        };
        let sec = Security::new("XXXX3");
        assert!(!filter.accepts(&sec));
    }
}
