//! Common types used throughout the Paraty framework.
//!
//! This module defines the core records for representing securities, their
//! fundamental indicators, and the valuation margins produced by the
//! ceiling-price methodologies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker identifier.
///
/// Tickers follow the B3 convention of a company code followed by a single
/// share-class digit, e.g. `PETR3` (common) and `PETR4` (preferred).
pub type Ticker = String;

/// Direction of preference for an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Larger values are better (e.g. return on equity).
    HigherIsBetter,
    /// Smaller values are better (e.g. price/earnings).
    LowerIsBetter,
}

/// A fundamental indicator tracked by the scoring model.
///
/// The first fourteen variants are "traditional" indicators compared against
/// a subsector average; [`Indicator::GrahamMargin`] and
/// [`Indicator::BarsiMargin`] are individual opportunity signals taken from
/// the ceiling-price methodologies and are never averaged across a group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Indicator {
    /// Price / trailing earnings per share.
    PriceEarnings,
    /// Price / book value per share.
    PriceBook,
    /// Enterprise value / EBITDA.
    EvEbitda,
    /// Trailing dividend yield, in percent.
    DividendYield,
    /// Return on equity, in percent.
    ReturnOnEquity,
    /// Return on invested capital, in percent.
    ReturnOnInvestedCapital,
    /// Net profit margin, in percent.
    NetMargin,
    /// EBIT margin, in percent.
    EbitMargin,
    /// Five-year revenue growth, in percent.
    RevenueGrowth,
    /// Trailing twelve-month profit growth, in percent.
    ProfitGrowth,
    /// Earnings per share.
    EarningsPerShare,
    /// Net debt / EBITDA.
    NetDebtEbitda,
    /// Gross debt / shareholder equity.
    DebtToEquity,
    /// EBIT / total assets, in percent.
    EbitOverAssets,
    /// Margin of safety against the Graham number, in percent.
    GrahamMargin,
    /// Margin of safety against the Barsi ceiling price, in percent.
    BarsiMargin,
}

impl Indicator {
    /// Every indicator known to the framework, in display order.
    pub const ALL: [Self; 16] = [
        Self::PriceEarnings,
        Self::PriceBook,
        Self::EvEbitda,
        Self::DividendYield,
        Self::ReturnOnEquity,
        Self::ReturnOnInvestedCapital,
        Self::NetMargin,
        Self::EbitMargin,
        Self::RevenueGrowth,
        Self::ProfitGrowth,
        Self::EarningsPerShare,
        Self::NetDebtEbitda,
        Self::DebtToEquity,
        Self::EbitOverAssets,
        Self::GrahamMargin,
        Self::BarsiMargin,
    ];

    /// Human-readable label used in tables and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PriceEarnings => "P/E",
            Self::PriceBook => "P/B",
            Self::EvEbitda => "EV/EBITDA",
            Self::DividendYield => "Dividend Yield",
            Self::ReturnOnEquity => "ROE",
            Self::ReturnOnInvestedCapital => "ROIC",
            Self::NetMargin => "Net Margin",
            Self::EbitMargin => "EBIT Margin",
            Self::RevenueGrowth => "Revenue Growth (5y)",
            Self::ProfitGrowth => "Profit Growth (12m)",
            Self::EarningsPerShare => "EPS",
            Self::NetDebtEbitda => "Net Debt/EBITDA",
            Self::DebtToEquity => "Debt/Equity",
            Self::EbitOverAssets => "EBIT/Assets",
            Self::GrahamMargin => "Graham Margin",
            Self::BarsiMargin => "Barsi Margin",
        }
    }

    /// Whether this indicator is a ceiling-price margin of safety.
    ///
    /// Margin indicators are individual opportunity signals: they bypass the
    /// group-relative comparison and are never subject to outlier removal.
    #[must_use]
    pub const fn is_ceiling_margin(&self) -> bool {
        matches!(self, Self::GrahamMargin | Self::BarsiMargin)
    }
}

/// Traditional fundamental indicators for one security.
///
/// Every field is optional: the upstream snapshot is sparse and a missing
/// figure must stay missing rather than default to zero, so that scoring can
/// account for it through the completeness fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Price / earnings.
    pub price_earnings: Option<f64>,
    /// Price / book value.
    pub price_book: Option<f64>,
    /// Enterprise value / EBITDA.
    pub ev_ebitda: Option<f64>,
    /// Dividend yield, percent.
    pub dividend_yield: Option<f64>,
    /// Return on equity, percent.
    pub return_on_equity: Option<f64>,
    /// Return on invested capital, percent.
    pub return_on_invested_capital: Option<f64>,
    /// Net margin, percent.
    pub net_margin: Option<f64>,
    /// EBIT margin, percent.
    pub ebit_margin: Option<f64>,
    /// Five-year revenue growth, percent.
    pub revenue_growth: Option<f64>,
    /// Trailing twelve-month profit growth, percent.
    pub profit_growth: Option<f64>,
    /// Net debt / EBITDA.
    pub net_debt_ebitda: Option<f64>,
    /// Gross debt / equity.
    pub debt_to_equity: Option<f64>,
    /// EBIT / total assets, percent.
    pub ebit_over_assets: Option<f64>,
}

/// Margins of safety produced by the ceiling-price methodologies.
///
/// Each value is a percentage: positive means the current price sits below
/// the computed fair-value ceiling (undervalued), negative means above it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationMargins {
    /// Margin against the Graham number.
    pub graham: Option<f64>,
    /// Margin against the Barsi ceiling price.
    pub barsi: Option<f64>,
    /// Margin against the subsector-average P/E target price.
    pub pe_discount: Option<f64>,
}

/// One traded security with its normalized fundamentals.
///
/// All numeric fields are already parsed and scale-corrected by the data
/// provider; `None` means the source had no usable figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Security {
    /// Ticker, e.g. `PETR4`.
    pub ticker: Ticker,
    /// Company trade name.
    pub company_name: String,
    /// Industry subsector used for peer grouping.
    pub subsector: Option<String>,
    /// Last traded price.
    pub price: Option<f64>,
    /// Shares outstanding for this class.
    pub share_count: Option<f64>,
    /// Market capitalization as reported by the source.
    pub market_cap: Option<f64>,
    /// Average daily traded volume over two months.
    pub liquidity: Option<f64>,
    /// Earnings per share (LPA).
    pub earnings_per_share: Option<f64>,
    /// Book value per share (VPA).
    pub book_value_per_share: Option<f64>,
    /// Historical average payout ratio, as a fraction.
    pub average_payout: Option<f64>,
    /// Consolidated average P/E of this security's subsector.
    pub sector_pe: Option<f64>,
    /// Traditional fundamental indicators.
    pub fundamentals: Fundamentals,
    /// Ceiling-price margins of safety.
    pub margins: ValuationMargins,
}

impl Security {
    /// Create an empty security with the given ticker.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Look up the value of an indicator on this security.
    ///
    /// Non-finite values are treated as absent.
    #[must_use]
    pub fn indicator(&self, indicator: Indicator) -> Option<f64> {
        let value = match indicator {
            Indicator::PriceEarnings => self.fundamentals.price_earnings,
            Indicator::PriceBook => self.fundamentals.price_book,
            Indicator::EvEbitda => self.fundamentals.ev_ebitda,
            Indicator::DividendYield => self.fundamentals.dividend_yield,
            Indicator::ReturnOnEquity => self.fundamentals.return_on_equity,
            Indicator::ReturnOnInvestedCapital => {
                self.fundamentals.return_on_invested_capital
            }
            Indicator::NetMargin => self.fundamentals.net_margin,
            Indicator::EbitMargin => self.fundamentals.ebit_margin,
            Indicator::RevenueGrowth => self.fundamentals.revenue_growth,
            Indicator::ProfitGrowth => self.fundamentals.profit_growth,
            Indicator::EarningsPerShare => self.earnings_per_share,
            Indicator::NetDebtEbitda => self.fundamentals.net_debt_ebitda,
            Indicator::DebtToEquity => self.fundamentals.debt_to_equity,
            Indicator::EbitOverAssets => self.fundamentals.ebit_over_assets,
            Indicator::GrahamMargin => self.margins.graham,
            Indicator::BarsiMargin => self.margins.barsi,
        };
        value.filter(|v| v.is_finite())
    }
}

/// An immutable snapshot of the security universe at a point in time.
///
/// The universe is the input to every analysis step; transforms such as
/// attaching sector P/E references or valuation margins produce a new
/// universe rather than mutating this one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    as_of: Option<Date>,
    securities: Vec<Security>,
}

impl Universe {
    /// Create a universe from a snapshot date and its securities.
    #[must_use]
    pub const fn new(as_of: Option<Date>, securities: Vec<Security>) -> Self {
        Self { as_of, securities }
    }

    /// The snapshot date, if known.
    #[must_use]
    pub const fn as_of(&self) -> Option<Date> {
        self.as_of
    }

    /// The securities in this snapshot.
    #[must_use]
    pub fn securities(&self) -> &[Security] {
        &self.securities
    }

    /// Iterate over the securities.
    pub fn iter(&self) -> std::slice::Iter<'_, Security> {
        self.securities.iter()
    }

    /// Number of securities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// Whether the universe holds no securities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    /// The distinct subsector names present, sorted.
    #[must_use]
    pub fn subsectors(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .securities
            .iter()
            .filter_map(|s| s.subsector.as_deref())
            .collect();
        set.into_iter().collect()
    }

    /// Produce a new universe keeping only securities matching `keep`.
    #[must_use]
    pub fn filtered(&self, keep: impl Fn(&Security) -> bool) -> Self {
        Self {
            as_of: self.as_of,
            securities: self.securities.iter().filter(|s| keep(s)).cloned().collect(),
        }
    }

    /// Produce a new universe by transforming every security.
    #[must_use]
    pub fn map(&self, transform: impl Fn(Security) -> Security) -> Self {
        Self {
            as_of: self.as_of,
            securities: self.securities.iter().cloned().map(transform).collect(),
        }
    }
}

impl From<Vec<Security>> for Universe {
    fn from(securities: Vec<Security>) -> Self {
        Self::new(None, securities)
    }
}

impl<'a> IntoIterator for &'a Universe {
    type Item = &'a Security;
    type IntoIter = std::slice::Iter<'a, Security>;

    fn into_iter(self) -> Self::IntoIter {
        self.securities.iter()
    }
}
