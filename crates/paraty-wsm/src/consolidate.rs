//! Subsector consolidation.
//!
//! Multiple share classes of one issuer (e.g. `PETR3`/`PETR4`) must count as
//! a single company before subsector statistics are taken, otherwise large
//! multi-class issuers are double counted. Consolidation collapses classes
//! into one P/E and one aggregate market cap per company, then derives a
//! market-cap-weighted average P/E per subsector.

use paraty_traits::stats::{mean, round_dp, weighted_mean};
use paraty_traits::{Security, Universe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The company code shared by all share classes of one issuer.
///
/// Assumes the B3 convention of a single trailing class character
/// (`PETR3` → `PETR`). Tickers carrying multi-character suffixes (unit
/// classes such as `TAEE11`) group under a code that still contains part of
/// the suffix; callers needing a different convention should swap this
/// function rather than touch the consolidation logic.
#[must_use]
pub fn company_code(ticker: &str) -> &str {
    match ticker.char_indices().last() {
        Some((index, _)) => &ticker[..index],
        None => ticker,
    }
}

/// How a subsector's reference P/E was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeMethod {
    /// Only one consolidated company in the subsector.
    SingleEntity,
    /// Market-cap-weighted mean over two or more companies.
    Weighted,
    /// Plain mean, weighting disabled by configuration.
    Simple,
    /// Plain mean, fell back because market caps were unusable.
    Fallback,
    /// No company in the subsector had a usable P/E.
    NoData,
}

impl PeMethod {
    /// Short label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleEntity => "single entity",
            Self::Weighted => "weighted",
            Self::Simple => "simple",
            Self::Fallback => "simple (fallback)",
            Self::NoData => "no data",
        }
    }
}

/// Reference P/E of one subsector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorPe {
    /// The consolidated average P/E, rounded to two decimals. `None` when no
    /// company in the subsector had a usable P/E.
    pub average: Option<f64>,
    /// How the average was computed.
    pub method: PeMethod,
    /// Number of consolidated companies that contributed a P/E.
    pub companies: usize,
}

/// Reference P/E per subsector, keyed by subsector name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorPeTable {
    entries: BTreeMap<String, SectorPe>,
}

impl SectorPeTable {
    /// The entry for `subsector`, if the subsector appeared in the universe.
    #[must_use]
    pub fn get(&self, subsector: &str) -> Option<&SectorPe> {
        self.entries.get(subsector)
    }

    /// The reference P/E for `subsector`, flattening the no-data case.
    #[must_use]
    pub fn pe(&self, subsector: &str) -> Option<f64> {
        self.entries.get(subsector).and_then(|entry| entry.average)
    }

    /// Iterate over all subsectors in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectorPe)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of subsectors in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Configuration for subsector consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidateConfig {
    /// Weight the subsector average by aggregate company market cap.
    pub weight_by_market_cap: bool,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            weight_by_market_cap: true,
        }
    }
}

/// One issuer collapsed across its share classes.
#[derive(Debug, Clone)]
struct CompanyAggregate {
    subsector: String,
    pe: f64,
    market_cap: f64,
}

/// Which market-cap source the universe provides.
///
/// The choice is made once for the whole snapshot: mixing sources across
/// companies would weight them on incomparable figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapSource {
    PriceTimesShares,
    Reported,
    None,
}

fn cap_source(universe: &Universe) -> CapSource {
    if universe
        .iter()
        .any(|s| s.price.is_some() && s.share_count.is_some())
    {
        CapSource::PriceTimesShares
    } else if universe.iter().any(|s| s.market_cap.is_some()) {
        CapSource::Reported
    } else {
        CapSource::None
    }
}

/// Aggregate market cap of one company across its share classes.
///
/// Sums `price × share_count` (or the reported market caps) over the
/// classes; a company whose classes carry no figure aggregates to 0, which
/// later disqualifies the weighted average for its subsector. When the whole
/// universe lacks cap data every company gets the constant weight 1, so
/// averaging degrades to unweighted rather than failing.
fn aggregate_market_cap(classes: &[&Security], source: CapSource) -> f64 {
    match source {
        CapSource::PriceTimesShares => classes
            .iter()
            .filter_map(|s| Some(s.price? * s.share_count?))
            .sum(),
        CapSource::Reported => classes.iter().filter_map(|s| s.market_cap).sum(),
        CapSource::None => 1.0,
    }
}

/// Consolidate the universe into one reference P/E per subsector.
///
/// Securities without a subsector are excluded entirely. Grouping into
/// companies uses exact string equality on [`company_code`].
#[must_use]
pub fn consolidate(universe: &Universe, config: &ConsolidateConfig) -> SectorPeTable {
    // Group share classes by company code, keeping only grouped securities.
    let mut by_company: BTreeMap<&str, Vec<&Security>> = BTreeMap::new();
    for security in universe {
        if security.subsector.is_some() {
            by_company
                .entry(company_code(&security.ticker))
                .or_default()
                .push(security);
        }
    }

    // Collapse each company to one P/E and one aggregate market cap.
    let source = cap_source(universe);
    let mut companies: Vec<CompanyAggregate> = Vec::with_capacity(by_company.len());
    for classes in by_company.values() {
        let pes: Vec<f64> = classes
            .iter()
            .filter_map(|s| s.fundamentals.price_earnings)
            .collect();
        let Some(pe) = mean(&pes) else { continue };
        let Some(subsector) = classes.iter().find_map(|s| s.subsector.clone()) else {
            continue;
        };

        companies.push(CompanyAggregate {
            subsector,
            pe,
            market_cap: aggregate_market_cap(classes, source),
        });
    }

    let mut by_subsector: BTreeMap<&str, Vec<&CompanyAggregate>> = BTreeMap::new();
    for company in &companies {
        by_subsector
            .entry(company.subsector.as_str())
            .or_default()
            .push(company);
    }

    let mut entries = BTreeMap::new();
    for (subsector, group) in &by_subsector {
        let pes: Vec<f64> = group.iter().map(|c| c.pe).collect();
        let caps: Vec<f64> = group.iter().map(|c| c.market_cap).collect();
        entries.insert((*subsector).to_string(), sector_average(&pes, &caps, config));
    }

    // Subsectors whose companies all lacked a P/E still get an entry, so the
    // no-data condition is visible rather than silently absent.
    for subsector in universe.subsectors() {
        entries.entry(subsector.to_string()).or_insert(SectorPe {
            average: None,
            method: PeMethod::NoData,
            companies: 0,
        });
    }

    SectorPeTable { entries }
}

fn sector_average(pes: &[f64], caps: &[f64], config: &ConsolidateConfig) -> SectorPe {
    let companies = pes.len();

    let (average, method) = if companies == 0 {
        (None, PeMethod::NoData)
    } else if companies == 1 {
        (Some(pes[0]), PeMethod::SingleEntity)
    } else if config.weight_by_market_cap {
        let caps_usable = caps.iter().all(|c| c.is_finite() && *c > 0.0);
        if caps_usable {
            (weighted_mean(pes, caps), PeMethod::Weighted)
        } else {
            (mean(pes), PeMethod::Fallback)
        }
    } else {
        (mean(pes), PeMethod::Simple)
    };

    SectorPe {
        average: average.map(|a| round_dp(a, 2)),
        method,
        companies,
    }
}

/// Attach each security's subsector reference P/E, producing new records.
#[must_use]
pub fn with_sector_pe(universe: &Universe, table: &SectorPeTable) -> Universe {
    universe.map(|mut security| {
        security.sector_pe = security
            .subsector
            .as_deref()
            .and_then(|subsector| table.pe(subsector));
        security
    })
}
