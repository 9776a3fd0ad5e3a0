//! Ranking engine.
//!
//! Orchestrates a full scoring run: group the universe by subsector, remove
//! outliers per group, derive the group reference values, score every
//! surviving company, and sort the result. The engine holds no state between
//! runs; every invocation recomputes all reference values from the input
//! snapshot.

use crate::config::WsmConfig;
use crate::consolidate::{ConsolidateConfig, PeMethod, SectorPeTable, consolidate};
use crate::outlier::filter_group;
use crate::scorer::{CompanyScore, score_security};
use paraty_traits::stats::weighted_mean;
use paraty_traits::{Indicator, Result, Security, Universe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference values of one subsector, derived fresh on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectorReference {
    /// Subsector name.
    pub subsector: String,
    /// Consolidated average P/E (share classes collapsed per company).
    pub average_pe: Option<f64>,
    /// How the average P/E was obtained.
    pub pe_method: PeMethod,
    /// Companies scored in this subsector after outlier removal.
    pub companies: usize,
    /// Market-cap-weighted mean of each traditional indicator over the
    /// outlier-filtered group. Indicators with no usable value are absent.
    pub indicator_averages: BTreeMap<Indicator, f64>,
}

impl SubsectorReference {
    /// The group average for `indicator`, if one could be computed.
    #[must_use]
    pub fn indicator_average(&self, indicator: Indicator) -> Option<f64> {
        self.indicator_averages.get(&indicator).copied()
    }
}

/// One company's ranking record. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCompany {
    /// Ticker.
    pub ticker: String,
    /// Company trade name.
    pub company_name: String,
    /// Subsector the company was scored in.
    pub subsector: String,
    /// Last traded price.
    pub price: Option<f64>,
    /// Reported market capitalization.
    pub market_cap: Option<f64>,
    /// Truncated composite score (ranking key).
    pub score: f64,
    /// Signed composite score (penalized view).
    pub score_with_penalty: f64,
    /// Fraction of configured indicator weight backed by data.
    pub completeness: f64,
    /// Graham margin of safety, percent.
    pub graham_margin: Option<f64>,
    /// Barsi margin of safety, percent.
    pub barsi_margin: Option<f64>,
    /// Discount to the subsector-P/E target price, percent.
    pub pe_discount: Option<f64>,
    /// Price/earnings at scoring time.
    pub price_earnings: Option<f64>,
    /// Return on equity, percent.
    pub return_on_equity: Option<f64>,
    /// Return on invested capital, percent.
    pub return_on_invested_capital: Option<f64>,
}

impl ScoredCompany {
    fn new(security: &Security, subsector: &str, score: CompanyScore) -> Self {
        Self {
            ticker: security.ticker.clone(),
            company_name: security.company_name.clone(),
            subsector: subsector.to_string(),
            price: security.price,
            market_cap: security.market_cap,
            score: score.score,
            score_with_penalty: score.score_with_penalty,
            completeness: score.completeness,
            graham_margin: security.margins.graham,
            barsi_margin: security.margins.barsi,
            pe_discount: security.margins.pe_discount,
            price_earnings: security.fundamentals.price_earnings,
            return_on_equity: security.fundamentals.return_on_equity,
            return_on_invested_capital: security.fundamentals.return_on_invested_capital,
        }
    }
}

/// The outcome of one scoring run: companies sorted by descending truncated
/// score, plus the subsectors that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    companies: Vec<ScoredCompany>,
    skipped_subsectors: Vec<String>,
}

impl Ranking {
    /// All scored companies, best first.
    #[must_use]
    pub fn companies(&self) -> &[ScoredCompany] {
        &self.companies
    }

    /// The top `n` companies (fewer if the ranking is shorter).
    #[must_use]
    pub fn top(&self, n: usize) -> &[ScoredCompany] {
        &self.companies[..n.min(self.companies.len())]
    }

    /// The companies re-sorted by the signed (penalized) score.
    #[must_use]
    pub fn by_penalty(&self) -> Vec<&ScoredCompany> {
        let mut view: Vec<&ScoredCompany> = self.companies.iter().collect();
        view.sort_by(|a, b| {
            b.score_with_penalty
                .total_cmp(&a.score_with_penalty)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        view
    }

    /// Subsectors skipped because outlier removal emptied them.
    #[must_use]
    pub fn skipped_subsectors(&self) -> &[String] {
        &self.skipped_subsectors
    }

    /// Tickers from `universe` that received no score, with outlier removal
    /// and missing subsectors being the usual causes.
    #[must_use]
    pub fn excluded_tickers<'a>(&self, universe: &'a Universe) -> Vec<&'a str> {
        universe
            .iter()
            .map(|s| s.ticker.as_str())
            .filter(|ticker| !self.companies.iter().any(|c| c.ticker == *ticker))
            .collect()
    }

    /// Number of scored companies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether no company was scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// The weighted-scoring-model ranking engine.
///
/// Construction validates the weight table once; a structurally invalid
/// configuration is the only fatal condition of the pipeline. Scoring itself
/// degrades locally: sparse or malformed figures lower individual
/// completeness fractions instead of aborting the run.
#[derive(Debug, Clone)]
pub struct WsmEngine {
    config: WsmConfig,
    consolidate: ConsolidateConfig,
}

impl WsmEngine {
    /// Create an engine with the given weight table.
    ///
    /// # Errors
    ///
    /// Returns [`paraty_traits::ParatyError::InvalidConfig`] when the table
    /// is empty, carries an invalid weight, or sums to zero.
    pub fn new(config: WsmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            consolidate: ConsolidateConfig::default(),
        })
    }

    /// Replace the consolidation settings.
    #[must_use]
    pub const fn with_consolidation(mut self, consolidate: ConsolidateConfig) -> Self {
        self.consolidate = consolidate;
        self
    }

    /// The validated weight table.
    #[must_use]
    pub const fn config(&self) -> &WsmConfig {
        &self.config
    }

    /// Score and rank every company in `universe`.
    ///
    /// Securities without a subsector are not scored. A subsector emptied by
    /// outlier removal is skipped and reported on the returned [`Ranking`].
    /// The output order depends only on scores and tickers, never on group
    /// processing order.
    #[must_use]
    pub fn rank(&self, universe: &Universe) -> Ranking {
        let pe_table = consolidate(universe, &self.consolidate);

        let mut companies = Vec::new();
        let mut skipped_subsectors = Vec::new();

        for (subsector, group) in group_by_subsector(universe) {
            let survivors = filter_group(
                &group,
                self.config.entries().iter().map(|(indicator, _)| *indicator),
            );
            if survivors.is_empty() {
                skipped_subsectors.push(subsector.to_string());
                continue;
            }

            let reference = self.reference_for(subsector, &survivors, &pe_table);
            for security in &survivors {
                let score = score_security(security, &reference, &self.config);
                companies.push(ScoredCompany::new(security, subsector, score));
            }
        }

        companies.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        Ranking {
            companies,
            skipped_subsectors,
        }
    }

    /// Derive the per-subsector reference statistics without scoring.
    ///
    /// This is the diagnostics surface: it reports, for every subsector, the
    /// consolidated average P/E and the post-outlier-removal indicator
    /// averages the scores would be computed against.
    #[must_use]
    pub fn sector_references(&self, universe: &Universe) -> BTreeMap<String, SubsectorReference> {
        let pe_table = consolidate(universe, &self.consolidate);

        let mut references = BTreeMap::new();
        for (subsector, group) in group_by_subsector(universe) {
            let survivors = filter_group(
                &group,
                self.config.entries().iter().map(|(indicator, _)| *indicator),
            );
            references.insert(
                subsector.to_string(),
                self.reference_for(subsector, &survivors, &pe_table),
            );
        }
        references
    }

    fn reference_for(
        &self,
        subsector: &str,
        survivors: &[&Security],
        pe_table: &SectorPeTable,
    ) -> SubsectorReference {
        let mut indicator_averages = BTreeMap::new();

        for indicator in self.config.traditional_indicators() {
            let mut values = Vec::with_capacity(survivors.len());
            let mut weights = Vec::with_capacity(survivors.len());
            for security in survivors {
                if let (Some(value), Some(cap)) = (security.indicator(indicator), security.market_cap)
                {
                    values.push(value);
                    weights.push(cap);
                }
            }
            if let Some(average) = weighted_mean(&values, &weights) {
                indicator_averages.insert(indicator, average);
            }
        }

        let entry = pe_table.get(subsector);
        SubsectorReference {
            subsector: subsector.to_string(),
            average_pe: entry.and_then(|e| e.average),
            pe_method: entry.map_or(PeMethod::NoData, |e| e.method),
            companies: survivors.len(),
            indicator_averages,
        }
    }
}

fn group_by_subsector(universe: &Universe) -> BTreeMap<&str, Vec<&Security>> {
    let mut groups: BTreeMap<&str, Vec<&Security>> = BTreeMap::new();
    for security in universe {
        if let Some(subsector) = security.subsector.as_deref() {
            groups.entry(subsector).or_default().push(security);
        }
    }
    groups
}
