//! Weighted scoring model for ranking companies on their fundamentals.
//!
//! This crate turns a snapshot of normalized securities into a single
//! comparable ranking:
//!
//! 1. Share classes are consolidated per company and a reference P/E is
//!    derived per subsector (the `consolidate` module).
//! 2. Each subsector group is cleaned of statistical outliers ([`outlier`]).
//! 3. Every company is scored against its group's market-cap-weighted
//!    reference averages under two penalty regimes ([`scorer`]).
//! 4. The engine aggregates and sorts the full universe ([`engine`]).
//!
//! # Example
//!
//! ```
//! use paraty_wsm::{WsmConfig, WsmEngine};
//! use paraty_traits::Universe;
//!
//! let engine = WsmEngine::new(WsmConfig::recommended()).unwrap();
//! let ranking = engine.rank(&Universe::default());
//! assert!(ranking.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod config;
pub mod consolidate;
pub mod engine;
pub mod outlier;
pub mod scorer;

// Re-export main types
pub use config::{IndicatorCategory, IndicatorSpec, WsmConfig, category_of};
pub use consolidate::{
    ConsolidateConfig, PeMethod, SectorPe, SectorPeTable, company_code, consolidate,
    with_sector_pe,
};
pub use engine::{Ranking, ScoredCompany, SubsectorReference, WsmEngine};
pub use outlier::filter_group;
pub use scorer::{CompanyScore, clamp_ceiling_margin, relative_margin, score_security};
