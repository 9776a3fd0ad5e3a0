#![doc(issue_tracker_base_url = "https://github.com/paraty-research/paraty/issues/")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # paraty
//!
//! Fundamental ranking engine for B3 equities.
//!
//! paraty is an umbrella crate that re-exports all paraty sub-crates for
//! convenience. It combines several independent valuation methodologies into
//! one comparable score per company through a weighted scoring model.
//!
//! ## Quick Start
//!
//! ```
//! use paraty::methods::apply_margins;
//! use paraty::wsm::{WsmConfig, WsmEngine, consolidate, with_sector_pe, ConsolidateConfig};
//! use paraty::types::Universe;
//!
//! # fn main() -> paraty::Result<()> {
//! let universe = Universe::default();
//!
//! // Derive subsector reference P/Es and attach them to each security
//! let table = consolidate(&universe, &ConsolidateConfig::default());
//! let universe = with_sector_pe(&universe, &table);
//!
//! // Stamp the three ceiling-price margins
//! let universe = apply_margins(&universe);
//!
//! // Score and rank
//! let engine = WsmEngine::new(WsmConfig::recommended())?;
//! let ranking = engine.rank(&universe);
//! assert!(ranking.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core data model ([`Security`], [`Universe`], the
//!   [`CeilingPrice`] trait)
//! - [`methods`] - Ceiling-price valuation methodologies (Graham, Barsi,
//!   discounted P/E)
//! - [`wsm`] - The weighted scoring model: consolidation, outlier removal,
//!   scoring, ranking
//! - [`fundamentus`] - Snapshot provider: normalization, quality screen,
//!   download and cache
//!
//! ## Architecture
//!
//! paraty follows a strict pipeline:
//!
//! 1. The **provider** normalizes the raw snapshot into typed securities
//! 2. **Consolidation** collapses share classes and derives subsector P/Es
//! 3. **Methodologies** stamp each security with its margins of safety
//! 4. The **engine** filters outliers per subsector, scores every company
//!    against its peers, and sorts the full universe

/// Version information for the paraty crate.
///
/// This constant contains the current version of paraty as specified in
/// Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core data model for paraty.
///
/// This module re-exports the foundational types that define the paraty API:
///
/// - [`Security`] - One traded instrument with normalized fundamentals
/// - [`Universe`] - An immutable snapshot of all securities
/// - [`CeilingPrice`] - Trait for fair-value ceiling methodologies
/// - [`Indicator`] - The fundamental indicators known to the model
pub mod types {
    pub use paraty_traits::*;
}

/// Core trait definitions (alias of [`types`], matching the sub-crate name).
pub mod traits {
    pub use paraty_traits::*;
}

// Re-export core types at top level for convenience
pub use paraty_traits::{Appraisal, CeilingPrice, Indicator, Security, Universe};

// Re-export error types
pub use paraty_traits::{ParatyError, Result};

// ============================================================================
// Valuation Methodologies
// ============================================================================

/// Ceiling-price valuation methodologies.
///
/// ## Available Methodologies
///
/// - **GrahamNumber**: `√(22.5 × EPS × BVPS)` fair-value ceiling
/// - **BarsiCeiling**: expected dividend per share over a target yield
/// - **DiscountedPe**: target price at the subsector's average multiple
///
/// # Example
///
/// ```
/// use paraty::methods::GrahamNumber;
/// use paraty::{CeilingPrice, Security};
///
/// let mut sec = Security::new("PETR4");
/// sec.earnings_per_share = Some(4.0);
/// sec.book_value_per_share = Some(10.0);
///
/// assert_eq!(GrahamNumber::default().ceiling_price(&sec), Some(30.0));
/// ```
pub mod methods {
    pub use paraty_methods::*;
}

// ============================================================================
// Weighted Scoring Model
// ============================================================================

/// The weighted scoring model.
///
/// ## Key Components
///
/// - **WsmConfig**: explicit indicator weight table, validated once
/// - **consolidate**: share-class consolidation and subsector P/E references
/// - **filter_group**: interquartile-range outlier removal
/// - **WsmEngine**: full scoring run producing a sorted [`wsm::Ranking`]
///
/// The engine produces two score variants per company in a single pass: a
/// truncated composite where underperformance earns zero, and a signed
/// composite where it subtracts. Both carry a completeness fraction, and
/// companies below 60% completeness are scaled down by it.
pub mod wsm {
    pub use paraty_wsm::*;
}

// ============================================================================
// Data Provider
// ============================================================================

/// Fundamentus snapshot provider.
///
/// Turns the raw full-market export (localized numerals, ×10/×100 column
/// encodings, semicolon delimiters) into a typed [`Universe`], with a
/// per-day download cache.
///
/// ## Setup
///
/// Set the `FUNDAMENTUS_SNAPSHOT_URL` environment variable or add it to a
/// `.env` file.
pub mod fundamentus {
    pub use paraty_fundamentus::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types for working with
/// paraty. Import it with:
///
/// ```
/// use paraty::prelude::*;
/// ```
pub mod prelude {
    pub use paraty_methods::{BarsiCeiling, DiscountedPe, GrahamNumber, apply_margins};
    pub use paraty_traits::{
        Appraisal, CeilingPrice, Indicator, ParatyError, Result, Security, Universe,
    };
    pub use paraty_wsm::{
        ConsolidateConfig, Ranking, ScoredCompany, WsmConfig, WsmEngine, consolidate,
        with_sector_pe,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        // Version should be in semver format (x.y.z)
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        // This test verifies that all re-exports compile correctly
        // by using them in type annotations

        fn _accept_method(_method: &dyn CeilingPrice) {}
        fn _accept_security(_security: &Security) {}
        fn _accept_universe(_universe: &Universe) {}

        // If this compiles, re-exports are working
    }

    #[test]
    fn test_error_types() {
        // Verify Result type works
        let _result: Result<()> = Ok(());

        // Verify error conversion works
        let _error: ParatyError = ParatyError::InvalidConfig("test".to_string());
    }

    #[test]
    fn test_full_pipeline_on_empty_universe() {
        let universe = Universe::default();
        let table = wsm::consolidate(&universe, &wsm::ConsolidateConfig::default());
        let universe = wsm::with_sector_pe(&universe, &table);
        let universe = methods::apply_margins(&universe);

        let engine = wsm::WsmEngine::new(wsm::WsmConfig::recommended()).unwrap();
        let ranking = engine.rank(&universe);
        assert!(ranking.is_empty());
        assert!(ranking.skipped_subsectors().is_empty());
    }
}
