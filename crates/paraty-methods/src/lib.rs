//! Ceiling-price valuation methodologies for the Paraty ranking framework.
//!
//! This crate provides the single-formula fair-value calculators whose
//! margins of safety feed the weighted scoring model:
//! - Graham number: `√(22.5 × EPS × BVPS)`
//! - Barsi ceiling: expected dividend per share over a target yield
//! - Discounted P/E: target price at the subsector's average multiple
//!
//! Each implements [`paraty_traits::CeilingPrice`] and answers `None` when a
//! security fails its preconditions.
//!
//! # Example
//!
//! ```
//! use paraty_methods::{GrahamNumber, available_methods};
//! use paraty_traits::{CeilingPrice, Security};
//!
//! let mut sec = Security::new("PETR4");
//! sec.price = Some(24.0);
//! sec.earnings_per_share = Some(2.5);
//! sec.book_value_per_share = Some(16.0);
//!
//! let appraisal = GrahamNumber::default().appraise(&sec).unwrap();
//! assert_eq!(appraisal.margin_pct, 25.0);
//!
//! assert_eq!(available_methods().len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

mod barsi;
mod discounted_pe;
mod graham;
mod margins;
pub mod registry;

// Re-export key types
pub use barsi::{BarsiCeiling, BarsiConfig};
pub use discounted_pe::DiscountedPe;
pub use graham::{GrahamConfig, GrahamNumber};
pub use margins::apply_margins;
pub use registry::{MethodInfo, available_methods, get_method_info};
