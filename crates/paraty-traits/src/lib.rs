#![doc(issue_tracker_base_url = "https://github.com/paraty-research/paraty/issues/")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the Paraty fundamental ranking framework.
//!
//! This crate provides the foundational data model shared by the analysis
//! crates: the [`Security`] record and its indicators, the
//! [`CeilingPrice`] methodology trait, the common error type, and the
//! statistics helpers used for group-level reference values.

/// The version of the paraty-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod method;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{ParatyError, Result};
pub use method::{Appraisal, CeilingPrice};
pub use types::{
    Date, Direction, Fundamentals, Indicator, Security, Ticker, Universe, ValuationMargins,
};
