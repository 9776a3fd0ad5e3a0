//! Error types for the Paraty framework.
//!
//! Almost every degenerate input in this system (missing figure, empty
//! group, zero denominator) is handled locally and never surfaces as an
//! error. The one condition that stops an analysis before it starts is a
//! structurally invalid scoring configuration; [`ParatyError::Other`] is the
//! generic escape hatch for callers building on the framework.

use thiserror::Error;

/// The main error type for Paraty operations.
#[derive(Debug, Error)]
pub enum ParatyError {
    /// The scoring configuration is structurally invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for ParatyError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ParatyError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Paraty operations.
///
/// This is a convenience type that uses [`ParatyError`] as the error type.
pub type Result<T> = std::result::Result<T, ParatyError>;
