//! Graham number ceiling price.

use paraty_traits::stats::round_dp;
use paraty_traits::{CeilingPrice, Security};
use serde::{Deserialize, Serialize};

/// Configuration for the Graham number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahamConfig {
    /// Product of Graham's maximum P/E of 15 and maximum P/B of 1.5
    /// (default: 22.5).
    pub multiplier: f64,
}

impl Default for GrahamConfig {
    fn default() -> Self {
        Self { multiplier: 22.5 }
    }
}

/// Benjamin Graham's fair-value ceiling: `√(multiplier × EPS × BVPS)`.
///
/// Requires strictly positive earnings and book value per share; a company
/// with losses or negative equity has no Graham number.
///
/// # Example
///
/// ```
/// use paraty_methods::GrahamNumber;
/// use paraty_traits::{CeilingPrice, Security};
///
/// let mut sec = Security::new("PETR4");
/// sec.earnings_per_share = Some(4.0);
/// sec.book_value_per_share = Some(10.0);
///
/// // √(22.5 × 4 × 10) = 30.0
/// assert_eq!(GrahamNumber::default().ceiling_price(&sec), Some(30.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrahamNumber {
    config: GrahamConfig,
}

impl GrahamNumber {
    /// Create a Graham number calculator with the given configuration.
    #[must_use]
    pub const fn new(config: GrahamConfig) -> Self {
        Self { config }
    }

    /// The configured multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.config.multiplier
    }
}

impl CeilingPrice for GrahamNumber {
    fn name(&self) -> &str {
        "graham"
    }

    fn ceiling_price(&self, security: &Security) -> Option<f64> {
        let eps = security.earnings_per_share.filter(|v| *v > 0.0)?;
        let bvps = security.book_value_per_share.filter(|v| *v > 0.0)?;

        let squared = self.config.multiplier * eps * bvps;
        if !squared.is_finite() || squared < 0.0 {
            return None;
        }

        Some(round_dp(squared.sqrt(), 2))
    }
}
