//! Statistical utility functions for group-level reference values.
//!
//! This module provides the small set of statistics the scoring pipeline
//! relies on: arithmetic and weighted means, interpolated quantiles, and the
//! interquartile-range fences used for outlier removal.

/// Fence multiplier for the interquartile-range outlier rule.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Arithmetic mean of the finite values in `values`.
///
/// Non-finite entries are skipped; returns `None` when nothing remains.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Weighted mean of `values` with the given `weights`.
///
/// Pairs are included only when both the value and the weight are finite and
/// the weight is strictly positive. Returns `None` when the slices differ in
/// length or no pair qualifies.
///
/// # Examples
///
/// ```
/// use paraty_traits::stats::weighted_mean;
///
/// let avg = weighted_mean(&[10.0, 20.0], &[100.0, 300.0]).unwrap();
/// assert!((avg - 17.5).abs() < 1e-10);
/// ```
#[must_use]
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Option<f64> {
    if values.len() != weights.len() {
        return None;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (&v, &w) in values.iter().zip(weights) {
        if v.is_finite() && w.is_finite() && w > 0.0 {
            weighted_sum += v * w;
            weight_total += w;
        }
    }

    (weight_total > 0.0).then(|| weighted_sum / weight_total)
}

/// Quantile of the finite values in `values`, with linear interpolation
/// between adjacent order statistics.
///
/// `q` must lie in `[0, 1]`. Returns `None` for an empty input or an
/// out-of-range `q`.
///
/// # Examples
///
/// ```
/// use paraty_traits::stats::quantile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&values, 0.25), Some(1.75));
/// assert_eq!(quantile(&values, 0.5), Some(2.5));
/// ```
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);

    let position = q * (finite.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    if lower == upper {
        return Some(finite[lower]);
    }

    let fraction = position - lower as f64;
    Some(finite[lower] + (finite[upper] - finite[lower]) * fraction)
}

/// Lower and upper bounds outside which a value counts as an outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    /// Values below this bound are outliers.
    pub lower: f64,
    /// Values above this bound are outliers.
    pub upper: f64,
}

impl Fences {
    /// Whether `value` lies inside the fences (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Interquartile-range fences `[Q1 - k*IQR, Q3 + k*IQR]` for the finite
/// values in `values`.
///
/// Returns `None` when the input has no finite values or when the
/// interquartile range is zero: a group with no spread carries no outlier
/// information and must not be filtered on.
#[must_use]
pub fn iqr_fences(values: &[f64], k: f64) -> Option<Fences> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;

    if iqr <= 0.0 {
        return None;
    }

    Some(Fences {
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    })
}

/// Round `value` to `decimals` decimal places.
#[must_use]
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_basic() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_mean_skips_non_finite() {
        assert_relative_eq!(mean(&[1.0, f64::NAN, 3.0]).unwrap(), 2.0);
        assert!(mean(&[f64::NAN, f64::INFINITY]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_weighted_mean_basic() {
        // Two companies with caps 100 and 300 and P/Es 10 and 20.
        let avg = weighted_mean(&[10.0, 20.0], &[100.0, 300.0]).unwrap();
        assert_relative_eq!(avg, 17.5);
    }

    #[test]
    fn test_weighted_mean_skips_invalid_pairs() {
        let avg = weighted_mean(&[10.0, 20.0, 30.0], &[1.0, f64::NAN, 0.0]).unwrap();
        assert_relative_eq!(avg, 10.0);
    }

    #[test]
    fn test_weighted_mean_degenerate() {
        assert!(weighted_mean(&[], &[]).is_none());
        assert!(weighted_mean(&[1.0], &[0.0]).is_none());
        assert!(weighted_mean(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&values, 0.25).unwrap(), 1.75);
        assert_relative_eq!(quantile(&values, 0.75).unwrap(), 3.25);
        assert_relative_eq!(quantile(&values, 0.0).unwrap(), 1.0);
        assert_relative_eq!(quantile(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_quantile_unsorted_input() {
        let values = vec![4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(quantile(&values, 0.5).unwrap(), 2.5);
    }

    #[test]
    fn test_quantile_edge_cases() {
        assert!(quantile(&[], 0.5).is_none());
        assert!(quantile(&[1.0], 1.5).is_none());
        assert_relative_eq!(quantile(&[42.0], 0.5).unwrap(), 42.0);
    }

    #[test]
    fn test_iqr_fences_flags_extreme_value() {
        let values = vec![10.0, 11.0, 12.0, 13.0, 1000.0];
        let fences = iqr_fences(&values, IQR_MULTIPLIER).unwrap();

        assert!(fences.contains(10.0));
        assert!(fences.contains(13.0));
        assert!(!fences.contains(1000.0));
    }

    #[test]
    fn test_iqr_fences_zero_spread() {
        assert!(iqr_fences(&[5.0, 5.0, 5.0, 5.0], IQR_MULTIPLIER).is_none());
        assert!(iqr_fences(&[], IQR_MULTIPLIER).is_none());
    }

    #[test]
    fn test_round_dp() {
        assert_relative_eq!(round_dp(17.456, 2), 17.46);
        assert_relative_eq!(round_dp(0.123456, 5), 0.12346);
        assert_relative_eq!(round_dp(-3.14159, 2), -3.14);
    }
}
