//! Per-company weighted scoring.
//!
//! Each configured indicator contributes a normalized margin times its
//! weight; the composite is the weighted mean over the indicators the
//! company actually reports. Two normalizations are produced in the same
//! pass: a truncated variant where underperformance simply earns zero, and a
//! signed variant where it subtracts from the score.

use crate::config::WsmConfig;
use crate::engine::SubsectorReference;
use paraty_traits::{Direction, Security};
use serde::{Deserialize, Serialize};

/// Ceiling-margin values above this cap are clamped so that one extreme
/// opportunity cannot dominate the composite.
pub const MARGIN_CAP: f64 = 100.0;

/// Ceiling-margin values below this floor are clamped so that pathological
/// overvaluation cannot zero out an otherwise strong company.
pub const MARGIN_FLOOR: f64 = -50.0;

/// Below this completeness fraction the composite is scaled down by the
/// fraction itself: a company missing most of its fundamentals cannot rank
/// highly on the few it reports.
pub const COMPLETENESS_FLOOR: f64 = 0.6;

/// The scores of one company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyScore {
    /// Truncated composite: weak indicators contribute zero.
    pub score: f64,
    /// Signed composite: weak indicators subtract.
    pub score_with_penalty: f64,
    /// Fraction of the configured indicator weight backed by data, in
    /// `[0, 1]`.
    pub completeness: f64,
}

/// Margin of a company value relative to its group average, in percent.
///
/// An absent or zero group average carries no signal and yields 0.
#[must_use]
pub fn relative_margin(value: f64, group_average: Option<f64>) -> f64 {
    match group_average {
        Some(average) if average != 0.0 && average.is_finite() => {
            (value - average) / average.abs() * 100.0
        }
        _ => 0.0,
    }
}

/// Clamp a ceiling-price margin to `[MARGIN_FLOOR, MARGIN_CAP]`.
#[must_use]
pub fn clamp_ceiling_margin(margin: f64) -> f64 {
    margin.clamp(MARGIN_FLOOR, MARGIN_CAP)
}

/// Score one company against its subsector reference values.
///
/// Indicators the company lacks contribute to neither the weighted sum nor
/// the weight total; they lower the completeness fraction instead. A company
/// with no usable indicator at all scores `(0, 0)` with completeness 0.
#[must_use]
pub fn score_security(
    security: &Security,
    reference: &SubsectorReference,
    config: &WsmConfig,
) -> CompanyScore {
    let mut truncated_sum = 0.0;
    let mut signed_sum = 0.0;
    let mut applied_weight = 0.0;

    for (indicator, spec) in config.entries() {
        let Some(value) = security.indicator(*indicator) else {
            continue;
        };

        let margin = if indicator.is_ceiling_margin() {
            clamp_ceiling_margin(value)
        } else {
            relative_margin(value, reference.indicator_average(*indicator))
        };

        let signed = match spec.direction {
            Direction::HigherIsBetter => margin,
            Direction::LowerIsBetter => -margin,
        };

        truncated_sum += signed.max(0.0) * spec.weight;
        signed_sum += signed * spec.weight;
        applied_weight += spec.weight;
    }

    if applied_weight <= 0.0 {
        return CompanyScore::default();
    }

    let mut score = truncated_sum / applied_weight;
    let mut score_with_penalty = signed_sum / applied_weight;
    let completeness = applied_weight / config.total_weight();

    if completeness < COMPLETENESS_FLOOR {
        score *= completeness;
        score_with_penalty *= completeness;
    }

    CompanyScore {
        score,
        score_with_penalty,
        completeness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorSpec;
    use approx::assert_relative_eq;
    use paraty_traits::Indicator;
    use std::collections::BTreeMap;

    fn reference(averages: &[(Indicator, f64)]) -> SubsectorReference {
        SubsectorReference {
            subsector: "Test".to_string(),
            average_pe: None,
            pe_method: crate::consolidate::PeMethod::NoData,
            companies: averages.len(),
            indicator_averages: averages.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn two_indicator_config() -> WsmConfig {
        WsmConfig::new(vec![
            (
                Indicator::ReturnOnEquity,
                IndicatorSpec::new(Direction::HigherIsBetter, 0.5),
            ),
            (
                Indicator::PriceEarnings,
                IndicatorSpec::new(Direction::LowerIsBetter, 0.5),
            ),
        ])
    }

    #[test]
    fn test_relative_margin() {
        assert_relative_eq!(relative_margin(12.0, Some(10.0)), 20.0);
        assert_relative_eq!(relative_margin(8.0, Some(10.0)), -20.0);
        // Negative averages normalize by magnitude.
        assert_relative_eq!(relative_margin(-5.0, Some(-10.0)), 50.0);
    }

    #[test]
    fn test_relative_margin_degenerate_average() {
        assert_relative_eq!(relative_margin(12.0, None), 0.0);
        assert_relative_eq!(relative_margin(12.0, Some(0.0)), 0.0);
        assert_relative_eq!(relative_margin(12.0, Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_clamp_ceiling_margin() {
        assert_relative_eq!(clamp_ceiling_margin(250.0), 100.0);
        assert_relative_eq!(clamp_ceiling_margin(-90.0), -50.0);
        assert_relative_eq!(clamp_ceiling_margin(37.5), 37.5);
        assert_relative_eq!(clamp_ceiling_margin(-12.0), -12.0);
    }

    #[test]
    fn test_truncated_never_negative_signed_penalizes() {
        let config = two_indicator_config();
        let reference = reference(&[
            (Indicator::ReturnOnEquity, 10.0),
            (Indicator::PriceEarnings, 10.0),
        ]);

        // Below-average ROE (bad), below-average P/E (good).
        let mut sec = Security::new("TST3");
        sec.fundamentals.return_on_equity = Some(8.0);
        sec.fundamentals.price_earnings = Some(8.0);

        let result = score_security(&sec, &reference, &config);

        // Truncated: ROE contributes 0, P/E contributes +20 at weight 0.5.
        assert_relative_eq!(result.score, 10.0);
        // Signed: ROE contributes -20, P/E +20; they cancel.
        assert_relative_eq!(result.score_with_penalty, 0.0);
        assert_relative_eq!(result.completeness, 1.0);
    }

    #[test]
    fn test_missing_indicator_excluded_not_zeroed() {
        let config = two_indicator_config();
        let reference = reference(&[
            (Indicator::ReturnOnEquity, 10.0),
            (Indicator::PriceEarnings, 10.0),
        ]);

        let mut sec = Security::new("TST3");
        sec.fundamentals.return_on_equity = Some(15.0);

        let result = score_security(&sec, &reference, &config);

        // Only ROE applies: margin +50 over its own weight.
        assert_relative_eq!(result.score, 50.0);
        assert_relative_eq!(result.completeness, 0.5);
    }

    #[test]
    fn test_completeness_penalty_scales_score() {
        // completeness 0.5 < 0.6 and a raw score of 80 must land at 40.
        let config = WsmConfig::new(vec![
            (
                Indicator::GrahamMargin,
                IndicatorSpec::new(Direction::HigherIsBetter, 0.5),
            ),
            (
                Indicator::BarsiMargin,
                IndicatorSpec::new(Direction::HigherIsBetter, 0.5),
            ),
        ]);
        let reference = reference(&[]);

        let mut sec = Security::new("TST3");
        sec.margins.graham = Some(80.0);

        let result = score_security(&sec, &reference, &config);
        assert_relative_eq!(result.completeness, 0.5);
        assert_relative_eq!(result.score, 40.0);
        assert_relative_eq!(result.score_with_penalty, 40.0);
    }

    #[test]
    fn test_no_data_scores_zero() {
        let config = two_indicator_config();
        let reference = reference(&[]);
        let sec = Security::new("TST3");

        let result = score_security(&sec, &reference, &config);
        assert_relative_eq!(result.score, 0.0);
        assert_relative_eq!(result.score_with_penalty, 0.0);
        assert_relative_eq!(result.completeness, 0.0);
    }

    #[test]
    fn test_ceiling_margin_clamped_in_composite() {
        let config = WsmConfig::new(vec![(
            Indicator::GrahamMargin,
            IndicatorSpec::new(Direction::HigherIsBetter, 1.0),
        )]);
        let reference = reference(&[]);

        let mut sec = Security::new("TST3");
        sec.margins.graham = Some(250.0);
        let result = score_security(&sec, &reference, &config);
        assert_relative_eq!(result.score, 100.0);

        sec.margins.graham = Some(-90.0);
        let result = score_security(&sec, &reference, &config);
        assert_relative_eq!(result.score_with_penalty, -50.0);
        // Truncated mode floors the negative contribution at zero.
        assert_relative_eq!(result.score, 0.0);
    }

    #[test]
    fn test_missing_group_average_gives_no_signal() {
        let config = WsmConfig::new(vec![(
            Indicator::ReturnOnEquity,
            IndicatorSpec::new(Direction::HigherIsBetter, 1.0),
        )]);
        let reference = reference(&[]);

        let mut sec = Security::new("TST3");
        sec.fundamentals.return_on_equity = Some(30.0);

        let result = score_security(&sec, &reference, &config);
        assert_relative_eq!(result.score, 0.0);
        assert_relative_eq!(result.completeness, 1.0);
    }
}
