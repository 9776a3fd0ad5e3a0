//! Interquartile-range outlier removal.
//!
//! Group reference averages are only meaningful when a handful of extreme
//! readings cannot drag them around, so each traditional indicator is fenced
//! at `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]` before averages are taken. The
//! ceiling-price margins are exempt: they are individual opportunity
//! signals, and removing their extremes would discard exactly the companies
//! the ranking exists to surface.

use paraty_traits::stats::{Fences, IQR_MULTIPLIER, iqr_fences};
use paraty_traits::{Indicator, Security};

/// Remove outlier companies from one subsector group.
///
/// Walks `indicators` in order, skipping ceiling margins, and for each one
/// drops the companies whose value falls outside the IQR fences computed
/// over the current survivors. Passes are sequential: a company removed for
/// one indicator no longer contributes to the fences of the next.
///
/// Companies with no value for the indicator under test are retained: a
/// gap in the data is handled later through the completeness fraction, not
/// by exclusion here. Indicators whose values show no spread are skipped.
///
/// The returned vector may be empty; callers treat that as a group to skip,
/// not as an error.
#[must_use]
pub fn filter_group<'a>(
    group: &[&'a Security],
    indicators: impl IntoIterator<Item = Indicator>,
) -> Vec<&'a Security> {
    let mut survivors: Vec<&Security> = group.to_vec();

    for indicator in indicators {
        if indicator.is_ceiling_margin() {
            continue;
        }
        if survivors.is_empty() {
            break;
        }

        let values: Vec<f64> = survivors
            .iter()
            .filter_map(|s| s.indicator(indicator))
            .collect();

        let Some(fences) = iqr_fences(&values, IQR_MULTIPLIER) else {
            continue;
        };

        survivors.retain(|s| within(s, indicator, &fences));
    }

    survivors
}

fn within(security: &Security, indicator: Indicator, fences: &Fences) -> bool {
    security
        .indicator(indicator)
        .is_none_or(|value| fences.contains(value))
}
