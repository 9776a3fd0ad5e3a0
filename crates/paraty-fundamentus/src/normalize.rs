//! Raw value normalization.
//!
//! Fundamentus serves figures as localized text: decimal commas, dot
//! thousands separators, trailing percent signs, and a handful of sentinel
//! strings for "no data". On top of that the export encodes some columns at
//! a fixed multiple of their true value: P/E, EPS and book value per share
//! arrive ×100, percentage ratios arrive ×10. Parsing and the one-time scale
//! correction both live here so no other module ever sees a raw cell.

/// Sentinel strings the source uses for absent values.
const ABSENT_SENTINELS: [&str; 6] = ["-", "", "nan", "None", "NULL", "N/A"];

/// Parse one raw cell into a finite float.
///
/// Handles decimal-comma and decimal-point formats: when both `.` and `,`
/// appear, `.` is a thousands separator and `,` the decimal point; a lone
/// `,` is the decimal point. A trailing `%` is stripped before parsing.
/// Anything unparseable, including the source's absence sentinels and
/// non-finite results, maps to `None`, never to an error.
///
/// # Examples
///
/// ```
/// use paraty_fundamentus::normalize::parse_value;
///
/// assert_eq!(parse_value("1.234,56"), Some(1234.56));
/// assert_eq!(parse_value("12,5%"), Some(12.5));
/// assert_eq!(parse_value("3.14"), Some(3.14));
/// assert_eq!(parse_value("-"), None);
/// ```
#[must_use]
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if ABSENT_SENTINELS.contains(&trimmed) {
        return None;
    }

    let cleaned = if trimmed.contains('.') && trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else if trimmed.contains(',') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let cleaned = cleaned.trim_end_matches('%');

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fixed encoding multiple of a snapshot column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Stored at its true value.
    Unit,
    /// Stored ×10 (percentage-valued ratios).
    Tenth,
    /// Stored ×100 (P/E, EPS, book value per share).
    Hundredth,
}

impl Scale {
    /// Undo the encoding. Applied exactly once, right after parsing.
    #[must_use]
    pub const fn correct(&self, value: f64) -> f64 {
        match self {
            Self::Unit => value,
            Self::Tenth => value / 10.0,
            Self::Hundredth => value / 100.0,
        }
    }
}

/// Parse a raw cell and undo its column's encoding in one step.
#[must_use]
pub fn parse_scaled(raw: &str, scale: Scale) -> Option<f64> {
    parse_value(raw).map(|v| scale.correct(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decimal_comma() {
        assert_relative_eq!(parse_value("1000,50").unwrap(), 1000.5);
        assert_relative_eq!(parse_value("0,07").unwrap(), 0.07);
    }

    #[test]
    fn test_thousands_separator_with_comma() {
        assert_relative_eq!(parse_value("1.000,50").unwrap(), 1000.5);
        assert_relative_eq!(parse_value("12.345.678,9").unwrap(), 12_345_678.9);
    }

    #[test]
    fn test_plain_decimal_point() {
        assert_relative_eq!(parse_value("3.14").unwrap(), 3.14);
        assert_relative_eq!(parse_value("42").unwrap(), 42.0);
        assert_relative_eq!(parse_value("-7.5").unwrap(), -7.5);
    }

    #[test]
    fn test_percent_suffix_stripped() {
        assert_relative_eq!(parse_value("12,5%").unwrap(), 12.5);
        assert_relative_eq!(parse_value("8%").unwrap(), 8.0);
    }

    #[test]
    fn test_sentinels_and_garbage() {
        assert_eq!(parse_value("-"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
        assert_eq!(parse_value("N/A"), None);
        assert_eq!(parse_value("None"), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("12,3,4"), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_relative_eq!(parse_value("  10,2  ").unwrap(), 10.2);
    }

    #[test]
    fn test_scale_correction() {
        assert_relative_eq!(Scale::Hundredth.correct(1225.0), 12.25);
        assert_relative_eq!(Scale::Tenth.correct(85.0), 8.5);
        assert_relative_eq!(Scale::Unit.correct(42.0), 42.0);
    }

    #[test]
    fn test_parse_scaled() {
        // P/E arrives ×100: "1.225,00" means 12.25.
        assert_relative_eq!(parse_scaled("1.225,00", Scale::Hundredth).unwrap(), 12.25);
        // Dividend yield arrives ×10: "52,0" means 5.2%.
        assert_relative_eq!(parse_scaled("52,0", Scale::Tenth).unwrap(), 5.2);
        assert_eq!(parse_scaled("-", Scale::Tenth), None);
    }
}
