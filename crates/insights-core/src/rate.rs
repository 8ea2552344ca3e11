//! Normalization of the composite `"<number>/5"` rating field.

use tracing::trace;

use crate::error::{InsightsError, Result};

/// Separator between the score and the scale in raw rating strings.
pub const RATE_SEPARATOR: char = '/';

/// Parse a raw rating such as `"4.1/5"` into its numeric score.
///
/// The string is split on [`RATE_SEPARATOR`], the first segment is trimmed
/// and parsed as a float.  A string without a separator is parsed whole.
/// Non-finite results (`"nan"`, `"inf"`) are rejected.  Values outside the
/// nominal `0..=5` range are passed through unchanged.
///
/// # Examples
///
/// ```
/// use insights_core::rate::parse_rate;
///
/// assert_eq!(parse_rate("4.1/5").unwrap(), 4.1);
/// assert_eq!(parse_rate("3.5").unwrap(), 3.5);
/// assert!(parse_rate("NEW").is_err());
/// ```
pub fn parse_rate(raw: &str) -> Result<f64> {
    let score = raw.split(RATE_SEPARATOR).next().unwrap_or_default().trim();
    match score.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InsightsError::FieldParse {
            field: "rate",
            value: raw.to_string(),
        }),
    }
}

/// Normalize an optional raw rating, substituting `None` for anything that
/// does not parse.
///
/// # Examples
///
/// ```
/// use insights_core::rate::normalize_rate;
///
/// assert_eq!(normalize_rate(Some("3.0/5")), Some(3.0));
/// assert_eq!(normalize_rate(Some("-")), None);
/// assert_eq!(normalize_rate(None), None);
/// ```
pub fn normalize_rate(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match parse_rate(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            trace!("{err}; substituting null");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_over_five() {
        for (raw, expected) in [("4.1/5", 4.1), ("3.0/5", 3.0), ("0/5", 0.0), ("5/5", 5.0)] {
            assert_eq!(parse_rate(raw).unwrap(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_rate_tolerates_inner_whitespace() {
        assert_eq!(parse_rate("3.9 /5").unwrap(), 3.9);
        assert_eq!(parse_rate(" 4.2/5").unwrap(), 4.2);
    }

    #[test]
    fn test_parse_rate_without_separator() {
        assert_eq!(parse_rate("3.7").unwrap(), 3.7);
        assert!(parse_rate("abc").is_err());
    }

    #[test]
    fn test_parse_rate_rejects_non_finite() {
        assert!(parse_rate("nan").is_err());
        assert!(parse_rate("NaN/5").is_err());
        assert!(parse_rate("inf/5").is_err());
    }

    #[test]
    fn test_parse_rate_error_carries_value() {
        let err = parse_rate("NEW").unwrap_err();
        match err {
            InsightsError::FieldParse { field, value } => {
                assert_eq!(field, "rate");
                assert_eq!(value, "NEW");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rate_passes_out_of_range_through() {
        assert_eq!(parse_rate("7.5/5").unwrap(), 7.5);
        assert_eq!(parse_rate("-1/5").unwrap(), -1.0);
    }

    #[test]
    fn test_normalize_rate_malformed_is_null() {
        for raw in ["", "/5", "NEW", "-", "bad", "four/5"] {
            assert_eq!(normalize_rate(Some(raw)), None, "input {raw:?}");
        }
    }

    #[test]
    fn test_normalize_rate_none_is_null() {
        assert_eq!(normalize_rate(None), None);
    }

    #[test]
    fn test_normalize_rate_returns_exact_score() {
        let scores = [0.0, 1.25, 2.5, 3.3, 4.1, 4.9, 5.0];
        for score in scores {
            let raw = format!("{score}/5");
            assert_eq!(normalize_rate(Some(&raw)), Some(score), "input {raw:?}");
        }
    }
}
