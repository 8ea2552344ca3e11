/// Format an unsigned count with thousands separators.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a fraction in `0.0..=1.0` as a percentage with one decimal place,
/// the way pie wedges are labelled.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_percentage;
///
/// assert_eq!(format_percentage(1.0 / 3.0), "33.3%");
/// assert_eq!(format_percentage(1.0), "100.0%");
/// assert_eq!(format_percentage(0.0), "0.0%");
/// ```
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Format a duration in seconds for log lines and the debug footer.
///
/// * `< 1` second → `"250ms"`
/// * otherwise → `"1.25s"`
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_seconds;
///
/// assert_eq!(format_seconds(0.25), "250ms");
/// assert_eq!(format_seconds(1.254), "1.25s");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else {
        format!("{:.2}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_count(1_000_000), "1,000,000");
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_percentage_rounding() {
        assert_eq!(format_percentage(0.054), "5.4%");
        assert_eq!(format_percentage(2.0 / 3.0), "66.7%");
    }

    #[test]
    fn test_format_seconds_zero() {
        assert_eq!(format_seconds(0.0), "0ms");
    }
}
