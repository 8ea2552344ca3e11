//! Descriptive statistics behind the histogram and box plot.

use serde::Serialize;

// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using linear
/// interpolation between closest ranks.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── BoxStats ──────────────────────────────────────────────────────────────────

/// Whisker reach, as a multiple of the inter-quartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary plus Tukey outliers for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Observations beyond either whisker, ascending.
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    /// Summarize `values`.  Non-finite values are ignored; returns `None` when
    /// nothing remains.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|&&v| v >= lower_fence && v <= upper_fence);

        // The quartiles always lie within the fences, so `inside` is non-empty.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
            count: sorted.len(),
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

// ── Histogram binning ─────────────────────────────────────────────────────────

/// One equal-width histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Bucket `values` into `bins` equal-width bins spanning their min–max range.
///
/// Every bin is half-open `[start, end)` except the last, which also holds
/// the maximum.  When all values are equal the range is widened by `0.5` on
/// each side.  Non-finite values are skipped; an empty input yields no bins.
pub fn equal_width_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    // Membership is decided against the stored edges, so a value equal to an
    // interior edge always lands in the bin that starts there.
    for value in finite {
        let idx = out
            .partition_point(|b| b.start <= value)
            .saturating_sub(1)
            .min(bins - 1);
        out[idx].count += 1;
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
