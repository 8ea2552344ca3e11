//! Rate-column cleaning: rewrites raw `"x/5"` strings into numeric ratings.

use insights_core::models::{RawTable, Record, RecordTable};
use insights_core::rate::normalize_rate;
use serde::Serialize;
use tracing::debug;

/// Outcome counts of a [`normalize_table`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateSummary {
    /// Rows whose rate parsed to a number.
    pub parsed: usize,
    /// Rows whose rate was empty or malformed and became null.
    pub missing: usize,
}

/// Normalize the rate column of every row.
///
/// Malformed ratings become `None`; nothing here can fail.  All other fields
/// are carried over unchanged.
pub fn normalize_table(raw: RawTable) -> (RecordTable, RateSummary) {
    let mut summary = RateSummary::default();

    let table = raw.map_records(|r| {
        let rate = normalize_rate(r.rate.as_deref());
        if rate.is_some() {
            summary.parsed += 1;
        } else {
            summary.missing += 1;
        }
        Record {
            rate,
            listed_in_type: r.listed_in_type,
            votes: r.votes,
            online_order: r.online_order,
        }
    });

    debug!(
        "Normalized rate column: {} parsed, {} missing",
        summary.parsed, summary.missing
    );

    (table, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::models::{Column, RawRecord, Table};

    fn raw(rate: Option<&str>) -> RawRecord {
        RawRecord {
            rate: rate.map(str::to_string),
            listed_in_type: Some("Dining".to_string()),
            votes: Some(1),
            online_order: Some("Yes".to_string()),
        }
    }

    #[test]
    fn test_normalize_table_rewrites_rates() {
        let table = Table::new(
            Column::ALL,
            vec![raw(Some("4.1/5")), raw(Some("bad")), raw(Some("3.0/5"))],
        );
        let (normalized, summary) = normalize_table(table);

        let rates: Vec<Option<f64>> = normalized.records().iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![Some(4.1), None, Some(3.0)]);
        assert_eq!(summary, RateSummary { parsed: 2, missing: 1 });
    }

    #[test]
    fn test_normalize_table_keeps_other_fields_and_columns() {
        let table = Table::new([Column::Rate, Column::Votes], vec![raw(None)]);
        let (normalized, summary) = normalize_table(table);

        assert_eq!(normalized.columns(), &[Column::Rate, Column::Votes]);
        let record = &normalized.records()[0];
        assert_eq!(record.rate, None);
        assert_eq!(record.votes, Some(1));
        assert_eq!(record.listed_in_type.as_deref(), Some("Dining"));
        assert_eq!(summary.missing, 1);
    }

    #[test]
    fn test_normalize_empty_table() {
        let table: RawTable = Table::new(Column::ALL, Vec::new());
        let (normalized, summary) = normalize_table(table);
        assert!(normalized.is_empty());
        assert_eq!(summary, RateSummary::default());
    }
}
