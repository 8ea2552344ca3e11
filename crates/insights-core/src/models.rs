use serde::{Deserialize, Serialize};

use crate::error::{InsightsError, Result};

// ── Column ────────────────────────────────────────────────────────────────────

/// A dataset column the dashboard knows how to read.
///
/// Any other column present in the file is ignored by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// `rate`, e.g. `"4.1/5"`.
    Rate,
    /// `listed_in(type)`, the restaurant category.
    ListedInType,
    /// `votes`, an integer vote count.
    Votes,
    /// `online_order`, usually `"Yes"` or `"No"`.
    OnlineOrder,
}

impl Column {
    /// Every known column, in canonical order.
    pub const ALL: [Column; 4] = [
        Column::Rate,
        Column::ListedInType,
        Column::Votes,
        Column::OnlineOrder,
    ];

    /// The header name used in the dataset file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Rate => "rate",
            Column::ListedInType => "listed_in(type)",
            Column::Votes => "votes",
            Column::OnlineOrder => "online_order",
        }
    }

    /// Resolve a header name to a known column (case-sensitive, trimmed).
    pub fn from_header(header: &str) -> Option<Self> {
        let trimmed = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == trimmed)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// A row as read from disk, before the rate column is normalized.
///
/// Empty cells and absent columns are both `None`; use
/// [`Table::has_column`] to tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub rate: Option<String>,
    pub listed_in_type: Option<String>,
    pub votes: Option<u64>,
    pub online_order: Option<String>,
}

/// A row after rate normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Normalized rating; `None` when the raw value did not parse.
    pub rate: Option<f64>,
    pub listed_in_type: Option<String>,
    pub votes: Option<u64>,
    pub online_order: Option<String>,
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// An ordered, in-memory record table together with the set of known columns
/// the source file actually declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table<R> {
    columns: Vec<Column>,
    records: Vec<R>,
}

/// Table as produced by the loader.
pub type RawTable = Table<RawRecord>;

/// Table after the rate column has been rewritten.
pub type RecordTable = Table<Record>;

impl<R> Table<R> {
    /// Build a table. `columns` is deduplicated and put in canonical order.
    pub fn new(columns: impl IntoIterator<Item = Column>, records: Vec<R>) -> Self {
        let present: Vec<Column> = columns.into_iter().collect();
        let columns = Column::ALL
            .into_iter()
            .filter(|c| present.contains(c))
            .collect();
        Self { columns, records }
    }

    /// Known columns declared by the source file, in canonical order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether the source file declared `column`.
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Fail with [`InsightsError::MissingColumn`] unless `column` is present.
    pub fn require(&self, column: Column) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(InsightsError::MissingColumn(column.header()))
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Transform every record, keeping the column set.
    pub fn map_records<T>(self, f: impl FnMut(R) -> T) -> Table<T> {
        Table {
            columns: self.columns,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

impl RecordTable {
    /// All non-null rates, in row order.
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(|r| r.rate)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
