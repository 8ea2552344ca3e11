//! Typed aggregates over the normalized record table.
//!
//! Each aggregate has a fixed shape and feeds exactly one chart: category
//! counts drive the pie, vote sums the bar chart, and the category ×
//! online-order pivot the heatmap.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use insights_core::error::Result;
use insights_core::models::{Column, RecordTable};
use serde::Serialize;
use tracing::warn;

// ── CategoryCounts ────────────────────────────────────────────────────────────

/// Row counts per restaurant category, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    /// `(category, rows)` ordered by descending count; ties keep first-seen order.
    pub entries: Vec<(String, u64)>,
}

impl CategoryCounts {
    /// Total rows across all categories.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── VoteSums ──────────────────────────────────────────────────────────────────

/// Total votes per restaurant category, ordered by category label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoteSums {
    pub entries: Vec<(String, u64)>,
}

impl VoteSums {
    /// Total votes across all categories.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| *v)
    }
}

// ── OnlineOrderPivot ──────────────────────────────────────────────────────────

/// Row counts cross-tabulated by category (rows) and online-order value
/// (columns).  Both axes are sorted ascending; absent pairs count zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnlineOrderPivot {
    pub categories: Vec<String>,
    pub online_values: Vec<String>,
    /// `counts[row][col]` for `categories[row]` × `online_values[col]`.
    pub counts: Vec<Vec<u64>>,
}

impl OnlineOrderPivot {
    /// Count for one `(category, online_value)` cell, `None` if either label
    /// is unknown.
    pub fn get(&self, category: &str, online_value: &str) -> Option<u64> {
        let row = self.categories.iter().position(|c| c == category)?;
        let col = self.online_values.iter().position(|v| v == online_value)?;
        Some(self.counts[row][col])
    }

    /// Sum of every cell.
    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Largest cell value, `0` for an empty pivot.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Everything the chart builders consume besides the table itself.
///
/// An aggregate is `None` when the table lacks a column it needs; the chart
/// that depends on it then refuses to build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub category_counts: Option<CategoryCounts>,
    pub vote_sums: Option<VoteSums>,
    pub pivot: Option<OnlineOrderPivot>,
}

impl Aggregates {
    /// Compute all three aggregates, logging any that cannot be built.
    pub fn compute(table: &RecordTable) -> Self {
        Self {
            category_counts: available(Aggregator::category_counts(table), "category counts"),
            vote_sums: available(Aggregator::vote_sums(table), "vote sums"),
            pivot: available(Aggregator::online_order_pivot(table), "online-order pivot"),
        }
    }
}

fn available<T>(result: Result<T>, name: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Skipping {name} aggregate: {err}");
            None
        }
    }
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless helper grouping records by category.
///
/// Rows whose grouping key is empty are left out of every aggregate.
pub struct Aggregator;

impl Aggregator {
    /// Count rows per `listed_in(type)`.
    pub fn category_counts(table: &RecordTable) -> Result<CategoryCounts> {
        table.require(Column::ListedInType)?;

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();
        for category in table
            .records()
            .iter()
            .filter_map(|r| r.listed_in_type.as_deref())
        {
            match index.get(category) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(category, entries.len());
                    entries.push((category.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(CategoryCounts { entries })
    }

    /// Sum `votes` per `listed_in(type)`.  Empty vote cells count as zero.
    pub fn vote_sums(table: &RecordTable) -> Result<VoteSums> {
        table.require(Column::ListedInType)?;
        table.require(Column::Votes)?;

        let mut sums: BTreeMap<String, u64> = BTreeMap::new();
        for record in table.records() {
            if let Some(category) = &record.listed_in_type {
                *sums.entry(category.clone()).or_default() += record.votes.unwrap_or(0);
            }
        }

        Ok(VoteSums {
            entries: sums.into_iter().collect(),
        })
    }

    /// Cross-tabulate row counts by `listed_in(type)` × `online_order`.
    pub fn online_order_pivot(table: &RecordTable) -> Result<OnlineOrderPivot> {
        table.require(Column::ListedInType)?;
        table.require(Column::OnlineOrder)?;

        let pairs: Vec<(&str, &str)> = table
            .records()
            .iter()
            .filter_map(|r| Some((r.listed_in_type.as_deref()?, r.online_order.as_deref()?)))
            .collect();

        let categories: BTreeSet<&str> = pairs.iter().map(|(c, _)| *c).collect();
        let online_values: BTreeSet<&str> = pairs.iter().map(|(_, o)| *o).collect();
        let categories: Vec<String> = categories.into_iter().map(str::to_string).collect();
        let online_values: Vec<String> = online_values.into_iter().map(str::to_string).collect();

        let mut counts = vec![vec![0u64; online_values.len()]; categories.len()];
        for (category, online) in pairs {
            // Both labels were collected from `pairs`, so the lookups succeed.
            let row = categories.binary_search_by(|c| c.as_str().cmp(category));
            let col = online_values.binary_search_by(|v| v.as_str().cmp(online));
            if let (Ok(row), Ok(col)) = (row, col) {
                counts[row][col] += 1;
            }
        }

        Ok(OnlineOrderPivot {
            categories,
            online_values,
            counts,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
