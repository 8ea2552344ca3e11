//! Chart builders for the restaurant insights dashboard.
//!
//! Four charts are described as plotly figures and drawn in the browser; the
//! restaurant-type pie is rasterized here with [`plotters`] and embedded as a
//! PNG data URI.

pub mod bar;
pub mod box_plot;
pub mod figure;
pub mod heatmap;
pub mod histogram;
pub mod palette;
pub mod pie;

pub use figure::{ChartArtifact, EmbeddedImage, Figure};

use insights_core::error::{InsightsError, Result};
use insights_core::models::{Column, RecordTable};
use insights_data::pipeline::DashboardData;
use tracing::debug;

/// Tab labels, in page order.
pub const TAB_LABELS: [&str; 5] = [
    "Ratings Distribution",
    "Votes by Restaurant Type",
    "Online Orders vs Ratings",
    "Restaurant Type Proportion",
    "Heatmap Analysis",
];

/// Fail a chart build when `table` lacks `column`.
pub(crate) fn require_column(
    table: &RecordTable,
    column: Column,
    chart: &'static str,
) -> Result<()> {
    table
        .require(column)
        .map_err(|_| InsightsError::chart(chart, format!("missing column {column}")))
}

// ── ChartSet ──────────────────────────────────────────────────────────────────

/// The five dashboard charts, built together from one prepared dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub ratings_histogram: ChartArtifact,
    pub votes_by_type: ChartArtifact,
    pub online_vs_rating: ChartArtifact,
    pub type_proportions: ChartArtifact,
    pub heatmap: ChartArtifact,
}

impl ChartSet {
    /// Build every chart, stopping at the first failure.
    pub fn build_all(data: &DashboardData) -> Result<Self> {
        let aggregates = &data.aggregates;
        let set = Self {
            ratings_histogram: histogram::build(&data.table)?,
            votes_by_type: bar::build(aggregates.vote_sums.as_ref())?,
            online_vs_rating: box_plot::build(&data.table)?,
            type_proportions: pie::build(aggregates.category_counts.as_ref())?,
            heatmap: heatmap::build(aggregates.pivot.as_ref())?,
        };
        debug!("Built {} charts", TAB_LABELS.len());
        Ok(set)
    }

    /// `(tab label, artifact)` pairs in page order.
    pub fn tabs(&self) -> [(&'static str, &ChartArtifact); 5] {
        [
            (TAB_LABELS[0], &self.ratings_histogram),
            (TAB_LABELS[1], &self.votes_by_type),
            (TAB_LABELS[2], &self.online_vs_rating),
            (TAB_LABELS[3], &self.type_proportions),
            (TAB_LABELS[4], &self.heatmap),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::models::{RawRecord, Table};
    use insights_data::pipeline::prepare_loaded;
    use std::path::Path;

    fn raw(rate: &str, kind: &str, votes: u64, online: &str) -> RawRecord {
        RawRecord {
            rate: Some(rate.to_string()),
            listed_in_type: Some(kind.to_string()),
            votes: Some(votes),
            online_order: Some(online.to_string()),
        }
    }

    fn scenario(columns: &[Column]) -> DashboardData {
        let records = vec![
            raw("4.1/5", "Dining", 10, "Yes"),
            raw("bad", "Dining", 5, "No"),
            raw("3.0/5", "Cafe", 7, "Yes"),
        ];
        prepare_loaded(
            Table::new(columns.iter().copied(), records),
            Path::new("scenario.csv"),
            0.0,
            |_| {},
        )
    }

    #[test]
    fn test_build_all_scenario() {
        let charts = ChartSet::build_all(&scenario(&Column::ALL)).unwrap();
        let tabs = charts.tabs();

        let labels: Vec<&str> = tabs.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, TAB_LABELS.to_vec());
        assert!(charts.type_proportions.as_image().is_some());
        for (label, artifact) in tabs {
            if label != "Restaurant Type Proportion" {
                assert!(artifact.as_figure().is_some(), "{label} should be a figure");
            }
        }

        let votes = charts.votes_by_type.as_figure().unwrap();
        assert_eq!(votes.data[0]["name"], "Cafe");
        assert_eq!(votes.data[0]["y"][0], 7);
        assert_eq!(votes.data[1]["y"][0], 15);
    }

    #[test]
    fn test_missing_votes_column_fails_build() {
        let data = scenario(&[Column::Rate, Column::ListedInType, Column::OnlineOrder]);
        let err = ChartSet::build_all(&data).unwrap_err();
        assert!(matches!(
            err,
            InsightsError::ChartBuild { chart: bar::CHART, .. }
        ));
    }

    #[test]
    fn test_missing_rate_column_names_histogram() {
        let data = scenario(&[Column::ListedInType, Column::Votes, Column::OnlineOrder]);
        let err = ChartSet::build_all(&data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to build ratings histogram chart: missing column rate"
        );
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let data = scenario(&Column::ALL);
        assert_eq!(
            ChartSet::build_all(&data).unwrap(),
            ChartSet::build_all(&data).unwrap()
        );
    }
}
