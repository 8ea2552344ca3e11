//! Ratings histogram: ten equal-width bins over the observed rating range.

use insights_core::error::Result;
use insights_core::models::{Column, RecordTable};
use insights_core::stats::{equal_width_bins, Bin};
use serde_json::json;

use crate::figure::{ChartArtifact, Figure};
use crate::palette::PLOTLY;
use crate::require_column;

pub const CHART: &str = "ratings histogram";
pub const TITLE: &str = "Ratings Distribution";
pub const BIN_COUNT: usize = 10;

/// Binned non-null ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    pub bins: Vec<Bin>,
}

impl RatingHistogram {
    /// Bin the table's non-null ratings.  Fails only when the table has no
    /// `rate` column; a column of nulls gives an empty histogram.
    pub fn from_table(table: &RecordTable) -> Result<Self> {
        require_column(table, Column::Rate, CHART)?;
        let rates: Vec<f64> = table.rates().collect();
        Ok(Self {
            bins: equal_width_bins(&rates, BIN_COUNT),
        })
    }

    /// Ratings counted across all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn to_figure(&self) -> Figure {
        let mut figure = Figure::new(TITLE, "rate", "count");
        figure.push_trace(json!({
            "type": "bar",
            "name": "rate",
            "x": self.bins.iter().map(Bin::center).collect::<Vec<_>>(),
            "y": self.bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            "width": self.bins.iter().map(Bin::width).collect::<Vec<_>>(),
            "customdata": self.bins.iter().map(|b| [b.start, b.end]).collect::<Vec<_>>(),
            "marker": { "color": PLOTLY[0].hex() },
            "hovertemplate": "rate=%{customdata[0]:.2f}-%{customdata[1]:.2f}<br>count=%{y}<extra></extra>",
            "showlegend": false,
        }));
        figure.set_layout("bargap", json!(0));
        figure
    }
}

/// Build the ratings histogram artifact.
pub fn build(table: &RecordTable) -> Result<ChartArtifact> {
    Ok(ChartArtifact::Figure(
        RatingHistogram::from_table(table)?.to_figure(),
    ))
}
