//! Online-order vs rating box plot.
//!
//! Quartiles are computed here and handed to plotly as pre-computed boxes, so
//! the browser draws exactly the statistics the server derived.

use insights_core::error::Result;
use insights_core::models::{Column, RecordTable};
use insights_core::stats::BoxStats;
use serde_json::json;

use crate::figure::{ChartArtifact, Figure};
use crate::palette::{qualitative, Rgb, PLOTLY};
use crate::require_column;

pub const CHART: &str = "online orders vs ratings";
pub const TITLE: &str = "Online Orders vs Ratings";

/// Ratings summary for one `online_order` value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    /// `None` when every rating in the group is null.
    pub stats: Option<BoxStats>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnlineOrderBoxPlot {
    /// Groups in first-seen order.
    pub groups: Vec<BoxGroup>,
}

impl OnlineOrderBoxPlot {
    pub fn from_table(table: &RecordTable) -> Result<Self> {
        require_column(table, Column::Rate, CHART)?;
        require_column(table, Column::OnlineOrder, CHART)?;

        let mut labels: Vec<&str> = Vec::new();
        let mut values: Vec<Vec<f64>> = Vec::new();
        for record in table.records() {
            let Some(label) = record.online_order.as_deref() else {
                continue;
            };
            let idx = match labels.iter().position(|l| *l == label) {
                Some(idx) => idx,
                None => {
                    labels.push(label);
                    values.push(Vec::new());
                    labels.len() - 1
                }
            };
            if let Some(rate) = record.rate {
                values[idx].push(rate);
            }
        }

        let colors = qualitative(&PLOTLY, labels.len());
        let groups = labels
            .into_iter()
            .zip(values)
            .zip(colors)
            .map(|((label, values), color)| BoxGroup {
                label: label.to_string(),
                stats: BoxStats::from_values(&values),
                color,
            })
            .collect();

        Ok(Self { groups })
    }

    /// One precomputed box trace per group with data, plus a marker trace for
    /// its outliers when there are any.
    pub fn to_figure(&self) -> Figure {
        let mut figure = Figure::new(TITLE, "online_order", "rate");
        for group in &self.groups {
            let Some(stats) = &group.stats else {
                continue;
            };
            figure.push_trace(json!({
                "type": "box",
                "name": group.label,
                "legendgroup": group.label,
                "x": [group.label],
                "q1": [stats.q1],
                "median": [stats.median],
                "q3": [stats.q3],
                "lowerfence": [stats.lower_whisker],
                "upperfence": [stats.upper_whisker],
                "marker": { "color": group.color.hex() },
                "showlegend": true,
            }));
            if !stats.outliers.is_empty() {
                figure.push_trace(json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": group.label,
                    "legendgroup": group.label,
                    "x": vec![group.label.as_str(); stats.outliers.len()],
                    "y": stats.outliers,
                    "marker": { "color": group.color.hex(), "symbol": "circle-open" },
                    "hovertemplate": "online_order=%{x}<br>rate=%{y}<extra>outlier</extra>",
                    "showlegend": false,
                }));
            }
        }
        figure.set_layout("boxmode", json!("overlay"));
        figure.set_layout("legend", json!({ "title": { "text": "online_order" }, "tracegroupgap": 0 }));
        figure
    }
}

/// Build the online-order vs rating artifact.
pub fn build(table: &RecordTable) -> Result<ChartArtifact> {
    Ok(ChartArtifact::Figure(
        OnlineOrderBoxPlot::from_table(table)?.to_figure(),
    ))
}
