//! Category × online-order heatmap on the YlGnBu scale.

use insights_core::error::{InsightsError, Result};
use insights_data::aggregator::OnlineOrderPivot;
use serde_json::json;

use crate::figure::{ChartArtifact, Figure};
use crate::palette::{colorscale, YL_GN_BU};

pub const CHART: &str = "online orders heatmap";
pub const TITLE: &str = "Heatmap of Online Orders by Type";

/// One heatmap trace: online-order values across, categories down.
pub fn to_figure(pivot: &OnlineOrderPivot) -> Figure {
    let mut figure = Figure::new(TITLE, "online_order", "listed_in(type)");
    figure.push_trace(json!({
        "type": "heatmap",
        "x": pivot.online_values,
        "y": pivot.categories,
        "z": pivot.counts,
        "zmin": 0,
        "zmax": pivot.max_count(),
        "colorscale": colorscale(&YL_GN_BU),
        "colorbar": { "title": { "text": "count" } },
        "hovertemplate": "online_order=%{x}<br>listed_in(type)=%{y}<br>count=%{z}<extra></extra>",
    }));
    // First category on top, as in a printed pivot table.
    figure.set_layout(
        "yaxis",
        json!({ "title": { "text": "listed_in(type)" }, "autorange": "reversed" }),
    );
    figure
}

/// Build the heatmap artifact.
pub fn build(pivot: Option<&OnlineOrderPivot>) -> Result<ChartArtifact> {
    let pivot = pivot.ok_or_else(|| InsightsError::chart(CHART, "online-order pivot is absent"))?;
    Ok(ChartArtifact::Figure(to_figure(pivot)))
}
