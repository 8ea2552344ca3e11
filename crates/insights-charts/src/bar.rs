//! Votes-by-type bar chart: one colour-keyed bar per restaurant category.

use insights_core::error::{InsightsError, Result};
use insights_core::formatting::format_count;
use insights_data::aggregator::VoteSums;
use serde_json::json;

use crate::figure::{ChartArtifact, Figure};
use crate::palette::{qualitative, Rgb, PLOTLY};

pub const CHART: &str = "votes by type";
pub const TITLE: &str = "Total Votes by Restaurant Type";

/// A single category bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub votes: u64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VotesBarChart {
    /// Bars in vote-sum order (category label, ascending).
    pub bars: Vec<Bar>,
}

impl VotesBarChart {
    pub fn from_sums(sums: Option<&VoteSums>) -> Result<Self> {
        let sums = sums.ok_or_else(|| InsightsError::chart(CHART, "vote sums aggregate is absent"))?;
        let colors = qualitative(&PLOTLY, sums.entries.len());
        let bars = sums
            .entries
            .iter()
            .zip(colors)
            .map(|((category, votes), color)| Bar {
                category: category.clone(),
                votes: *votes,
                color,
            })
            .collect();
        Ok(Self { bars })
    }

    /// One trace per category so each bar gets its own colour and legend entry.
    pub fn to_figure(&self) -> Figure {
        let mut figure = Figure::new(TITLE, "listed_in(type)", "votes");
        for bar in &self.bars {
            figure.push_trace(json!({
                "type": "bar",
                "name": bar.category,
                "legendgroup": bar.category,
                "x": [bar.category],
                "y": [bar.votes],
                "text": [format_count(bar.votes)],
                "marker": { "color": bar.color.hex() },
                "hovertemplate": "listed_in(type)=%{x}<br>votes=%{text}<extra></extra>",
                "textposition": "none",
                "showlegend": true,
            }));
        }
        figure.set_layout("barmode", json!("relative"));
        figure.set_layout("legend", json!({ "title": { "text": "listed_in(type)" }, "tracegroupgap": 0 }));
        figure
    }
}

/// Build the votes-by-type artifact.
pub fn build(sums: Option<&VoteSums>) -> Result<ChartArtifact> {
    Ok(ChartArtifact::Figure(VotesBarChart::from_sums(sums)?.to_figure()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums() -> VoteSums {
        VoteSums {
            entries: vec![
                ("Buffet".to_string(), 3_028),
                ("Cafe".to_string(), 6_434),
                ("Dining".to_string(), 20_363),
            ],
        }
    }

    #[test]
    fn test_one_bar_per_category_in_order() {
        let chart = VotesBarChart::from_sums(Some(&sums())).unwrap();
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(labels, vec!["Buffet", "Cafe", "Dining"]);
        assert_eq!(chart.bars[2].votes, 20_363);
    }

    #[test]
    fn test_colors_keyed_to_category_position() {
        let chart = VotesBarChart::from_sums(Some(&sums())).unwrap();
        let colors: Vec<Rgb> = chart.bars.iter().map(|b| b.color).collect();
        assert_eq!(colors, PLOTLY[..3].to_vec());
    }

    #[test]
    fn test_figure_has_trace_per_category() {
        let artifact = build(Some(&sums())).unwrap();
        let figure = artifact.as_figure().unwrap();

        assert_eq!(figure.title(), Some(TITLE));
        assert_eq!(figure.data.len(), 3);
        assert_eq!(figure.data[1]["name"], "Cafe");
        assert_eq!(figure.data[1]["y"][0], 6_434);
        assert_eq!(figure.data[1]["text"][0], "6,434");
        assert_eq!(figure.data[1]["marker"]["color"], PLOTLY[1].hex());
    }

    #[test]
    fn test_absent_sums_fail() {
        let err = build(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to build votes by type chart: vote sums aggregate is absent"
        );
    }
}
