//! HTML page composition.
//!
//! The page is rendered once at startup into a self-contained document: tab
//! buttons, one panel per chart, inline styles and a short tab-switching
//! script.  Plotly figures are embedded as JSON and drawn by plotly.js.

use insights_charts::{ChartArtifact, ChartSet, EmbeddedImage, Figure};
use insights_core::error::{InsightsError, Result};
use insights_data::pipeline::PipelineMetadata;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: "Open Sans", verdana, arial, sans-serif; margin: 0; background: #fafafa; color: #2a3f5f; }
h1 { text-align: center; margin: 24px 0 12px; }
.tabs { display: flex; border-bottom: 1px solid #d6d6d6; margin: 0 24px; }
.tab { flex: 1; padding: 12px; background: #f9f9f9; border: 1px solid #d6d6d6; border-bottom: none; cursor: pointer; font-size: 15px; }
.tab.active { background: #fff; border-top: 2px solid #1975fa; font-weight: 600; }
.panel { display: none; margin: 0 24px; padding: 16px; background: #fff; border: 1px solid #d6d6d6; border-top: none; }
.panel.active { display: block; }
.chart { width: 100%; height: 560px; }
.image-panel { text-align: center; }
footer { margin: 24px; font-size: 12px; color: #666; }
footer pre { background: #f3f3f3; padding: 12px; overflow-x: auto; }
"#;

const SCRIPT: &str = r#"
function showTab(index) {
  document.querySelectorAll('.tab').forEach(function (tab, i) {
    tab.classList.toggle('active', i === index);
  });
  document.querySelectorAll('.panel').forEach(function (panel, i) {
    panel.classList.toggle('active', i === index);
    if (i === index) {
      var chart = panel.querySelector('.chart');
      if (chart && window.Plotly) { Plotly.Plots.resize(chart); }
    }
  });
}
document.querySelectorAll('.tab').forEach(function (tab, i) {
  tab.addEventListener('click', function () { showTab(i); });
});
document.querySelectorAll('script.figure').forEach(function (node) {
  var figure = JSON.parse(node.textContent);
  Plotly.newPlot(node.dataset.target, figure.data, figure.layout, { responsive: true });
});
"#;

// ── DashboardPage ─────────────────────────────────────────────────────────────

/// A renderable dashboard: header, one tab per chart and an optional
/// metadata footer.
#[derive(Debug, Clone)]
pub struct DashboardPage<'a> {
    title: &'a str,
    charts: &'a ChartSet,
    metadata: Option<&'a PipelineMetadata>,
}

impl<'a> DashboardPage<'a> {
    pub fn new(title: &'a str, charts: &'a ChartSet) -> Self {
        Self {
            title,
            charts,
            metadata: None,
        }
    }

    /// Show pipeline metadata in the page footer.
    pub fn with_metadata(mut self, metadata: &'a PipelineMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Render the full HTML document.
    pub fn render(&self) -> Result<String> {
        let tabs = self.charts.tabs();

        let mut buttons = String::new();
        let mut panels = String::new();
        for (index, (label, artifact)) in tabs.iter().enumerate() {
            let active = if index == 0 { " active" } else { "" };
            buttons.push_str(&format!(
                r#"<button class="tab{active}" type="button">{label}</button>"#,
                label = escape_html(label),
            ));
            buttons.push('\n');

            let body = match artifact {
                ChartArtifact::Figure(figure) => figure_panel(index, figure)?,
                ChartArtifact::Image(image) => image_panel(image),
            };
            panels.push_str(&format!(
                "<div class=\"panel{active}\" id=\"tab-{index}\">\n{body}\n</div>\n"
            ));
        }

        let footer = match self.metadata {
            Some(metadata) => metadata_footer(metadata)?,
            None => String::new(),
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="{cdn}"></script>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<div class="tabs">
{buttons}</div>
{panels}{footer}<script>{script}</script>
</body>
</html>
"#,
            title = escape_html(self.title),
            cdn = PLOTLY_CDN,
            style = STYLE,
            script = SCRIPT,
        ))
    }
}

fn figure_panel(index: usize, figure: &Figure) -> Result<String> {
    let json = escape_script_json(&figure.to_json()?);
    Ok(format!(
        "<div class=\"chart\" id=\"chart-{index}\"></div>\n\
         <script type=\"application/json\" class=\"figure\" data-target=\"chart-{index}\">{json}</script>"
    ))
}

fn image_panel(image: &EmbeddedImage) -> String {
    format!(
        "<div class=\"image-panel\">\n<h3>{title}</h3>\n<img src=\"{src}\" alt=\"{title}\" style=\"width:80%\">\n</div>",
        title = escape_html(&image.title),
        src = image.data_uri(),
    )
}

fn metadata_footer(metadata: &PipelineMetadata) -> Result<String> {
    let json =
        serde_json::to_string_pretty(metadata).map_err(|e| InsightsError::Other(e.into()))?;
    Ok(format!(
        "<footer>\n<h4>Pipeline metadata</h4>\n<pre>{}</pre>\n</footer>\n",
        escape_html(&json)
    ))
}

// ── Escaping ──────────────────────────────────────────────────────────────────

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Keep embedded JSON from closing its `<script>` element or entering a
/// script comment state.  `\u003c` is still `<` to `JSON.parse`.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}
