//! Chart artifacts: plotly figure descriptions and inline raster images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use insights_core::error::{InsightsError, Result};
use serde::Serialize;
use serde_json::{json, Value};

// ── Figure ────────────────────────────────────────────────────────────────────

/// A plotly figure: trace objects plus a layout, rendered in the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    /// An empty figure with `title` and axis titles set.
    pub fn new(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            data: Vec::new(),
            layout: json!({
                "title": { "text": title },
                "xaxis": { "title": { "text": x_title } },
                "yaxis": { "title": { "text": y_title } },
                "legend": { "tracegroupgap": 0 },
                "margin": { "t": 60 },
            }),
        }
    }

    pub fn push_trace(&mut self, trace: Value) {
        self.data.push(trace);
    }

    /// Set a top-level layout key, e.g. `"barmode"`.
    pub fn set_layout(&mut self, key: &str, value: Value) {
        if let Some(layout) = self.layout.as_object_mut() {
            layout.insert(key.to_string(), value);
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.layout["title"]["text"].as_str()
    }

    /// Serialize to compact JSON for embedding in the page.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| InsightsError::Other(e.into()))
    }
}

// ── EmbeddedImage ─────────────────────────────────────────────────────────────

/// A raster chart, base64-encoded for use in an `<img src>` data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub title: String,
    pub mime: &'static str,
    pub base64: String,
    pub width: u32,
    pub height: u32,
}

impl EmbeddedImage {
    /// Encode a tightly packed 8-bit RGB buffer as PNG, then base64.
    pub fn from_rgb(title: &str, rgb: &[u8], width: u32, height: u32) -> Result<Self> {
        let png = encode_png(rgb, width, height)?;
        Ok(Self {
            title: title.to_string(),
            mime: "image/png",
            base64: STANDARD.encode(png),
            width,
            height,
        })
    }

    /// `data:<mime>;base64,<payload>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Encode an 8-bit RGB buffer as a PNG byte stream.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(InsightsError::Other(anyhow::anyhow!(
            "RGB buffer holds {} bytes, expected {} for {}x{}",
            rgb.len(),
            expected,
            width,
            height
        )));
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| InsightsError::Other(e.into()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| InsightsError::Other(e.into()))?;
        writer.finish().map_err(|e| InsightsError::Other(e.into()))?;
    }
    Ok(out)
}

// ── ChartArtifact ─────────────────────────────────────────────────────────────

/// What a chart builder produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartArtifact {
    /// Interactive figure drawn client-side.
    Figure(Figure),
    /// Static image embedded inline.
    Image(EmbeddedImage),
}

impl ChartArtifact {
    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            ChartArtifact::Figure(f) => Some(f),
            ChartArtifact::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&EmbeddedImage> {
        match self {
            ChartArtifact::Image(i) => Some(i),
            ChartArtifact::Figure(_) => None,
        }
    }
}
