//! Restaurant-type pie chart, rasterized server-side.
//!
//! Wedges start at 0° (three o'clock) and run counter-clockwise.  Each wedge
//! carries its category label just outside the rim and its share of rows at
//! 60% of the radius.

use std::f64::consts::PI;
use std::panic::{self, AssertUnwindSafe};

use insights_core::error::{InsightsError, Result};
use insights_core::formatting::format_percentage;
use insights_data::aggregator::CategoryCounts;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, warn};

use crate::figure::{ChartArtifact, EmbeddedImage};
use crate::palette::{qualitative, Rgb, SET2};

pub const CHART: &str = "restaurant type pie";
pub const TITLE: &str = "Restaurant Type Proportions";
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 800;

const CENTER: (f64, f64) = (400.0, 420.0);
const RADIUS: f64 = 300.0;
const LABEL_DISTANCE: f64 = 1.1;
const PCT_DISTANCE: f64 = 0.6;
/// Arc resolution when tessellating wedges, in degrees.
const ARC_STEP: f64 = 1.0;

/// One slice of the pie; angles are in degrees, counter-clockwise from +x.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: u64,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Share label, e.g. `33.3%`.
    pub fn percent_label(&self) -> String {
        format_percentage(self.fraction)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantTypePie {
    pub wedges: Vec<Wedge>,
}

impl RestaurantTypePie {
    pub fn from_counts(counts: Option<&CategoryCounts>) -> Result<Self> {
        let counts =
            counts.ok_or_else(|| InsightsError::chart(CHART, "category counts aggregate is absent"))?;
        let total = counts.total();
        let colors = qualitative(&SET2, counts.len());

        let mut wedges = Vec::with_capacity(counts.len());
        let mut angle = 0.0;
        for ((label, count), color) in counts.entries.iter().zip(colors) {
            let fraction = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64
            };
            let sweep = fraction * 360.0;
            wedges.push(Wedge {
                label: label.clone(),
                count: *count,
                fraction,
                start_angle: angle,
                end_angle: angle + sweep,
                color,
            });
            angle += sweep;
        }
        Ok(Self { wedges })
    }

    /// Draw into an 8-bit RGB buffer of `WIDTH` × `HEIGHT`.
    pub fn render_rgb(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; WIDTH as usize * HEIGHT as usize * 3];
        let mut label_failures = 0usize;
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| InsightsError::chart(CHART, e))?;

            for wedge in &self.wedges {
                if wedge.end_angle <= wedge.start_angle {
                    continue;
                }
                root.draw(&Polygon::new(
                    wedge_outline(wedge.start_angle, wedge.end_angle),
                    wedge.color.to_plotters().filled(),
                ))
                .map_err(|e| InsightsError::chart(CHART, e))?;
            }

            let title_style = ("sans-serif", 28)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            if !draw_label(&root, TITLE, (WIDTH as i32 / 2, 40), &title_style) {
                label_failures += 1;
            }

            let label_style = ("sans-serif", 18)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            for wedge in &self.wedges {
                let mid = wedge.mid_angle();
                let outer = polar(RADIUS * LABEL_DISTANCE, mid);
                let inner = polar(RADIUS * PCT_DISTANCE, mid);
                if !draw_label(&root, &wedge.label, outer, &label_style) {
                    label_failures += 1;
                }
                if !draw_label(&root, &wedge.percent_label(), inner, &label_style) {
                    label_failures += 1;
                }
            }

            root.present().map_err(|e| InsightsError::chart(CHART, e))?;
        }

        if label_failures > 0 {
            warn!(
                failed = label_failures,
                "Pie chart labels could not be drawn; no usable font was found"
            );
        }
        Ok(buffer)
    }

    pub fn to_image(&self) -> Result<EmbeddedImage> {
        let rgb = self.render_rgb()?;
        let image = EmbeddedImage::from_rgb(TITLE, &rgb, WIDTH, HEIGHT)
            .map_err(|e| InsightsError::chart(CHART, e))?;
        debug!(
            wedges = self.wedges.len(),
            encoded_bytes = image.base64.len(),
            "Rendered pie chart"
        );
        Ok(image)
    }
}

/// Build the restaurant-type pie artifact.
pub fn build(counts: Option<&CategoryCounts>) -> Result<ChartArtifact> {
    Ok(ChartArtifact::Image(
        RestaurantTypePie::from_counts(counts)?.to_image()?,
    ))
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Pixel position at `radius` from the centre along `degrees`.  Screen y grows
/// downward, so the sine term is subtracted.
fn polar(radius: f64, degrees: f64) -> (i32, i32) {
    let theta = degrees * PI / 180.0;
    (
        (CENTER.0 + radius * theta.cos()).round() as i32,
        (CENTER.1 - radius * theta.sin()).round() as i32,
    )
}

fn wedge_outline(start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(polar(0.0, 0.0));
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push(polar(RADIUS, angle));
    }
    points
}

/// Draw one text label.  Text rendering depends on system fonts, which may be
/// missing or make the backend panic; the wedges are still worth drawing, so a
/// failure is reported as `false` rather than an error.
fn draw_label<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    pos: (i32, i32),
    style: &TextStyle,
) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        root.draw(&Text::new(text.to_string(), pos, style.clone()))
    })) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!(label = text, error = %e, "Failed to draw pie label");
            false
        }
        Err(_) => {
            debug!(label = text, "Text backend panicked while drawing pie label");
            false
        }
    }
}
