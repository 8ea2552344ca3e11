//! Fixed colour palettes shared by the chart builders.

use plotters::style::RGBColor;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form, as used in figure JSON.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// `rgb(r,g,b)` form, as used in plotly colour scales.
    pub fn css_rgb(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

// ── Qualitative ───────────────────────────────────────────────────────────────

/// ColorBrewer "Set2", eight pastel hues used for pie wedges.
pub const SET2: [Rgb; 8] = [
    Rgb(0x66, 0xc2, 0xa5),
    Rgb(0xfc, 0x8d, 0x62),
    Rgb(0x8d, 0xa0, 0xcb),
    Rgb(0xe7, 0x8a, 0xc3),
    Rgb(0xa6, 0xd8, 0x54),
    Rgb(0xff, 0xd9, 0x2f),
    Rgb(0xe5, 0xc4, 0x94),
    Rgb(0xb3, 0xb3, 0xb3),
];

/// plotly's default trace colorway, used for category-keyed traces.
pub const PLOTLY: [Rgb; 10] = [
    Rgb(0x63, 0x6e, 0xfa),
    Rgb(0xef, 0x55, 0x3b),
    Rgb(0x00, 0xcc, 0x96),
    Rgb(0xab, 0x63, 0xfa),
    Rgb(0xff, 0xa1, 0x5a),
    Rgb(0x19, 0xd3, 0xf3),
    Rgb(0xff, 0x66, 0x92),
    Rgb(0xb6, 0xe8, 0x80),
    Rgb(0xff, 0x97, 0xff),
    Rgb(0xfe, 0xcb, 0x52),
];

/// Take `n` colours from `palette`, cycling once it runs out.
///
/// Assignment depends only on position, so a fixed category order always
/// yields the same colours.
pub fn qualitative(palette: &[Rgb], n: usize) -> Vec<Rgb> {
    if palette.is_empty() {
        return Vec::new();
    }
    palette.iter().copied().cycle().take(n).collect()
}

// ── Sequential ────────────────────────────────────────────────────────────────

/// ColorBrewer "YlGnBu", light yellow through dark blue.
pub const YL_GN_BU: [Rgb; 9] = [
    Rgb(255, 255, 217),
    Rgb(237, 248, 177),
    Rgb(199, 233, 180),
    Rgb(127, 205, 187),
    Rgb(65, 182, 196),
    Rgb(29, 145, 192),
    Rgb(34, 94, 168),
    Rgb(37, 52, 148),
    Rgb(8, 29, 88),
];

/// Evenly spaced `[position, colour]` stops for a plotly `colorscale`.
pub fn colorscale(stops: &[Rgb]) -> Vec<(f64, String)> {
    match stops.len() {
        0 => Vec::new(),
        1 => vec![(0.0, stops[0].css_rgb()), (1.0, stops[0].css_rgb())],
        n => stops
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / (n - 1) as f64, c.css_rgb()))
            .collect(),
    }
}
