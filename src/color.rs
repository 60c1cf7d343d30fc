use std::collections::HashMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Dark theme
// ---------------------------------------------------------------------------

pub const PAPER_BACKGROUND: &str = "rgb(17,17,17)";
pub const PLOT_BACKGROUND: &str = "rgb(17,17,17)";
pub const FONT_COLOR: &str = "#f2f5fa";
pub const GRID_COLOR: &str = "#283442";
pub const UNKNOWN_COLOR: &str = "#808080";

/// Continuous scale used by the choropleth.
pub const CONTINUOUS_SCALE: &str = "Viridis";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, as `#rrggbb`.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            format!(
                "#{:02x}{:02x}{:02x}",
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → colour
// ---------------------------------------------------------------------------

/// Maps distinct labels (first-appearance order) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, String>,
}

impl ColorMap {
    /// Build a colour map over the distinct labels, keeping the order they first appear in.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut order: Vec<String> = Vec::new();
        for label in labels {
            if !order.iter().any(|l| l == label) {
                order.push(label.to_string());
            }
        }
        let palette = generate_palette(order.len());
        let mapping = order.into_iter().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> &str {
        self.mapping
            .get(label)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_COLOR)
    }
}
