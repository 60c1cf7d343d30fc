use serde_json::{json, Value as JsonValue};

use crate::color::{self, ColorMap};
use crate::data::filter::ObservationSubset;

pub const NO_DATA_TITLE: &str = "No Data Available";
pub const VALUE_LABEL: &str = "ESG Score";
pub const COUNTRY_LABEL: &str = "Country";

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// World choropleth: one location per row, coloured by value.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSpec {
    pub title: String,
    /// ISO-3 country codes.
    pub locations: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub hover_names: Vec<String>,
}

/// A single bar of the per-country comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: Option<f64>,
    pub color: String,
}

/// Per-country bar chart, one colour per distinct country.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub title: String,
    pub bars: Vec<Bar>,
}

/// A renderable chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Title only, no data series.
    Placeholder { title: String },
    Map(MapSpec),
    Bar(BarSpec),
}

impl Figure {
    pub fn placeholder() -> Self {
        Figure::Placeholder {
            title: NO_DATA_TITLE.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Figure::Placeholder { title } => title,
            Figure::Map(spec) => &spec.title,
            Figure::Bar(spec) => &spec.title,
        }
    }

    /// Number of data points across all series.
    pub fn point_count(&self) -> usize {
        match self {
            Figure::Placeholder { .. } => 0,
            Figure::Map(spec) => spec.locations.len(),
            Figure::Bar(spec) => spec.bars.len(),
        }
    }

    /// Plotly.js figure JSON (`{"data": [...], "layout": {...}}`).
    pub fn to_plotly(&self) -> JsonValue {
        match self {
            Figure::Placeholder { title } => json!({
                "data": [],
                "layout": base_layout(title),
            }),
            Figure::Map(spec) => {
                let mut layout = base_layout(&spec.title);
                layout["geo"] = json!({
                    "showframe": false,
                    "bgcolor": color::PLOT_BACKGROUND,
                    "landcolor": color::GRID_COLOR,
                    "projection": { "type": "natural earth" },
                });
                json!({
                    "data": [{
                        "type": "choropleth",
                        "locationmode": "ISO-3",
                        "locations": spec.locations,
                        "z": spec.values,
                        "hovertext": spec.hover_names,
                        "colorscale": color::CONTINUOUS_SCALE,
                        "colorbar": { "title": { "text": VALUE_LABEL } },
                    }],
                    "layout": layout,
                })
            }
            Figure::Bar(spec) => {
                let mut layout = base_layout(&spec.title);
                layout["xaxis"] = axis(COUNTRY_LABEL);
                layout["yaxis"] = axis(VALUE_LABEL);
                layout["legend"] = json!({ "title": { "text": COUNTRY_LABEL } });

                // One trace per country, so each gets its own legend entry.
                let mut traces: Vec<JsonValue> = Vec::new();
                for bar in &spec.bars {
                    let existing = traces
                        .iter()
                        .position(|t| t["name"].as_str() == Some(bar.label.as_str()));
                    match existing {
                        Some(i) => {
                            let trace = &mut traces[i];
                            if let Some(xs) = trace["x"].as_array_mut() {
                                xs.push(json!(bar.label));
                            }
                            if let Some(ys) = trace["y"].as_array_mut() {
                                ys.push(json!(bar.value));
                            }
                        }
                        None => traces.push(json!({
                            "type": "bar",
                            "name": bar.label,
                            "x": [bar.label],
                            "y": [bar.value],
                            "marker": { "color": bar.color },
                        })),
                    }
                }
                json!({ "data": traces, "layout": layout })
            }
        }
    }
}

fn base_layout(title: &str) -> JsonValue {
    json!({
        "title": { "text": title },
        "paper_bgcolor": color::PAPER_BACKGROUND,
        "plot_bgcolor": color::PLOT_BACKGROUND,
        "font": { "color": color::FONT_COLOR },
    })
}

fn axis(title: &str) -> JsonValue {
    json!({
        "title": { "text": title },
        "gridcolor": color::GRID_COLOR,
    })
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Render a subset into the (map, bar) pair.
///
/// An empty subset yields two identical placeholders.
pub fn render(subset: &ObservationSubset<'_>) -> (Figure, Figure) {
    if subset.is_empty() {
        let empty = Figure::placeholder();
        return (empty.clone(), empty);
    }

    let selection = format!("{} - {}", subset.category, subset.year);
    let rows = subset.rows();

    let map = MapSpec {
        title: format!("World ESG Data Map ({selection})"),
        locations: rows.iter().map(|o| o.country_code.clone()).collect(),
        values: rows.iter().map(|o| o.value).collect(),
        hover_names: rows.iter().map(|o| o.country_name.clone()).collect(),
    };

    let colors = ColorMap::new(rows.iter().map(|o| o.country_name.as_str()));
    let bar = BarSpec {
        title: format!("ESG Comparison by Country ({selection})"),
        bars: rows
            .iter()
            .map(|o| Bar {
                label: o.country_name.clone(),
                value: o.value,
                color: colors.color_for(&o.country_name).to_string(),
            })
            .collect(),
    };

    (Figure::Map(map), Figure::Bar(bar))
}
