use serde_json::{json, Value as JsonValue};

use crate::data::filter::filter;
use crate::data::model::{ObservationTable, RawTable};
use crate::data::reshape::reshape;
use crate::ui::plot::{render, Figure};

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// The dropdown value sets and the initial selection, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOptions {
    pub categories: Vec<String>,
    pub years: Vec<String>,
    pub default_category: Option<String>,
    pub default_year: Option<String>,
}

// ---------------------------------------------------------------------------
// Dashboard view – the two chart outputs, always from the same selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub map: Figure,
    pub bar: Figure,
}

impl DashboardView {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "map": self.map.to_plotly(),
            "bar": self.bar.to_plotly(),
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The immutable observation table plus everything derived from it at start-up.
///
/// Shared read-only across requests; every selection change is an
/// independent filter-then-render call.
#[derive(Debug)]
pub struct Dashboard {
    table: ObservationTable,
    options: SelectorOptions,
}

impl Dashboard {
    pub fn new(table: ObservationTable) -> Self {
        let categories = table.categories();
        let years = table.years();
        let options = SelectorOptions {
            default_category: categories.first().cloned(),
            default_year: years.first().cloned(),
            categories,
            years,
        };
        if table.is_empty() {
            log::warn!("Dataset has no observations; every selection will show the placeholder");
        }
        log::info!(
            "Dashboard ready: {} observations, {} categories, {} years",
            table.len(),
            options.categories.len(),
            options.years.len()
        );
        Self { table, options }
    }

    /// Reshape a freshly loaded wide table and build the dashboard over it.
    pub fn from_raw(raw: &RawTable) -> Self {
        Self::new(reshape(raw))
    }

    pub fn table(&self) -> &ObservationTable {
        &self.table
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    /// The view shown before the user touches either selector.
    pub fn initial_view(&self) -> DashboardView {
        self.on_selection_changed(
            self.options.default_category.as_deref(),
            self.options.default_year.as_deref(),
        )
    }

    /// Input-change handler: filter then render, producing both charts together.
    ///
    /// A cleared selector (`None`) matches nothing and yields the placeholder pair.
    pub fn on_selection_changed(&self, category: Option<&str>, year: Option<&str>) -> DashboardView {
        let (map, bar) = match (category, year) {
            (Some(category), Some(year)) => {
                let subset = filter(&self.table, category, year);
                log::debug!("Selection ({category}, {year}) matched {} rows", subset.len());
                render(&subset)
            }
            _ => {
                let empty = Figure::placeholder();
                (empty.clone(), empty)
            }
        };
        DashboardView { map, bar }
    }
}
