use super::model::{Observation, ObservationTable};

/// The rows matching one (category, year) selection.
///
/// Borrows the table; carries the selection so titles can be rendered
/// without looking back at the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSubset<'a> {
    pub category: String,
    pub year: String,
    rows: Vec<&'a Observation>,
}

impl<'a> ObservationSubset<'a> {
    pub fn rows(&self) -> &[&'a Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Select rows whose indicator name equals `category` and whose year label
/// equals `year`. Both comparisons are exact text equality.
///
/// An empty result is a normal outcome, not an error.
pub fn filter<'a>(table: &'a ObservationTable, category: &str, year: &str) -> ObservationSubset<'a> {
    let rows = table
        .rows()
        .iter()
        .filter(|o| o.indicator_name == category && o.year == year)
        .collect();

    ObservationSubset {
        category: category.to_string(),
        year: year.to_string(),
        rows,
    }
}
