use std::fmt;

// ---------------------------------------------------------------------------
// RawCell – a single year cell as it was stored
// ---------------------------------------------------------------------------

/// A year cell before numeric coercion.
///
/// CSV sources only ever produce `Text` or `Empty`; JSON sources may carry
/// numbers directly.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Number(f64),
    Text(String),
    Empty,
}

impl RawCell {
    /// Classify a CSV field. Blank fields are `Empty`, everything else is kept as text.
    pub fn from_field(s: &str) -> Self {
        if s.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s.to_string())
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Number(v) => write!(f, "{v}"),
            RawCell::Text(s) => write!(f, "{s}"),
            RawCell::Empty => write!(f, "<empty>"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord / RawTable – the wide layout
// ---------------------------------------------------------------------------

/// One input row: a (country, indicator) pair with one cell per year column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    /// Aligned with [`RawTable::years`].
    pub cells: Vec<RawCell>,
}

/// The loaded wide table. Year columns are kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub years: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Observation / ObservationTable – the long layout
// ---------------------------------------------------------------------------

/// One reshaped row, one per (country, indicator, year).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    /// The source year column name, kept as text.
    pub year: String,
    pub value: Option<f64>,
}

/// The queryable in-memory table. Built once and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    observations: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct non-empty indicator names in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.observations
            .iter()
            .map(|o| o.indicator_name.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    /// Distinct year labels, sorted numerically.
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = self
            .observations
            .iter()
            .map(|o| o.year.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        // Numeric, not lexical: "999" sorts before "1990". Year labels are
        // all-digit, so length-then-lexical (ignoring leading zeros) is numeric.
        years.sort_by(|a, b| {
            let (a, b) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        });
        years
    }
}
