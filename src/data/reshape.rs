use super::model::{Observation, ObservationTable, RawCell, RawTable};

/// Coerce a raw cell to a number. Anything unparseable becomes missing.
///
/// Non-finite results (`NaN`, `inf`) are treated as missing too, so every
/// present value can be charted.
pub fn coerce(cell: &RawCell) -> Option<f64> {
    let v = match cell {
        RawCell::Number(v) => *v,
        RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
        RawCell::Empty => return None,
    };
    v.is_finite().then_some(v)
}

/// Melt the wide table into one observation per (record, year column).
///
/// Row order is record order × year declaration order; nothing is sorted.
pub fn reshape(raw: &RawTable) -> ObservationTable {
    let mut observations = Vec::with_capacity(raw.records.len() * raw.years.len());

    for record in &raw.records {
        for (i, year) in raw.years.iter().enumerate() {
            let value = record.cells.get(i).and_then(coerce);
            observations.push(Observation {
                country_name: record.country_name.clone(),
                country_code: record.country_code.clone(),
                indicator_name: record.indicator_name.clone(),
                indicator_code: record.indicator_code.clone(),
                year: year.clone(),
                value,
            });
        }
    }

    log::debug!(
        "Reshaped {} records x {} years into {} observations",
        raw.records.len(),
        raw.years.len(),
        observations.len()
    );
    ObservationTable::new(observations)
}
