use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use super::error::{LoadError, SchemaError};
use super::model::{RawCell, RawRecord, RawTable};

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "CountryCode";
pub const INDICATOR_NAME: &str = "Indicator Name_x";
pub const INDICATOR_CODE: &str = "Indicator Code";

/// Clean spelling of the indicator-name column, accepted alongside the
/// merge-suffixed `Indicator Name_x`.
const INDICATOR_NAME_CLEAN: &str = "Indicator Name";

/// Whether a column name denotes a year column.
pub fn is_year_column(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Positions of the identifying and year columns within a header row.
#[derive(Debug, Clone, PartialEq)]
struct ColumnLayout {
    country_name: usize,
    country_code: usize,
    indicator_name: usize,
    indicator_code: usize,
    /// (year label, column position), declaration order.
    years: Vec<(String, usize)>,
}

impl ColumnLayout {
    /// Detect the layout, failing if any identifying column or every year column is absent.
    fn detect(headers: &[String]) -> Result<Self, SchemaError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let country_name = find(COUNTRY_NAME);
        let country_code = find(COUNTRY_CODE);
        let indicator_name = find(INDICATOR_NAME).or_else(|| find(INDICATOR_NAME_CLEAN));
        let indicator_code = find(INDICATOR_CODE);

        let missing: Vec<String> = [
            (COUNTRY_NAME, country_name),
            (COUNTRY_CODE, country_code),
            (INDICATOR_NAME, indicator_name),
            (INDICATOR_CODE, indicator_code),
        ]
        .iter()
        .filter(|(_, pos)| pos.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

        let mut years: Vec<(String, usize)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if !is_year_column(header) {
                continue;
            }
            if years.iter().any(|(y, _)| y == header) {
                log::warn!("Duplicate year column '{header}' at position {idx} ignored");
                continue;
            }
            years.push((header.clone(), idx));
        }

        match (country_name, country_code, indicator_name, indicator_code) {
            (Some(country_name), Some(country_code), Some(indicator_name), Some(indicator_code)) => {
                if years.is_empty() {
                    return Err(SchemaError::NoYearColumns);
                }
                Ok(ColumnLayout {
                    country_name,
                    country_code,
                    indicator_name,
                    indicator_code,
                    years,
                })
            }
            _ => Err(SchemaError::MissingColumns(missing)),
        }
    }

    fn year_labels(&self) -> Vec<String> {
        self.years.iter().map(|(y, _)| y.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide ESG dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with identifying columns and one column per year
/// * `.json` – `[{ "Country Name": ..., "1990": ..., ... }, ...]`
///
/// Paths without an extension are read as CSV.
pub fn load(path: &Path) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} records with {} year columns ({} .. {})",
        table.len(),
        table.years.len(),
        table.years.first().map(String::as_str).unwrap_or("-"),
        table.years.last().map(String::as_str).unwrap_or("-"),
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    read_csv(&mut reader)
}

fn read_csv<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<RawTable, LoadError> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    log::info!("Columns in ESG data: {headers:?}");

    let layout = ColumnLayout::detect(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();

        let cells = layout
            .years
            .iter()
            .map(|(_, idx)| RawCell::from_field(row.get(*idx).unwrap_or("")))
            .collect();

        records.push(RawRecord {
            country_name: field(layout.country_name),
            country_code: field(layout.country_code),
            indicator_name: field(layout.indicator_name),
            indicator_code: field(layout.indicator_code),
            cells,
        });
    }

    Ok(RawTable {
        years: layout.year_labels(),
        records,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country Name": "Chile", "CountryCode": "CHL",
///     "Indicator Name_x": "CO2 emissions", "Indicator Code": "EN.ATM.CO2E.PC",
///     "1990": 2.4, "1991": null },
///   ...
/// ]
/// ```
///
/// The header is the union of keys in first-seen order; a key absent from a
/// row reads as an empty cell.
fn load_json(path: &Path) -> Result<RawTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<RawTable, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::JsonShape("expected top-level JSON array".into()))?;

    let objects: Vec<&Map<String, JsonValue>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object()
                .ok_or_else(|| LoadError::JsonShape(format!("row {i} is not a JSON object")))
        })
        .collect::<Result<_, _>>()?;

    let mut headers: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    log::info!("Columns in ESG data: {headers:?}");

    let layout = ColumnLayout::detect(&headers)?;
    let text_field = |obj: &Map<String, JsonValue>, idx: usize| match obj.get(&headers[idx]) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let records = objects
        .iter()
        .map(|obj| RawRecord {
            country_name: text_field(obj, layout.country_name),
            country_code: text_field(obj, layout.country_code),
            indicator_name: text_field(obj, layout.indicator_name),
            indicator_code: text_field(obj, layout.indicator_code),
            cells: layout
                .years
                .iter()
                .map(|(year, _)| json_to_cell(obj.get(year)))
                .collect(),
        })
        .collect();

    Ok(RawTable {
        years: layout.year_labels(),
        records,
    })
}

fn json_to_cell(val: Option<&JsonValue>) -> RawCell {
    match val {
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(RawCell::Number)
            .unwrap_or_else(|| RawCell::Text(n.to_string())),
        Some(JsonValue::String(s)) => RawCell::from_field(s),
        Some(JsonValue::Null) | None => RawCell::Empty,
        Some(other) => RawCell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str = "Country Name,CountryCode,Indicator Name_x,Indicator Code";

    #[test]
    fn loads_csv_with_year_columns_in_declaration_order() {
        let csv = format!(
            "{HEADER},2001,Notes,2000\n\
             Chile,CHL,CO2 emissions,EN.CO2,1.5,ok,..\n\
             Peru,PER,CO2 emissions,EN.CO2,,x,2\n"
        );
        let file = write_fixture(".csv", &csv);
        let table = load(file.path()).unwrap();

        assert_eq!(table.years, vec!["2001", "2000"]);
        assert_eq!(table.len(), 2);
        let chile = &table.records[0];
        assert_eq!(chile.country_name, "Chile");
        assert_eq!(chile.indicator_name, "CO2 emissions");
        assert_eq!(
            chile.cells,
            vec![RawCell::Text("1.5".into()), RawCell::Text("..".into())]
        );
        assert_eq!(table.records[1].cells[0], RawCell::Empty);
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn each_missing_identifying_column_is_a_schema_error() {
        for dropped in [COUNTRY_NAME, COUNTRY_CODE, INDICATOR_NAME, INDICATOR_CODE] {
            let header: Vec<&str> = HEADER.split(',').filter(|h| *h != dropped).collect();
            let csv = format!("{},1990\n", header.join(","));
            let file = write_fixture(".csv", &csv);

            match load(file.path()) {
                Err(LoadError::Schema(SchemaError::MissingColumns(cols))) => {
                    assert_eq!(cols, vec![dropped.to_string()]);
                }
                other => panic!("expected missing {dropped}, got {other:?}"),
            }
        }
    }

    #[test]
    fn no_year_column_is_a_schema_error() {
        let csv = format!("{HEADER},Year 1990,1990a\nChile,CHL,CO2,EN,1,2\n");
        let file = write_fixture(".csv", &csv);
        assert!(matches!(
            load(file.path()),
            Err(LoadError::Schema(SchemaError::NoYearColumns))
        ));
    }

    #[test]
    fn clean_indicator_name_column_is_accepted() {
        let csv = "Country Name,CountryCode,Indicator Name,Indicator Code,2010\n\
                   Chile,CHL,Forest area,AG.LND,22.1\n";
        let file = write_fixture(".csv", csv);
        let table = load(file.path()).unwrap();
        assert_eq!(table.records[0].indicator_name, "Forest area");
    }

    #[test]
    fn duplicate_year_column_keeps_first() {
        let headers: Vec<String> = [COUNTRY_NAME, COUNTRY_CODE, INDICATOR_NAME, INDICATOR_CODE, "1990", "1990"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let layout = ColumnLayout::detect(&headers).unwrap();
        assert_eq!(layout.years, vec![("1990".to_string(), 4)]);
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Country Name": "Chile", "CountryCode": "CHL", "Indicator Name_x": "CO2",
             "Indicator Code": "EN", "1991": 3.25, "1990": "N/A"},
            {"Country Name": "Peru", "CountryCode": "PER", "Indicator Name_x": "CO2",
             "Indicator Code": "EN", "1991": null}
        ]"#;
        let file = write_fixture(".json", json);
        let table = load(file.path()).unwrap();

        assert_eq!(table.years, vec!["1991", "1990"]);
        assert_eq!(
            table.records[0].cells,
            vec![RawCell::Number(3.25), RawCell::Text("N/A".into())]
        );
        assert_eq!(table.records[1].cells, vec![RawCell::Empty, RawCell::Empty]);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_fixture(".xlsx", "");
        assert!(matches!(
            load(file.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn year_column_detection() {
        assert!(is_year_column("1990"));
        assert!(!is_year_column(""));
        assert!(!is_year_column("1990.1"));
        assert!(!is_year_column(" 1990"));
    }
}
