use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNTRIES: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("Canada", "CAN"),
    ("Brazil", "BRA"),
    ("Germany", "DEU"),
    ("India", "IND"),
    ("Kenya", "KEN"),
    ("Australia", "AUS"),
    ("Japan", "JPN"),
];

/// (indicator name, indicator code, baseline, yearly drift, noise)
const INDICATORS: &[(&str, &str, f64, f64, f64)] = &[
    ("CO2 emissions (metric tons per capita)", "EN.ATM.CO2E.PC", 8.0, -0.08, 0.6),
    ("Renewable energy consumption (% of total)", "EG.FEC.RNEW.ZS", 15.0, 0.45, 2.0),
    ("Forest area (% of land area)", "AG.LND.FRST.ZS", 30.0, -0.1, 1.5),
    ("Proportion of seats held by women in parliament (%)", "SG.GEN.PARL.ZS", 18.0, 0.6, 2.5),
];

const FIRST_YEAR: u32 = 2000;
const LAST_YEAR: u32 = 2020;

/// Normal sample via the Box-Muller transform.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// A cell as the upstream export writes it: mostly numbers, with the odd
/// blank or `..` placeholder.
fn cell(rng: &mut StdRng, value: f64) -> String {
    let roll: f64 = rng.random();
    if roll < 0.04 {
        String::new()
    } else if roll < 0.07 {
        "..".to_string()
    } else {
        format!("{:.2}", value.max(0.0))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let out_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/processed_esg_data.csv"));

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;

    let mut header: Vec<String> = ["Country Name", "CountryCode", "Indicator Name_x", "Indicator Code"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend((FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()));
    writer.write_record(&header)?;

    let mut rows = 0usize;
    for &(country, code) in COUNTRIES {
        let country_offset = gauss(&mut rng, 0.0, 1.0);
        for &(indicator, indicator_code, baseline, drift, noise) in INDICATORS {
            let mut record = vec![
                country.to_string(),
                code.to_string(),
                indicator.to_string(),
                indicator_code.to_string(),
            ];
            for (i, _) in (FIRST_YEAR..=LAST_YEAR).enumerate() {
                let trend = baseline * (1.0 + 0.2 * country_offset) + drift * i as f64;
                let value = trend + gauss(&mut rng, 0.0, noise);
                record.push(cell(&mut rng, value));
            }
            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;

    log::info!(
        "Wrote {rows} rows ({} year columns) to {}",
        LAST_YEAR - FIRST_YEAR + 1,
        out_path.display()
    );
    println!("Written: {}", out_path.display());
    Ok(())
}
