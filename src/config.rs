use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_DATA_PATH: &str = "data/processed_esg_data.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Runtime configuration, read once at start-up from the environment.
///
/// * `ESG_DATA_PATH` – dataset file
/// * `HOST` / `PORT` – bind address
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_path = lookup("ESG_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            None => DEFAULT_PORT,
        };
        Ok(Config {
            data_path,
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("ESG_DATA_PATH", "/srv/esg.json"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("/srv/esg.json"));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("PORT", "70000")]).is_err());
    }
}
