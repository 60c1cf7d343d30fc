mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};

use config::Config;
use state::Dashboard;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    // The only blocking I/O in the process; any failure aborts start-up.
    let raw = data::loader::load(&config.data_path)
        .with_context(|| format!("loading dataset {}", config.data_path.display()))?;
    let dashboard = Arc::new(Dashboard::from_raw(&raw));
    drop(raw);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("binding {}:{}", config.host, config.port))?;
    log::info!("ESG dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app::router(dashboard))
        .await
        .context("server failed")?;
    Ok(())
}
