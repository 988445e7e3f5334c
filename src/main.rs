//! Fuelplan API Server
//!
//! Run with: cargo run --bin fuelplan
//!
//! # Configuration
//!
//! Reads `--config PATH` if given, otherwise searches the default locations
//! (see [`Config::load_default`]). Environment variables override the file:
//! - `FUELPLAN_API_HOST`, `FUELPLAN_API_PORT`
//! - `FUELPLAN_LOG_PATH`, `FUELPLAN_STORAGE_BACKEND`
//! - `FUELPLAN_PROTEIN_PER_KG`
//! - `FUELPLAN_LOG_LEVEL`, `FUELPLAN_LOG_FORMAT`
//! - `RUST_LOG`: full filter directive, wins over the configured level

use anyhow::Context;
use clap::Parser;
use fuelplan::api::{serve, AppState};
use fuelplan::config::Config;
use fuelplan::logging::init_tracing;
use fuelplan::nutrition::NutritionCalculator;
use fuelplan::session::Session;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuelplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Nutrition target and weight log API server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(path) => Config::load_with_env(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting Fuelplan API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Weight log backend: {:?}", config.storage.backend);

    let log = config
        .storage
        .open()
        .context("opening weight log")?;
    tracing::info!("Weight log: {}", log.describe());

    let calculator =
        NutritionCalculator::new(config.nutrition.clone()).context("invalid nutrition config")?;

    let state = AppState::new(Session::new(log), calculator, config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Fuelplan API server stopped");
    Ok(())
}
