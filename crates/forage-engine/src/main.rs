//! Engine binary for the Forage simulation.
//!
//! Loads configuration, initializes logging, builds the simulation, and
//! either serves the polling API or runs headless to the end.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `forage-config.yaml` (or `FORAGE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Validate the configuration
//! 4. Serve the polling API, or run headless and log the result

mod error;
mod headless;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use forage_core::config::RunMode;
use forage_core::{Simulation, SimulationConfig};
use forage_observer::{AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file read when `FORAGE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "forage-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the simulation, or the server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, source) = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!("forage-engine starting");
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3. Validate.
    config.validate().context("validating configuration")?;
    info!(
        width = config.world.width,
        height = config.world.height,
        seed = config.world.seed,
        agents = config.population.agents,
        food_budget = config.food.budget,
        max_steps = config.simulation.max_steps,
        mode = ?config.simulation.mode,
        "Configuration validated"
    );

    // 4. Run.
    match config.simulation.mode {
        RunMode::Serve => serve(&config).await?,
        RunMode::Headless => {
            headless::run(&config)?;
        }
    }

    info!("forage-engine stopped");
    Ok(())
}

/// Serve the polling API until shutdown.
async fn serve(config: &SimulationConfig) -> Result<(), EngineError> {
    let sim = Simulation::new(config)?;
    let state = Arc::new(AppState::new(sim));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    forage_observer::start_server(&server_config, state).await?;
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
fn init_tracing(config: &SimulationConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load configuration.
///
/// Reads `FORAGE_CONFIG` if set, which must then exist. Otherwise reads
/// `forage-config.yaml` from the working directory, falling back to
/// defaults when it is absent. Environment overrides apply either way.
/// Returns the config and the file it came from, if any.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    if let Ok(explicit) = std::env::var("FORAGE_CONFIG") {
        let path = PathBuf::from(explicit);
        if !path.exists() {
            return Err(EngineError::MissingConfig { path });
        }
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}
