//! Census engine binary for the Hamlet workspace.
//!
//! This is the main entry point that wires together the world host, the
//! population gauge, and the census collector. It loads configuration,
//! spawns the seed population, and runs periodic multi-world census sweeps
//! until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `hamlet-config.yaml`
//! 3. Create the world directory and spawn the seed population
//! 4. Create the population gauge and census collector
//! 5. Run the sweep loop (bounded by `census.max_sweeps`, or until Ctrl-C)
//! 6. Clear the gauge and log the result

mod config;
mod error;
mod spawner;

use std::path::Path;
use std::sync::Arc;

use hamlet_census::{PopulationSink as _, WorldCensus};
use hamlet_metrics::{METRIC_NAME, PopulationGauge};
use hamlet_world::WorldDirectory;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;

/// Application entry point for the census engine.
///
/// Initializes all subsystems and runs the sweep loop. Returns an error
/// code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("hamlet-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        read_timeout_ms = config.census.read_timeout_ms,
        sweep_interval_ms = config.census.sweep_interval_ms,
        max_sweeps = config.census.max_sweeps,
        seed = config.population.seed,
        world_count = config.population.worlds.len(),
        "Configuration loaded"
    );

    // 3. Create the world directory and spawn the seed population.
    let directory = Arc::new(WorldDirectory::new());
    let mut rng = StdRng::seed_from_u64(config.population.seed);
    let spawn_summary = spawner::spawn_population(&config.population, &directory, &mut rng)?;
    info!(
        worlds = spawn_summary.worlds.len(),
        villagers = spawn_summary.villagers,
        "Seed population spawned"
    );

    // 4. Create the population gauge and census collector.
    let gauge = Arc::new(PopulationGauge::new());
    let census = WorldCensus::new(Arc::clone(&directory), Arc::clone(&gauge), &config.census);
    info!(metric = METRIC_NAME, "Census collector initialized");

    // 5. Run the sweep loop.
    let worlds = spawn_summary.worlds;
    let max_sweeps = config.census.max_sweeps;
    let mut interval = tokio::time::interval(config.census.sweep_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut sweeps: u64 = 0;

    info!("Entering sweep loop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = interval.tick() => {}
        }

        for result in census.collect_all(&worlds).await {
            match result {
                Ok(summary) => {
                    info!(
                        world = %summary.world,
                        enumerated = summary.enumerated,
                        observed = summary.observed,
                        dropped = summary.dropped,
                        rows = summary.rows,
                        "Sweep cycle complete"
                    );
                }
                Err(error) => {
                    // A failed world keeps its previous rows until the
                    // next successful cycle.
                    warn!(error = %error, "Sweep cycle failed");
                }
            }
        }

        sweeps = sweeps.saturating_add(1);
        if max_sweeps != 0 && sweeps >= max_sweeps {
            info!(sweeps, "Sweep limit reached");
            break;
        }

        if let Err(error) = spawner::churn_population(&directory, &worlds, &mut rng).await {
            warn!(error = %error, "Population churn failed");
        }
    }

    // 6. Clear the gauge on the way out.
    let published = gauge.rows()?;
    info!(rows = published.len(), "Final published label set");
    gauge.clear_all()?;
    info!(sweeps, "hamlet-engine shutdown complete");

    Ok(())
}

/// Load the engine configuration from `hamlet-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<EngineConfig, crate::error::EngineError> {
    let config_path = Path::new("hamlet-config.yaml");
    if config_path.exists() {
        let config = EngineConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(EngineConfig::default())
    }
}
