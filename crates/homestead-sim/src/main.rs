//! Headless runner for the Homestead settlement simulation.
//!
//! Loads configuration, builds a settlement (optionally from the inline
//! `simulation.initial_state` snapshot), advances it for
//! `simulation.max_ticks` ticks and prints the final snapshot as JSON on
//! stdout. Chronicle lines and tick summaries go to the tracing log.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `HOMESTEAD_CONFIG` or `homestead-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the settlement
//! 4. Run the tick loop
//! 5. Print the final snapshot

mod error;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use homestead_core::{Settlement, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::SimError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "homestead-config.yaml";

/// Environment variable overriding the configuration path.
const CONFIG_ENV: &str = "HOMESTEAD_CONFIG";

/// Application entry point for the runner.
///
/// # Errors
///
/// Returns an error if configuration, the engine or the final snapshot
/// fails.
fn main() -> Result<(), SimError> {
    // 1. Load configuration. Logging is not up yet, so report the source
    //    after the subscriber is installed.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging, defaulting to the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        source = %source.display(),
        world_name = config.world.name,
        seed = config.world.seed,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the settlement.
    let max_ticks = config.simulation.max_ticks;
    let interval = Duration::from_millis(config.world.tick_interval_ms);
    let mut settlement = Settlement::from_config(config)?;
    info!(
        population = settlement.population(),
        population_cap = settlement.population_cap(),
        "Settlement ready"
    );

    // 4. Run the tick loop.
    let mut lines: usize = 0;
    for _ in 0..max_ticks {
        let summary = settlement.tick()?;
        for line in settlement.drain_logs() {
            info!(tick = summary.tick, "{line}");
            lines = lines.saturating_add(1);
        }
        if !summary.unlocked.is_empty() {
            info!(tick = summary.tick, unlocked = ?summary.unlocked, "Progress");
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    info!(
        total_ticks = settlement.season().tick(),
        population = settlement.population(),
        chronicle_lines = lines,
        audit_clean = settlement.audit().is_clean(),
        "Simulation finished"
    );

    // 5. Print the final snapshot.
    let snapshot = settlement.export_json()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Load the simulation configuration.
///
/// Uses the path in `HOMESTEAD_CONFIG` when set, else
/// `homestead-config.yaml` in the working directory. A missing default
/// file yields the built-in defaults; a missing explicit file is an error.
fn load_config() -> Result<(SimulationConfig, PathBuf), SimError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, path));
    }
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, path.to_path_buf()))
    } else {
        Ok((SimulationConfig::default(), PathBuf::from("<defaults>")))
    }
}
