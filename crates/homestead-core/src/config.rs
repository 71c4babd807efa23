//! Configuration loading and typed config structures for the Homestead simulation.
//!
//! The canonical configuration lives in `homestead-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//!
//! Every field has a default equal to the game's tuned constants, so an
//! empty file (or no file at all) yields the standard economy.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `homestead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Season length.
    #[serde(default)]
    pub time: TimeConfig,

    /// Upkeep and recruiting costs.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Per-worker yields and conversion rates.
    #[serde(default)]
    pub production: ProductionConfig,

    /// Ranger exploration parameters.
    #[serde(default)]
    pub exploration: ExplorationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Run boundaries and starting state.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable settlement name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for crafting choices and the exploration deck.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick, for hosts that drive a timer.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Time and season configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Number of ticks in one season.
    #[serde(default = "default_ticks_per_season")]
    pub ticks_per_season: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            ticks_per_season: default_ticks_per_season(),
        }
    }
}

/// Upkeep and cost configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Food eaten per person per tick.
    #[serde(default = "default_food_upkeep")]
    pub food_upkeep_per_capita: Decimal,

    /// Pelts burned per person per tick.
    #[serde(default = "default_warmth_upkeep")]
    pub warmth_upkeep_per_capita: Decimal,

    /// Production multiplier applied for each unmet upkeep (hunger, cold).
    #[serde(default = "default_starvation_penalty")]
    pub starvation_penalty: Decimal,

    /// Food spent to recruit one peasant.
    #[serde(default = "default_recruit_food_cost")]
    pub recruit_food_cost: Decimal,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            food_upkeep_per_capita: default_food_upkeep(),
            warmth_upkeep_per_capita: default_warmth_upkeep(),
            starvation_penalty: default_starvation_penalty(),
            recruit_food_cost: default_recruit_food_cost(),
        }
    }
}

/// Per-worker yields and conversion rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionConfig {
    /// Meat per hunter per tick.
    #[serde(default = "default_hunter_meat")]
    pub hunter_meat: Decimal,

    /// Pelts per hunter per tick.
    #[serde(default = "default_hunter_pelts")]
    pub hunter_pelts: Decimal,

    /// Guts per hunter per tick, once guts are separated.
    #[serde(default = "default_hunter_guts")]
    pub hunter_guts: Decimal,

    /// Feathers per hunter per tick, while any bow is equipped.
    #[serde(default = "default_hunter_feathers")]
    pub hunter_feathers: Decimal,

    /// Skins per hunter per tick, while any bow is equipped.
    #[serde(default = "default_hunter_skins")]
    pub hunter_skins: Decimal,

    /// Hunting multiplier at full arrow supply.
    #[serde(default = "default_bow_bonus")]
    pub bow_bonus: Decimal,

    /// Arrows used per equipped bow per tick.
    #[serde(default = "default_arrows_per_bow")]
    pub arrows_per_bow: Decimal,

    /// Cumulative meat after which hunters separate guts.
    #[serde(default = "default_guts_unlock_meat")]
    pub guts_unlock_meat: Decimal,

    /// Wood per woodsman per tick.
    #[serde(default = "default_woodsman_wood")]
    pub woodsman_wood: Decimal,

    /// Grain buffered per growing farm per tick.
    #[serde(default = "default_farm_grain")]
    pub farm_grain: Decimal,

    /// Flax per growth slot at harvest.
    #[serde(default = "default_farm_flax")]
    pub farm_flax: Decimal,

    /// Skins needed before farmers learn flax.
    #[serde(default = "default_flax_unlock_skins")]
    pub flax_unlock_skins: Decimal,

    /// Stone per quarry per tick.
    #[serde(default = "default_quarry_stone")]
    pub quarry_stone: Decimal,

    /// Ore per mine per tick.
    #[serde(default = "default_mine_ore")]
    pub mine_ore: Decimal,

    /// Ore a smelter can take per tick.
    #[serde(default = "default_smelter_ore")]
    pub smelter_ore: Decimal,

    /// Buffered ore per ingot.
    #[serde(default = "default_ore_per_ingot")]
    pub ore_per_ingot: Decimal,

    /// Wood a lumber mill can take per tick.
    #[serde(default = "default_mill_wood")]
    pub mill_wood: Decimal,

    /// Buffered wood per batch of planks.
    #[serde(default = "default_wood_per_plank")]
    pub wood_per_plank: Decimal,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            hunter_meat: default_hunter_meat(),
            hunter_pelts: default_hunter_pelts(),
            hunter_guts: default_hunter_guts(),
            hunter_feathers: default_hunter_feathers(),
            hunter_skins: default_hunter_skins(),
            bow_bonus: default_bow_bonus(),
            arrows_per_bow: default_arrows_per_bow(),
            guts_unlock_meat: default_guts_unlock_meat(),
            woodsman_wood: default_woodsman_wood(),
            farm_grain: default_farm_grain(),
            farm_flax: default_farm_flax(),
            flax_unlock_skins: default_flax_unlock_skins(),
            quarry_stone: default_quarry_stone(),
            mine_ore: default_mine_ore(),
            smelter_ore: default_smelter_ore(),
            ore_per_ingot: default_ore_per_ingot(),
            mill_wood: default_mill_wood(),
            wood_per_plank: default_wood_per_plank(),
        }
    }
}

/// Ranger exploration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExplorationConfig {
    /// Ticks one ranger needs to earn a draw.
    #[serde(default = "default_ranger_draw_ticks")]
    pub ranger_draw_ticks: u64,

    /// Population at which the deck gains its milestone cards.
    #[serde(default = "default_deck_augment_population")]
    pub deck_augment_population: u64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            ranger_draw_ticks: default_ranger_draw_ticks(),
            deck_augment_population: default_deck_augment_population(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Chronicle lines kept in the rolling history.
    #[serde(default = "default_history_len")]
    pub history_len: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            history_len: default_history_len(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Ticks the headless runner executes before printing the snapshot.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Optional starting snapshot, in the same shape as an exported one.
    /// Missing fields keep their fresh-settlement defaults.
    #[serde(default)]
    pub initial_state: Option<serde_json::Value>,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            initial_state: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Homestead".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_ticks_per_season() -> u64 {
    15
}

const fn default_food_upkeep() -> Decimal {
    dec!(0.25)
}

const fn default_warmth_upkeep() -> Decimal {
    dec!(0.02)
}

const fn default_starvation_penalty() -> Decimal {
    dec!(0.75)
}

const fn default_recruit_food_cost() -> Decimal {
    dec!(2)
}

const fn default_hunter_meat() -> Decimal {
    dec!(0.475)
}

const fn default_hunter_pelts() -> Decimal {
    dec!(0.05)
}

const fn default_hunter_guts() -> Decimal {
    dec!(0.02)
}

const fn default_hunter_feathers() -> Decimal {
    dec!(0.1)
}

const fn default_hunter_skins() -> Decimal {
    dec!(0.05)
}

const fn default_bow_bonus() -> Decimal {
    dec!(1.25)
}

const fn default_arrows_per_bow() -> Decimal {
    dec!(0.08)
}

const fn default_guts_unlock_meat() -> Decimal {
    dec!(80)
}

const fn default_woodsman_wood() -> Decimal {
    dec!(1.0)
}

const fn default_farm_grain() -> Decimal {
    dec!(0.6)
}

const fn default_farm_flax() -> Decimal {
    dec!(1.5)
}

const fn default_flax_unlock_skins() -> Decimal {
    dec!(5)
}

const fn default_quarry_stone() -> Decimal {
    dec!(1.2)
}

const fn default_mine_ore() -> Decimal {
    dec!(0.8)
}

const fn default_smelter_ore() -> Decimal {
    dec!(1.2)
}

const fn default_ore_per_ingot() -> Decimal {
    dec!(2)
}

const fn default_mill_wood() -> Decimal {
    dec!(1.5)
}

const fn default_wood_per_plank() -> Decimal {
    dec!(3)
}

const fn default_ranger_draw_ticks() -> u64 {
    10
}

const fn default_deck_augment_population() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_history_len() -> usize {
    5
}

const fn default_max_ticks() -> u64 {
    600
}
