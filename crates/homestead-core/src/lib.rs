//! Settlement engine for the Homestead simulation.
//!
//! A [`Settlement`] owns the whole economy: stockpile, workforce, crafting
//! jobs, calendar, exploration deck, unlock flags and chronicle. Hosts
//! drive it with [`Settlement::tick`] and the `action_*` commands, and
//! persist it through [`Settlement::export_snapshot`] and
//! [`Settlement::load_snapshot`].
//!
//! # Modules
//!
//! - [`actions`] -- Player commands and [`Command`] dispatch.
//! - [`config`] -- Configuration loading from `homestead-config.yaml` into
//!   strongly-typed structs.
//! - [`crafting`] -- What idle smithies and tailors make next.
//! - [`engine`] -- The [`Settlement`] and its fixed per-tick order.
//! - [`jobs`] -- Job processors and per-role slot arenas.
//! - [`log`] -- The player-facing chronicle.
//! - [`production`] -- Upkeep, the production multiplier and yields.
//! - [`recipes`] -- The static recipe table.
//! - [`snapshot`] -- Snapshot export and lenient loading.
//! - [`unlocks`] -- One-way progression flags.
//! - [`workforce`] -- Role and building counts.

pub mod actions;
pub mod config;
pub mod crafting;
pub mod engine;
pub mod jobs;
pub mod log;
pub mod production;
pub mod recipes;
pub mod snapshot;
pub mod unlocks;
pub mod workforce;

pub use actions::{Command, Outcome};
pub use config::{ConfigError, SimulationConfig};
pub use engine::{EngineError, Settlement, TickSummary};
