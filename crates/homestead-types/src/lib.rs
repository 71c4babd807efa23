//! Shared type definitions for the Homestead settlement simulation.
//!
//! This crate is the single source of truth for the closed enumerations and
//! record types used across the Homestead workspace. Every keyed table in
//! the engine is keyed by one of these enums.
//!
//! # Modules
//!
//! - [`enums`] -- Closed enumerations (resources, roles, buildings, seasons, cards, unlocks, recipes)
//! - [`ids`] -- Handles for job slot arenas
//! - [`snapshot`] -- Serializable settlement snapshot records

pub mod enums;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Building, CraftRole, Destination, RecipeId, Resource, Role, Season, SiteCard, UnlockFlag,
};
pub use ids::JobSlotId;
pub use snapshot::{JobRecord, ReservedOutput, SettlementSnapshot};
