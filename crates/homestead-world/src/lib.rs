//! Season cycle and exploration deck for the Homestead simulation.
//!
//! This crate models the settlement's surroundings: the annual calendar that
//! drives farming, and the deck of cards rangers draw from when exploring.
//!
//! # Modules
//!
//! - [`season`] -- [`SeasonCycle`]: tick counter, phase, grain buffer and
//!   the farms locked in for the year's growth.
//! - [`deck`] -- [`SiteDeck`] of exploration cards and the rangers'
//!   [`DrawCredit`].
//! - [`error`] -- Error types for invalid configuration.
//!
//! Both components take their randomness from a caller-supplied [`rand::Rng`],
//! so a seeded generator reproduces a run exactly.

pub mod deck;
pub mod error;
pub mod season;

// Re-export primary types at crate root.
pub use deck::{DrawCredit, SiteDeck, discovery_line, initial_cards, milestone_cards};
pub use error::WorldError;
pub use season::{Harvest, SeasonCycle, SeasonStep};
