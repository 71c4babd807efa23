//! Serializable snapshot records.
//!
//! A [`SettlementSnapshot`] is the complete state of one settlement at a
//! tick boundary, laid out as a single flat JSON object. Exporting goes
//! through `serde`; loading is lenient and lives in the engine crate, which
//! reads field by field so that a malformed field degrades to its default
//! instead of rejecting the whole snapshot.
//!
//! Quantities are [`Decimal`] and serialize as numeric strings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{Destination, RecipeId, Resource, SiteCard};

/// The output a job processor has reserved: `[destination, item, quantity]`.
pub type ReservedOutput = (Destination, Resource, Decimal);

/// Serialized form of one job processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Recipe in progress, or `None` when idle.
    pub current_recipe: Option<RecipeId>,
    /// Accumulated work toward the recipe's work time.
    pub progress: Decimal,
    /// Workers contributing to this processor.
    pub worker_count: u32,
    /// Inputs debited when the job started, refunded on cancellation.
    pub reserved_inputs: BTreeMap<Resource, Decimal>,
    /// Output reservation held until delivery or cancellation.
    pub reserved_output: Option<ReservedOutput>,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            current_recipe: None,
            progress: Decimal::ZERO,
            worker_count: 1,
            reserved_inputs: BTreeMap::new(),
            reserved_output: None,
        }
    }
}

/// Full settlement state at a tick boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSnapshot {
    // --- Stockpile ---
    /// Quantity of every resource.
    pub resources: BTreeMap<Resource, Decimal>,

    // --- Workers ---
    /// Idle peasants.
    pub peasants: u64,
    /// Hunters.
    pub hunters: u64,
    /// Woodsmen.
    pub woodsmen: u64,
    /// Bowyers.
    pub bowyers: u64,
    /// Weavers.
    pub weavers: u64,
    /// Tailors; always equal to `tailor_shops`.
    pub tailors: u64,
    /// Rangers.
    pub rangers: u64,
    /// Rangers currently carrying a sword.
    pub ranger_swords_equipped: u64,

    // --- Buildings ---
    /// Lumber mills.
    pub lumber_mills: u64,
    /// Houses.
    pub houses: u64,
    /// Farms.
    pub farms: u64,
    /// Smelters.
    pub smelters: u64,
    /// Smithies.
    pub smithies: u64,
    /// Tailor shops.
    pub tailor_shops: u64,
    /// Quarries.
    pub quarries: u64,
    /// Mines.
    pub mines: u64,
    /// Cellars.
    pub cellars: u64,
    /// Warehouses.
    pub warehouses: u64,
    /// Population cap before houses.
    pub base_pop_cap: u64,

    // --- Buffers ---
    /// Farms locked in for growth at the start of autumn.
    pub farm_growth_slots: u64,
    /// Wood waiting to be milled.
    pub lumber_buffer: Decimal,
    /// Grain growing until the next summer.
    pub grain_buffer: Decimal,
    /// Ore waiting to be poured.
    pub smelter_buffer: Decimal,
    /// Hunters currently carrying a bow.
    pub hunter_bows_equipped: u64,

    // --- Jobs ---
    /// Bowyer processors.
    pub bowyer_jobs: Vec<JobRecord>,
    /// Weaver processors.
    pub weaver_jobs: Vec<JobRecord>,
    /// Tailor shop processors.
    pub tailor_jobs: Vec<JobRecord>,
    /// Smithy processors.
    pub smithy_jobs: Vec<JobRecord>,

    // --- Progress ---
    /// Cumulative meat ever produced by hunters.
    pub total_meat_made: Decimal,
    /// Ticks elapsed in the season cycle.
    pub season_tick: u64,
    /// Current season phase (0 = spring).
    pub season_phase: u64,
    /// Latest chronicle line.
    pub log_text: String,
    /// Last few chronicle lines, oldest first.
    pub log_history: Vec<String>,
    /// Resources kept visible even at zero.
    pub sticky_resources: Vec<Resource>,

    // --- Exploration ---
    /// Remaining exploration cards.
    pub site_deck: Vec<SiteCard>,
    /// Whether the initial deck has been built.
    pub deck_seeded: bool,
    /// Whether the deck was augmented at the population milestone.
    pub deck_refreshed_at_60: bool,
    /// Fractional draw credit accumulated by rangers.
    pub ranger_draw_pool: Decimal,

    // --- Unlocks ---
    /// Worker roles available.
    pub jobs_unlocked: bool,
    /// Farms available.
    pub farm_unlocked: bool,
    /// Meat and grain shown separately.
    pub food_breakdown_unlocked: bool,
    /// Hunters separate guts.
    pub guts_unlocked: bool,
    /// Guts have appeared in the stockpile.
    pub guts_visible: bool,
    /// Farms yield flax.
    pub flax_unlocked: bool,
    /// Weavers available.
    pub weaver_unlocked: bool,
    /// Bowyers available.
    pub bowyer_unlocked: bool,
    /// Rangers available.
    pub ranger_unlocked: bool,
    /// Quarries available.
    pub quarry_unlocked: bool,
    /// Mines available.
    pub mine_unlocked: bool,
    /// Smelters available.
    pub smelter_unlocked: bool,
    /// Smithies available.
    pub smithy_unlocked: bool,
    /// Tailor shops available.
    pub tailor_unlocked: bool,

    // --- Discovery and crafting history ---
    /// Quarry sites discovered so far.
    pub quarries_discovered: u64,
    /// Mine sites discovered so far.
    pub mines_discovered: u64,
    /// Smithy counter value at each item's last completion (-1 = never).
    pub smithy_last_crafted: BTreeMap<Resource, i64>,
    /// Smithy completions so far.
    pub smithy_craft_counter: i64,
    /// Tailor counter value at each item's last completion (-1 = never).
    pub tailor_last_crafted: BTreeMap<Resource, i64>,
    /// Tailor completions so far.
    pub tailor_craft_counter: i64,
    /// Whether the first linen has been announced.
    pub first_linen_announced: bool,

    // --- Storage ---
    /// Overflow cellar contents.
    pub cellar: BTreeMap<Resource, Decimal>,
    /// Overflow cellar capacity in slots.
    pub cellar_capacity: Decimal,
    /// Normal-destination quantities promised to running jobs.
    pub reserved_outputs: BTreeMap<Resource, Decimal>,
    /// Cellar slots promised to running jobs.
    pub reserved_cellar_slots: Decimal,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn job_record_defaults_to_one_idle_worker() {
        let job = JobRecord::default();
        assert_eq!(job.worker_count, 1);
        assert!(job.current_recipe.is_none());
        assert!(job.reserved_output.is_none());
    }

    #[test]
    fn reserved_output_serializes_as_triple() {
        let job = JobRecord {
            current_recipe: Some(RecipeId::WeaveLinen),
            progress: dec!(2),
            worker_count: 1,
            reserved_inputs: BTreeMap::from([(Resource::Flax, dec!(1))]),
            reserved_output: Some((Destination::Cellar, Resource::Linen, dec!(1))),
        };
        let value = serde_json::to_value(&job).unwrap_or_default();
        assert_eq!(value["current_recipe"], "weave_linen");
        assert_eq!(value["reserved_output"][0], "cellar");
        assert_eq!(value["reserved_output"][1], "Linen");
        assert_eq!(value["reserved_inputs"]["Flax"], "1");
    }
}
