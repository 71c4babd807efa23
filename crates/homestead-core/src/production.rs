//! Upkeep, the production multiplier and the direct-yield rules.
//!
//! Every tick the settlement first eats and keeps warm, then works. An
//! unmet need does not kill anyone; it slows every worker down:
//!
//! ```text
//! food_need    = population * food_upkeep      (meat first, then grain)
//! warmth_need  = population * warmth_upkeep    (pelts)
//! multiplier   = hunger * cold                 (each 1 or the penalty)
//! ```
//!
//! Hunters additionally get a bow bonus scaled by how much of their arrow
//! demand was met:
//!
//! ```text
//! bonus = 1 + (bow_bonus - 1) * arrows_spent / arrows_needed
//! ```

use rust_decimal::Decimal;

use homestead_ledger::Stockpile;
use homestead_types::Resource;

use crate::config::{EconomyConfig, ProductionConfig};

/// What upkeep cost and did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upkeep {
    /// Food the population needed.
    pub food_need: Decimal,
    /// Pelts the population needed.
    pub warmth_need: Decimal,
    /// Hunger factor: 1, or the penalty when food ran short.
    pub hunger: Decimal,
    /// Cold factor: 1, or the penalty when pelts ran short.
    pub cold: Decimal,
}

impl Upkeep {
    /// The production multiplier for this tick.
    pub fn multiplier(&self) -> Decimal {
        self.hunger.saturating_mul(self.cold)
    }
}

/// Feed and warm `population`.
///
/// Food is taken from meat first, then grain. If meat and grain together
/// cannot cover the need, both are emptied and the hunger penalty applies.
/// Pelts work the same way for warmth.
pub fn consume_upkeep(stock: &mut Stockpile, population: u64, economy: &EconomyConfig) -> Upkeep {
    let people = Decimal::from(population);
    let food_need = people.saturating_mul(economy.food_upkeep_per_capita);
    let warmth_need = people.saturating_mul(economy.warmth_upkeep_per_capita);

    let total_food = stock
        .get(Resource::Meat)
        .saturating_add(stock.get(Resource::Grain));
    let hunger = if total_food >= food_need {
        let from_meat = stock.take_up_to(Resource::Meat, food_need);
        stock.take_up_to(Resource::Grain, food_need.saturating_sub(from_meat));
        Decimal::ONE
    } else {
        stock.set(Resource::Meat, Decimal::ZERO);
        stock.set(Resource::Grain, Decimal::ZERO);
        economy.starvation_penalty
    };

    let cold = if stock.has(Resource::Pelts, warmth_need) {
        stock.take_up_to(Resource::Pelts, warmth_need);
        Decimal::ONE
    } else {
        stock.set(Resource::Pelts, Decimal::ZERO);
        economy.starvation_penalty
    };

    Upkeep {
        food_need,
        warmth_need,
        hunger,
        cold,
    }
}

/// Spend from `stock` until `holders` each carry one `item`, starting from
/// `equipped`. Equipment never exceeds the holder count. Returns the new
/// equipped count.
pub fn equip(stock: &mut Stockpile, item: Resource, holders: u64, equipped: u64) -> u64 {
    let mut equipped = equipped.min(holders);
    while equipped < holders && stock.has(item, Decimal::ONE) {
        stock.take_up_to(item, Decimal::ONE);
        equipped = equipped.saturating_add(1);
    }
    equipped
}

/// Spend arrows for `bows_equipped` hunters and return the hunting bonus.
pub fn bow_bonus(stock: &mut Stockpile, bows_equipped: u64, production: &ProductionConfig) -> Decimal {
    if bows_equipped == 0 {
        return Decimal::ONE;
    }
    let needed = Decimal::from(bows_equipped).saturating_mul(production.arrows_per_bow);
    let spent = stock.take_up_to(Resource::Arrows, needed);
    let utilization = spent.checked_div(needed).unwrap_or(Decimal::ZERO);
    production
        .bow_bonus
        .saturating_sub(Decimal::ONE)
        .saturating_mul(utilization)
        .saturating_add(Decimal::ONE)
}

/// `workers * per_worker * multiplier`.
pub fn yield_of(workers: u64, per_worker: Decimal, multiplier: Decimal) -> Decimal {
    Decimal::from(workers)
        .saturating_mul(per_worker)
        .saturating_mul(multiplier)
}

/// Move up to `limit` of `input` from `stock` into `buffer`, then take as
/// many whole batches of `per_batch` out of the buffer as it holds.
/// Returns the number of batches.
pub fn convert(
    stock: &mut Stockpile,
    input: Resource,
    limit: Decimal,
    buffer: &mut Decimal,
    per_batch: Decimal,
) -> Decimal {
    let moved = stock.take_up_to(input, limit);
    *buffer = buffer.saturating_add(moved);
    let batches = buffer
        .checked_div(per_batch)
        .map_or(Decimal::ZERO, |b| b.floor());
    *buffer = buffer.saturating_sub(batches.saturating_mul(per_batch));
    batches
}
