//! One-way progression flags.
//!
//! Flags only ever go from locked to unlocked. [`UnlockTracker::evaluate`]
//! checks every rule in a fixed order, sets the flags whose condition now
//! holds and returns the ones that changed. Evaluating twice without any
//! change in between returns nothing the second time.
//!
//! | Flag | Condition |
//! |---|---|
//! | Jobs | population > 0 |
//! | Farm | houses >= 3 and planks >= 8 |
//! | FoodBreakdown | hunters > 0 and farms > 0 |
//! | GutsVisible | Guts unlocked and guts > 0 |
//! | Flax | skins >= 5 |
//! | Weaver | flax >= 3 |
//! | Bowyer | guts >= 3 and wood >= 6 |
//! | Ranger | bows > 0 and arrows > 0 |
//! | Quarry | quarry sites > 0 or quarries > 0 |
//! | Mine | mine sites > 0 or mines > 0 |
//! | Smelter | smelters > 0, or Quarry unlocked and stone >= 8 and ore >= 1 |
//! | Smithy | (stone > 0 or smithies > 0) and (ingots > 0 or smithies > 0) |
//! | Tailor | linen >= 1 or tailor shops > 0 |
//!
//! `Guts` itself is not evaluated here: hunters unlock it once they have
//! brought in enough meat.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use homestead_ledger::{CapacitySource, Stockpile};
use homestead_types::{Building, Resource, Role, UnlockFlag};

/// The chronicle line announcing a flag, if it has one.
pub const fn announcement(flag: UnlockFlag) -> Option<&'static str> {
    match flag {
        UnlockFlag::Farm => Some("with three homes built, villagers organize their first farm."),
        UnlockFlag::FoodBreakdown => {
            Some("your people distinguish meat from grain, improving resource management.")
        }
        UnlockFlag::Guts => Some("hunters begin separating out guts for other uses."),
        UnlockFlag::Flax => Some("farmers learn to ready fields for flax during harvests."),
        UnlockFlag::Weaver => Some("stored flax invites experiments at a simple loom."),
        UnlockFlag::Bowyer => Some("processed wood and guts might form a useful new tool."),
        UnlockFlag::Tailor => Some("a villager offers to tailor garments from your linen stock."),
        UnlockFlag::Jobs
        | UnlockFlag::GutsVisible
        | UnlockFlag::Ranger
        | UnlockFlag::Quarry
        | UnlockFlag::Mine
        | UnlockFlag::Smelter
        | UnlockFlag::Smithy => None,
    }
}

/// The set of unlocked flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockTracker {
    unlocked: BTreeSet<UnlockFlag>,
}

impl UnlockTracker {
    /// Everything locked.
    pub const fn new() -> Self {
        Self {
            unlocked: BTreeSet::new(),
        }
    }

    /// Whether `flag` is unlocked.
    pub fn is_unlocked(&self, flag: UnlockFlag) -> bool {
        self.unlocked.contains(&flag)
    }

    /// Unlock `flag`. Returns `true` on the locked to unlocked edge.
    pub fn unlock(&mut self, flag: UnlockFlag) -> bool {
        self.unlocked.insert(flag)
    }

    /// Unlocked flags in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = UnlockFlag> + '_ {
        self.unlocked.iter().copied()
    }

    /// Check every rule and unlock what now qualifies. Returns the newly
    /// unlocked flags in evaluation order.
    pub fn evaluate(
        &mut self,
        stock: &Stockpile,
        counts: &impl CapacitySource,
        population: u64,
        flax_unlock_skins: Decimal,
    ) -> Vec<UnlockFlag> {
        let mut changed = Vec::new();
        for flag in UnlockFlag::ALL {
            if self.is_unlocked(flag) {
                continue;
            }
            if self.condition(flag, stock, counts, population, flax_unlock_skins) {
                self.unlocked.insert(flag);
                changed.push(flag);
            }
        }
        changed
    }

    fn condition(
        &self,
        flag: UnlockFlag,
        stock: &Stockpile,
        counts: &impl CapacitySource,
        population: u64,
        flax_unlock_skins: Decimal,
    ) -> bool {
        let positive = |r: Resource| stock.get(r) > Decimal::ZERO;
        let at_least = |r: Resource, q: Decimal| stock.has(r, q);
        let built = |b: Building| counts.building_count(b) > 0;

        match flag {
            UnlockFlag::Jobs => population > 0,
            UnlockFlag::Farm => {
                counts.building_count(Building::House) >= 3 && at_least(Resource::Planks, dec!(8))
            }
            UnlockFlag::FoodBreakdown => {
                counts.role_count(Role::Hunter) > 0 && built(Building::Farm)
            }
            UnlockFlag::Guts => false,
            UnlockFlag::GutsVisible => {
                self.is_unlocked(UnlockFlag::Guts) && positive(Resource::Guts)
            }
            UnlockFlag::Flax => at_least(Resource::Skins, flax_unlock_skins),
            UnlockFlag::Weaver => at_least(Resource::Flax, dec!(3)),
            UnlockFlag::Bowyer => {
                at_least(Resource::Guts, dec!(3)) && at_least(Resource::Wood, dec!(6))
            }
            UnlockFlag::Ranger => positive(Resource::Bows) && positive(Resource::Arrows),
            UnlockFlag::Quarry => positive(Resource::QuarrySites) || built(Building::Quarry),
            UnlockFlag::Mine => positive(Resource::MineSites) || built(Building::Mine),
            UnlockFlag::Smelter => {
                built(Building::Smelter)
                    || (self.is_unlocked(UnlockFlag::Quarry)
                        && at_least(Resource::Stone, dec!(8))
                        && at_least(Resource::Ore, dec!(1)))
            }
            UnlockFlag::Smithy => {
                let smithies = built(Building::Smithy);
                (positive(Resource::Stone) || smithies) && (positive(Resource::Ingots) || smithies)
            }
            UnlockFlag::Tailor => {
                at_least(Resource::Linen, dec!(1)) || built(Building::TailorShop)
            }
        }
    }
}
