//! What an idle smithy or tailor makes next.
//!
//! Each idle processor rolls one of five choices with equal odds: one of
//! the three items by name, the item with the `Lowest` stock, or the
//! `Stale` item crafted longest ago. The choice is then resolved against
//! the candidates the caller considers craftable right now:
//!
//! - a named item is made only if it is a candidate;
//! - `Lowest` and `Stale` pick uniformly among tied candidates.
//!
//! Smithies consider every item whose stock is below its cap. Tailors
//! consider every item whose inputs are in stock, even at its cap: a full
//! slot spills into the cellar. Either way the job only starts once the
//! storehouse can place its output.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;

use homestead_ledger::{CapacitySource, Stockpile, Storehouse, has_room};
use homestead_types::{Building, CraftRole, RecipeId, Resource};

use crate::recipes::recipe;

/// Items a smithy can make, with their recipes.
pub const SMITHY_TARGETS: [(Resource, RecipeId); 3] = [
    (Resource::Swords, RecipeId::SmithSword),
    (Resource::Daggers, RecipeId::SmithDagger),
    (Resource::Tools, RecipeId::SmithTool),
];

/// Items a tailor shop can make, with their recipes.
pub const TAILOR_TARGETS: [(Resource, RecipeId); 3] = [
    (Resource::Clothing, RecipeId::TailorClothing),
    (Resource::Cloaks, RecipeId::TailorCloak),
    (Resource::Gambesons, RecipeId::TailorGambeson),
];

/// A crafting building whose idle slots choose what to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workshop {
    /// Metalwork from ingots.
    Smithy,
    /// Garments from linen and pelts.
    Tailor,
}

impl Workshop {
    /// The building that provides one slot each.
    pub const fn building(self) -> Building {
        match self {
            Self::Smithy => Building::Smithy,
            Self::Tailor => Building::TailorShop,
        }
    }

    /// The slot arena this workshop runs in.
    pub const fn craft_role(self) -> CraftRole {
        match self {
            Self::Smithy => CraftRole::Smithy,
            Self::Tailor => CraftRole::Tailor,
        }
    }

    /// Items this workshop makes.
    pub const fn targets(self) -> &'static [(Resource, RecipeId); 3] {
        match self {
            Self::Smithy => &SMITHY_TARGETS,
            Self::Tailor => &TAILOR_TARGETS,
        }
    }

    /// The targets worth rolling for right now.
    pub fn candidates(
        self,
        store: &Storehouse,
        src: &impl CapacitySource,
    ) -> Vec<(Resource, RecipeId)> {
        self.targets()
            .iter()
            .copied()
            .filter(|(item, id)| match self {
                Self::Smithy => has_room(*item, &store.stockpile, src),
                Self::Tailor => store.has_inputs(recipe(*id).inputs),
            })
            .collect()
    }
}

/// Last-crafted value of an item that was never made.
pub const NEVER_CRAFTED: i64 = -1;

/// One roll of an idle processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftChoice {
    /// Make this recipe.
    Named(RecipeId),
    /// Make whichever candidate has the lowest stock.
    Lowest,
    /// Make whichever candidate was crafted longest ago.
    Stale,
}

/// Roll a choice uniformly over the named targets plus `Lowest` and `Stale`.
pub fn roll_choice(targets: &[(Resource, RecipeId)], rng: &mut impl Rng) -> CraftChoice {
    let slot = rng.random_range(0..targets.len().saturating_add(2));
    match targets.get(slot) {
        Some((_, id)) => CraftChoice::Named(*id),
        None if slot == targets.len() => CraftChoice::Lowest,
        None => CraftChoice::Stale,
    }
}

/// Completion history for one crafting role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftHistory {
    last_crafted: BTreeMap<Resource, i64>,
    counter: i64,
}

impl CraftHistory {
    /// A history where none of `targets` was ever made.
    pub fn new(targets: &[(Resource, RecipeId)]) -> Self {
        Self {
            last_crafted: targets.iter().map(|(r, _)| (*r, NEVER_CRAFTED)).collect(),
            counter: 0,
        }
    }

    /// Restore from stored state. Missing targets default to never crafted;
    /// entries for other items are dropped.
    pub fn from_parts(
        targets: &[(Resource, RecipeId)],
        last_crafted: &BTreeMap<Resource, i64>,
        counter: i64,
    ) -> Self {
        Self {
            last_crafted: targets
                .iter()
                .map(|(r, _)| (*r, last_crafted.get(r).copied().unwrap_or(NEVER_CRAFTED)))
                .collect(),
            counter,
        }
    }

    /// Completions so far.
    pub const fn counter(&self) -> i64 {
        self.counter
    }

    /// Counter value at `item`'s last completion.
    pub fn last(&self, item: Resource) -> i64 {
        self.last_crafted.get(&item).copied().unwrap_or(NEVER_CRAFTED)
    }

    /// Per-item last completion.
    pub const fn last_crafted(&self) -> &BTreeMap<Resource, i64> {
        &self.last_crafted
    }

    /// Record a completion of `item`.
    pub fn record(&mut self, item: Resource) {
        self.counter = self.counter.saturating_add(1);
        self.last_crafted.insert(item, self.counter);
    }
}

/// Resolve `choice` against `candidates`. Returns the recipe to start.
pub fn pick_target(
    choice: CraftChoice,
    candidates: &[(Resource, RecipeId)],
    stockpile: &Stockpile,
    history: &CraftHistory,
    rng: &mut impl Rng,
) -> Option<RecipeId> {
    match choice {
        CraftChoice::Named(id) => candidates.iter().any(|(_, c)| *c == id).then_some(id),
        CraftChoice::Lowest => pick_min(candidates, |r| stockpile.get(r), rng),
        CraftChoice::Stale => pick_min(candidates, |r| history.last(r), rng),
    }
}

/// Pick uniformly among the candidates sharing the smallest key.
fn pick_min<K: Ord + Copy>(
    candidates: &[(Resource, RecipeId)],
    key: impl Fn(Resource) -> K,
    rng: &mut impl Rng,
) -> Option<RecipeId> {
    let min = candidates.iter().map(|(r, _)| key(*r)).min()?;
    let tied: Vec<RecipeId> = candidates
        .iter()
        .filter(|(r, _)| key(*r) == min)
        .map(|(_, id)| *id)
        .collect();
    tied.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rolls_cover_all_five_choices() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let c = roll_choice(&SMITHY_TARGETS, &mut rng);
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn named_target_needs_to_be_a_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        let stock = Stockpile::new();
        let history = CraftHistory::new(&SMITHY_TARGETS);
        let only_tools = [(Resource::Tools, RecipeId::SmithTool)];
        let choice = CraftChoice::Named(RecipeId::SmithSword);
        assert_eq!(pick_target(choice, &only_tools, &stock, &history, &mut rng), None);
        let choice = CraftChoice::Named(RecipeId::SmithTool);
        assert_eq!(
            pick_target(choice, &only_tools, &stock, &history, &mut rng),
            Some(RecipeId::SmithTool)
        );
    }

    #[test]
    fn lowest_picks_smallest_stock() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut stock = Stockpile::new();
        stock.add(Resource::Swords, dec!(2));
        stock.add(Resource::Daggers, dec!(1));
        stock.add(Resource::Tools, dec!(3));
        let history = CraftHistory::new(&SMITHY_TARGETS);
        for _ in 0..20 {
            let picked = pick_target(CraftChoice::Lowest, &SMITHY_TARGETS, &stock, &history, &mut rng);
            assert_eq!(picked, Some(RecipeId::SmithDagger));
        }
    }

    #[test]
    fn lowest_breaks_ties_uniformly() {
        let mut rng = StdRng::seed_from_u64(3);
        let stock = Stockpile::new();
        let history = CraftHistory::new(&TAILOR_TARGETS);
        let mut seen = Vec::new();
        for _ in 0..100 {
            let picked = pick_target(CraftChoice::Lowest, &TAILOR_TARGETS, &stock, &history, &mut rng);
            if let Some(id) = picked {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn stale_prefers_never_crafted() {
        let mut rng = StdRng::seed_from_u64(4);
        let stock = Stockpile::new();
        let mut history = CraftHistory::new(&SMITHY_TARGETS);
        history.record(Resource::Swords);
        history.record(Resource::Tools);
        assert_eq!(history.counter(), 2);
        assert_eq!(history.last(Resource::Tools), 2);
        let picked = pick_target(CraftChoice::Stale, &SMITHY_TARGETS, &stock, &history, &mut rng);
        assert_eq!(picked, Some(RecipeId::SmithDagger));
    }

    #[test]
    fn no_candidates_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(6);
        let stock = Stockpile::new();
        let history = CraftHistory::new(&SMITHY_TARGETS);
        assert_eq!(pick_target(CraftChoice::Stale, &[], &stock, &history, &mut rng), None);
    }

    #[test]
    fn history_from_parts_fills_gaps() {
        let stored = BTreeMap::from([(Resource::Cloaks, 4), (Resource::Swords, 9)]);
        let history = CraftHistory::from_parts(&TAILOR_TARGETS, &stored, 4);
        assert_eq!(history.last(Resource::Cloaks), 4);
        assert_eq!(history.last(Resource::Clothing), NEVER_CRAFTED);
        assert_eq!(history.last_crafted().len(), 3);
    }

    #[test]
    fn smithy_skips_full_items_but_tailor_does_not() {
        let mut workforce = crate::workforce::Workforce::new();
        workforce.set_building(Building::Smithy, 1);
        workforce.set_building(Building::TailorShop, 1);
        let mut store = Storehouse::default();
        store.stockpile.set(Resource::Swords, dec!(5));
        store.stockpile.set(Resource::Clothing, dec!(15));
        store.stockpile.set(Resource::Linen, dec!(1));

        let smithy: Vec<Resource> = Workshop::Smithy
            .candidates(&store, &workforce)
            .into_iter()
            .map(|(r, _)| r)
            .collect();
        assert_eq!(smithy, vec![Resource::Daggers, Resource::Tools]);

        // Clothing is at its cap but its linen is in stock; cloaks and
        // gambesons lack pelts.
        let tailor = Workshop::Tailor.candidates(&store, &workforce);
        assert_eq!(tailor, vec![(Resource::Clothing, RecipeId::TailorClothing)]);
    }

    #[test]
    fn workshops_map_to_their_buildings() {
        assert_eq!(Workshop::Smithy.building(), Building::Smithy);
        assert_eq!(Workshop::Tailor.building(), Building::TailorShop);
        assert_eq!(Workshop::Tailor.craft_role(), CraftRole::Tailor);
        assert_eq!(Workshop::Smithy.targets(), &SMITHY_TARGETS);
    }
}
