//! Player commands.
//!
//! Every command validates its preconditions first. A failed precondition
//! is not an error: nothing changes and the chronicle explains why. A
//! command that goes through applies all of its effects at once, so no
//! intermediate state is ever observable between ticks.
//!
//! Building costs:
//!
//! | Building | Cost | Staffed |
//! |---|---|---|
//! | House | 10 planks | no |
//! | Lumber mill | 20 wood | yes |
//! | Farm | 8 planks | yes |
//! | Quarry | quarry site, 4 planks | yes |
//! | Mine | mine site, 4 planks | yes |
//! | Cellar | 6 planks, 5 meat, 5 grain | no |
//! | Warehouse | a cellar, 6 stone, 12 planks | no |
//! | Smelter | 8 stone, 2 planks | yes |
//! | Smithy | 4 stone, 10 planks | yes |
//! | Tailor shop | Tailor unlock, 6 planks | yes |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use homestead_types::{Building, CraftRole, Resource, Role, UnlockFlag};

use crate::crafting::TAILOR_TARGETS;
use crate::engine::Settlement;

/// Bows handed to a new ranger.
pub const RANGER_BOWS: Decimal = dec!(1);

/// Arrows handed to a new ranger.
pub const RANGER_ARROWS: Decimal = dec!(10);

/// Cellar slots added by each cellar.
pub const CELLAR_SLOTS: Decimal = dec!(40);

/// Cellar slots added by each warehouse.
pub const WAREHOUSE_SLOTS: Decimal = dec!(260);

/// Whether a command went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command's effects were applied.
    Applied,
    /// A precondition failed; nothing changed.
    Refused,
}

impl Outcome {
    /// Whether the command went through.
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Every player command, for hosts that dispatch by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Recruit a peasant.
    RecruitPeasant,
    /// Send an idle peasant away.
    FirePeasant,
    /// Turn a peasant into a hunter.
    AddHunter,
    /// Return a hunter to the peasant pool.
    RemoveHunter,
    /// Turn a peasant into a woodsman.
    AddWoodsman,
    /// Return a woodsman to the peasant pool.
    RemoveWoodsman,
    /// Turn a peasant into a bowyer.
    AddBowyer,
    /// Return a bowyer to the peasant pool.
    RemoveBowyer,
    /// Turn a peasant into a weaver.
    AddWeaver,
    /// Return a weaver to the peasant pool.
    RemoveWeaver,
    /// Outfit a peasant as a ranger.
    AddRanger,
    /// Recall a ranger.
    RemoveRanger,
    /// Build a house.
    BuildHouse,
    /// Build a lumber mill.
    BuildLumberMill,
    /// Build a farm.
    BuildFarm,
    /// Build a quarry on a discovered site.
    BuildQuarry,
    /// Dig a mine on a discovered site.
    BuildMine,
    /// Dig a cellar.
    BuildCellar,
    /// Raise a warehouse.
    BuildWarehouse,
    /// Build a smelter.
    BuildSmelter,
    /// Build a smithy.
    BuildSmithy,
    /// Open a tailor shop.
    BuildTailor,
    /// Abandon a lumber mill.
    AbandonLumberMill,
    /// Abandon a farm.
    AbandonFarm,
    /// Abandon a quarry.
    AbandonQuarry,
    /// Abandon a mine.
    AbandonMine,
    /// Fill in a cellar.
    AbandonCellar,
    /// Dismantle a warehouse.
    AbandonWarehouse,
    /// Close a smelter.
    AbandonSmelter,
    /// Close a smithy.
    AbandonSmithy,
    /// Close a tailor shop.
    AbandonTailor,
}

/// How to build one kind of building.
struct BuildPlan {
    building: Building,
    /// Each cost in check order, with the line shown when it is short.
    costs: &'static [(Resource, Decimal, &'static str)],
    /// Shown when a staffed building finds no idle peasant.
    busy: &'static str,
    done: &'static str,
}

const HOUSE: BuildPlan = BuildPlan {
    building: Building::House,
    costs: &[(Resource::Planks, dec!(10), "not enough planks to build a house.")],
    busy: "",
    done: "a new house is built. more peasants can be housed.",
};

const LUMBER_MILL: BuildPlan = BuildPlan {
    building: Building::LumberMill,
    costs: &[(Resource::Wood, dec!(20), "not enough wood for a lumber mill.")],
    busy: "everyone is busy (idle peasants 0). free a worker to staff the mill.",
    done: "you raise a simple lumber mill. one peasant now works there.",
};

const FARM: BuildPlan = BuildPlan {
    building: Building::Farm,
    costs: &[(Resource::Planks, dec!(8), "not enough planks to build a farm.")],
    busy: "everyone is busy (idle peasants 0). free a worker to tend the farm.",
    done: "fields are tilled. a peasant now toils as a farmer.",
};

const QUARRY: BuildPlan = BuildPlan {
    building: Building::Quarry,
    costs: &[
        (
            Resource::QuarrySites,
            dec!(1),
            "you need a quarry site before building a quarry.",
        ),
        (Resource::Planks, dec!(4), "not enough planks to build a quarry."),
    ],
    busy: "everyone is busy (idle peasants 0). free a worker for the quarry.",
    done: "a quarry is established; stone can be cut here.",
};

const MINE: BuildPlan = BuildPlan {
    building: Building::Mine,
    costs: &[
        (
            Resource::MineSites,
            dec!(1),
            "you need an ore site before digging a mine.",
        ),
        (
            Resource::Planks,
            dec!(4),
            "not enough planks to shore up a mine entrance.",
        ),
    ],
    busy: "everyone is busy (idle peasants 0). free a worker for the mine.",
    done: "a mine entrance is dug; ore extraction can begin.",
};

const CELLAR_STOCK: &str = "stockpile 5 meat and 5 grain before digging a cellar.";

const CELLAR: BuildPlan = BuildPlan {
    building: Building::Cellar,
    costs: &[
        (Resource::Planks, dec!(6), "not enough planks to dig out a cellar."),
        (Resource::Meat, dec!(5), CELLAR_STOCK),
        (Resource::Grain, dec!(5), CELLAR_STOCK),
    ],
    busy: "",
    done: "a cool cellar is dug, adding 40 storage slots.",
};

const WAREHOUSE: BuildPlan = BuildPlan {
    building: Building::Warehouse,
    costs: &[
        (Resource::Stone, dec!(6), "not enough stone to raise a warehouse."),
        (Resource::Planks, dec!(12), "not enough planks to frame a warehouse."),
    ],
    busy: "",
    done: "a warehouse goes up, adding 260 storage slots.",
};

const SMELTER: BuildPlan = BuildPlan {
    building: Building::Smelter,
    costs: &[
        (Resource::Stone, dec!(8), "not enough stone to build a smelter."),
        (Resource::Planks, dec!(2), "not enough planks to shore up the smelter."),
    ],
    busy: "everyone is busy (idle peasants 0). free a worker for the smelter.",
    done: "a smelter is built; ore can now be refined into ingots.",
};

const SMITHY: BuildPlan = BuildPlan {
    building: Building::Smithy,
    costs: &[
        (Resource::Stone, dec!(4), "not enough stone to build a smithy."),
        (Resource::Planks, dec!(10), "not enough planks to raise a smithy."),
    ],
    busy: "everyone is busy (idle peasants 0). free a worker for the smithy.",
    done: "a smithy is built; metalwork can begin.",
};

const TAILOR_SHOP: BuildPlan = BuildPlan {
    building: Building::TailorShop,
    costs: &[(Resource::Planks, dec!(6), "not enough planks to build a tailor's shop.")],
    busy: "everyone is busy (idle peasants 0). free a worker for tailoring.",
    done: "a tailor sets up a modest shop, ready to sew garments.",
};

impl Settlement {
    /// Run `command`.
    pub fn perform(&mut self, command: Command) -> Outcome {
        debug!(?command, "command");
        match command {
            Command::RecruitPeasant => self.action_recruit_peasant(),
            Command::FirePeasant => self.action_fire_peasant(),
            Command::AddHunter => self.action_add_hunter(),
            Command::RemoveHunter => self.action_remove_hunter(),
            Command::AddWoodsman => self.action_add_woodsman(),
            Command::RemoveWoodsman => self.action_remove_woodsman(),
            Command::AddBowyer => self.action_add_bowyer(),
            Command::RemoveBowyer => self.action_remove_bowyer(),
            Command::AddWeaver => self.action_add_weaver(),
            Command::RemoveWeaver => self.action_remove_weaver(),
            Command::AddRanger => self.action_add_ranger(),
            Command::RemoveRanger => self.action_remove_ranger(),
            Command::BuildHouse => self.action_build_house(),
            Command::BuildLumberMill => self.action_build_lumber_mill(),
            Command::BuildFarm => self.action_build_farm(),
            Command::BuildQuarry => self.action_build_quarry(),
            Command::BuildMine => self.action_build_mine(),
            Command::BuildCellar => self.action_build_cellar(),
            Command::BuildWarehouse => self.action_build_warehouse(),
            Command::BuildSmelter => self.action_build_smelter(),
            Command::BuildSmithy => self.action_build_smithy(),
            Command::BuildTailor => self.action_build_tailor(),
            Command::AbandonLumberMill => self.action_abandon_lumber_mill(),
            Command::AbandonFarm => self.action_abandon_farm(),
            Command::AbandonQuarry => self.action_abandon_quarry(),
            Command::AbandonMine => self.action_abandon_mine(),
            Command::AbandonCellar => self.action_abandon_cellar(),
            Command::AbandonWarehouse => self.action_abandon_warehouse(),
            Command::AbandonSmelter => self.action_abandon_smelter(),
            Command::AbandonSmithy => self.action_abandon_smithy(),
            Command::AbandonTailor => self.action_abandon_tailor(),
        }
    }

    fn refuse(&mut self, line: &str) -> Outcome {
        self.chronicle.push(line);
        Outcome::Refused
    }

    fn applied(&mut self, line: &str) -> Outcome {
        self.store.stockpile.sync_food();
        self.chronicle.push(line);
        Outcome::Applied
    }

    // -----------------------------------------------------------------------
    // Peasants
    // -----------------------------------------------------------------------

    /// Recruit a peasant for a little food, meat first.
    pub fn action_recruit_peasant(&mut self) -> Outcome {
        if self.population() >= self.population_cap() {
            return self.refuse("you need more housing before recruiting more peasants.");
        }
        let cost = self.config.economy.recruit_food_cost;
        let stock = &mut self.store.stockpile;
        let food = stock.get(Resource::Meat).saturating_add(stock.get(Resource::Grain));
        if food < cost {
            return self.refuse("not enough food to support another mouth.");
        }
        let from_meat = stock.take_up_to(Resource::Meat, cost);
        stock.take_up_to(Resource::Grain, cost.saturating_sub(from_meat));
        self.workforce.hire(Role::Peasant);
        self.applied("a new peasant joins your fledgling settlement.")
    }

    /// Send an idle peasant away.
    pub fn action_fire_peasant(&mut self) -> Outcome {
        if !self.workforce.dismiss(Role::Peasant) {
            return self.refuse("no idle peasants to send away.");
        }
        self.applied("a peasant departs, leaving your camp quieter.")
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    /// Turn a peasant into a hunter.
    pub fn action_add_hunter(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Peasant, Role::Hunter) {
            return self.refuse("no idle peasants to turn into hunters.");
        }
        if self.store.stockpile.get(Resource::Bows) > Decimal::ZERO {
            self.applied("a peasant strings a bow and joins the hunt.")
        } else {
            self.applied("a peasant sharpens a stick and ventures out to hunt.")
        }
    }

    /// Return a hunter to the peasant pool. Their bow goes with them.
    pub fn action_remove_hunter(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Hunter, Role::Peasant) {
            return self.refuse("no hunters to reassign.");
        }
        self.hunter_bows_equipped = self
            .hunter_bows_equipped
            .min(self.workforce.role(Role::Hunter));
        self.applied("a hunter lays down their bow and returns as a peasant.")
    }

    /// Turn a peasant into a woodsman.
    pub fn action_add_woodsman(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Peasant, Role::Woodsman) {
            return self.refuse("no idle peasants to send into the woods.");
        }
        self.applied("a peasant grips a stone hatchet and starts felling trees.")
    }

    /// Return a woodsman to the peasant pool.
    pub fn action_remove_woodsman(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Woodsman, Role::Peasant) {
            return self.refuse("no woodsmen to reassign.");
        }
        self.applied("a woodsman returns to the village as a peasant.")
    }

    /// Put a peasant to the bowyer's bench. Needs the Bowyer unlock.
    pub fn action_add_bowyer(&mut self) -> Outcome {
        if !self.unlocks.is_unlocked(UnlockFlag::Bowyer) {
            return self.refuse("you need better materials before anyone can craft bows.");
        }
        if !self.workforce.reassign(Role::Peasant, Role::Bowyer) {
            return self.refuse("no idle peasants to put to the bowyer's bench.");
        }
        self.resize_jobs(CraftRole::Bowyer);
        self.applied("a peasant starts shaping staves and stringing crude bows.")
    }

    /// Return a bowyer to the peasant pool, cancelling their newest job.
    pub fn action_remove_bowyer(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Bowyer, Role::Peasant) {
            return self.refuse("no bowyers to reassign.");
        }
        self.resize_jobs(CraftRole::Bowyer);
        self.applied("a bowyer leaves the bench and returns as a peasant.")
    }

    /// Put a peasant to the loom. Needs the Weaver unlock.
    pub fn action_add_weaver(&mut self) -> Outcome {
        if !self.unlocks.is_unlocked(UnlockFlag::Weaver) {
            return self.refuse("you need some flax before anyone can try weaving.");
        }
        if !self.workforce.reassign(Role::Peasant, Role::Weaver) {
            return self.refuse("no idle peasants to put to the loom.");
        }
        self.resize_jobs(CraftRole::Weaver);
        self.applied("a peasant begins spinning flax into rough linen.")
    }

    /// Return a weaver to the peasant pool, cancelling their newest job.
    pub fn action_remove_weaver(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Weaver, Role::Peasant) {
            return self.refuse("no weavers to reassign.");
        }
        self.resize_jobs(CraftRole::Weaver);
        self.applied("a weaver leaves the loom and returns as a peasant.")
    }

    /// Outfit a peasant as a ranger with a bow, arrows and, if one is in
    /// stock, a sword. Needs the Ranger unlock.
    pub fn action_add_ranger(&mut self) -> Outcome {
        if !self.unlocks.is_unlocked(UnlockFlag::Ranger) {
            return self.refuse("you need bows and arrows ready before training rangers.");
        }
        if self.workforce.role(Role::Peasant) == 0 {
            return self.refuse("no idle peasants to train as rangers.");
        }
        let stock = &mut self.store.stockpile;
        if !stock.has(Resource::Bows, RANGER_BOWS) || !stock.has(Resource::Arrows, RANGER_ARROWS) {
            return self.refuse("you need a bow and arrows ready to outfit a ranger.");
        }
        stock.take_up_to(Resource::Bows, RANGER_BOWS);
        stock.take_up_to(Resource::Arrows, RANGER_ARROWS);
        if stock.has(Resource::Swords, Decimal::ONE) {
            stock.take_up_to(Resource::Swords, Decimal::ONE);
            self.ranger_swords_equipped = self.ranger_swords_equipped.saturating_add(1);
        }
        self.workforce.reassign(Role::Peasant, Role::Ranger);
        self.applied("a peasant takes bow and arrows, ranging beyond the village.")
    }

    /// Recall a ranger.
    pub fn action_remove_ranger(&mut self) -> Outcome {
        if !self.workforce.reassign(Role::Ranger, Role::Peasant) {
            return self.refuse("no rangers to recall.");
        }
        self.ranger_swords_equipped = self
            .ranger_swords_equipped
            .min(self.workforce.role(Role::Ranger));
        self.applied("a ranger returns to the village as a peasant.")
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    /// Build a house.
    pub fn action_build_house(&mut self) -> Outcome {
        self.construct(&HOUSE)
    }

    /// Build a lumber mill.
    pub fn action_build_lumber_mill(&mut self) -> Outcome {
        self.construct(&LUMBER_MILL)
    }

    /// Build a farm.
    pub fn action_build_farm(&mut self) -> Outcome {
        self.construct(&FARM)
    }

    /// Build a quarry, consuming a quarry site.
    pub fn action_build_quarry(&mut self) -> Outcome {
        self.construct(&QUARRY)
    }

    /// Dig a mine, consuming a mine site.
    pub fn action_build_mine(&mut self) -> Outcome {
        self.construct(&MINE)
    }

    /// Dig a cellar.
    pub fn action_build_cellar(&mut self) -> Outcome {
        let outcome = self.construct(&CELLAR);
        if outcome.is_applied() {
            self.store.cellar.grow(CELLAR_SLOTS);
        }
        outcome
    }

    /// Raise a warehouse. Needs a cellar.
    pub fn action_build_warehouse(&mut self) -> Outcome {
        if self.workforce.building(Building::Cellar) == 0 {
            return self.refuse("build a cellar first before raising a warehouse.");
        }
        let outcome = self.construct(&WAREHOUSE);
        if outcome.is_applied() {
            self.store.cellar.grow(WAREHOUSE_SLOTS);
        }
        outcome
    }

    /// Build a smelter.
    pub fn action_build_smelter(&mut self) -> Outcome {
        self.construct(&SMELTER)
    }

    /// Build a smithy.
    pub fn action_build_smithy(&mut self) -> Outcome {
        let outcome = self.construct(&SMITHY);
        if outcome.is_applied() {
            self.resize_jobs(CraftRole::Smithy);
        }
        outcome
    }

    /// Open a tailor shop. Needs the Tailor unlock.
    pub fn action_build_tailor(&mut self) -> Outcome {
        if !self.unlocks.is_unlocked(UnlockFlag::Tailor) {
            return self.refuse("you need linen in stores before a tailor will set up shop.");
        }
        let outcome = self.construct(&TAILOR_SHOP);
        if outcome.is_applied() {
            self.resize_jobs(CraftRole::Tailor);
            self.sticky.extend(TAILOR_TARGETS.iter().map(|(r, _)| *r));
        }
        outcome
    }

    /// Abandon a lumber mill.
    pub fn action_abandon_lumber_mill(&mut self) -> Outcome {
        self.raze(
            Building::LumberMill,
            "no lumber mills to abandon.",
            "you shutter a lumber mill. its worker returns as an idle peasant.",
        )
    }

    /// Abandon a farm.
    pub fn action_abandon_farm(&mut self) -> Outcome {
        self.raze(
            Building::Farm,
            "no farms to abandon.",
            "you let a farm go fallow. its worker returns as an idle peasant.",
        )
    }

    /// Abandon a quarry. The site is not recovered.
    pub fn action_abandon_quarry(&mut self) -> Outcome {
        self.raze(
            Building::Quarry,
            "no quarries to abandon.",
            "you abandon a quarry. its worker returns as an idle peasant.",
        )
    }

    /// Seal a mine. The site is not recovered.
    pub fn action_abandon_mine(&mut self) -> Outcome {
        self.raze(
            Building::Mine,
            "no mines to abandon.",
            "you seal a mine. its worker returns as an idle peasant.",
        )
    }

    /// Fill in a cellar, trimming cellar contents to the smaller capacity.
    pub fn action_abandon_cellar(&mut self) -> Outcome {
        let outcome = self.raze(
            Building::Cellar,
            "no cellars to fill in.",
            "a cellar is filled in, freeing the land.",
        );
        if outcome.is_applied() {
            self.shrink_cellar(CELLAR_SLOTS);
        }
        outcome
    }

    /// Dismantle a warehouse, trimming cellar contents to the smaller
    /// capacity.
    pub fn action_abandon_warehouse(&mut self) -> Outcome {
        let outcome = self.raze(
            Building::Warehouse,
            "no warehouses to dismantle.",
            "a warehouse is dismantled, reducing storage space.",
        );
        if outcome.is_applied() {
            self.shrink_cellar(WAREHOUSE_SLOTS);
        }
        outcome
    }

    /// Close a smelter.
    pub fn action_abandon_smelter(&mut self) -> Outcome {
        self.raze(
            Building::Smelter,
            "no smelters to close.",
            "you bank a smelter's fires. its worker returns as an idle peasant.",
        )
    }

    /// Close a smithy, cancelling its newest job.
    pub fn action_abandon_smithy(&mut self) -> Outcome {
        let outcome = self.raze(
            Building::Smithy,
            "no smithies to shutter.",
            "you close a smithy. its worker returns as an idle peasant.",
        );
        self.resize_jobs(CraftRole::Smithy);
        outcome
    }

    /// Close a tailor shop, cancelling its newest job.
    pub fn action_abandon_tailor(&mut self) -> Outcome {
        let outcome = self.raze(
            Building::TailorShop,
            "no tailors to send away.",
            "a tailor closes shop, returning as an idle peasant.",
        );
        self.resize_jobs(CraftRole::Tailor);
        outcome
    }

    /// Check every cost in order, then the worker, then pay and build.
    fn construct(&mut self, plan: &BuildPlan) -> Outcome {
        let stock = &self.store.stockpile;
        if let Some((_, _, short)) = plan.costs.iter().find(|(r, q, _)| !stock.has(*r, *q)) {
            return self.refuse(short);
        }
        if plan.building.is_staffed() && self.workforce.role(Role::Peasant) == 0 {
            return self.refuse(plan.busy);
        }
        for (resource, quantity, _) in plan.costs {
            self.store.stockpile.take_up_to(*resource, *quantity);
        }
        self.workforce.build(plan.building);
        self.applied(plan.done)
    }

    fn raze(&mut self, building: Building, none: &str, done: &str) -> Outcome {
        if !self.workforce.demolish(building) {
            return self.refuse(none);
        }
        self.applied(done)
    }

    fn shrink_cellar(&mut self, slots: Decimal) {
        for (resource, lost) in self.store.cellar.shrink(slots) {
            debug!(%resource, %lost, "cellar contents lost");
        }
    }

    fn resize_jobs(&mut self, role: CraftRole) {
        let count = match role {
            CraftRole::Weaver => self.workforce.role(Role::Weaver),
            CraftRole::Bowyer => self.workforce.role(Role::Bowyer),
            CraftRole::Smithy => self.workforce.building(Building::Smithy),
            CraftRole::Tailor => self.workforce.tailors(),
        };
        self.jobs.get_mut(role).resize(count, &mut self.store);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use homestead_types::RecipeId;

    fn fresh() -> Settlement {
        Settlement::new(SimulationConfig::default()).unwrap()
    }

    fn last_line(s: &mut Settlement) -> String {
        s.drain_logs().pop().unwrap_or_default()
    }

    #[test]
    fn recruit_spends_meat_then_grain() {
        let mut s = fresh();
        s.store.stockpile.set(Resource::Meat, dec!(1));
        s.store.stockpile.set(Resource::Grain, dec!(3));
        assert_eq!(s.action_recruit_peasant(), Outcome::Applied);
        assert_eq!(s.resource(Resource::Meat), Decimal::ZERO);
        assert_eq!(s.resource(Resource::Grain), dec!(2));
        assert_eq!(s.resource(Resource::Food), dec!(2));
        assert_eq!(s.role_count(Role::Peasant), 1);
    }

    #[test]
    fn recruit_needs_housing_and_food() {
        let mut s = fresh();
        s.workforce.set_role(Role::Peasant, 4);
        assert_eq!(s.action_recruit_peasant(), Outcome::Refused);
        assert_eq!(
            last_line(&mut s),
            "you need more housing before recruiting more peasants."
        );

        let mut s = fresh();
        s.store.stockpile.set(Resource::Meat, dec!(1.5));
        assert_eq!(s.action_recruit_peasant(), Outcome::Refused);
        assert_eq!(last_line(&mut s), "not enough food to support another mouth.");
        assert_eq!(s.resource(Resource::Meat), dec!(1.5));
    }

    #[test]
    fn role_moves_are_atomic() {
        let mut s = fresh();
        assert_eq!(s.action_add_hunter(), Outcome::Refused);
        s.action_recruit_peasant();
        assert_eq!(s.action_add_hunter(), Outcome::Applied);
        assert_eq!(s.role_count(Role::Peasant), 0);
        assert_eq!(s.role_count(Role::Hunter), 1);
        assert_eq!(s.population(), 1);
        assert_eq!(s.action_remove_hunter(), Outcome::Applied);
        assert_eq!(s.role_count(Role::Peasant), 1);
        assert_eq!(s.action_remove_woodsman(), Outcome::Refused);
    }

    #[test]
    fn gated_roles_need_their_unlock() {
        let mut s = fresh();
        s.action_recruit_peasant();
        assert_eq!(s.action_add_bowyer(), Outcome::Refused);
        assert_eq!(
            last_line(&mut s),
            "you need better materials before anyone can craft bows."
        );
        assert_eq!(s.action_add_weaver(), Outcome::Refused);
        assert_eq!(s.action_add_ranger(), Outcome::Refused);
        assert_eq!(s.action_build_tailor(), Outcome::Refused);
        assert_eq!(s.role_count(Role::Peasant), 1);
    }

    #[test]
    fn removing_a_weaver_refunds_their_job() {
        let mut s = fresh();
        s.action_recruit_peasant();
        s.unlocks.unlock(UnlockFlag::Weaver);
        // A farm gives flax somewhere to be stored.
        s.workforce.set_building(Building::Farm, 1);
        s.store.stockpile.add(Resource::Flax, dec!(2));
        assert_eq!(s.action_add_weaver(), Outcome::Applied);
        assert_eq!(s.jobs(CraftRole::Weaver).len(), 1);
        s.tick().unwrap();
        assert_eq!(s.resource(Resource::Flax), dec!(1));
        assert_eq!(s.storehouse().reservations.reserved(Resource::Linen), dec!(1));

        assert_eq!(s.action_remove_weaver(), Outcome::Applied);
        assert!(s.jobs(CraftRole::Weaver).is_empty());
        assert_eq!(s.resource(Resource::Flax), dec!(2));
        assert_eq!(s.storehouse().reservations.reserved(Resource::Linen), Decimal::ZERO);
    }

    #[test]
    fn ranger_is_outfitted() {
        let mut s = fresh();
        s.action_recruit_peasant();
        s.unlocks.unlock(UnlockFlag::Ranger);
        s.store.stockpile.add(Resource::Bows, dec!(1));
        s.store.stockpile.add(Resource::Arrows, dec!(5));
        assert_eq!(s.action_add_ranger(), Outcome::Refused);
        assert_eq!(
            last_line(&mut s),
            "you need a bow and arrows ready to outfit a ranger."
        );

        s.store.stockpile.add(Resource::Arrows, dec!(5));
        s.store.stockpile.add(Resource::Swords, dec!(1));
        assert_eq!(s.action_add_ranger(), Outcome::Applied);
        assert_eq!(s.role_count(Role::Ranger), 1);
        assert_eq!(s.ranger_swords_equipped(), 1);
        assert_eq!(s.resource(Resource::Bows), Decimal::ZERO);
        assert_eq!(s.resource(Resource::Arrows), Decimal::ZERO);
        assert_eq!(s.resource(Resource::Swords), Decimal::ZERO);

        assert_eq!(s.action_remove_ranger(), Outcome::Applied);
        assert_eq!(s.ranger_swords_equipped(), 0);
    }

    #[test]
    fn costs_are_checked_in_order_before_the_worker() {
        let mut s = fresh();
        assert_eq!(s.action_build_smithy(), Outcome::Refused);
        assert_eq!(last_line(&mut s), "not enough stone to build a smithy.");
        s.store.stockpile.add(Resource::Stone, dec!(4));
        s.action_build_smithy();
        assert_eq!(last_line(&mut s), "not enough planks to raise a smithy.");
        s.store.stockpile.add(Resource::Planks, dec!(10));
        s.action_build_smithy();
        assert_eq!(
            last_line(&mut s),
            "everyone is busy (idle peasants 0). free a worker for the smithy."
        );
        assert_eq!(s.resource(Resource::Stone), dec!(4));

        s.action_recruit_peasant();
        assert_eq!(s.action_build_smithy(), Outcome::Applied);
        assert_eq!(s.building_count(Building::Smithy), 1);
        assert_eq!(s.role_count(Role::Peasant), 0);
        assert_eq!(s.jobs(CraftRole::Smithy).len(), 1);
        assert_eq!(s.resource(Resource::Stone), Decimal::ZERO);
        assert_eq!(s.resource(Resource::Planks), Decimal::ZERO);
    }

    #[test]
    fn house_needs_no_worker() {
        let mut s = fresh();
        s.store.stockpile.add(Resource::Planks, dec!(10));
        assert_eq!(s.action_build_house(), Outcome::Applied);
        assert_eq!(s.population_cap(), 6);
    }

    #[test]
    fn quarry_consumes_a_site() {
        let mut s = fresh();
        s.action_recruit_peasant();
        s.store.stockpile.add(Resource::Planks, dec!(4));
        assert_eq!(s.action_build_quarry(), Outcome::Refused);
        assert_eq!(
            last_line(&mut s),
            "you need a quarry site before building a quarry."
        );
        s.store.stockpile.add(Resource::QuarrySites, dec!(1));
        assert_eq!(s.action_build_quarry(), Outcome::Applied);
        assert_eq!(s.resource(Resource::QuarrySites), Decimal::ZERO);
        assert_eq!(s.action_abandon_quarry(), Outcome::Applied);
        assert_eq!(s.role_count(Role::Peasant), 1);
        assert_eq!(s.resource(Resource::QuarrySites), Decimal::ZERO);
    }

    #[test]
    fn cellar_and_warehouse_change_capacity() {
        let mut s = fresh();
        s.store.stockpile.add(Resource::Planks, dec!(18));
        s.store.stockpile.add(Resource::Grain, dec!(5));
        s.store.stockpile.add(Resource::Stone, dec!(6));
        assert_eq!(s.action_build_warehouse(), Outcome::Refused);
        assert_eq!(s.action_build_cellar(), Outcome::Applied);
        assert_eq!(s.storehouse().cellar.capacity(), dec!(40));
        assert_eq!(s.action_build_warehouse(), Outcome::Applied);
        assert_eq!(s.storehouse().cellar.capacity(), dec!(300));

        s.store.cellar.deposit(Resource::Meat, dec!(100));
        assert_eq!(s.action_abandon_warehouse(), Outcome::Applied);
        assert_eq!(s.storehouse().cellar.capacity(), dec!(40));
        assert_eq!(s.storehouse().cellar.get(Resource::Meat), dec!(40));
    }

    #[test]
    fn abandoning_a_smithy_cancels_its_job() {
        let mut s = fresh();
        s.workforce.set_building(Building::Smithy, 1);
        s.jobs.get_mut(CraftRole::Smithy).resize(1, &mut s.store);
        s.store.stockpile.add(Resource::Ingots, dec!(3));
        let slots = s.jobs.get_mut(CraftRole::Smithy);
        for processor in slots.iter_mut() {
            processor
                .start(RecipeId::SmithSword, &mut s.store, &s.workforce)
                .unwrap();
        }
        assert_eq!(s.resource(Resource::Ingots), Decimal::ZERO);
        assert_eq!(s.action_abandon_smithy(), Outcome::Applied);
        assert_eq!(s.resource(Resource::Ingots), dec!(3));
        assert!(s.jobs(CraftRole::Smithy).is_empty());
        assert_eq!(s.storehouse().reservations.reserved(Resource::Swords), Decimal::ZERO);
    }

    #[test]
    fn commands_dispatch_and_deserialize() {
        let mut s = fresh();
        let command: Command = serde_json::from_str("\"recruit_peasant\"").unwrap();
        assert_eq!(command, Command::RecruitPeasant);
        assert_eq!(s.perform(command), Outcome::Applied);
        assert_eq!(s.perform(Command::FirePeasant), Outcome::Applied);
        assert_eq!(s.perform(Command::AbandonFarm), Outcome::Refused);
        assert_eq!(last_line(&mut s), "no farms to abandon.");
    }
}
