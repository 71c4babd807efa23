//! The settlement engine: one owned value holding every piece of state,
//! advanced one tick at a time.
//!
//! Each call to [`Settlement::tick`] runs these steps in a fixed order:
//!
//! 1. **Season** -- advance the calendar; a summer harvest lands here.
//! 2. **Upkeep** -- feed and warm everyone, derive the production multiplier.
//! 3. **Production** -- hunters, woodsmen, farms, quarries and mines,
//!    smelters, smithies, tailors, ranger gear, exploration, lumber mills,
//!    weavers, bowyers.
//! 4. **Settle** -- clamp to zero, apply storage caps, re-sync the food
//!    total, refresh sticky resources, evaluate unlocks and audit storage.
//!
//! Player commands (see [`crate::actions`]) run between ticks.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use homestead_ledger::{
    AuditResult, CapacitySource, Stockpile, Storehouse, apply_caps, audit,
};
use homestead_types::{
    Building, CraftRole, RecipeId, Resource, Role, Season, SiteCard, UnlockFlag,
};
use homestead_world::{DrawCredit, Harvest, SeasonCycle, SiteDeck, WorldError, discovery_line};

use crate::config::SimulationConfig;
use crate::crafting::{
    CraftHistory, SMITHY_TARGETS, TAILOR_TARGETS, Workshop, pick_target, roll_choice,
};
use crate::jobs::{JobBoard, JobSlots};
use crate::log::Chronicle;
use crate::production::{bow_bonus, consume_upkeep, convert, equip, yield_of};
use crate::recipes::recipe;
use crate::unlocks::{UnlockTracker, announcement};
use crate::workforce::Workforce;

/// Stock a new settlement starts with.
pub const STARTING_STOCK: [(Resource, Decimal); 2] =
    [(Resource::Meat, dec!(20)), (Resource::Pelts, dec!(5))];

/// Houses a new settlement starts with.
pub const STARTING_HOUSES: u64 = 2;

/// Population each house supports.
pub const HOUSING_PER_HOUSE: u64 = 2;

/// Errors that can occur while building or advancing a settlement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The calendar or exploration deck rejected its configuration.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The season during this tick.
    pub season: Season,
    /// Production multiplier after upkeep.
    pub multiplier: Decimal,
    /// Population at the start of the tick.
    pub population: u64,
    /// The summer harvest, if one came in.
    pub harvest: Option<Harvest>,
    /// Cards the rangers drew.
    pub cards_drawn: Vec<SiteCard>,
    /// Recipes completed by every crafting role.
    pub jobs_completed: Vec<RecipeId>,
    /// Flags unlocked at the end of the tick.
    pub unlocked: Vec<UnlockFlag>,
}

/// A settlement and everything it owns.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub(crate) config: SimulationConfig,
    pub(crate) store: Storehouse,
    pub(crate) workforce: Workforce,
    pub(crate) base_pop_cap: u64,
    pub(crate) season: SeasonCycle,
    pub(crate) deck: SiteDeck,
    pub(crate) draw_credit: DrawCredit,
    pub(crate) unlocks: UnlockTracker,
    pub(crate) chronicle: Chronicle,
    pub(crate) jobs: JobBoard,
    pub(crate) smithy_history: CraftHistory,
    pub(crate) tailor_history: CraftHistory,
    pub(crate) lumber_buffer: Decimal,
    pub(crate) smelter_buffer: Decimal,
    pub(crate) total_meat_made: Decimal,
    pub(crate) hunter_bows_equipped: u64,
    pub(crate) ranger_swords_equipped: u64,
    pub(crate) quarries_discovered: u64,
    pub(crate) mines_discovered: u64,
    pub(crate) first_linen_announced: bool,
    pub(crate) sticky: BTreeSet<Resource>,
    pub(crate) last_food_need: Decimal,
    pub(crate) last_warmth_need: Decimal,
    pub(crate) rng: StdRng,
}

impl Settlement {
    /// A fresh settlement: two houses, some meat and pelts, nobody yet.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if the season length or ranger draw
    /// period is zero.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        let mut stockpile = Stockpile::new();
        for (resource, quantity) in STARTING_STOCK {
            stockpile.add(resource, quantity);
        }
        stockpile.sync_food();

        let mut workforce = Workforce::new();
        workforce.set_building(Building::House, STARTING_HOUSES);

        let season = SeasonCycle::new(config.time.ticks_per_season)?;
        let draw_credit = DrawCredit::new(config.exploration.ranger_draw_ticks)?;
        let chronicle = Chronicle::new(config.logging.history_len);
        let rng = StdRng::seed_from_u64(config.world.seed);

        let mut settlement = Self {
            config,
            store: Storehouse {
                stockpile,
                ..Storehouse::default()
            },
            workforce,
            base_pop_cap: 0,
            season,
            deck: SiteDeck::new(),
            draw_credit,
            unlocks: UnlockTracker::new(),
            chronicle,
            jobs: JobBoard::new(),
            smithy_history: CraftHistory::new(&SMITHY_TARGETS),
            tailor_history: CraftHistory::new(&TAILOR_TARGETS),
            lumber_buffer: Decimal::ZERO,
            smelter_buffer: Decimal::ZERO,
            total_meat_made: Decimal::ZERO,
            hunter_bows_equipped: 0,
            ranger_swords_equipped: 0,
            quarries_discovered: 0,
            mines_discovered: 0,
            first_linen_announced: false,
            sticky: BTreeSet::new(),
            last_food_need: Decimal::ZERO,
            last_warmth_need: Decimal::ZERO,
            rng,
        };
        settlement.process_unlocks();
        Ok(settlement)
    }

    /// A settlement built from `config`, starting from
    /// `simulation.initial_state` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if the season length or ranger draw
    /// period is zero.
    pub fn from_config(config: SimulationConfig) -> Result<Self, EngineError> {
        let initial = config.simulation.initial_state.clone();
        let mut settlement = Self::new(config)?;
        if let Some(state) = initial {
            settlement.load_snapshot(&state)?;
        }
        Ok(settlement)
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if the tick counter overflows.
    pub fn tick(&mut self) -> Result<TickSummary, EngineError> {
        let harvest = self.advance_season()?;
        let population = self.workforce.population();

        let upkeep = consume_upkeep(&mut self.store.stockpile, population, &self.config.economy);
        self.last_food_need = upkeep.food_need;
        self.last_warmth_need = upkeep.warmth_need;
        let multiplier = upkeep.multiplier();

        self.hunt(multiplier);
        self.cut_wood(multiplier);
        self.grow_crops(multiplier);
        self.extract(multiplier);
        self.smelt(multiplier);
        let mut jobs_completed = self.run_workshop(Workshop::Smithy, multiplier);
        jobs_completed.extend(self.run_workshop(Workshop::Tailor, multiplier));
        self.outfit_rangers();
        let cards_drawn = self.explore();
        self.mill_lumber(multiplier);
        jobs_completed.extend(self.weave(multiplier));
        jobs_completed.extend(self.craft_bows(multiplier));

        let unlocked = self.settle();

        let summary = TickSummary {
            tick: self.season.tick(),
            season: self.season.season(),
            multiplier,
            population,
            harvest,
            cards_drawn,
            jobs_completed,
            unlocked,
        };
        debug!(
            tick = summary.tick,
            season = ?summary.season,
            multiplier = %summary.multiplier,
            population = summary.population,
            completed = summary.jobs_completed.len(),
            "tick complete"
        );
        Ok(summary)
    }

    fn advance_season(&mut self) -> Result<Option<Harvest>, EngineError> {
        let farms = self.workforce.building(Building::Farm);
        let flax = self
            .unlocks
            .is_unlocked(UnlockFlag::Flax)
            .then_some(self.config.production.farm_flax);
        let step = self.season.advance(farms, flax)?;
        if step.changed {
            debug!(season = ?step.season, icon = step.season.icon(), "season changed");
        }
        if let Some(harvest) = step.harvest {
            self.store.stockpile.add(Resource::Grain, harvest.grain);
            self.store.stockpile.add(Resource::Flax, harvest.flax);
            info!(grain = %harvest.grain, flax = %harvest.flax, "summer harvest");
            self.chronicle
                .push(format!("summer harvest brings in {} grain.", harvest.grain.trunc()));
        }
        Ok(step.harvest)
    }

    fn hunt(&mut self, multiplier: Decimal) {
        let hunters = self.workforce.role(Role::Hunter);
        if hunters == 0 {
            return;
        }
        let production = &self.config.production;
        let stock = &mut self.store.stockpile;

        self.hunter_bows_equipped = equip(stock, Resource::Bows, hunters, self.hunter_bows_equipped);
        let scale = multiplier.saturating_mul(bow_bonus(stock, self.hunter_bows_equipped, production));

        let meat = yield_of(hunters, production.hunter_meat, scale);
        stock.add(Resource::Meat, meat);
        self.total_meat_made = self.total_meat_made.saturating_add(meat);
        if self.total_meat_made >= production.guts_unlock_meat && self.unlocks.unlock(UnlockFlag::Guts) {
            stock.raise_to(Resource::Guts, Decimal::ONE);
            info!(flag = ?UnlockFlag::Guts, "unlocked");
            if let Some(line) = announcement(UnlockFlag::Guts) {
                self.chronicle.push(line);
            }
        }
        if self.unlocks.is_unlocked(UnlockFlag::Guts) {
            stock.add(Resource::Guts, yield_of(hunters, production.hunter_guts, scale));
        }
        stock.add(Resource::Pelts, yield_of(hunters, production.hunter_pelts, scale));
        if self.hunter_bows_equipped > 0 {
            stock.add(Resource::Feathers, yield_of(hunters, production.hunter_feathers, scale));
            stock.add(Resource::Skins, yield_of(hunters, production.hunter_skins, scale));
        }
    }

    fn cut_wood(&mut self, multiplier: Decimal) {
        let woodsmen = self.workforce.role(Role::Woodsman);
        let wood = yield_of(woodsmen, self.config.production.woodsman_wood, multiplier);
        self.store.stockpile.add(Resource::Wood, wood);
    }

    fn grow_crops(&mut self, multiplier: Decimal) {
        let farms = self.workforce.building(Building::Farm);
        if farms > 0 {
            self.season
                .grow(farms, self.config.production.farm_grain, multiplier);
        }
    }

    fn extract(&mut self, multiplier: Decimal) {
        let production = &self.config.production;
        let quarries = self.workforce.building(Building::Quarry);
        if quarries > 0 {
            self.sticky.insert(Resource::Stone);
            let stone = yield_of(quarries, production.quarry_stone, multiplier);
            self.store.stockpile.add(Resource::Stone, stone);
        }
        let mines = self.workforce.building(Building::Mine);
        if mines > 0 {
            self.sticky.insert(Resource::Ore);
            let ore = yield_of(mines, production.mine_ore, multiplier);
            self.store.stockpile.add(Resource::Ore, ore);
        }
    }

    fn smelt(&mut self, multiplier: Decimal) {
        let smelters = self.workforce.building(Building::Smelter);
        if smelters == 0 {
            return;
        }
        self.sticky.insert(Resource::Ingots);
        let production = &self.config.production;
        let stock = &mut self.store.stockpile;
        let limit = yield_of(smelters, production.smelter_ore, multiplier);
        let ingots = convert(
            stock,
            Resource::Ore,
            limit,
            &mut self.smelter_buffer,
            production.ore_per_ingot,
        );
        if ingots > Decimal::ZERO {
            let first = stock.get(Resource::Ingots) <= Decimal::ZERO;
            stock.add(Resource::Ingots, ingots);
            if first {
                self.chronicle.push("smelters pour their first crude ingots.");
            }
        }
    }

    /// Smithies and tailor shops: idle slots roll what to make next, then
    /// every slot works. A job starts only when its output can be placed,
    /// in its own slot or in the cellar.
    fn run_workshop(&mut self, workshop: Workshop, multiplier: Decimal) -> Vec<RecipeId> {
        let count = self.workforce.building(workshop.building());
        let slots = self.jobs.get_mut(workshop.craft_role());
        slots.resize(count, &mut self.store);
        if count == 0 {
            return Vec::new();
        }
        let targets = workshop.targets();
        self.sticky.extend(targets.iter().map(|(r, _)| *r));

        let history = match workshop {
            Workshop::Smithy => &mut self.smithy_history,
            Workshop::Tailor => &mut self.tailor_history,
        };
        let mut completed = Vec::new();
        for processor in slots.iter_mut() {
            if processor.is_idle() {
                let choice = roll_choice(targets, &mut self.rng);
                let candidates = workshop.candidates(&self.store, &self.workforce);
                let stock = &self.store.stockpile;
                let picked = pick_target(choice, &candidates, stock, history, &mut self.rng);
                if let Some(id) = picked {
                    let r = recipe(id);
                    if self.store.can_accept(r.output, r.output_qty, &self.workforce) {
                        if let Err(e) = processor.start(id, &mut self.store, &self.workforce) {
                            debug!(recipe = id.name(), reason = %e, "job not started");
                        }
                    }
                }
            }
            processor.tick(multiplier);
            if let Some(id) = processor.complete(&mut self.store) {
                history.record(recipe(id).output);
                completed.push(id);
            }
        }
        completed
    }

    fn outfit_rangers(&mut self) {
        let rangers = self.workforce.role(Role::Ranger);
        if rangers > 0 {
            self.ranger_swords_equipped = equip(
                &mut self.store.stockpile,
                Resource::Swords,
                rangers,
                self.ranger_swords_equipped,
            );
        }
    }

    fn explore(&mut self) -> Vec<SiteCard> {
        let draws = self.draw_credit.accrue(self.workforce.role(Role::Ranger));
        let mut drawn = Vec::new();
        for _ in 0..draws {
            if let Some(card) = self.draw_card() {
                drawn.push(card);
            }
        }
        drawn
    }

    /// Draw one exploration card and apply what it reveals.
    pub(crate) fn draw_card(&mut self) -> Option<SiteCard> {
        let population = self.workforce.population();
        let milestone = self.config.exploration.deck_augment_population;
        let card = self.deck.draw(population, milestone, &mut self.rng)?;
        match card {
            SiteCard::Quarry => {
                self.store.stockpile.add(Resource::QuarrySites, Decimal::ONE);
                self.unlocks.unlock(UnlockFlag::Quarry);
                self.quarries_discovered = self.quarries_discovered.saturating_add(1);
            }
            SiteCard::Mine => {
                self.store.stockpile.add(Resource::MineSites, Decimal::ONE);
                self.unlocks.unlock(UnlockFlag::Mine);
                self.mines_discovered = self.mines_discovered.saturating_add(1);
            }
            _ => {}
        }
        info!(card = card.label(), remaining = self.deck.cards().len(), "card drawn");
        self.chronicle.push(discovery_line(card));
        Some(card)
    }

    fn mill_lumber(&mut self, multiplier: Decimal) {
        let mills = self.workforce.building(Building::LumberMill);
        if mills == 0 {
            return;
        }
        let production = &self.config.production;
        let limit = yield_of(mills, production.mill_wood, multiplier);
        let batches = convert(
            &mut self.store.stockpile,
            Resource::Wood,
            limit,
            &mut self.lumber_buffer,
            production.wood_per_plank,
        );
        self.store
            .stockpile
            .add(Resource::Planks, batches.saturating_mul(multiplier));
    }

    fn weave(&mut self, multiplier: Decimal) -> Vec<RecipeId> {
        let weavers = self.workforce.role(Role::Weaver);
        let slots = self.jobs.get_mut(CraftRole::Weaver);
        slots.resize(weavers, &mut self.store);
        let mut completed = Vec::new();
        for processor in slots.iter_mut() {
            if processor.is_idle()
                && self.store.stockpile.has(Resource::Flax, Decimal::ONE)
                && self.store.can_accept(Resource::Linen, Decimal::ONE, &self.workforce)
            {
                if let Err(e) = processor.start(RecipeId::WeaveLinen, &mut self.store, &self.workforce) {
                    debug!(reason = %e, "weaving not started");
                }
            }
            processor.tick(multiplier);
            if let Some(id) = processor.complete(&mut self.store) {
                let first = self.store.stockpile.get(Resource::Linen) <= Decimal::ONE;
                self.sticky.insert(Resource::Linen);
                if first && !self.first_linen_announced {
                    self.first_linen_announced = true;
                    self.chronicle.push("your first linen is woven from flax fibers.");
                }
                completed.push(id);
            }
        }
        completed
    }

    fn craft_bows(&mut self, multiplier: Decimal) -> Vec<RecipeId> {
        let bowyers = self.workforce.role(Role::Bowyer);
        let slots = self.jobs.get_mut(CraftRole::Bowyer);
        slots.resize(bowyers, &mut self.store);
        let mut completed = Vec::new();
        for processor in slots.iter_mut() {
            if processor.is_idle()
                && processor
                    .start(RecipeId::CraftArrows, &mut self.store, &self.workforce)
                    .is_err()
            {
                if let Err(e) = processor.start(RecipeId::CraftBow, &mut self.store, &self.workforce) {
                    debug!(reason = %e, "bowyer idle");
                }
            }
            processor.tick(multiplier);
            if let Some(id) = processor.complete(&mut self.store) {
                self.sticky.extend([Resource::Bows, Resource::Arrows]);
                completed.push(id);
            }
        }
        completed
    }

    /// End-of-tick bookkeeping. Returns the flags unlocked.
    fn settle(&mut self) -> Vec<UnlockFlag> {
        let clamped = self.store.stockpile.clamp_non_negative();
        if !clamped.is_empty() {
            warn!(?clamped, "negative stock clamped to zero");
        }
        for (resource, excess) in apply_caps(&mut self.store.stockpile, &self.workforce) {
            debug!(%resource, %excess, "excess discarded at cap");
        }
        self.store.stockpile.sync_food();
        self.refresh_sticky();
        let unlocked = self.process_unlocks();
        self.report_audit();
        unlocked
    }

    /// Keep every resource that has ever been held visible.
    pub(crate) fn refresh_sticky(&mut self) {
        self.sticky.extend(
            self.store
                .stockpile
                .nonzero()
                .filter(|r| *r != Resource::Food && !r.is_site()),
        );
        let clothing_held = TAILOR_TARGETS
            .iter()
            .any(|(r, _)| self.store.stockpile.get(*r) > Decimal::ZERO);
        if clothing_held || self.workforce.building(Building::TailorShop) > 0 {
            self.sticky.extend(TAILOR_TARGETS.iter().map(|(r, _)| *r));
        }
    }

    /// Evaluate every unlock rule and announce what changed.
    pub fn process_unlocks(&mut self) -> Vec<UnlockFlag> {
        let population = self.workforce.population();
        let changed = self.unlocks.evaluate(
            &self.store.stockpile,
            &self.workforce,
            population,
            self.config.production.flax_unlock_skins,
        );
        for flag in &changed {
            info!(?flag, "unlocked");
            if let Some(line) = announcement(*flag) {
                self.chronicle.push(line);
            }
        }
        changed
    }

    /// Run the storage audit and log every violation.
    fn report_audit(&self) {
        if let AuditResult::Violations(violations) =
            audit(&self.store, self.jobs.outputs(), &self.workforce)
        {
            for violation in violations {
                warn!(%violation, "storage invariant violated");
            }
        }
    }

    /// Run the storage audit.
    pub fn audit(&self) -> AuditResult {
        audit(&self.store, self.jobs.outputs(), &self.workforce)
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    /// Everyone in a role or staffing a building.
    pub fn population(&self) -> u64 {
        self.workforce.population()
    }

    /// How many people the settlement can house.
    pub fn population_cap(&self) -> u64 {
        self.workforce
            .building(Building::House)
            .saturating_mul(HOUSING_PER_HOUSE)
            .saturating_add(self.base_pop_cap)
    }

    /// Resources the presentation layer should show, in order.
    ///
    /// The primary set comes first: meat and grain separately once food
    /// breakdown is unlocked, the combined food total before that. Every
    /// other resource that is held or sticky follows, sorted by name.
    pub fn display_resource_names(&self) -> Vec<Resource> {
        let primary: &[Resource] = if self.unlocks.is_unlocked(UnlockFlag::FoodBreakdown) {
            &[
                Resource::Meat,
                Resource::Grain,
                Resource::Pelts,
                Resource::Wood,
                Resource::Planks,
            ]
        } else {
            &[Resource::Food, Resource::Pelts, Resource::Wood, Resource::Planks]
        };
        let mut dynamic: Vec<Resource> = self
            .store
            .stockpile
            .nonzero()
            .chain(self.sticky.iter().copied())
            .filter(|r| {
                !primary.contains(r)
                    && !matches!(r, Resource::Food | Resource::Meat | Resource::Grain)
                    && !r.is_site()
            })
            .collect();
        dynamic.sort_by_key(|r| r.name());
        dynamic.dedup();
        primary.iter().copied().chain(dynamic).collect()
    }

    /// Take every chronicle line recorded since the last drain.
    pub fn drain_logs(&mut self) -> Vec<String> {
        self.chronicle.drain()
    }

    /// The latest chronicle line.
    pub fn log_text(&self) -> &str {
        self.chronicle.text()
    }

    /// Recent chronicle lines, oldest first.
    pub fn log_history(&self) -> impl Iterator<Item = &str> {
        self.chronicle.history()
    }

    /// The configuration this settlement runs under.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The resource ledger.
    pub const fn stockpile(&self) -> &Stockpile {
        &self.store.stockpile
    }

    /// Stockpile, cellar and reservations together.
    pub const fn storehouse(&self) -> &Storehouse {
        &self.store
    }

    /// Quantity of `resource` in its normal slot.
    pub fn resource(&self, resource: Resource) -> Decimal {
        self.store.stockpile.get(resource)
    }

    /// Role and building counts.
    pub const fn workforce(&self) -> &Workforce {
        &self.workforce
    }

    /// Workers in `role`.
    pub fn role_count(&self, role: Role) -> u64 {
        self.workforce.role(role)
    }

    /// Units of `building` built.
    pub fn building_count(&self, building: Building) -> u64 {
        self.workforce.building(building)
    }

    /// Population cap before houses.
    pub const fn base_pop_cap(&self) -> u64 {
        self.base_pop_cap
    }

    /// The calendar.
    pub const fn season(&self) -> &SeasonCycle {
        &self.season
    }

    /// The exploration deck.
    pub const fn deck(&self) -> &SiteDeck {
        &self.deck
    }

    /// Rangers' fractional draw credit.
    pub const fn draw_credit(&self) -> &DrawCredit {
        &self.draw_credit
    }

    /// Whether `flag` is unlocked.
    pub fn is_unlocked(&self, flag: UnlockFlag) -> bool {
        self.unlocks.is_unlocked(flag)
    }

    /// The unlock flags.
    pub const fn unlocks(&self) -> &UnlockTracker {
        &self.unlocks
    }

    /// The job slots of `role`.
    pub const fn jobs(&self, role: CraftRole) -> &JobSlots {
        self.jobs.get(role)
    }

    /// Smithy completion history.
    pub const fn smithy_history(&self) -> &CraftHistory {
        &self.smithy_history
    }

    /// Tailor completion history.
    pub const fn tailor_history(&self) -> &CraftHistory {
        &self.tailor_history
    }

    /// Wood waiting to be milled.
    pub const fn lumber_buffer(&self) -> Decimal {
        self.lumber_buffer
    }

    /// Ore waiting to be poured.
    pub const fn smelter_buffer(&self) -> Decimal {
        self.smelter_buffer
    }

    /// Meat ever brought in by hunters.
    pub const fn total_meat_made(&self) -> Decimal {
        self.total_meat_made
    }

    /// Hunters carrying a bow.
    pub const fn hunter_bows_equipped(&self) -> u64 {
        self.hunter_bows_equipped
    }

    /// Rangers carrying a sword.
    pub const fn ranger_swords_equipped(&self) -> u64 {
        self.ranger_swords_equipped
    }

    /// Quarry sites found by rangers.
    pub const fn quarries_discovered(&self) -> u64 {
        self.quarries_discovered
    }

    /// Mine sites found by rangers.
    pub const fn mines_discovered(&self) -> u64 {
        self.mines_discovered
    }

    /// Resources kept visible even at zero.
    pub const fn sticky_resources(&self) -> &BTreeSet<Resource> {
        &self.sticky
    }

    /// Food the population needed last tick.
    pub const fn last_food_need(&self) -> Decimal {
        self.last_food_need
    }

    /// Pelts the population needed last tick.
    pub const fn last_warmth_need(&self) -> Decimal {
        self.last_warmth_need
    }
}

impl CapacitySource for Settlement {
    fn building_count(&self, building: Building) -> u64 {
        self.workforce.building(building)
    }

    fn role_count(&self, role: Role) -> u64 {
        self.workforce.role(role)
    }
}
