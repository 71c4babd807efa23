//! Snapshot export and lenient loading.
//!
//! Export is a straight `serde` serialization of [`SettlementSnapshot`].
//! Loading is deliberately forgiving: the snapshot may come from an older
//! save or a hand-written config, so every field is read on its own and a
//! missing or malformed field falls back to the fresh-settlement default.
//!
//! Coercion rules:
//!
//! - quantities accept JSON numbers or numeric strings;
//! - counts accept integers, floats (truncated) or numeric strings, and
//!   never go below zero;
//! - flags use truthiness (`0`, `""`, `null`, `false` and empty
//!   containers are false).
//!
//! The reservation ledger in the snapshot is ignored and rebuilt from the
//! job records, which are the source of truth.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};
use tracing::warn;

use homestead_ledger::Cellar;
use homestead_types::{
    Building, CraftRole, Destination, JobRecord, RecipeId, Resource, ReservedOutput, Role,
    Season, SettlementSnapshot, SiteCard, UnlockFlag,
};
use homestead_world::{DrawCredit, SeasonCycle, SiteDeck};

use crate::crafting::{CraftHistory, SMITHY_TARGETS, TAILOR_TARGETS};
use crate::engine::{EngineError, Settlement};
use crate::jobs::JobSlots;
use crate::log::Chronicle;

/// Cellar slots per cellar, used when a snapshot omits the capacity.
const SLOTS_PER_CELLAR: i64 = 40;

/// Cellar slots per warehouse, used when a snapshot omits the capacity.
const SLOTS_PER_WAREHOUSE: i64 = 260;

/// Legacy snapshot name for gambesons.
const LEGACY_GAMBESON_NAME: &str = "PaddedArmor";

impl Settlement {
    /// The complete state of the settlement.
    pub fn export_snapshot(&self) -> SettlementSnapshot {
        let w = &self.workforce;
        let flag = |f: UnlockFlag| self.unlocks.is_unlocked(f);
        SettlementSnapshot {
            resources: self.store.stockpile.iter().collect(),
            peasants: w.role(Role::Peasant),
            hunters: w.role(Role::Hunter),
            woodsmen: w.role(Role::Woodsman),
            bowyers: w.role(Role::Bowyer),
            weavers: w.role(Role::Weaver),
            tailors: w.tailors(),
            rangers: w.role(Role::Ranger),
            ranger_swords_equipped: self.ranger_swords_equipped,
            lumber_mills: w.building(Building::LumberMill),
            houses: w.building(Building::House),
            farms: w.building(Building::Farm),
            smelters: w.building(Building::Smelter),
            smithies: w.building(Building::Smithy),
            tailor_shops: w.building(Building::TailorShop),
            quarries: w.building(Building::Quarry),
            mines: w.building(Building::Mine),
            cellars: w.building(Building::Cellar),
            warehouses: w.building(Building::Warehouse),
            base_pop_cap: self.base_pop_cap,
            farm_growth_slots: self.season.farm_growth_slots(),
            lumber_buffer: self.lumber_buffer,
            grain_buffer: self.season.grain_buffer(),
            smelter_buffer: self.smelter_buffer,
            hunter_bows_equipped: self.hunter_bows_equipped,
            bowyer_jobs: self.jobs.get(CraftRole::Bowyer).to_records(),
            weaver_jobs: self.jobs.get(CraftRole::Weaver).to_records(),
            tailor_jobs: self.jobs.get(CraftRole::Tailor).to_records(),
            smithy_jobs: self.jobs.get(CraftRole::Smithy).to_records(),
            total_meat_made: self.total_meat_made,
            season_tick: self.season.tick(),
            season_phase: self.season.season().phase(),
            log_text: self.chronicle.text().to_owned(),
            log_history: self.chronicle.history().map(str::to_owned).collect(),
            sticky_resources: self.sticky.iter().copied().collect(),
            site_deck: self.deck.cards().to_vec(),
            deck_seeded: self.deck.is_seeded(),
            deck_refreshed_at_60: self.deck.is_augmented(),
            ranger_draw_pool: self.draw_credit.pool(),
            jobs_unlocked: flag(UnlockFlag::Jobs),
            farm_unlocked: flag(UnlockFlag::Farm),
            food_breakdown_unlocked: flag(UnlockFlag::FoodBreakdown),
            guts_unlocked: flag(UnlockFlag::Guts),
            guts_visible: flag(UnlockFlag::GutsVisible),
            flax_unlocked: flag(UnlockFlag::Flax),
            weaver_unlocked: flag(UnlockFlag::Weaver),
            bowyer_unlocked: flag(UnlockFlag::Bowyer),
            ranger_unlocked: flag(UnlockFlag::Ranger),
            quarry_unlocked: flag(UnlockFlag::Quarry),
            mine_unlocked: flag(UnlockFlag::Mine),
            smelter_unlocked: flag(UnlockFlag::Smelter),
            smithy_unlocked: flag(UnlockFlag::Smithy),
            tailor_unlocked: flag(UnlockFlag::Tailor),
            quarries_discovered: self.quarries_discovered,
            mines_discovered: self.mines_discovered,
            smithy_last_crafted: self.smithy_history.last_crafted().clone(),
            smithy_craft_counter: self.smithy_history.counter(),
            tailor_last_crafted: self.tailor_history.last_crafted().clone(),
            tailor_craft_counter: self.tailor_history.counter(),
            first_linen_announced: self.first_linen_announced,
            cellar: self.store.cellar.contents().clone(),
            cellar_capacity: self.store.cellar.capacity(),
            reserved_outputs: self.store.reservations.outputs().clone(),
            reserved_cellar_slots: self.store.reservations.cellar_slots(),
        }
    }

    /// The snapshot as a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self.export_snapshot())
    }

    /// Replace this settlement with the state in `state`.
    ///
    /// The settlement is rebuilt from scratch under the same configuration,
    /// then every recognised field of `state` is applied. Fields that are
    /// missing or malformed keep their fresh defaults. A non-object value
    /// yields a fresh settlement.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] only if the configuration itself is
    /// invalid; the contents of `state` never cause an error.
    pub fn load_snapshot(&mut self, state: &Value) -> Result<(), EngineError> {
        let mut loaded = Self::new(self.config.clone())?;
        match state.as_object() {
            Some(map) => loaded.apply_fields(&Fields(map))?,
            None => warn!("snapshot is not an object, starting fresh"),
        }
        *self = loaded;
        Ok(())
    }

    fn apply_fields(&mut self, f: &Fields<'_>) -> Result<(), EngineError> {
        if let Some(resources) = f.object("resources") {
            for (name, value) in resources {
                match (Resource::from_name(name), decimal(value)) {
                    (Some(resource), Some(quantity)) => self.store.stockpile.set(resource, quantity),
                    _ => warn!(field = "resources", entry = %name, "unreadable resource entry skipped"),
                }
            }
        }

        for role in Role::ALL {
            if let Some(count) = f.count(role.snapshot_key()) {
                self.workforce.set_role(role, count);
            }
        }
        for building in Building::ALL {
            if let Some(count) = f.count(building.snapshot_key()) {
                self.workforce.set_building(building, count);
            }
        }
        if let Some(cap) = f.count("base_pop_cap") {
            self.base_pop_cap = cap;
        }
        let hunters = self.workforce.role(Role::Hunter);
        let rangers = self.workforce.role(Role::Ranger);
        self.hunter_bows_equipped = f.count("hunter_bows_equipped").unwrap_or(0).min(hunters);
        self.ranger_swords_equipped = f.count("ranger_swords_equipped").unwrap_or(0).min(rangers);

        self.lumber_buffer = f.decimal("lumber_buffer").unwrap_or_default().max(Decimal::ZERO);
        self.smelter_buffer = f.decimal("smelter_buffer").unwrap_or_default().max(Decimal::ZERO);
        self.total_meat_made = f.decimal("total_meat_made").unwrap_or_default().max(Decimal::ZERO);

        let ticks_per_season = self.config.time.ticks_per_season;
        let tick = f.count("season_tick").unwrap_or(0);
        let phase = f
            .count("season_phase")
            .unwrap_or_else(|| tick.checked_div(ticks_per_season).unwrap_or(0));
        self.season = SeasonCycle::from_parts(
            ticks_per_season,
            tick,
            Season::from_phase(phase),
            f.decimal("grain_buffer").unwrap_or_default(),
            f.count("farm_growth_slots").unwrap_or(0),
        )?;

        for role in CraftRole::ALL {
            if let Some(entries) = f.array(role.snapshot_key()) {
                let records = entries.iter().map(job_record).collect();
                *self.jobs.get_mut(role) = JobSlots::from_records(records);
            }
        }

        self.load_chronicle(f);
        self.load_exploration(f)?;

        for flag in UnlockFlag::ALL {
            if f.flag(flag.snapshot_key()) {
                self.unlocks.unlock(flag);
            }
        }
        self.quarries_discovered = f.count("quarries_discovered").unwrap_or(0);
        self.mines_discovered = f.count("mines_discovered").unwrap_or(0);
        self.first_linen_announced = f.flag("first_linen_announced");

        self.smithy_history = CraftHistory::from_parts(
            &SMITHY_TARGETS,
            &f.last_crafted("smithy_last_crafted"),
            f.int("smithy_craft_counter").unwrap_or(0),
        );
        self.tailor_history = CraftHistory::from_parts(
            &TAILOR_TARGETS,
            &f.last_crafted("tailor_last_crafted"),
            f.int("tailor_craft_counter").unwrap_or(0),
        );

        self.load_storage(f);

        if let Some(names) = f.array("sticky_resources") {
            self.sticky
                .extend(names.iter().filter_map(Value::as_str).filter_map(Resource::from_name));
        }
        if self.unlocks.is_unlocked(UnlockFlag::Tailor) || self.workforce.tailors() > 0 {
            self.sticky.extend(TAILOR_TARGETS.iter().map(|(r, _)| *r));
        }

        self.store.stockpile.sync_food();
        self.process_unlocks();
        Ok(())
    }

    fn load_chronicle(&mut self, f: &Fields<'_>) {
        let history_len = self.config.logging.history_len;
        if let Some(lines) = f.array("log_history") {
            let lines: Vec<String> = lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect();
            if !lines.is_empty() {
                self.chronicle = Chronicle::from_parts(history_len, lines);
            }
        }
        if let Some(text) = f.text("log_text") {
            self.chronicle.set_text(text.to_owned());
        }
    }

    fn load_exploration(&mut self, f: &Fields<'_>) -> Result<(), EngineError> {
        let cards: Vec<SiteCard> = f
            .array("site_deck")
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|v| {
                        let card = v.as_str().and_then(SiteCard::from_label);
                        if card.is_none() {
                            warn!(field = "site_deck", entry = %v, "unknown card skipped");
                        }
                        card
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.deck = SiteDeck::from_parts(
            cards,
            f.flag("deck_seeded"),
            f.flag("deck_refreshed_at_60"),
        );
        self.draw_credit = DrawCredit::from_pool(
            self.config.exploration.ranger_draw_ticks,
            f.decimal("ranger_draw_pool").unwrap_or_default(),
        )?;
        Ok(())
    }

    fn load_storage(&mut self, f: &Fields<'_>) {
        let contents: BTreeMap<Resource, Decimal> = f
            .object("cellar")
            .map(|map| {
                map.iter()
                    .filter_map(|(name, value)| Some((Resource::from_name(name)?, decimal(value)?)))
                    .filter(|(_, q)| *q > Decimal::ZERO)
                    .collect()
            })
            .unwrap_or_default();
        let capacity = f.decimal("cellar_capacity").unwrap_or_else(|| {
            let cellars = Decimal::from(self.workforce.building(Building::Cellar));
            let warehouses = Decimal::from(self.workforce.building(Building::Warehouse));
            cellars
                .saturating_mul(Decimal::from(SLOTS_PER_CELLAR))
                .saturating_add(warehouses.saturating_mul(Decimal::from(SLOTS_PER_WAREHOUSE)))
        });
        self.store.cellar = Cellar::from_parts(capacity, contents);
        self.store.reservations.rebuild(self.jobs.outputs());
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Read-only view over the snapshot object.
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    /// The raw value, treating `null` as missing.
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    fn decimal(&self, key: &str) -> Option<Decimal> {
        let value = self.get(key)?;
        let parsed = decimal(value);
        if parsed.is_none() {
            warn!(field = key, %value, "malformed quantity, using default");
        }
        parsed
    }

    fn count(&self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        let parsed = count(value);
        if parsed.is_none() {
            warn!(field = key, %value, "malformed count, using default");
        }
        parsed
    }

    fn int(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        let parsed = int(value);
        if parsed.is_none() {
            warn!(field = key, %value, "malformed integer, using default");
        }
        parsed
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    fn array(&self, key: &str) -> Option<&Vec<Value>> {
        let value = self.get(key)?;
        let array = value.as_array();
        if array.is_none() {
            warn!(field = key, "expected a list, using default");
        }
        array
    }

    fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        let value = self.get(key)?;
        let object = value.as_object();
        if object.is_none() {
            warn!(field = key, "expected a mapping, using default");
        }
        object
    }

    /// A last-crafted table. The legacy `PaddedArmor` entry fills in
    /// gambesons only when the snapshot has no `Gambesons` entry.
    fn last_crafted(&self, key: &str) -> BTreeMap<Resource, i64> {
        let Some(map) = self.object(key) else {
            return BTreeMap::new();
        };
        let mut table = BTreeMap::new();
        let mut legacy = None;
        for (name, value) in map {
            let Some(at) = int(value) else {
                warn!(field = key, entry = %name, "unreadable craft history entry skipped");
                continue;
            };
            if name == LEGACY_GAMBESON_NAME {
                legacy = Some(at);
            } else if let Some(resource) = Resource::from_name(name) {
                table.insert(resource, at);
            }
        }
        if let Some(at) = legacy {
            table.entry(Resource::Gambesons).or_insert(at);
        }
        table
    }
}

/// A quantity from a JSON number or numeric string.
fn decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_owned(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}

/// A non-negative whole count; fractions are truncated.
fn count(value: &Value) -> Option<u64> {
    decimal(value)?.trunc().max(Decimal::ZERO).to_u64()
}

/// A signed whole number; fractions are truncated.
fn int(value: &Value) -> Option<i64> {
    decimal(value)?.trunc().to_i64()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => decimal(value).is_some_and(|d| !d.is_zero()),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One job processor entry. Unreadable parts become an idle default.
fn job_record(value: &Value) -> JobRecord {
    let Some(map) = value.as_object() else {
        warn!(entry = %value, "unreadable job entry restored as idle");
        return JobRecord::default();
    };
    let f = Fields(map);
    let reserved_inputs = f
        .object("reserved_inputs")
        .map(|inputs| {
            inputs
                .iter()
                .filter_map(|(name, q)| Some((Resource::from_name(name)?, decimal(q)?)))
                .collect()
        })
        .unwrap_or_default();
    JobRecord {
        current_recipe: f.text("current_recipe").and_then(RecipeId::from_name),
        progress: f.decimal("progress").unwrap_or_default(),
        worker_count: f
            .count("worker_count")
            .and_then(|c| u32::try_from(c).ok())
            .unwrap_or(1),
        reserved_inputs,
        reserved_output: f
            .array("reserved_output")
            .map(Vec::as_slice)
            .and_then(reserved_output),
    }
}

/// A `[destination, item, quantity]` triple.
fn reserved_output(triple: &[Value]) -> Option<ReservedOutput> {
    let [dest, item, qty] = triple else {
        return None;
    };
    Some((
        Destination::from_label(dest.as_str()?)?,
        Resource::from_name(item.as_str()?)?,
        decimal(qty)?,
    ))
}
