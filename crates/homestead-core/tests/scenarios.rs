//! End-to-end scenarios for the settlement engine.
//!
//! Every test drives a [`Settlement`] through its public surface only:
//! actions, ticks and snapshots. State that actions cannot reach quickly
//! is set up by loading a snapshot.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc,
    clippy::too_many_lines
)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use homestead_core::jobs::{JobError, JobProcessor};
use homestead_core::workforce::Workforce;
use homestead_core::{Command, Settlement, SimulationConfig};
use homestead_ledger::{Stockpile, Storehouse, capacity_of};
use homestead_types::{Building, CraftRole, RecipeId, Resource, Role, Season, UnlockFlag};

fn fresh() -> Settlement {
    Settlement::new(SimulationConfig::default()).expect("default config is valid")
}

fn loaded(state: &serde_json::Value) -> Settlement {
    let mut s = fresh();
    s.load_snapshot(state).expect("default config is valid");
    s
}

// =========================================================================
// Scenario A: recruiting costs food, meat first
// =========================================================================

#[test]
fn recruiting_a_peasant_costs_two_meat() {
    let mut s = fresh();
    assert_eq!(s.role_count(Role::Peasant), 0);

    let outcome = s.action_recruit_peasant();

    assert!(outcome.is_applied());
    assert_eq!(s.role_count(Role::Peasant), 1);
    assert_eq!(s.resource(Resource::Meat), dec!(18));
    assert_eq!(s.resource(Resource::Grain), Decimal::ZERO);
    assert_eq!(s.resource(Resource::Food), dec!(18));
}

// =========================================================================
// Scenario B: one weaver turns one flax into one linen in ten ticks
// =========================================================================

#[test]
fn weaver_delivers_linen_after_ten_ticks() {
    // The farm gives flax somewhere to be stored.
    let mut s = loaded(&json!({
        "resources": {"Meat": 20, "Pelts": 5, "Flax": 5},
        "weavers": 1,
        "farms": 1,
    }));

    for tick in 1..=10 {
        let summary = s.tick().unwrap();
        assert_eq!(summary.multiplier, Decimal::ONE, "penalty on tick {tick}");
        if tick < 10 {
            assert_eq!(s.resource(Resource::Linen), Decimal::ZERO);
        }
    }

    assert_eq!(s.resource(Resource::Linen), Decimal::ONE);
    assert_eq!(s.resource(Resource::Flax), dec!(4));
    assert!(s.audit().is_clean());
}

// =========================================================================
// Scenario C: a job whose output fits nowhere never starts
// =========================================================================

#[test]
fn job_without_room_leaves_inputs_untouched() {
    let mut workforce = Workforce::new();
    workforce.set_role(Role::Weaver, 1);
    let linen_cap = capacity_of(Resource::Linen, &workforce).unwrap();

    let mut stockpile = Stockpile::new();
    stockpile.set(Resource::Flax, dec!(5));
    stockpile.set(Resource::Linen, linen_cap);
    let mut store = Storehouse {
        stockpile,
        ..Storehouse::default()
    };
    assert_eq!(store.cellar.capacity(), Decimal::ZERO);

    let mut processor = JobProcessor::new();
    let result = processor.start(RecipeId::WeaveLinen, &mut store, &workforce);

    assert_eq!(result, Err(JobError::NoRoom(Resource::Linen)));
    assert!(processor.is_idle());
    assert_eq!(store.stockpile.get(Resource::Flax), dec!(5));
    assert_eq!(store.stockpile.get(Resource::Linen), linen_cap);
    assert_eq!(store.reservations.reserved(Resource::Linen), Decimal::ZERO);
    assert_eq!(store.reservations.cellar_slots(), Decimal::ZERO);
}

// =========================================================================
// Scenario D: hunger scales the hunt
// =========================================================================

#[test]
fn hunger_penalty_scales_hunter_yield() {
    let state = |meat: Decimal| {
        json!({
            "resources": {"Meat": meat.to_string(), "Grain": 0, "Pelts": 10},
            "hunters": 4,
        })
    };
    let mut fed = loaded(&state(dec!(40)));
    let mut hungry = loaded(&state(dec!(0.5)));

    let fed_tick = fed.tick().unwrap();
    let hungry_tick = hungry.tick().unwrap();

    assert_eq!(fed_tick.multiplier, Decimal::ONE);
    assert_eq!(hungry_tick.multiplier, dec!(0.75));

    // Four hunters at 0.475 each.
    assert_eq!(fed.total_meat_made(), dec!(1.9));
    assert_eq!(hungry.total_meat_made(), dec!(1.425));
    assert_eq!(
        hungry.total_meat_made(),
        fed.total_meat_made()
            .saturating_mul(SimulationConfig::default().economy.starvation_penalty)
    );

    // Hungry stores were emptied before the hunt came in.
    assert_eq!(hungry.resource(Resource::Meat), dec!(1.425));
    assert_eq!(hungry.resource(Resource::Food), dec!(1.425));
    assert_eq!(fed.resource(Resource::Meat), dec!(40.9));
}

// =========================================================================
// Scenario E: entering summer brings in the harvest
// =========================================================================

#[test]
fn summer_flushes_the_grain_buffer() {
    let mut s = loaded(&json!({
        "season_tick": 14,
        "grain_buffer": "12.5",
    }));
    assert_eq!(s.season().season(), Season::Spring);
    assert_eq!(s.season().grain_buffer(), dec!(12.5));
    s.drain_logs();

    let summary = s.tick().unwrap();

    assert_eq!(summary.season, Season::Summer);
    let harvest = summary.harvest.expect("summer entry harvests");
    assert_eq!(harvest.grain, dec!(12.5));
    assert_eq!(s.season().grain_buffer(), Decimal::ZERO);
    assert_eq!(s.resource(Resource::Grain), dec!(12.5));
    let logs = s.drain_logs();
    assert!(
        logs.iter().any(|l| l == "summer harvest brings in 12 grain."),
        "no harvest line in {logs:?}"
    );

    // The buffer is empty, so the next summer tick harvests nothing.
    assert!(s.tick().unwrap().harvest.is_none());
}

// =========================================================================
// Playing through commands
// =========================================================================

#[test]
fn early_game_through_commands() {
    let mut s = fresh();
    for _ in 0..4 {
        assert!(s.perform(Command::RecruitPeasant).is_applied());
    }
    assert!(!s.perform(Command::RecruitPeasant).is_applied());
    assert_eq!(s.population(), 4);
    assert_eq!(s.resource(Resource::Meat), dec!(12));

    let logs = s.drain_logs();
    assert!(logs.iter().any(|l| l == "a new peasant joins your fledgling settlement."));
    assert_eq!(
        logs.last().map(String::as_str),
        Some("you need more housing before recruiting more peasants.")
    );

    for command in [
        Command::AddHunter,
        Command::AddHunter,
        Command::AddWoodsman,
        Command::AddWoodsman,
    ] {
        assert!(s.perform(command).is_applied());
    }
    assert_eq!(s.role_count(Role::Peasant), 0);
    assert!(!s.perform(Command::AddHunter).is_applied());

    for _ in 0..40 {
        let summary = s.tick().unwrap();
        assert_eq!(summary.multiplier, Decimal::ONE);
    }
    assert!(s.is_unlocked(UnlockFlag::Jobs));
    // Two woodsmen fill the two-house wood cap long before now.
    assert_eq!(s.resource(Resource::Wood), dec!(40));

    // Every worker is busy, so the mill has nobody to staff it.
    assert!(!s.perform(Command::BuildLumberMill).is_applied());
    assert_eq!(s.building_count(Building::LumberMill), 0);

    assert!(s.perform(Command::RemoveWoodsman).is_applied());
    assert!(s.perform(Command::BuildLumberMill).is_applied());
    assert_eq!(s.building_count(Building::LumberMill), 1);
    assert_eq!(s.role_count(Role::Peasant), 0);
    assert_eq!(s.population(), 4);
    assert_eq!(s.resource(Resource::Wood), dec!(20));

    for _ in 0..10 {
        s.tick().unwrap();
    }
    assert!(s.resource(Resource::Planks) > Decimal::ZERO);
    assert!(s.audit().is_clean());
}

// =========================================================================
// Cellar overflow
// =========================================================================

fn cellar_total(s: &Settlement) -> Decimal {
    s.storehouse().cellar.used()
}

#[test]
fn full_tailor_shop_finishes_into_the_cellar() {
    let mut s = loaded(&json!({
        "resources": {
            "Clothing": 15, "Cloaks": 10, "Gambesons": 5,
            "Linen": 5, "Pelts": 5, "Meat": 20,
        },
        "tailor_shops": 1,
        "weavers": 1,
        "cellars": 1,
    }));
    assert_eq!(s.storehouse().cellar.capacity(), dec!(40));

    let first = s.tick().unwrap();
    assert!(first.jobs_completed.is_empty());
    assert_eq!(s.storehouse().reservations.cellar_slots(), Decimal::ONE);
    assert_eq!(cellar_total(&s), Decimal::ZERO);

    // Tailoring takes eleven ticks at full speed.
    let mut completed = Vec::new();
    for _ in 1..11 {
        completed.extend(s.tick().unwrap().jobs_completed);
    }
    assert_eq!(completed.len(), 1);

    assert_eq!(cellar_total(&s), Decimal::ONE);
    assert_eq!(s.storehouse().reservations.cellar_slots(), Decimal::ZERO);
    assert_eq!(s.resource(Resource::Clothing), dec!(15));
    assert_eq!(s.resource(Resource::Cloaks), dec!(10));
    assert_eq!(s.resource(Resource::Gambesons), dec!(5));
    assert_eq!(s.tailor_history().counter(), 1);
    assert!(s.audit().is_clean());
}

#[test]
fn nearly_full_smithy_delivers_into_the_cellar() {
    // Each item has half a unit of room: still worth making, but a whole
    // unit only fits in the cellar.
    let mut s = loaded(&json!({
        "resources": {
            "Swords": "4.5", "Daggers": "9.5", "Tools": "14.5",
            "Ingots": 10, "Wood": 5, "Meat": 20,
        },
        "smithies": 1,
        "smelters": 1,
        "cellars": 1,
    }));

    let summary = s.tick().unwrap();

    // Smithing takes one tick, so the job starts and lands together.
    assert_eq!(summary.jobs_completed.len(), 1);
    assert_eq!(cellar_total(&s), Decimal::ONE);
    assert_eq!(s.storehouse().reservations.cellar_slots(), Decimal::ZERO);
    assert_eq!(s.resource(Resource::Swords), dec!(4.5));
    assert_eq!(s.resource(Resource::Daggers), dec!(9.5));
    assert_eq!(s.resource(Resource::Tools), dec!(14.5));
    assert!(s.resource(Resource::Ingots) < dec!(10));
    assert!(s.audit().is_clean());
}

#[test]
fn full_workshop_without_a_cellar_stays_idle() {
    let mut s = loaded(&json!({
        "resources": {
            "Clothing": 15, "Cloaks": 10, "Gambesons": 5,
            "Linen": 5, "Pelts": 5, "Meat": 20,
        },
        "tailor_shops": 1,
        "weavers": 1,
    }));

    s.tick().unwrap();

    let busy = s
        .jobs(CraftRole::Tailor)
        .iter()
        .filter(|(_, p)| !p.is_idle())
        .count();
    assert_eq!(busy, 0);
    assert_eq!(s.resource(Resource::Linen), dec!(5));
    assert!(s.audit().is_clean());
}

// =========================================================================
// Unlocks
// =========================================================================

#[test]
fn unlock_pass_is_idempotent() {
    let mut s = loaded(&json!({
        "resources": {"Meat": 30, "Pelts": 10, "Flax": 4, "Guts": 3, "Wood": 8},
        "houses": 3,
        "hunters": 2,
        "farms": 1,
    }));
    for _ in 0..5 {
        s.tick().unwrap();
    }
    s.process_unlocks();
    s.drain_logs();
    let flags: Vec<UnlockFlag> = s.unlocks().iter().collect();

    assert!(s.process_unlocks().is_empty());
    assert!(s.drain_logs().is_empty());
    assert_eq!(s.unlocks().iter().collect::<Vec<_>>(), flags);
    assert!(s.is_unlocked(UnlockFlag::Weaver));
    assert!(s.is_unlocked(UnlockFlag::Bowyer));
}

#[test]
fn unlocks_never_revert() {
    let mut s = loaded(&json!({
        "resources": {"Meat": 40, "Flax": 4},
        "farms": 1,
    }));
    assert!(s.is_unlocked(UnlockFlag::Weaver));
    assert!(s.action_recruit_peasant().is_applied());
    assert!(s.action_add_weaver().is_applied());

    // Four bolts of linen use up every stalk of flax.
    for _ in 0..35 {
        s.tick().unwrap();
    }
    assert_eq!(s.resource(Resource::Flax), Decimal::ZERO);
    assert_eq!(s.resource(Resource::Linen), dec!(3));
    assert!(s.is_unlocked(UnlockFlag::Weaver));
}

// =========================================================================
// Snapshots
// =========================================================================

#[test]
fn snapshot_survives_a_trip_through_json_text() {
    let mut s = loaded(&json!({
        "resources": {"Meat": 40, "Pelts": 10, "Flax": 8, "Feathers": 40, "Wood": 30, "Guts": 2},
        "houses": 4,
        "hunters": 2,
        "woodsmen": 1,
        "weavers": 1,
        "bowyers": 1,
        "farms": 1,
    }));
    for _ in 0..13 {
        s.tick().unwrap();
    }
    let text = serde_json::to_string(&s.export_json().unwrap()).unwrap();

    let mut restored = fresh();
    restored
        .load_snapshot(&serde_json::from_str(&text).unwrap())
        .unwrap();

    let mut a = s.export_snapshot();
    let mut b = restored.export_snapshot();
    a.log_text.clear();
    a.log_history.clear();
    b.log_text.clear();
    b.log_history.clear();
    assert_eq!(a, b);
    assert_eq!(restored.storehouse(), s.storehouse());
    assert!(restored.audit().is_clean());

    // Both continue identically once the random stream is irrelevant.
    s.tick().unwrap();
    restored.tick().unwrap();
    assert_eq!(restored.stockpile(), s.stockpile());
}

#[test]
fn loose_snapshot_values_are_coerced() {
    let s = loaded(&json!({
        "resources": {"Meat": "12.5", "Wood": 3.75, "Linen": "bolts", "Mithril": 9},
        "hunters": 2.9,
        "woodsmen": -3,
        "tailor_last_crafted": {"PaddedArmor": 4, "Cloaks": 2},
        "first_linen_announced": 1,
        "site_deck": ["forest", "dragon", "quarry"],
    }));

    assert_eq!(s.resource(Resource::Meat), dec!(12.5));
    assert_eq!(s.resource(Resource::Food), dec!(12.5));
    assert_eq!(s.resource(Resource::Wood), dec!(3.75));
    assert_eq!(s.resource(Resource::Linen), Decimal::ZERO);
    assert_eq!(s.role_count(Role::Hunter), 2);
    assert_eq!(s.role_count(Role::Woodsman), 0);
    assert_eq!(s.tailor_history().last(Resource::Gambesons), 4);
    assert_eq!(s.tailor_history().last(Resource::Cloaks), 2);
    assert_eq!(s.deck().cards().len(), 2);
}

#[test]
fn non_object_snapshot_starts_fresh() {
    let mut s = fresh();
    s.action_recruit_peasant();
    s.load_snapshot(&json!([1, 2, 3])).unwrap();
    assert_eq!(s.population(), 0);
    assert_eq!(s.resource(Resource::Meat), dec!(20));
}

// =========================================================================
// Determinism and long-run invariants
// =========================================================================

#[test]
fn same_seed_same_settlement() {
    let state = json!({
        "resources": {"Meat": 60, "Pelts": 20, "Ingots": 20, "Wood": 30, "Linen": 10},
        "houses": 4,
        "rangers": 5,
        "smithies": 1,
        "smelters": 1,
        "tailor_shops": 1,
        "weavers": 1,
    });
    let mut a = loaded(&state);
    let mut b = loaded(&state);
    for _ in 0..120 {
        let x = a.tick().unwrap();
        let y = b.tick().unwrap();
        assert_eq!(x.cards_drawn, y.cards_drawn);
        assert_eq!(x.jobs_completed, y.jobs_completed);
    }
    assert_eq!(a.export_snapshot(), b.export_snapshot());
}

#[test]
fn storage_invariants_hold_over_a_long_run() {
    let mut s = loaded(&json!({
        "resources": {
            "Meat": 40, "Pelts": 10, "Wood": 20, "Flax": 10,
            "Feathers": 40, "Guts": 2, "Linen": 4, "Ingots": 10,
        },
        "houses": 4,
        "hunters": 3,
        "woodsmen": 2,
        "weavers": 1,
        "bowyers": 1,
        "rangers": 1,
        "farms": 1,
        "lumber_mills": 1,
        "smelters": 1,
        "smithies": 1,
        "tailor_shops": 1,
        "cellars": 1,
    }));
    assert!(s.audit().is_clean());

    for tick in 0..300 {
        s.tick().unwrap();
        assert!(s.audit().is_clean(), "audit failed on tick {tick}: {:?}", s.audit());

        let stock = s.stockpile();
        let mut food = Decimal::ZERO;
        for (resource, quantity) in stock.iter() {
            assert!(quantity >= Decimal::ZERO, "{resource} negative on tick {tick}");
            if let Some(cap) = capacity_of(resource, &s) {
                assert!(quantity <= cap, "{resource} over cap on tick {tick}");
            }
            if matches!(resource, Resource::Meat | Resource::Grain) {
                food = food.saturating_add(quantity);
            }
        }
        assert_eq!(s.resource(Resource::Food), food);
        assert!(s.hunter_bows_equipped() <= s.role_count(Role::Hunter));
        assert!(s.ranger_swords_equipped() <= s.role_count(Role::Ranger));
    }
}
