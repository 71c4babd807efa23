//! Storage capacity per resource.
//!
//! Caps are a pure function of the settlement's building and worker counts.
//! The engine exposes those counts through [`CapacitySource`]; this module
//! owns the cap table and the once-per-tick clamp.
//!
//! | Resource | Cap |
//! |---|---|
//! | Meat | 30 + 10 houses |
//! | Grain | 30 + 30 farms |
//! | Pelts | 20 + 5 houses |
//! | Wood | 20 + 10 houses + 30 lumber mills |
//! | Planks | 20 + 40 lumber mills |
//! | Arrows | 60 + 60 bowyers |
//! | Bows | 10 + 10 bowyers |
//! | Cloaks / Clothing / Gambesons | 10 / 15 / 5 per tailor shop |
//! | Daggers / Swords / Tools | 10 / 5 / 15 per smithy |
//! | Feathers | 25 houses |
//! | Flax | 30 farms |
//! | Guts | 10 + 3 houses |
//! | Ingots | 30 smelters |
//! | Linen | 15 weavers |
//! | Ore | 60 mines |
//! | Skins | 20 + 10 houses |
//! | Stone | 80 quarries |
//!
//! `Food`, `QuarrySites` and `MineSites` are uncapped.

use rust_decimal::Decimal;

use homestead_types::{Building, Resource, Role};

use crate::Stockpile;

/// Anything that can report the counts the cap table depends on.
pub trait CapacitySource {
    /// Number of `building` units built.
    fn building_count(&self, building: Building) -> u64;

    /// Number of workers assigned to `role`.
    fn role_count(&self, role: Role) -> u64;
}

/// `base + per * count`, saturating.
fn linear(base: i64, per: i64, count: u64) -> Decimal {
    Decimal::from(per)
        .saturating_mul(Decimal::from(count))
        .saturating_add(Decimal::from(base))
}

/// The storage cap of `resource`, or `None` when it is unbounded.
pub fn capacity_of(resource: Resource, src: &impl CapacitySource) -> Option<Decimal> {
    let houses = src.building_count(Building::House);
    let farms = src.building_count(Building::Farm);
    let mills = src.building_count(Building::LumberMill);
    let tailors = src.building_count(Building::TailorShop);
    let smithies = src.building_count(Building::Smithy);

    let cap = match resource {
        Resource::Food | Resource::QuarrySites | Resource::MineSites => return None,
        Resource::Meat => linear(30, 10, houses),
        Resource::Grain => linear(30, 30, farms),
        Resource::Pelts => linear(20, 5, houses),
        Resource::Wood => linear(20, 10, houses).saturating_add(linear(0, 30, mills)),
        Resource::Planks => linear(20, 40, mills),
        Resource::Arrows => linear(60, 60, src.role_count(Role::Bowyer)),
        Resource::Bows => linear(10, 10, src.role_count(Role::Bowyer)),
        Resource::Cloaks => linear(0, 10, tailors),
        Resource::Clothing => linear(0, 15, tailors),
        Resource::Gambesons => linear(0, 5, tailors),
        Resource::Daggers => linear(0, 10, smithies),
        Resource::Swords => linear(0, 5, smithies),
        Resource::Tools => linear(0, 15, smithies),
        Resource::Feathers => linear(0, 25, houses),
        Resource::Flax => linear(0, 30, farms),
        Resource::Guts => linear(10, 3, houses),
        Resource::Ingots => linear(0, 30, src.building_count(Building::Smelter)),
        Resource::Linen => linear(0, 15, src.role_count(Role::Weaver)),
        Resource::Ore => linear(0, 60, src.building_count(Building::Mine)),
        Resource::Skins => linear(20, 10, houses),
        Resource::Stone => linear(0, 80, src.building_count(Building::Quarry)),
    };
    Some(cap)
}

/// Whether `resource` has room for more (stock strictly below cap).
pub fn has_room(resource: Resource, stockpile: &Stockpile, src: &impl CapacitySource) -> bool {
    capacity_of(resource, src).is_none_or(|cap| stockpile.get(resource) < cap)
}

/// Clamp every capped resource down to its cap, silently discarding
/// the excess. Returns the total amount discarded per clamped resource.
pub fn apply_caps(stockpile: &mut Stockpile, src: &impl CapacitySource) -> Vec<(Resource, Decimal)> {
    let mut discarded = Vec::new();
    for resource in Resource::ALL {
        let Some(cap) = capacity_of(resource, src) else {
            continue;
        };
        let held = stockpile.get(resource);
        if held > cap {
            stockpile.set(resource, cap);
            discarded.push((resource, held.saturating_sub(cap)));
        }
    }
    discarded
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;

    use super::*;

    /// Fixed counts for exercising the cap table.
    #[derive(Debug, Default)]
    pub(crate) struct Counts {
        pub(crate) buildings: BTreeMap<Building, u64>,
        pub(crate) roles: BTreeMap<Role, u64>,
    }

    impl Counts {
        pub(crate) fn with_building(mut self, b: Building, n: u64) -> Self {
            self.buildings.insert(b, n);
            self
        }

        pub(crate) fn with_role(mut self, r: Role, n: u64) -> Self {
            self.roles.insert(r, n);
            self
        }
    }

    impl CapacitySource for Counts {
        fn building_count(&self, building: Building) -> u64 {
            self.buildings.get(&building).copied().unwrap_or(0)
        }

        fn role_count(&self, role: Role) -> u64 {
            self.roles.get(&role).copied().unwrap_or(0)
        }
    }

    #[test]
    fn uncapped_resources() {
        let counts = Counts::default();
        assert_eq!(capacity_of(Resource::Food, &counts), None);
        assert_eq!(capacity_of(Resource::QuarrySites, &counts), None);
        assert_eq!(capacity_of(Resource::MineSites, &counts), None);
    }

    #[test]
    fn house_driven_caps() {
        let counts = Counts::default()
            .with_building(Building::House, 2)
            .with_building(Building::LumberMill, 1);
        assert_eq!(capacity_of(Resource::Meat, &counts), Some(dec!(50)));
        assert_eq!(capacity_of(Resource::Pelts, &counts), Some(dec!(30)));
        assert_eq!(capacity_of(Resource::Wood, &counts), Some(dec!(70)));
        assert_eq!(capacity_of(Resource::Planks, &counts), Some(dec!(60)));
        assert_eq!(capacity_of(Resource::Guts, &counts), Some(dec!(16)));
        assert_eq!(capacity_of(Resource::Feathers, &counts), Some(dec!(50)));
        assert_eq!(capacity_of(Resource::Skins, &counts), Some(dec!(40)));
    }

    #[test]
    fn worker_driven_caps() {
        let counts = Counts::default()
            .with_role(Role::Bowyer, 1)
            .with_role(Role::Weaver, 2);
        assert_eq!(capacity_of(Resource::Arrows, &counts), Some(dec!(120)));
        assert_eq!(capacity_of(Resource::Bows, &counts), Some(dec!(20)));
        assert_eq!(capacity_of(Resource::Linen, &counts), Some(dec!(30)));
    }

    #[test]
    fn building_only_caps_are_zero_without_buildings() {
        let counts = Counts::default();
        for r in [
            Resource::Cloaks,
            Resource::Clothing,
            Resource::Gambesons,
            Resource::Daggers,
            Resource::Swords,
            Resource::Tools,
            Resource::Flax,
            Resource::Ingots,
            Resource::Ore,
            Resource::Stone,
            Resource::Linen,
        ] {
            assert_eq!(capacity_of(r, &counts), Some(Decimal::ZERO), "{r}");
        }
    }

    #[test]
    fn apply_caps_discards_excess() {
        let counts = Counts::default();
        let mut s = Stockpile::new();
        s.add(Resource::Meat, dec!(45));
        s.add(Resource::QuarrySites, dec!(9));
        let discarded = apply_caps(&mut s, &counts);
        assert_eq!(s.get(Resource::Meat), dec!(30));
        assert_eq!(s.get(Resource::QuarrySites), dec!(9));
        assert_eq!(discarded, vec![(Resource::Meat, dec!(15))]);
    }

    #[test]
    fn has_room_is_strict() {
        let counts = Counts::default().with_building(Building::Smithy, 1);
        let mut s = Stockpile::new();
        s.add(Resource::Swords, dec!(5));
        assert!(!has_room(Resource::Swords, &s, &counts));
        assert!(has_room(Resource::Daggers, &s, &counts));
        assert!(has_room(Resource::Food, &s, &counts));
    }
}
