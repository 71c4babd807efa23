//! Worker role and building counts.
//!
//! Everyone in the settlement is either in a role (peasants are the idle
//! pool) or staffs a building. Tailors are not a role of their own: each
//! tailor shop carries exactly one tailor.
//!
//! ```text
//! population     = sum(roles) + sum(staffed buildings)
//! population_cap = base_pop_cap + 2 * houses
//! ```

use std::collections::BTreeMap;

use homestead_ledger::CapacitySource;
use homestead_types::{Building, Role};

/// Role and building counts for one settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workforce {
    roles: BTreeMap<Role, u64>,
    buildings: BTreeMap<Building, u64>,
}

impl Workforce {
    /// An empty settlement.
    pub const fn new() -> Self {
        Self {
            roles: BTreeMap::new(),
            buildings: BTreeMap::new(),
        }
    }

    /// Workers in `role`.
    pub fn role(&self, role: Role) -> u64 {
        self.roles.get(&role).copied().unwrap_or(0)
    }

    /// Units of `building` built.
    pub fn building(&self, building: Building) -> u64 {
        self.buildings.get(&building).copied().unwrap_or(0)
    }

    /// Set the number of workers in `role`.
    pub fn set_role(&mut self, role: Role, count: u64) {
        self.roles.insert(role, count);
    }

    /// Set the number of `building` units.
    pub fn set_building(&mut self, building: Building, count: u64) {
        self.buildings.insert(building, count);
    }

    /// Move one worker from `from` to `to`. Returns `false`, changing
    /// nothing, when `from` is empty.
    pub fn reassign(&mut self, from: Role, to: Role) -> bool {
        let Some(left) = self.role(from).checked_sub(1) else {
            return false;
        };
        self.set_role(from, left);
        self.set_role(to, self.role(to).saturating_add(1));
        true
    }

    /// Add one worker to `role`.
    pub fn hire(&mut self, role: Role) {
        self.set_role(role, self.role(role).saturating_add(1));
    }

    /// Remove one worker from `role`. Returns `false` when it is empty.
    pub fn dismiss(&mut self, role: Role) -> bool {
        let Some(left) = self.role(role).checked_sub(1) else {
            return false;
        };
        self.set_role(role, left);
        true
    }

    /// Add one `building`. A staffed building takes an idle peasant; it is
    /// not built (and `false` is returned) when there is none.
    pub fn build(&mut self, building: Building) -> bool {
        if building.is_staffed() && !self.dismiss(Role::Peasant) {
            return false;
        }
        self.set_building(building, self.building(building).saturating_add(1));
        true
    }

    /// Remove one `building`, returning its worker to the peasant pool.
    /// Returns `false` when there is none to remove.
    pub fn demolish(&mut self, building: Building) -> bool {
        let Some(left) = self.building(building).checked_sub(1) else {
            return false;
        };
        self.set_building(building, left);
        if building.is_staffed() {
            self.hire(Role::Peasant);
        }
        true
    }

    /// Everyone in a role or staffing a building.
    pub fn population(&self) -> u64 {
        let in_roles = Role::ALL
            .into_iter()
            .fold(0_u64, |acc, r| acc.saturating_add(self.role(r)));
        Building::ALL
            .into_iter()
            .filter(|b| b.is_staffed())
            .fold(in_roles, |acc, b| acc.saturating_add(self.building(b)))
    }

    /// Tailors at work, one per shop.
    pub fn tailors(&self) -> u64 {
        self.building(Building::TailorShop)
    }
}

impl CapacitySource for Workforce {
    fn building_count(&self, building: Building) -> u64 {
        self.building(building)
    }

    fn role_count(&self, role: Role) -> u64 {
        self.role(role)
    }
}
