//! The settlement stockpile: one non-negative quantity per resource.
//!
//! The [`Stockpile`] always holds an entry for every [`Resource`], so
//! snapshots list the full table even for goods never produced.
//!
//! # Design
//!
//! - **Non-negative**: withdrawals go through [`Stockpile::debit`] (checked)
//!   or [`Stockpile::take_up_to`] (partial), never through raw subtraction.
//! - **Precision**: all quantities use [`Decimal`] -- no floating point.
//! - **Display food**: `Food` is recomputed from `Meat + Grain` by
//!   [`Stockpile::sync_food`] and never consumed directly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::Resource;

use crate::LedgerError;

/// Quantity of every resource held by the settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    quantities: BTreeMap<Resource, Decimal>,
}

impl Default for Stockpile {
    fn default() -> Self {
        Self::new()
    }
}

impl Stockpile {
    /// Create a stockpile with every resource at zero.
    pub fn new() -> Self {
        Self {
            quantities: Resource::ALL
                .into_iter()
                .map(|r| (r, Decimal::ZERO))
                .collect(),
        }
    }

    /// Current quantity of `resource` (zero when never touched).
    pub fn get(&self, resource: Resource) -> Decimal {
        self.quantities
            .get(&resource)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Overwrite the quantity of `resource`. Negative values are stored as zero.
    pub fn set(&mut self, resource: Resource, quantity: Decimal) {
        self.quantities
            .insert(resource, quantity.max(Decimal::ZERO));
    }

    /// Whether at least `quantity` of `resource` is held.
    pub fn has(&self, resource: Resource, quantity: Decimal) -> bool {
        self.get(resource) >= quantity
    }

    /// Credit `quantity` of `resource`. Non-positive amounts are ignored.
    pub fn add(&mut self, resource: Resource, quantity: Decimal) {
        if quantity <= Decimal::ZERO {
            return;
        }
        let entry = self.quantities.entry(resource).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(quantity);
    }

    /// Withdraw exactly `quantity` of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientStock`] and leaves the stockpile
    /// untouched if less than `quantity` is held.
    pub fn debit(&mut self, resource: Resource, quantity: Decimal) -> Result<(), LedgerError> {
        let available = self.get(resource);
        if available < quantity {
            return Err(LedgerError::InsufficientStock {
                resource,
                requested: quantity,
                available,
            });
        }
        self.quantities
            .insert(resource, available.saturating_sub(quantity));
        Ok(())
    }

    /// Withdraw up to `quantity` of `resource` and return how much was taken.
    pub fn take_up_to(&mut self, resource: Resource, quantity: Decimal) -> Decimal {
        let available = self.get(resource);
        let taken = quantity.min(available).max(Decimal::ZERO);
        self.quantities
            .insert(resource, available.saturating_sub(taken));
        taken
    }

    /// Raise `resource` to at least `floor`.
    pub fn raise_to(&mut self, resource: Resource, floor: Decimal) {
        if self.get(resource) < floor {
            self.quantities.insert(resource, floor);
        }
    }

    /// Clamp every negative quantity to zero. Returns the resources that
    /// had to be clamped.
    pub fn clamp_non_negative(&mut self) -> Vec<Resource> {
        let mut clamped = Vec::new();
        for (resource, quantity) in &mut self.quantities {
            if *quantity < Decimal::ZERO {
                *quantity = Decimal::ZERO;
                clamped.push(*resource);
            }
        }
        clamped
    }

    /// Recompute the display-only `Food` total from `Meat + Grain`.
    pub fn sync_food(&mut self) {
        let total = self
            .get(Resource::Meat)
            .saturating_add(self.get(Resource::Grain))
            .max(Decimal::ZERO);
        self.quantities.insert(Resource::Food, total);
    }

    /// Iterate over every `(resource, quantity)` pair in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, Decimal)> + '_ {
        self.quantities.iter().map(|(r, q)| (*r, *q))
    }

    /// Resources with a strictly positive quantity.
    pub fn nonzero(&self) -> impl Iterator<Item = Resource> + '_ {
        self.quantities
            .iter()
            .filter(|(_, q)| **q > Decimal::ZERO)
            .map(|(r, _)| *r)
    }

    /// Borrow the underlying table.
    pub const fn as_map(&self) -> &BTreeMap<Resource, Decimal> {
        &self.quantities
    }
}
