//! Overflow cellar storage.
//!
//! Cellars and warehouses add shared slots that crafted goods spill into
//! when their normal stockpile slot is full. One slot holds one unit of any
//! resource. Shrinking capacity trims contents in resource order until they
//! fit again.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::Resource;

/// Shared overflow storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cellar {
    capacity: Decimal,
    contents: BTreeMap<Resource, Decimal>,
}

impl Cellar {
    /// Create an empty cellar with `capacity` slots.
    pub fn new(capacity: Decimal) -> Self {
        Self {
            capacity: capacity.max(Decimal::ZERO),
            contents: BTreeMap::new(),
        }
    }

    /// Rebuild a cellar from stored contents. Non-positive entries are dropped.
    pub fn from_parts(capacity: Decimal, contents: BTreeMap<Resource, Decimal>) -> Self {
        Self {
            capacity: capacity.max(Decimal::ZERO),
            contents: contents
                .into_iter()
                .filter(|(_, q)| *q > Decimal::ZERO)
                .collect(),
        }
    }

    /// Total slots.
    pub const fn capacity(&self) -> Decimal {
        self.capacity
    }

    /// Stored goods by resource.
    pub const fn contents(&self) -> &BTreeMap<Resource, Decimal> {
        &self.contents
    }

    /// Quantity of `resource` held in the cellar.
    pub fn get(&self, resource: Resource) -> Decimal {
        self.contents
            .get(&resource)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Slots in use.
    pub fn used(&self) -> Decimal {
        self.contents
            .values()
            .fold(Decimal::ZERO, |acc, q| acc.saturating_add(*q))
    }

    /// Slots not in use (ignores reservations).
    pub fn free(&self) -> Decimal {
        self.capacity
            .saturating_sub(self.used())
            .max(Decimal::ZERO)
    }

    /// Store `quantity` of `resource`.
    pub fn deposit(&mut self, resource: Resource, quantity: Decimal) {
        if quantity <= Decimal::ZERO {
            return;
        }
        let entry = self.contents.entry(resource).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(quantity);
    }

    /// Add `slots` of capacity.
    pub fn grow(&mut self, slots: Decimal) {
        self.capacity = self.capacity.saturating_add(slots.max(Decimal::ZERO));
    }

    /// Remove `slots` of capacity (never below zero) and trim contents in
    /// resource order until they fit. Returns what was discarded.
    pub fn shrink(&mut self, slots: Decimal) -> Vec<(Resource, Decimal)> {
        self.capacity = self
            .capacity
            .saturating_sub(slots.max(Decimal::ZERO))
            .max(Decimal::ZERO);

        let mut overflow = self.used().saturating_sub(self.capacity);
        let mut trimmed = Vec::new();
        for (resource, held) in &mut self.contents {
            if overflow <= Decimal::ZERO {
                break;
            }
            let take = (*held).min(overflow);
            *held = held.saturating_sub(take);
            overflow = overflow.saturating_sub(take);
            trimmed.push((*resource, take));
        }
        self.contents.retain(|_, q| *q > Decimal::ZERO);
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn used_and_free_track_deposits() {
        let mut c = Cellar::new(dec!(40));
        c.deposit(Resource::Linen, dec!(3));
        c.deposit(Resource::Bows, dec!(2));
        assert_eq!(c.used(), dec!(5));
        assert_eq!(c.free(), dec!(35));
        assert_eq!(c.get(Resource::Linen), dec!(3));
    }

    #[test]
    fn shrink_trims_in_resource_order() {
        let mut c = Cellar::new(dec!(10));
        c.deposit(Resource::Bows, dec!(4));
        c.deposit(Resource::Linen, dec!(6));
        // Bows sorts before Linen, so bows are trimmed first.
        let trimmed = c.shrink(dec!(5));
        assert_eq!(c.capacity(), dec!(5));
        assert_eq!(trimmed, vec![(Resource::Bows, dec!(4)), (Resource::Linen, dec!(1))]);
        assert_eq!(c.get(Resource::Bows), Decimal::ZERO);
        assert_eq!(c.get(Resource::Linen), dec!(5));
        assert!(!c.contents().contains_key(&Resource::Bows));
    }

    #[test]
    fn shrink_never_goes_negative() {
        let mut c = Cellar::new(dec!(40));
        c.shrink(dec!(260));
        assert_eq!(c.capacity(), Decimal::ZERO);
    }

    #[test]
    fn shrink_without_overflow_keeps_contents() {
        let mut c = Cellar::new(dec!(300));
        c.deposit(Resource::Tools, dec!(10));
        assert!(c.shrink(dec!(260)).is_empty());
        assert_eq!(c.get(Resource::Tools), dec!(10));
    }

    #[test]
    fn from_parts_drops_empty_entries() {
        let c = Cellar::from_parts(
            dec!(40),
            BTreeMap::from([(Resource::Linen, dec!(0)), (Resource::Arrows, dec!(20))]),
        );
        assert_eq!(c.contents().len(), 1);
        assert_eq!(c.used(), dec!(20));
    }
}
