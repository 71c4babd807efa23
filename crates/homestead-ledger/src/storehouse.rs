//! The storehouse: stockpile, overflow cellar and reservations as one unit.
//!
//! Crafting jobs never touch the stockpile, cellar or reservation ledger
//! directly. They go through the [`Storehouse`], which keeps the three in
//! step:
//!
//! - **Placement** prefers the output's own slot and falls back to the
//!   cellar. A job whose output fits nowhere does not start.
//! - **Inputs** are debited all-or-nothing when a job starts and refunded
//!   on cancellation.
//! - **Delivery** credits the reserved destination and releases the
//!   reservation in the same call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::{Destination, Resource, ReservedOutput};

use crate::capacity::{CapacitySource, capacity_of};
use crate::{Cellar, LedgerError, ReservationLedger, Stockpile};

/// Stockpile, cellar and reservation ledger owned together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storehouse {
    /// Goods in their normal slots.
    pub stockpile: Stockpile,
    /// Overflow storage.
    pub cellar: Cellar,
    /// Space promised to running jobs.
    pub reservations: ReservationLedger,
}

impl Storehouse {
    /// Assemble a storehouse from its parts.
    pub const fn new(stockpile: Stockpile, cellar: Cellar, reservations: ReservationLedger) -> Self {
        Self {
            stockpile,
            cellar,
            reservations,
        }
    }

    /// Unpromised room in `resource`'s normal slot, or `None` if unbounded.
    pub fn normal_free(&self, resource: Resource, src: &impl CapacitySource) -> Option<Decimal> {
        capacity_of(resource, src).map(|cap| {
            cap.saturating_sub(self.stockpile.get(resource))
                .saturating_sub(self.reservations.reserved(resource))
        })
    }

    /// Unpromised cellar slots.
    pub fn cellar_free(&self) -> Decimal {
        self.cellar
            .capacity()
            .saturating_sub(self.cellar.used())
            .saturating_sub(self.reservations.cellar_slots())
    }

    /// Where `quantity` of `resource` would be placed right now, if anywhere.
    pub fn placement(
        &self,
        resource: Resource,
        quantity: Decimal,
        src: &impl CapacitySource,
    ) -> Option<Destination> {
        let fits_normal = self
            .normal_free(resource, src)
            .is_none_or(|free| free >= quantity);
        if fits_normal {
            Some(Destination::Normal)
        } else if self.cellar_free() >= quantity {
            Some(Destination::Cellar)
        } else {
            None
        }
    }

    /// Whether `quantity` of `resource` could be placed right now.
    pub fn can_accept(&self, resource: Resource, quantity: Decimal, src: &impl CapacitySource) -> bool {
        self.placement(resource, quantity, src).is_some()
    }

    /// Promise space for `quantity` of `resource`. Returns the reservation,
    /// or `None` when the output fits nowhere.
    pub fn reserve_output(
        &mut self,
        resource: Resource,
        quantity: Decimal,
        src: &impl CapacitySource,
    ) -> Option<ReservedOutput> {
        let destination = self.placement(resource, quantity, src)?;
        let output = (destination, resource, quantity);
        self.reservations.hold(output);
        Some(output)
    }

    /// Whether every input is held in full.
    pub fn has_inputs(&self, inputs: &[(Resource, Decimal)]) -> bool {
        inputs.iter().all(|(r, q)| self.stockpile.has(*r, *q))
    }

    /// Debit every input, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientStock`] for the first input that is
    /// short; the stockpile is left untouched.
    pub fn debit_inputs(&mut self, inputs: &[(Resource, Decimal)]) -> Result<(), LedgerError> {
        if let Some((resource, quantity)) = inputs
            .iter()
            .find(|(r, q)| !self.stockpile.has(*r, *q))
        {
            return Err(LedgerError::InsufficientStock {
                resource: *resource,
                requested: *quantity,
                available: self.stockpile.get(*resource),
            });
        }
        for (resource, quantity) in inputs {
            self.stockpile.debit(*resource, *quantity)?;
        }
        Ok(())
    }

    /// Return debited inputs to the stockpile.
    pub fn refund_inputs<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a Resource, &'a Decimal)>) {
        for (resource, quantity) in inputs {
            self.stockpile.add(*resource, *quantity);
        }
    }

    /// Credit a reserved output to its destination and release the
    /// reservation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservationUnderflow`] if the reservation was
    /// not held. The goods are still delivered.
    pub fn deliver(&mut self, output: ReservedOutput) -> Result<(), LedgerError> {
        let (destination, resource, quantity) = output;
        match destination {
            Destination::Normal => self.stockpile.add(resource, quantity),
            Destination::Cellar => self.cellar.deposit(resource, quantity),
        }
        self.reservations.release(output)
    }

    /// Release a reservation without delivering anything.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservationUnderflow`] if the reservation was
    /// not held.
    pub fn release(&mut self, output: ReservedOutput) -> Result<(), LedgerError> {
        self.reservations.release(output)
    }
}
