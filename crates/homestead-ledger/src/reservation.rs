//! Output reservations held by running crafting jobs.
//!
//! When a job starts, the space its output will occupy is promised up
//! front: either in the output's own stockpile slot (`normal`) or in the
//! shared overflow cellar. The [`ReservationLedger`] sums those promises so
//! that two jobs can never be promised the same free space.
//!
//! Every reservation is released exactly once: on delivery or on
//! cancellation. The ledger is derived state; after loading a snapshot it
//! is rebuilt from the job processors via [`ReservationLedger::rebuild`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::{Destination, Resource, ReservedOutput};

use crate::LedgerError;

/// Sum of outstanding output reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationLedger {
    outputs: BTreeMap<Resource, Decimal>,
    cellar_slots: Decimal,
}

impl ReservationLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            outputs: BTreeMap::new(),
            cellar_slots: Decimal::ZERO,
        }
    }

    /// Normal-destination quantity promised for `resource`.
    pub fn reserved(&self, resource: Resource) -> Decimal {
        self.outputs
            .get(&resource)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Cellar slots promised.
    pub const fn cellar_slots(&self) -> Decimal {
        self.cellar_slots
    }

    /// Normal-destination reservations by resource.
    pub const fn outputs(&self) -> &BTreeMap<Resource, Decimal> {
        &self.outputs
    }

    /// Record a reservation.
    pub fn hold(&mut self, output: ReservedOutput) {
        let (destination, resource, quantity) = output;
        match destination {
            Destination::Normal => {
                let entry = self.outputs.entry(resource).or_insert(Decimal::ZERO);
                *entry = entry.saturating_add(quantity);
            }
            Destination::Cellar => {
                self.cellar_slots = self.cellar_slots.saturating_add(quantity);
            }
        }
    }

    /// Release a reservation previously recorded with [`hold`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservationUnderflow`] if less than `quantity`
    /// was held. The held amount is still released down to zero so the
    /// ledger never goes negative.
    ///
    /// [`hold`]: ReservationLedger::hold
    pub fn release(&mut self, output: ReservedOutput) -> Result<(), LedgerError> {
        let (destination, resource, quantity) = output;
        let held = match destination {
            Destination::Normal => self.reserved(resource),
            Destination::Cellar => self.cellar_slots,
        };
        let remaining = held.saturating_sub(quantity).max(Decimal::ZERO);
        match destination {
            Destination::Normal => {
                if remaining > Decimal::ZERO {
                    self.outputs.insert(resource, remaining);
                } else {
                    self.outputs.remove(&resource);
                }
            }
            Destination::Cellar => self.cellar_slots = remaining,
        }
        if held < quantity {
            return Err(LedgerError::ReservationUnderflow {
                destination,
                resource,
                requested: quantity,
                held,
            });
        }
        Ok(())
    }

    /// Discard everything and re-sum from the given job reservations.
    pub fn rebuild<'a>(&mut self, held: impl IntoIterator<Item = &'a ReservedOutput>) {
        self.outputs.clear();
        self.cellar_slots = Decimal::ZERO;
        for output in held {
            self.hold(*output);
        }
    }
}
