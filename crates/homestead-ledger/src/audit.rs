//! Storage invariant verification.
//!
//! The engine clamps and caps the stockpile every tick, so these checks
//! pass by construction for a well-formed storehouse. They exist to catch
//! bookkeeping bugs: the engine runs [`audit`] after every tick and reports
//! anything it finds through `tracing::warn!`.
//!
//! Checked invariants:
//!
//! ```text
//! 0 <= stock(R)                                  for every R
//! stock(R) <= cap(R)                             for every capped R
//! reserved(R) == sum(normal job outputs of R)    for every R
//! reserved_cellar == sum(cellar job outputs)
//! reserved(R) <= cap(R) - stock(R)               for every capped R
//! cellar_used <= cellar_capacity
//! ```

use rust_decimal::Decimal;

use homestead_types::{Resource, ReservedOutput};

use crate::capacity::{CapacitySource, capacity_of};
use crate::{ReservationLedger, Storehouse};

/// A single broken storage invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A stockpile quantity is below zero.
    Negative {
        /// The offending resource.
        resource: Resource,
        /// Its quantity.
        quantity: Decimal,
    },
    /// A stockpile quantity exceeds its cap.
    OverCap {
        /// The offending resource.
        resource: Resource,
        /// Its quantity.
        quantity: Decimal,
        /// The cap it exceeds.
        cap: Decimal,
    },
    /// The reservation ledger disagrees with the jobs' own reservations.
    ReservationDrift {
        /// What the ledger holds.
        ledger: ReservationLedger,
        /// What the jobs hold.
        expected: ReservationLedger,
    },
    /// Normal reservations promise more room than the slot has left.
    OverReserved {
        /// The offending resource.
        resource: Resource,
        /// Quantity promised.
        reserved: Decimal,
        /// Room left under the cap.
        room: Decimal,
    },
    /// The cellar holds more than its capacity.
    CellarOverflow {
        /// Slots in use.
        used: Decimal,
        /// Slot capacity.
        capacity: Decimal,
    },
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Negative { resource, quantity } => {
                write!(f, "{resource} is negative ({quantity})")
            }
            Self::OverCap {
                resource,
                quantity,
                cap,
            } => write!(f, "{resource} at {quantity} exceeds cap {cap}"),
            Self::ReservationDrift { ledger, expected } => write!(
                f,
                "reservation ledger drifted: {} normal / {} cellar held, {} / {} expected",
                ledger.outputs().len(),
                ledger.cellar_slots(),
                expected.outputs().len(),
                expected.cellar_slots()
            ),
            Self::OverReserved {
                resource,
                reserved,
                room,
            } => write!(f, "{resource} has {reserved} reserved but only {room} room"),
            Self::CellarOverflow { used, capacity } => {
                write!(f, "cellar holds {used} in {capacity} slots")
            }
        }
    }
}

/// The result of an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditResult {
    /// Every invariant holds.
    Clean,
    /// One or more invariants are broken.
    Violations(Vec<Violation>),
}

impl AuditResult {
    /// Whether every invariant holds.
    pub const fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// Verify the storage invariants of `store` against the reservations the
/// jobs actually hold.
pub fn audit<'a>(
    store: &Storehouse,
    job_outputs: impl IntoIterator<Item = &'a ReservedOutput>,
    src: &impl CapacitySource,
) -> AuditResult {
    let mut violations = Vec::new();

    for (resource, quantity) in store.stockpile.iter() {
        if quantity < Decimal::ZERO {
            violations.push(Violation::Negative { resource, quantity });
        }
        let Some(cap) = capacity_of(resource, src) else {
            continue;
        };
        if quantity > cap {
            violations.push(Violation::OverCap {
                resource,
                quantity,
                cap,
            });
        }
        let reserved = store.reservations.reserved(resource);
        let room = cap.saturating_sub(quantity);
        if reserved > room {
            violations.push(Violation::OverReserved {
                resource,
                reserved,
                room,
            });
        }
    }

    let mut expected = ReservationLedger::new();
    expected.rebuild(job_outputs);
    if expected != store.reservations {
        violations.push(Violation::ReservationDrift {
            ledger: store.reservations.clone(),
            expected,
        });
    }

    let used = store.cellar.used();
    if used > store.cellar.capacity() {
        violations.push(Violation::CellarOverflow {
            used,
            capacity: store.cellar.capacity(),
        });
    }

    if violations.is_empty() {
        AuditResult::Clean
    } else {
        AuditResult::Violations(violations)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use homestead_types::{Building, Destination, Role};

    use super::*;
    use crate::capacity::tests::Counts;

    #[test]
    fn empty_storehouse_is_clean() {
        let store = Storehouse::default();
        assert!(audit(&store, std::iter::empty(), &Counts::default()).is_clean());
    }

    #[test]
    fn over_cap_is_reported() {
        let mut store = Storehouse::default();
        store.stockpile.add(Resource::Meat, dec!(31));
        let result = audit(&store, std::iter::empty(), &Counts::default());
        assert_eq!(
            result,
            AuditResult::Violations(vec![Violation::OverCap {
                resource: Resource::Meat,
                quantity: dec!(31),
                cap: dec!(30),
            }])
        );
    }

    #[test]
    fn drift_between_ledger_and_jobs_is_reported() {
        let counts = Counts::default().with_role(Role::Weaver, 1);
        let mut store = Storehouse::default();
        store
            .reservations
            .hold((Destination::Normal, Resource::Linen, dec!(1)));
        let result = audit(&store, std::iter::empty(), &counts);
        assert!(matches!(
            result,
            AuditResult::Violations(ref v) if matches!(v.first(), Some(Violation::ReservationDrift { .. }))
        ));

        let held = [(Destination::Normal, Resource::Linen, dec!(1))];
        assert!(audit(&store, &held, &counts).is_clean());
    }

    #[test]
    fn over_reserved_is_reported() {
        let counts = Counts::default().with_building(Building::Smithy, 1);
        let mut store = Storehouse::default();
        store.stockpile.add(Resource::Swords, dec!(5));
        let held = [(Destination::Normal, Resource::Swords, dec!(1))];
        store.reservations.rebuild(&held);
        let result = audit(&store, &held, &counts);
        assert_eq!(
            result,
            AuditResult::Violations(vec![Violation::OverReserved {
                resource: Resource::Swords,
                reserved: dec!(1),
                room: Decimal::ZERO,
            }])
        );
    }

    #[test]
    fn violation_display_names_resource() {
        let v = Violation::Negative {
            resource: Resource::Pelts,
            quantity: dec!(-1),
        };
        assert!(v.to_string().contains("Pelts"));
    }
}
