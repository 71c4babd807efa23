//! Resource stockpile, storage capacity and output reservations for the
//! Homestead simulation.
//!
//! Every unit of every good the settlement owns is held in this crate. The
//! engine drives it; this crate only enforces the bookkeeping rules.
//!
//! # Architecture
//!
//! - [`stockpile`] -- The [`Stockpile`]: one non-negative quantity per resource.
//! - [`capacity`] -- The cap table, [`CapacitySource`] and the per-tick clamp.
//! - [`cellar`] -- The shared overflow [`Cellar`].
//! - [`reservation`] -- The [`ReservationLedger`] of space promised to running jobs.
//! - [`storehouse`] -- The [`Storehouse`] keeping all three in step.
//! - [`audit`] -- Invariant verification run after every tick.
//!
//! # Reservation rule
//!
//! For every resource R, whenever a reservation is created:
//!
//! ```text
//! stock(R) + reserved(R) <= cap(R)
//! ```
//!
//! Output that does not fit its normal slot spills into the cellar; output
//! that fits nowhere is never promised. The ledger never panics; it returns
//! errors.
//!
//! # Usage
//!
//! ```
//! use homestead_ledger::{CapacitySource, Storehouse};
//! use homestead_types::{Building, Destination, Resource, Role};
//! use rust_decimal::Decimal;
//!
//! struct OneWeaver;
//!
//! impl CapacitySource for OneWeaver {
//!     fn building_count(&self, _building: Building) -> u64 {
//!         0
//!     }
//!     fn role_count(&self, role: Role) -> u64 {
//!         u64::from(role == Role::Weaver)
//!     }
//! }
//!
//! let mut store = Storehouse::default();
//! store.stockpile.add(Resource::Flax, Decimal::ONE);
//!
//! // Start a weaving job: debit the flax and promise room for the linen.
//! store.debit_inputs(&[(Resource::Flax, Decimal::ONE)]).ok();
//! let output = store.reserve_output(Resource::Linen, Decimal::ONE, &OneWeaver);
//! assert_eq!(output, Some((Destination::Normal, Resource::Linen, Decimal::ONE)));
//!
//! // Finish it.
//! if let Some(output) = output {
//!     store.deliver(output).ok();
//! }
//! assert_eq!(store.stockpile.get(Resource::Linen), Decimal::ONE);
//! ```

pub mod audit;
pub mod capacity;
pub mod cellar;
pub mod reservation;
pub mod stockpile;
pub mod storehouse;

// Re-export primary types at crate root.
pub use audit::{AuditResult, Violation, audit};
pub use capacity::{CapacitySource, apply_caps, capacity_of, has_room};
pub use cellar::Cellar;
pub use reservation::ReservationLedger;
pub use stockpile::Stockpile;
pub use storehouse::Storehouse;

use rust_decimal::Decimal;

use homestead_types::{Destination, Resource};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving goods through the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A debit asked for more than the stockpile holds.
    #[error("insufficient {resource}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The resource being debited.
        resource: Resource,
        /// Quantity requested.
        requested: Decimal,
        /// Quantity held.
        available: Decimal,
    },

    /// A reservation was released that was not (fully) held.
    #[error(
        "released {requested} {resource} from {destination:?} reservations, only {held} held"
    )]
    ReservationUnderflow {
        /// Where the reservation pointed.
        destination: Destination,
        /// The reserved resource.
        resource: Resource,
        /// Quantity released.
        requested: Decimal,
        /// Quantity actually held.
        held: Decimal,
    },
}
