//! Type-safe handles for engine-owned arenas.
//!
//! Job processors live in per-role arenas keyed by a [`JobSlotId`]. Handles
//! are allocated from a monotonically increasing counter, so the newest slot
//! always has the largest id. Removing "the newest slot" is then simply
//! removing the last key.

use serde::{Deserialize, Serialize};

/// Generates a newtype handle around a `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw counter value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner counter value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// The handle allocated after this one.
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id! {
    /// Handle of one job processor slot inside a role's arena.
    JobSlotId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_strictly_greater() {
        let a = JobSlotId::new(7);
        assert!(a.next() > a);
        assert_eq!(a.next().into_inner(), 8);
    }

    #[test]
    fn next_saturates() {
        let max = JobSlotId::new(u64::MAX);
        assert_eq!(max.next(), max);
    }

    #[test]
    fn display_shows_raw_value() {
        assert_eq!(JobSlotId::from(42).to_string(), "42");
    }
}
