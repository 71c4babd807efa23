//! The four-phase annual cycle and seasonal farming.
//!
//! The cycle is the single source of truth for the settlement's calendar.
//! It advances once per tick and derives the phase from the tick counter:
//!
//! ```text
//! phase = (tick / ticks_per_season) mod 4
//! ```
//!
//! Farming runs on the calendar rather than on a per-plot timer:
//!
//! - **Autumn entry** resets the grain buffer and locks the number of farms
//!   that will grow this year (`farm_growth_slots`).
//! - **Autumn, winter and spring** add to the grain buffer each tick.
//! - **Summer entry** flushes the buffer into a [`Harvest`], plus flax per
//!   growth slot once flax farming is known.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::Season;

use crate::WorldError;

/// Crops brought in on entering summer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harvest {
    /// Grain flushed from the buffer.
    pub grain: Decimal,
    /// Flax from the locked-in growth slots (zero until flax is known).
    pub flax: Decimal,
}

/// What happened during one call to [`SeasonCycle::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonStep {
    /// The season after advancing.
    pub season: Season,
    /// Whether the phase changed (or this was the first tick).
    pub changed: bool,
    /// The summer harvest, when one was brought in this tick.
    pub harvest: Option<Harvest>,
}

/// Calendar and farming state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCycle {
    tick: u64,
    phase: Season,
    ticks_per_season: u64,
    grain_buffer: Decimal,
    farm_growth_slots: u64,
}

impl SeasonCycle {
    /// Create a cycle at tick 0 in spring.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSeasonLength`] if `ticks_per_season` is 0.
    pub fn new(ticks_per_season: u64) -> Result<Self, WorldError> {
        Self::from_parts(ticks_per_season, 0, Season::Spring, Decimal::ZERO, 0)
    }

    /// Restore a cycle from stored state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidSeasonLength`] if `ticks_per_season` is 0.
    pub fn from_parts(
        ticks_per_season: u64,
        tick: u64,
        phase: Season,
        grain_buffer: Decimal,
        farm_growth_slots: u64,
    ) -> Result<Self, WorldError> {
        if ticks_per_season == 0 {
            return Err(WorldError::InvalidSeasonLength(ticks_per_season));
        }
        Ok(Self {
            tick,
            phase,
            ticks_per_season,
            grain_buffer: grain_buffer.max(Decimal::ZERO),
            farm_growth_slots,
        })
    }

    /// Ticks elapsed.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The current season.
    pub const fn season(&self) -> Season {
        self.phase
    }

    /// The icon of the current season.
    pub const fn icon(&self) -> &'static str {
        self.phase.icon()
    }

    /// Grain growing toward the next harvest.
    pub const fn grain_buffer(&self) -> Decimal {
        self.grain_buffer
    }

    /// Farms locked in for this year's growth.
    pub const fn farm_growth_slots(&self) -> u64 {
        self.farm_growth_slots
    }

    /// Advance one tick.
    ///
    /// `farms` is the current farm count (locked in on entering autumn).
    /// `flax_per_slot` is the flax yield per growth slot, or `None` while
    /// flax farming is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(
        &mut self,
        farms: u64,
        flax_per_slot: Option<Decimal>,
    ) -> Result<SeasonStep, WorldError> {
        let previous = self.phase;
        self.tick = self.tick.checked_add(1).ok_or(WorldError::TickOverflow)?;
        let raw = self.tick.checked_div(self.ticks_per_season).unwrap_or(0);
        let phase = Season::from_phase(raw);

        let changed = self.tick == 1 || phase != previous;
        let mut harvest = None;
        if changed {
            self.phase = phase;
            match phase {
                Season::Autumn => {
                    self.grain_buffer = Decimal::ZERO;
                    self.farm_growth_slots = farms;
                }
                Season::Summer if self.grain_buffer > Decimal::ZERO => {
                    let flax = flax_per_slot.map_or(Decimal::ZERO, |per| {
                        per.saturating_mul(Decimal::from(self.farm_growth_slots))
                    });
                    harvest = Some(Harvest {
                        grain: self.grain_buffer,
                        flax,
                    });
                    self.grain_buffer = Decimal::ZERO;
                }
                _ => {}
            }
        }

        Ok(SeasonStep {
            season: phase,
            changed,
            harvest,
        })
    }

    /// Grow the grain buffer for one tick, if the season allows it.
    ///
    /// Only `min(farms, farm_growth_slots)` farms contribute. Returns the
    /// amount added.
    pub fn grow(&mut self, farms: u64, per_farm: Decimal, multiplier: Decimal) -> Decimal {
        if !self.phase.is_growing() {
            return Decimal::ZERO;
        }
        let active = farms.min(self.farm_growth_slots);
        if active == 0 {
            return Decimal::ZERO;
        }
        let gain = Decimal::from(active)
            .saturating_mul(per_farm)
            .saturating_mul(multiplier);
        self.grain_buffer = self.grain_buffer.saturating_add(gain);
        gain
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_length_season_is_rejected() {
        assert_eq!(SeasonCycle::new(0), Err(WorldError::InvalidSeasonLength(0)));
    }

    #[test]
    fn first_tick_reports_change() {
        let mut c = SeasonCycle::new(15).unwrap();
        let step = c.advance(0, None).unwrap();
        assert!(step.changed);
        assert_eq!(step.season, Season::Spring);
        let step = c.advance(0, None).unwrap();
        assert!(!step.changed);
    }

    #[test]
    fn phase_follows_tick_count() {
        let mut c = SeasonCycle::new(15).unwrap();
        for _ in 0..14 {
            c.advance(0, None).unwrap();
        }
        assert_eq!(c.season(), Season::Spring);
        let step = c.advance(0, None).unwrap();
        assert_eq!(c.tick(), 15);
        assert!(step.changed);
        assert_eq!(step.season, Season::Summer);
        assert_eq!(c.icon(), "☀️");
    }

    #[test]
    fn autumn_locks_growth_slots_and_resets_buffer() {
        let mut c = SeasonCycle::from_parts(15, 29, Season::Summer, dec!(4), 0).unwrap();
        let step = c.advance(3, None).unwrap();
        assert_eq!(step.season, Season::Autumn);
        assert_eq!(c.farm_growth_slots(), 3);
        assert_eq!(c.grain_buffer(), Decimal::ZERO);
    }

    #[test]
    fn summer_flushes_buffer_with_flax() {
        let mut c = SeasonCycle::from_parts(15, 14, Season::Spring, dec!(7.2), 2).unwrap();
        let step = c.advance(2, Some(dec!(1.5))).unwrap();
        assert_eq!(
            step.harvest,
            Some(Harvest {
                grain: dec!(7.2),
                flax: dec!(3.0),
            })
        );
        assert_eq!(c.grain_buffer(), Decimal::ZERO);
    }

    #[test]
    fn empty_buffer_brings_no_harvest() {
        let mut c = SeasonCycle::from_parts(15, 14, Season::Spring, Decimal::ZERO, 2).unwrap();
        let step = c.advance(2, Some(dec!(1.5))).unwrap();
        assert!(step.changed);
        assert_eq!(step.harvest, None);
    }

    #[test]
    fn growth_is_limited_to_locked_slots_and_skips_summer() {
        let mut c = SeasonCycle::from_parts(15, 35, Season::Autumn, Decimal::ZERO, 1).unwrap();
        assert_eq!(c.grow(3, dec!(0.6), Decimal::ONE), dec!(0.6));
        assert_eq!(c.grain_buffer(), dec!(0.6));

        let mut summer = SeasonCycle::from_parts(15, 20, Season::Summer, Decimal::ZERO, 1).unwrap();
        assert_eq!(summer.grow(3, dec!(0.6), Decimal::ONE), Decimal::ZERO);
    }
}
