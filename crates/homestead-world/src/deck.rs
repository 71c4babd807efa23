//! The rangers' exploration deck.
//!
//! Rangers explore by drawing cards from a finite deck. Every drawn card
//! other than the filler `nothing` is replaced by a `nothing`, so the deck
//! never shrinks and real discoveries get rarer over time.
//!
//! | Deck | Cards |
//! |------|-------|
//! | Initial | forest x5, clearing x3, spring x2, quarry, mine, wolf den |
//! | Milestone | quarry or mine (50/50), mana site, kobold village, forest x3, clearing x2, spring x2 |
//!
//! The initial deck is built on the first draw. The milestone cards are
//! added once, the first time population reaches the milestone, and the
//! whole deck is reshuffled.
//!
//! Draws are paid for with [`DrawCredit`]: each ranger accrues
//! `1 / ranger_draw_ticks` of a draw per tick.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestead_types::SiteCard;

use crate::WorldError;

// ---------------------------------------------------------------------------
// Deck contents
// ---------------------------------------------------------------------------

/// Cards in a freshly seeded deck, unshuffled.
pub fn initial_cards() -> Vec<SiteCard> {
    let mut cards = Vec::with_capacity(13);
    cards.extend([SiteCard::Forest; 5]);
    cards.extend([SiteCard::Clearing; 3]);
    cards.extend([SiteCard::Spring; 2]);
    cards.extend([SiteCard::Quarry, SiteCard::Mine, SiteCard::WolfDen]);
    cards
}

/// Cards added at the population milestone, unshuffled. The first card is
/// a quarry or a mine with equal odds.
pub fn milestone_cards(rng: &mut impl Rng) -> Vec<SiteCard> {
    let site = if rng.random_bool(0.5) {
        SiteCard::Quarry
    } else {
        SiteCard::Mine
    };
    let mut cards = Vec::with_capacity(10);
    cards.extend([site, SiteCard::ManaSite, SiteCard::KoboldVillage]);
    cards.extend([SiteCard::Forest; 3]);
    cards.extend([SiteCard::Clearing; 2]);
    cards.extend([SiteCard::Spring; 2]);
    cards
}

/// The chronicle line announcing a drawn card.
pub const fn discovery_line(card: SiteCard) -> &'static str {
    match card {
        SiteCard::Nothing => "rangers range far but find nothing new.",
        SiteCard::Forest => "rangers chart a dense forest.",
        SiteCard::Clearing => "rangers find a quiet clearing.",
        SiteCard::Spring => "rangers mark a fresh spring.",
        SiteCard::Quarry => "rangers discover a stone outcrop fit for a quarry.",
        SiteCard::Mine => "rangers locate a vein of ore worth mining.",
        SiteCard::WolfDen => "rangers report a wolf den nearby, could be trouble if left alone.",
        SiteCard::ManaSite => "rangers map a faint ley line and crystal outcrop.",
        SiteCard::KoboldVillage => "rangers spot a wary kobold village watching from afar.",
        SiteCard::Grove => "rangers map a sacred grove.",
        SiteCard::Ruin => "rangers spot old ruins worth exploring.",
    }
}

// ---------------------------------------------------------------------------
// SiteDeck
// ---------------------------------------------------------------------------

/// The exploration deck and its one-shot build flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDeck {
    cards: Vec<SiteCard>,
    seeded: bool,
    augmented: bool,
}

impl SiteDeck {
    /// An empty, unseeded deck.
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            seeded: false,
            augmented: false,
        }
    }

    /// Restore a deck from stored state.
    pub const fn from_parts(cards: Vec<SiteCard>, seeded: bool, augmented: bool) -> Self {
        Self {
            cards,
            seeded,
            augmented,
        }
    }

    /// Remaining cards, in deck order.
    pub fn cards(&self) -> &[SiteCard] {
        &self.cards
    }

    /// Whether the initial deck has been built.
    pub const fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Whether the milestone cards have been added.
    pub const fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Add the milestone cards once population reaches `milestone`, and
    /// seed the initial deck if it is empty and was never seeded.
    pub fn ensure(&mut self, population: u64, milestone: u64, rng: &mut impl Rng) {
        if population >= milestone && !self.augmented {
            let mut extra = milestone_cards(rng);
            extra.shuffle(rng);
            self.cards.extend(extra);
            self.cards.shuffle(rng);
            self.augmented = true;
            tracing::info!(cards = self.cards.len(), "exploration deck augmented");
        }
        if self.cards.is_empty() && !self.seeded {
            let mut cards = initial_cards();
            cards.shuffle(rng);
            self.cards = cards;
            self.seeded = true;
            tracing::debug!(cards = self.cards.len(), "exploration deck seeded");
        }
    }

    /// Draw one card uniformly at random. A drawn card other than
    /// `nothing` is replaced by a `nothing`. Returns `None` only when the
    /// deck is empty after [`ensure`](SiteDeck::ensure).
    pub fn draw(&mut self, population: u64, milestone: u64, rng: &mut impl Rng) -> Option<SiteCard> {
        self.ensure(population, milestone, rng);
        if self.cards.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.cards.len());
        let card = self.cards.remove(index);
        if card != SiteCard::Nothing {
            self.cards.push(SiteCard::Nothing);
        }
        Some(card)
    }
}

// ---------------------------------------------------------------------------
// DrawCredit
// ---------------------------------------------------------------------------

/// Fractional draw credit accumulated by rangers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCredit {
    pool: Decimal,
    ticks_per_draw: u64,
}

impl DrawCredit {
    /// Start with an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDrawPeriod`] if `ticks_per_draw` is 0.
    pub fn new(ticks_per_draw: u64) -> Result<Self, WorldError> {
        Self::from_pool(ticks_per_draw, Decimal::ZERO)
    }

    /// Restore a pool from stored state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDrawPeriod`] if `ticks_per_draw` is 0.
    pub fn from_pool(ticks_per_draw: u64, pool: Decimal) -> Result<Self, WorldError> {
        if ticks_per_draw == 0 {
            return Err(WorldError::InvalidDrawPeriod(ticks_per_draw));
        }
        Ok(Self {
            pool: pool.max(Decimal::ZERO),
            ticks_per_draw,
        })
    }

    /// The current fractional credit.
    pub const fn pool(&self) -> Decimal {
        self.pool
    }

    /// Accrue one tick of credit for `rangers` and return how many whole
    /// draws are now due. The paid draws are removed from the pool.
    pub fn accrue(&mut self, rangers: u64) -> u64 {
        if rangers == 0 {
            return 0;
        }
        let share = Decimal::from(rangers)
            .checked_div(Decimal::from(self.ticks_per_draw))
            .unwrap_or(Decimal::ZERO);
        self.pool = self.pool.saturating_add(share);
        let mut draws: u64 = 0;
        while self.pool >= Decimal::ONE {
            self.pool = self.pool.saturating_sub(Decimal::ONE);
            draws = draws.saturating_add(1);
        }
        draws
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn count(cards: &[SiteCard], card: SiteCard) -> usize {
        cards.iter().filter(|c| **c == card).count()
    }

    #[test]
    fn initial_deck_contents() {
        let cards = initial_cards();
        assert_eq!(cards.len(), 13);
        assert_eq!(count(&cards, SiteCard::Forest), 5);
        assert_eq!(count(&cards, SiteCard::Clearing), 3);
        assert_eq!(count(&cards, SiteCard::Spring), 2);
        assert_eq!(count(&cards, SiteCard::Quarry), 1);
        assert_eq!(count(&cards, SiteCard::Mine), 1);
        assert_eq!(count(&cards, SiteCard::WolfDen), 1);
    }

    #[test]
    fn milestone_deck_has_one_site() {
        let mut rng = SmallRng::seed_from_u64(7);
        let cards = milestone_cards(&mut rng);
        assert_eq!(cards.len(), 10);
        let sites = count(&cards, SiteCard::Quarry) + count(&cards, SiteCard::Mine);
        assert_eq!(sites, 1);
        assert_eq!(count(&cards, SiteCard::ManaSite), 1);
        assert_eq!(count(&cards, SiteCard::KoboldVillage), 1);
    }

    #[test]
    fn first_draw_seeds_and_replaces_with_filler() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut deck = SiteDeck::new();
        let card = deck.draw(5, 60, &mut rng).unwrap();
        assert!(deck.is_seeded());
        assert!(!deck.is_augmented());
        assert_ne!(card, SiteCard::Nothing);
        assert_eq!(deck.cards().len(), 13);
        assert_eq!(count(deck.cards(), SiteCard::Nothing), 1);
    }

    #[test]
    fn deck_drains_into_filler() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut deck = SiteDeck::new();
        let mut found = Vec::new();
        for _ in 0..200 {
            found.push(deck.draw(1, 60, &mut rng).unwrap());
        }
        assert_eq!(deck.cards().len(), 13);
        assert!(deck.cards().iter().all(|c| *c == SiteCard::Nothing));
        assert_eq!(count(&found, SiteCard::Quarry), 1);
        assert_eq!(count(&found, SiteCard::Mine), 1);
    }

    #[test]
    fn milestone_augments_once() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut deck = SiteDeck::new();
        deck.ensure(60, 60, &mut rng);
        assert!(deck.is_augmented());
        // Augmenting filled the deck, so the initial cards are not added.
        assert!(!deck.is_seeded());
        assert_eq!(deck.cards().len(), 10);
        deck.ensure(90, 60, &mut rng);
        assert_eq!(deck.cards().len(), 10);
    }

    #[test]
    fn credit_pays_whole_draws() {
        let mut credit = DrawCredit::new(10).unwrap();
        assert_eq!(credit.accrue(3), 0);
        assert_eq!(credit.accrue(3), 0);
        assert_eq!(credit.accrue(3), 0);
        assert_eq!(credit.accrue(3), 1);
        assert_eq!(credit.pool(), dec!(0.2));
        assert_eq!(credit.accrue(25), 2);
        assert_eq!(credit.pool(), dec!(0.7));
    }

    #[test]
    fn zero_draw_period_is_rejected() {
        assert_eq!(DrawCredit::new(0), Err(WorldError::InvalidDrawPeriod(0)));
    }
}
