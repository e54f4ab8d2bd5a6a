use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Number of 52-card decks combined into one shoe.
pub const DECKS_PER_SHOE: usize = 4;
/// Cards in a freshly built shoe.
pub const SHOE_SIZE: usize = 52 * DECKS_PER_SHOE;
/// A shoe holding fewer cards than this is rebuilt before the next round.
pub const REFILL_THRESHOLD: usize = 52;

/// Uniform in-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each position with a
/// uniformly chosen index in `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Four concatenated decks, shuffled.
pub fn build_shoe<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let deck = full_deck();
    let mut cards = Vec::with_capacity(SHOE_SIZE);
    for _ in 0..DECKS_PER_SHOE {
        cards.extend_from_slice(&deck);
    }
    fisher_yates(&mut cards, rng);
    cards
}

/// The multi-deck shoe cards are drawn from. Drawing pops from the end.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
    refill_threshold: usize,
    builds: u32,
}

impl Shoe {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let cards = build_shoe(&mut rng);
        Self {
            cards,
            rng,
            refill_threshold: REFILL_THRESHOLD,
            builds: 1,
        }
    }

    /// A shoe that deals `order` front to back. Stacked shoes are never
    /// refilled between rounds; `seed` only drives a rebuild after exhaustion.
    pub fn stacked(order: Vec<Card>, seed: u64) -> Self {
        let mut cards = order;
        cards.reverse();
        Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
            refill_threshold: 0,
            builds: 0,
        }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyShoe)
    }

    /// Draws the top card, rebuilding a fresh shoe first when it ran dry.
    pub fn deal(&mut self) -> Card {
        match self.draw() {
            Ok(card) => card,
            Err(_) => {
                warn!(builds = self.builds, "shoe exhausted mid-round, rebuilding");
                self.rebuild();
                self.deal()
            }
        }
    }

    pub fn needs_refill(&self) -> bool {
        self.cards.len() < self.refill_threshold
    }

    /// Replaces the contents with a new shuffled 208-card shoe.
    pub fn rebuild(&mut self) {
        self.cards = build_shoe(&mut self.rng);
        self.builds += 1;
        info!(builds = self.builds, "shoe rebuilt");
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of shuffles this shoe has gone through.
    pub fn builds(&self) -> u32 {
        self.builds
    }

    /// Cards in draw order, next card first.
    pub fn peek_order(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }
}
