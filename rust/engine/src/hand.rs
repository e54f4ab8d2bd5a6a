//! Blackjack hand evaluation.
//!
//! Every function here is pure: it looks at an ordered slice of cards and
//! never touches round state.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The best total a hand can reach without busting.
pub const BLACKJACK: u8 = 21;

/// Total and softness of a hand after ace demotion.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u8,
    /// At least one ace is still counted as 11.
    pub soft: bool,
}

pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u32 = 0;
    let mut aces_high = 0u32;
    for c in cards {
        if c.is_ace() {
            aces_high += 1;
        }
        total += u32::from(c.base_value());
    }
    // demote aces from 11 to 1 until the hand fits
    while total > u32::from(BLACKJACK) && aces_high > 0 {
        total -= 10;
        aces_high -= 1;
    }
    HandValue {
        total: u8::try_from(total).unwrap_or(u8::MAX),
        soft: aces_high > 0,
    }
}

/// Best blackjack value of `cards`.
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).total
}

pub fn is_soft(cards: &[Card]) -> bool {
    evaluate(cards).soft
}

/// A natural: exactly two cards totalling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > BLACKJACK
}

/// Exactly two cards of the same rank. `10` and `K` are not a pair.
pub fn is_pair(cards: &[Card]) -> bool {
    matches!(cards, [a, b] if a.rank == b.rank)
}
