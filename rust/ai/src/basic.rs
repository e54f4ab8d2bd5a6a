//! Basic strategy for four decks, dealer standing on soft 17, late
//! surrender allowed.
//!
//! The chart is consulted in order: surrender, split, double, then the
//! hit/stand table. Anything the table rules out (double after a hit,
//! split with a short bankroll) falls back to the next best legal move.

use blackjack_engine::cards::{Card, Rank};
use blackjack_engine::game::RoundSnapshot;
use blackjack_engine::player::PlayerAction;

use crate::{legal_or, Strategy};

#[derive(Debug, Clone, Default)]
pub struct BasicStrategy;

impl BasicStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Chart decision for a hand against the dealer's up card, ignoring
/// whether the move is currently legal.
pub fn chart_move(cards: &[Card], total: u8, soft: bool, up: Card) -> PlayerAction {
    let dealer = up.base_value();

    if !soft && cards.len() == 2 && ((total == 16 && dealer >= 9) || (total == 15 && dealer == 10)) {
        return PlayerAction::Surrender;
    }

    if let [a, b] = cards {
        if a.rank == b.rank && should_split(a.rank, dealer) {
            return PlayerAction::Split;
        }
    }

    if cards.len() == 2 && should_double(total, soft, dealer) {
        return PlayerAction::Double;
    }

    hit_or_stand(total, soft, dealer)
}

fn hit_or_stand(total: u8, soft: bool, dealer: u8) -> PlayerAction {
    if soft {
        match total {
            19.. => PlayerAction::Stand,
            18 if dealer >= 9 => PlayerAction::Hit,
            18 => PlayerAction::Stand,
            _ => PlayerAction::Hit,
        }
    } else {
        match total {
            17.. => PlayerAction::Stand,
            13..=16 if (2..=6).contains(&dealer) => PlayerAction::Stand,
            12 if (4..=6).contains(&dealer) => PlayerAction::Stand,
            _ => PlayerAction::Hit,
        }
    }
}

fn should_split(rank: Rank, dealer: u8) -> bool {
    match rank {
        Rank::Ace | Rank::Eight => true,
        Rank::Nine => !matches!(dealer, 7 | 10 | 11),
        Rank::Two | Rank::Three | Rank::Six | Rank::Seven => (2..=7).contains(&dealer),
        _ => false,
    }
}

fn should_double(total: u8, soft: bool, dealer: u8) -> bool {
    if soft {
        match total {
            19 => dealer == 6,
            18 => (2..=6).contains(&dealer),
            17 => (3..=6).contains(&dealer),
            15 | 16 => (4..=6).contains(&dealer),
            13 | 14 => (5..=6).contains(&dealer),
            _ => false,
        }
    } else {
        match total {
            11 => true,
            10 => dealer <= 9,
            9 => (3..=6).contains(&dealer),
            _ => false,
        }
    }
}

impl Strategy for BasicStrategy {
    fn decide(&mut self, snapshot: &RoundSnapshot) -> PlayerAction {
        let (Some(hand), Some(up)) = (snapshot.current_hand(), snapshot.dealer.up_card) else {
            return PlayerAction::Stand;
        };
        let plain = hit_or_stand(hand.value, hand.soft, up.base_value());
        // a move the table does not allow right now is played as the plain total
        let wanted = chart_move(&hand.cards, hand.value, hand.soft, up);
        legal_or(snapshot, wanted, &[plain])
    }

    fn name(&self) -> &str {
        "BasicStrategy"
    }
}
