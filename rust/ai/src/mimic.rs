//! Plays every hand the way the dealer plays theirs.

use blackjack_engine::game::RoundSnapshot;
use blackjack_engine::player::PlayerAction;
use blackjack_engine::rules::DEALER_STANDS_ON;

use crate::{legal_or, Strategy};

/// Hits below 17, stands otherwise. Never doubles, splits or surrenders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimicDealer;

impl Strategy for MimicDealer {
    fn decide(&mut self, snapshot: &RoundSnapshot) -> PlayerAction {
        match snapshot.current_hand() {
            Some(h) if h.value < DEALER_STANDS_ON => legal_or(snapshot, PlayerAction::Hit, &[]),
            _ => PlayerAction::Stand,
        }
    }

    fn name(&self) -> &str {
        "Mimic"
    }
}
