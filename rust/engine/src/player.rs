use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{self, BLACKJACK};

/// A decision the player can make on the hand currently in play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    /// Take one more card
    Hit,
    /// Keep the current total
    Stand,
    /// Double the bet and take exactly one card
    Double,
    /// Split a pair into two hands
    Split,
    /// Give up the hand for half the bet back
    Surrender,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Hit => "hit",
            PlayerAction::Stand => "stand",
            PlayerAction::Double => "double",
            PlayerAction::Split => "split",
            PlayerAction::Surrender => "surrender",
        }
    }
}

/// Lifecycle of a player hand.
///
/// `Playing` and `Split` accept actions; every other status is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandStatus {
    Playing,
    /// Created by, or the parent of, a split and still accepting actions
    Split,
    Blackjack,
    Stood,
    Busted,
    Doubled,
    Surrendered,
}

impl HandStatus {
    pub fn is_active(self) -> bool {
        matches!(self, HandStatus::Playing | HandStatus::Split)
    }

    /// The transition table. Terminal statuses have no way out.
    pub fn can_transition_to(self, next: HandStatus) -> bool {
        use HandStatus::*;
        match self {
            Playing => matches!(
                next,
                Split | Blackjack | Stood | Busted | Doubled | Surrendered
            ),
            Split => matches!(next, Stood | Busted | Doubled | Surrendered),
            Blackjack | Stood | Busted | Doubled | Surrendered => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HandStatus::Playing => "playing",
            HandStatus::Split => "split",
            HandStatus::Blackjack => "blackjack",
            HandStatus::Stood => "stood",
            HandStatus::Busted => "busted",
            HandStatus::Doubled => "doubled",
            HandStatus::Surrendered => "surrendered",
        }
    }
}

impl fmt::Display for HandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One seat's hand for the current round: its cards, the chips riding on
/// it, and where it is in its lifecycle.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerHand {
    cards: Vec<Card>,
    bet: u64,
    status: HandStatus,
}

impl PlayerHand {
    pub fn new(bet: u64) -> Self {
        Self {
            cards: Vec::with_capacity(4),
            bet,
            status: HandStatus::Playing,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn bet(&self) -> u64 {
        self.bet
    }
    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn value(&self) -> u8 {
        hand::hand_value(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        hand::is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        hand::is_bust(&self.cards)
    }

    /// Active status and still below 21.
    pub fn awaits_action(&self) -> bool {
        self.status.is_active() && self.value() < BLACKJACK
    }

    pub(crate) fn give_card(&mut self, c: Card) {
        self.cards.push(c);
    }

    pub(crate) fn transition(&mut self, next: HandStatus) -> Result<(), GameError> {
        if !self.status.can_transition_to(next) {
            return Err(GameError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    pub(crate) fn double_bet(&mut self) {
        self.bet = self.bet.saturating_mul(2);
    }

    /// Moves the second card into a new `Split` hand carrying the same bet.
    /// The parent becomes `Split` if it was `Playing`.
    pub(crate) fn split_off(&mut self) -> Result<PlayerHand, GameError> {
        if self.status == HandStatus::Playing {
            self.transition(HandStatus::Split)?;
        }
        let moved = self
            .cards
            .pop()
            .ok_or(crate::errors::ActionError::NeedTwoCards)?;
        Ok(PlayerHand {
            cards: vec![moved],
            bet: self.bet,
            status: HandStatus::Split,
        })
    }
}
