use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{self, evaluate};
use crate::logger::ActionRecord;
use crate::player::{HandStatus, PlayerHand};
use crate::rules::ActionAvailability;
use crate::session::SessionStats;
use crate::settlement::RoundSettlement;

/// Where a round is in its lifecycle.
///
/// `Betting -> Playing -> Dealer -> Finished`, and back to `Playing` when the
/// next round starts.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No round dealt yet
    #[default]
    Betting,
    /// Player hands are taking actions
    Playing,
    /// Dealer is drawing to 17
    Dealer,
    /// Settled; only a new round leaves this phase
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Betting => "betting",
            Phase::Playing => "playing",
            Phase::Dealer => "dealer",
            Phase::Finished => "finished",
        }
    }

    /// The dealer's second card is face down.
    pub fn hides_hole_card(self) -> bool {
        matches!(self, Phase::Betting | Phase::Playing)
    }

    /// A new round may be started from here.
    pub fn accepts_new_round(self) -> bool {
        matches!(self, Phase::Betting | Phase::Finished)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one round: the dealer's cards, the player hands, and which hand
/// is up. Replaced wholesale when the next round starts.
#[derive(Debug, Clone, Default)]
pub struct Round {
    pub(crate) dealer: Vec<Card>,
    pub(crate) hands: Vec<PlayerHand>,
    pub(crate) current: usize,
    pub(crate) phase: Phase,
    /// Everything debited for this round, doubles and splits included.
    pub(crate) stake: u64,
    pub(crate) surrender_refunds: u64,
    pub(crate) actions: Vec<ActionRecord>,
    pub(crate) settlement: Option<RoundSettlement>,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn dealer(&self) -> &[Card] {
        &self.dealer
    }
    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }
    pub fn current_index(&self) -> usize {
        self.current
    }
    pub fn stake(&self) -> u64 {
        self.stake
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn settlement(&self) -> Option<&RoundSettlement> {
        self.settlement.as_ref()
    }

    pub fn current_hand(&self) -> Option<&PlayerHand> {
        self.hands.get(self.current)
    }

    pub(crate) fn current_hand_mut(&mut self) -> Option<&mut PlayerHand> {
        self.hands.get_mut(self.current)
    }

    /// Moves the index forward, never backward, to the first hand that still
    /// takes actions. Returns `false` when every hand is done.
    pub(crate) fn seek_next_hand(&mut self) -> bool {
        while let Some(h) = self.hands.get(self.current) {
            if h.awaits_action() {
                return true;
            }
            self.current += 1;
        }
        false
    }
}

/// A player hand as shown to a front end.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandView {
    pub cards: Vec<Card>,
    pub bet: u64,
    pub status: HandStatus,
    pub value: u8,
    pub soft: bool,
    pub blackjack: bool,
    /// This is the hand actions apply to.
    pub active: bool,
}

impl HandView {
    fn new(hand: &PlayerHand, active: bool) -> Self {
        let v = evaluate(hand.cards());
        Self {
            cards: hand.cards().to_vec(),
            bet: hand.bet(),
            status: hand.status(),
            value: v.total,
            soft: v.soft,
            blackjack: hand.is_blackjack(),
            active,
        }
    }
}

/// The dealer's hand with the hole card masked while players act.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DealerView {
    /// Face-up cards only.
    pub cards: Vec<Card>,
    pub up_card: Option<Card>,
    pub hole_hidden: bool,
    /// `None` while the hole card is hidden.
    pub value: Option<u8>,
    /// Cards held, hidden ones included.
    pub card_count: usize,
}

impl DealerView {
    pub fn new(cards: &[Card], phase: Phase) -> Self {
        let hole_hidden = phase.hides_hole_card() && cards.len() > 1;
        let visible: Vec<Card> = if hole_hidden {
            cards.iter().take(1).copied().collect()
        } else {
            cards.to_vec()
        };
        Self {
            up_card: cards.first().copied(),
            value: (!hole_hidden).then(|| hand::hand_value(cards)),
            cards: visible,
            hole_hidden,
            card_count: cards.len(),
        }
    }
}

/// Everything a front end needs to draw the table, taken after each step.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub hands: Vec<HandView>,
    pub current_hand_index: usize,
    pub dealer: DealerView,
    pub bankroll: u64,
    pub round_stake: u64,
    pub session: SessionStats,
    /// Present while a hand waits for a decision.
    pub available: Option<ActionAvailability>,
    /// Present once the round is finished.
    pub settlement: Option<RoundSettlement>,
    pub shoe_remaining: usize,
}

impl RoundSnapshot {
    pub(crate) fn capture(round: &Round, session: SessionStats, shoe_remaining: usize) -> Self {
        let hands = round
            .hands
            .iter()
            .enumerate()
            .map(|(i, h)| HandView::new(h, round.phase == Phase::Playing && i == round.current))
            .collect();
        Self {
            phase: round.phase,
            hands,
            current_hand_index: round.current,
            dealer: DealerView::new(&round.dealer, round.phase),
            bankroll: session.bankroll,
            round_stake: round.stake,
            available: ActionAvailability::for_hand(
                round.phase,
                round.current_hand(),
                round.hands.len(),
                session.bankroll,
            ),
            settlement: round.settlement.clone(),
            session,
            shoe_remaining,
        }
    }

    pub fn current_hand(&self) -> Option<&HandView> {
        self.hands.get(self.current_hand_index)
    }

    /// A hand is waiting for the player.
    pub fn awaiting_action(&self) -> bool {
        self.available.is_some()
    }
}
