use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::deck::Shoe;
use crate::errors::{ActionError, GameError};
use crate::game::{Phase, Round, RoundSnapshot};
use crate::hand::{hand_value, is_blackjack, BLACKJACK};
use crate::logger::{ActionRecord, HandRecord, RoundRecord};
use crate::player::{HandStatus, PlayerAction, PlayerHand};
use crate::rules::{
    validate_action, validate_stake, ActionAvailability, DEALER_STANDS_ON, STARTING_BANKROLL,
};
use crate::session::Session;
use crate::settlement::settle_round;

/// How the dealer's turn is driven once every player hand is done.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealerMode {
    /// The dealer plays out as soon as the phase is entered
    #[default]
    Immediate,
    /// The caller drives [`Engine::dealer_step`] or [`Engine::dealer_play`]
    Paced,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    /// Shoe seed; a random one is chosen when `None`.
    pub seed: Option<u64>,
    pub starting_bankroll: u64,
    pub dealer_mode: DealerMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_bankroll: STARTING_BANKROLL,
            dealer_mode: DealerMode::Immediate,
        }
    }
}

/// Result of one [`Engine::dealer_step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DealerStep {
    /// The dealer took a card
    Draw(Card),
    /// The dealer stood and the round was settled
    Finished,
    /// Not the dealer's turn
    Idle,
}

/// Blackjack table for one player with up to four hands against the dealer.
///
/// Owns the shoe, the session ledger and the round in progress. Every
/// action is checked in full before anything changes, so a rejected action
/// leaves the table exactly as it was.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::Engine;
/// use blackjack_engine::game::Phase;
///
/// let mut engine = Engine::new(Some(7));
/// let mut snap = engine.start_round(2, 10).unwrap();
/// while snap.phase == Phase::Playing {
///     snap = engine.stand();
/// }
/// assert_eq!(snap.phase, Phase::Finished);
/// assert_eq!(snap.session.rounds_played, 1);
/// ```
#[derive(Debug)]
pub struct Engine {
    shoe: Shoe,
    session: Session,
    round: Round,
    seed: Option<u64>,
    dealer_mode: DealerMode,
}

impl Engine {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_config(EngineConfig {
            seed,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            shoe: Shoe::new_with_seed(seed),
            session: Session::new(config.starting_bankroll),
            round: Round::new(),
            seed: Some(seed),
            dealer_mode: config.dealer_mode,
        }
    }

    /// An engine dealing from a prepared shoe, typically [`Shoe::stacked`].
    pub fn with_shoe(shoe: Shoe, bankroll: u64, dealer_mode: DealerMode) -> Self {
        Self {
            shoe,
            session: Session::new(bankroll),
            round: Round::new(),
            seed: None,
            dealer_mode,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn round(&self) -> &Round {
        &self.round
    }
    pub fn phase(&self) -> Phase {
        self.round.phase
    }
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }
    pub fn dealer_mode(&self) -> DealerMode {
        self.dealer_mode
    }
    pub fn set_dealer_mode(&mut self, mode: DealerMode) {
        self.dealer_mode = mode;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot::capture(&self.round, self.session.stats(), self.shoe.remaining())
    }

    /// Stakes `num_hands × bet`, deals, and lands on the first hand that
    /// needs a decision.
    ///
    /// # Errors
    ///
    /// Fails without touching any state when a round is in progress, the
    /// hand count or bet is out of range, or the bankroll cannot cover the
    /// stake.
    pub fn start_round(&mut self, num_hands: usize, bet: u64) -> Result<RoundSnapshot, GameError> {
        if !self.round.phase.accepts_new_round() {
            return Err(ActionError::RoundInProgress.into());
        }
        let stake = validate_stake(num_hands, bet, self.session.bankroll())?;

        if self.shoe.needs_refill() {
            self.shoe.rebuild();
        }
        self.session.place_stake(stake)?;
        self.session.record_hands(num_hands as u64);

        let mut round = Round {
            hands: (0..num_hands).map(|_| PlayerHand::new(bet)).collect(),
            phase: Phase::Playing,
            stake,
            ..Round::default()
        };
        // two passes: one card to every hand, then one to the dealer
        for _ in 0..2 {
            for h in &mut round.hands {
                h.give_card(self.shoe.deal());
            }
            round.dealer.push(self.shoe.deal());
        }
        for h in &mut round.hands {
            if h.value() == BLACKJACK {
                h.transition(HandStatus::Blackjack)?;
            }
        }
        self.round = round;

        info!(
            hands = num_hands,
            bet,
            stake,
            bankroll = self.session.bankroll(),
            "round started"
        );

        if is_blackjack(&self.round.dealer) {
            debug!("dealer natural, settling immediately");
            self.finish_round();
        } else {
            self.advance();
        }
        Ok(self.snapshot())
    }

    /// Applies `action` to the hand at the current index.
    ///
    /// # Errors
    ///
    /// Returns the reason the action is illegal; the table is unchanged.
    pub fn apply(&mut self, action: PlayerAction) -> Result<RoundSnapshot, GameError> {
        validate_action(
            self.round.phase,
            self.round.current_hand(),
            self.round.hands.len(),
            self.session.bankroll(),
            action,
        )?;
        let index = self.round.current;
        let card = match action {
            PlayerAction::Hit => Some(self.do_hit()?),
            PlayerAction::Stand => {
                self.current_hand_mut()?.transition(HandStatus::Stood)?;
                None
            }
            PlayerAction::Double => Some(self.do_double()?),
            PlayerAction::Surrender => {
                self.do_surrender()?;
                None
            }
            PlayerAction::Split => Some(self.do_split()?),
        };
        debug!(hand = index, action = action.as_str(), card = ?card, "action applied");
        self.round.actions.push(ActionRecord {
            hand_index: index,
            action,
            card,
        });
        // the index stays put after a split, even on a two-card 21
        if action != PlayerAction::Split {
            self.advance();
        }
        Ok(self.snapshot())
    }

    pub fn hit(&mut self) -> RoundSnapshot {
        self.apply_or_ignore(PlayerAction::Hit)
    }

    pub fn stand(&mut self) -> RoundSnapshot {
        self.apply_or_ignore(PlayerAction::Stand)
    }

    pub fn double_down(&mut self) -> RoundSnapshot {
        self.apply_or_ignore(PlayerAction::Double)
    }

    pub fn surrender(&mut self) -> RoundSnapshot {
        self.apply_or_ignore(PlayerAction::Surrender)
    }

    pub fn split(&mut self) -> RoundSnapshot {
        self.apply_or_ignore(PlayerAction::Split)
    }

    fn apply_or_ignore(&mut self, action: PlayerAction) -> RoundSnapshot {
        match self.apply(action) {
            Ok(snap) => snap,
            Err(e) => {
                debug!(action = action.as_str(), error = %e, "action ignored");
                self.snapshot()
            }
        }
    }

    /// Whether the current hand may split, and why not.
    pub fn can_split(&self) -> Result<(), GameError> {
        validate_action(
            self.round.phase,
            self.round.current_hand(),
            self.round.hands.len(),
            self.session.bankroll(),
            PlayerAction::Split,
        )
    }

    pub fn availability(&self) -> Option<ActionAvailability> {
        ActionAvailability::for_hand(
            self.round.phase,
            self.round.current_hand(),
            self.round.hands.len(),
            self.session.bankroll(),
        )
    }

    fn current_hand_mut(&mut self) -> Result<&mut PlayerHand, GameError> {
        self.round
            .current_hand_mut()
            .ok_or_else(|| ActionError::NoActiveHand.into())
    }

    fn do_hit(&mut self) -> Result<Card, GameError> {
        let card = self.shoe.deal();
        let hand = self.current_hand_mut()?;
        hand.give_card(card);
        let value = hand.value();
        if value > BLACKJACK {
            hand.transition(HandStatus::Busted)?;
        } else if value == BLACKJACK {
            hand.transition(HandStatus::Stood)?;
        }
        Ok(card)
    }

    fn do_double(&mut self) -> Result<Card, GameError> {
        let extra = self.current_hand_mut()?.bet();
        self.session.place_stake(extra)?;
        self.round.stake += extra;
        let card = self.shoe.deal();
        let hand = self.current_hand_mut()?;
        hand.transition(HandStatus::Doubled)?;
        hand.double_bet();
        hand.give_card(card);
        Ok(card)
    }

    fn do_surrender(&mut self) -> Result<(), GameError> {
        let hand = self.current_hand_mut()?;
        hand.transition(HandStatus::Surrendered)?;
        let refund = hand.bet() / 2;
        self.session.refund(refund);
        self.round.surrender_refunds += refund;
        Ok(())
    }

    /// Returns the card dealt to the original hand.
    fn do_split(&mut self) -> Result<Card, GameError> {
        let extra = self.current_hand_mut()?.bet();
        self.session.place_stake(extra)?;
        self.round.stake += extra;

        let first = self.shoe.deal();
        let second = self.shoe.deal();
        let hand = self.current_hand_mut()?;
        let mut new_hand = hand.split_off()?;
        hand.give_card(first);
        new_hand.give_card(second);

        let at = self.round.current + 1;
        self.round.hands.insert(at, new_hand);
        self.session.record_hands(1);
        Ok(first)
    }

    /// Seeks the next hand needing a decision, or hands over to the dealer.
    fn advance(&mut self) {
        if self.round.phase != Phase::Playing || self.round.seek_next_hand() {
            return;
        }
        self.round.phase = Phase::Dealer;
        debug!(dealer_mode = ?self.dealer_mode, "player hands done, dealer to play");
        if self.dealer_mode == DealerMode::Immediate {
            self.dealer_play();
        }
    }

    /// One dealer draw below 17; at 17 or more the round is settled.
    pub fn dealer_step(&mut self) -> DealerStep {
        if self.round.phase != Phase::Dealer {
            return DealerStep::Idle;
        }
        if hand_value(&self.round.dealer) < DEALER_STANDS_ON {
            let card = self.shoe.deal();
            self.round.dealer.push(card);
            debug!(card = %card, total = hand_value(&self.round.dealer), "dealer draws");
            DealerStep::Draw(card)
        } else {
            self.finish_round();
            DealerStep::Finished
        }
    }

    /// Plays the dealer's hand out and settles. No-op outside the dealer phase.
    pub fn dealer_play(&mut self) -> RoundSnapshot {
        while let DealerStep::Draw(_) = self.dealer_step() {}
        self.snapshot()
    }

    fn finish_round(&mut self) {
        if self.round.settlement.is_some() {
            return;
        }
        let settlement = settle_round(
            &self.round.dealer,
            &self.round.hands,
            self.round.stake,
            self.round.surrender_refunds,
        );
        self.session.record_settlement(&settlement);
        self.round.phase = Phase::Finished;
        info!(
            stake = settlement.stake,
            payout = settlement.total_payout,
            net = settlement.net,
            dealer = settlement.dealer_value,
            bankroll = self.session.bankroll(),
            "round settled: {}",
            settlement.summary()
        );
        self.round.settlement = Some(settlement);
    }

    /// Back to the starting bankroll with clean stats, an empty table and
    /// a freshly shuffled shoe.
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.round = Round::new();
        self.shoe.rebuild();
        info!(bankroll = self.session.bankroll(), "session reset");
    }

    /// History record for the finished round; `None` until it is settled.
    pub fn round_record(&self, round_id: impl Into<String>) -> Option<RoundRecord> {
        let settlement = self.round.settlement.as_ref()?;
        let hands = self
            .round
            .hands
            .iter()
            .zip(&settlement.hands)
            .map(|(h, s)| HandRecord {
                cards: h.cards().to_vec(),
                bet: h.bet(),
                status: h.status(),
                outcome: s.outcome,
                payout: s.payout,
            })
            .collect();
        Some(RoundRecord {
            round_id: round_id.into(),
            seed: self.seed,
            actions: self.round.actions.clone(),
            dealer: self.round.dealer.clone(),
            hands,
            stake: settlement.stake,
            total_payout: settlement.total_payout,
            net: settlement.net,
            surrender_refunds: settlement.surrender_refunds,
            bankroll_after: self.session.bankroll(),
            ts: None,
        })
    }
}
