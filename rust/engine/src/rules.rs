use serde::{Deserialize, Serialize};

use crate::errors::{ActionError, GameError};
use crate::game::Phase;
use crate::hand::{is_pair, BLACKJACK};
use crate::player::{PlayerAction, PlayerHand};

/// Bankroll a new session starts with.
pub const STARTING_BANKROLL: u64 = 1_000;
/// Most hands one round can hold, counting hands created by splits.
pub const MAX_HANDS: usize = 4;
/// The dealer draws below this total and stands on it, soft or hard.
pub const DEALER_STANDS_ON: u8 = 17;
pub const MIN_BET: u64 = 1;

/// Checks a round request and returns the total stake it needs.
///
/// # Errors
///
/// - [`GameError::InvalidHandCount`] unless `1 <= num_hands <= MAX_HANDS`
/// - [`GameError::InvalidBetAmount`] for a zero bet
/// - [`GameError::InsufficientFunds`] when the stake exceeds `bankroll`
///
/// # Examples
///
/// ```
/// use blackjack_engine::rules::validate_stake;
/// use blackjack_engine::errors::GameError;
///
/// assert_eq!(validate_stake(3, 10, 100), Ok(30));
/// assert!(matches!(
///     validate_stake(4, 50, 100),
///     Err(GameError::InsufficientFunds { required: 200, available: 100 })
/// ));
/// ```
pub fn validate_stake(num_hands: usize, bet: u64, bankroll: u64) -> Result<u64, GameError> {
    if num_hands == 0 || num_hands > MAX_HANDS {
        return Err(GameError::InvalidHandCount {
            requested: num_hands,
            max: MAX_HANDS,
        });
    }
    if bet < MIN_BET {
        return Err(GameError::InvalidBetAmount {
            amount: bet,
            minimum: MIN_BET,
        });
    }
    let total = (num_hands as u64).saturating_mul(bet);
    if total > bankroll {
        return Err(GameError::InsufficientFunds {
            required: total,
            available: bankroll,
        });
    }
    Ok(total)
}

/// Decides whether `action` may be applied to `hand`, the hand at the
/// current index.
///
/// Nothing is mutated; callers apply the action only after this returns
/// `Ok`, which keeps every action all-or-nothing.
///
/// # Examples
///
/// ```
/// use blackjack_engine::rules::validate_action;
/// use blackjack_engine::game::Phase;
/// use blackjack_engine::player::PlayerAction;
/// use blackjack_engine::errors::{ActionError, GameError};
///
/// let result = validate_action(Phase::Dealer, None, 1, 100, PlayerAction::Hit);
/// assert_eq!(
///     result,
///     Err(GameError::InvalidAction(ActionError::WrongPhase(Phase::Dealer)))
/// );
/// ```
pub fn validate_action(
    phase: Phase,
    hand: Option<&PlayerHand>,
    hands_in_round: usize,
    bankroll: u64,
    action: PlayerAction,
) -> Result<(), GameError> {
    if phase != Phase::Playing {
        return Err(ActionError::WrongPhase(phase).into());
    }
    let hand = hand.ok_or(ActionError::NoActiveHand)?;
    if !hand.status().is_active() {
        return Err(ActionError::HandNotActive.into());
    }

    match action {
        PlayerAction::Stand => Ok(()),
        PlayerAction::Hit => below_blackjack(hand),
        PlayerAction::Double => {
            below_blackjack(hand)?;
            two_cards(hand)?;
            affordable(hand.bet(), bankroll)
        }
        PlayerAction::Surrender => {
            below_blackjack(hand)?;
            two_cards(hand)
        }
        PlayerAction::Split => {
            two_cards(hand)?;
            if !is_pair(hand.cards()) {
                return Err(ActionError::NotAPair.into());
            }
            affordable(hand.bet(), bankroll)?;
            if hands_in_round >= MAX_HANDS {
                return Err(ActionError::MaxHandsReached(MAX_HANDS).into());
            }
            Ok(())
        }
    }
}

fn below_blackjack(hand: &PlayerHand) -> Result<(), GameError> {
    if hand.value() >= BLACKJACK {
        return Err(ActionError::HandComplete.into());
    }
    Ok(())
}

fn two_cards(hand: &PlayerHand) -> Result<(), GameError> {
    if hand.cards().len() != 2 {
        return Err(ActionError::NeedTwoCards.into());
    }
    Ok(())
}

fn affordable(amount: u64, bankroll: u64) -> Result<(), GameError> {
    if amount > bankroll {
        return Err(GameError::InsufficientFunds {
            required: amount,
            available: bankroll,
        });
    }
    Ok(())
}

/// Which actions the hand at the current index accepts right now.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionAvailability {
    pub hit: bool,
    pub stand: bool,
    pub double: bool,
    pub surrender: bool,
    pub split: bool,
    /// Why split is disabled, when it is.
    #[serde(default)]
    pub split_blocked: Option<String>,
}

impl ActionAvailability {
    /// `None` unless a hand is waiting for a decision.
    pub fn for_hand(
        phase: Phase,
        hand: Option<&PlayerHand>,
        hands_in_round: usize,
        bankroll: u64,
    ) -> Option<Self> {
        let check = |a| validate_action(phase, hand, hands_in_round, bankroll, a);
        check(PlayerAction::Stand).ok()?;
        let split = check(PlayerAction::Split);
        Some(Self {
            hit: check(PlayerAction::Hit).is_ok(),
            stand: true,
            double: check(PlayerAction::Double).is_ok(),
            surrender: check(PlayerAction::Surrender).is_ok(),
            split: split.is_ok(),
            split_blocked: split.err().map(|e| match e {
                GameError::InvalidAction(reason) => reason.to_string(),
                GameError::InsufficientFunds { .. } => "Insufficient funds to split".to_string(),
                other => other.to_string(),
            }),
        })
    }

    pub fn allows(&self, action: PlayerAction) -> bool {
        match action {
            PlayerAction::Hit => self.hit,
            PlayerAction::Stand => self.stand,
            PlayerAction::Double => self.double,
            PlayerAction::Split => self.split,
            PlayerAction::Surrender => self.surrender,
        }
    }

    pub fn legal_actions(&self) -> Vec<PlayerAction> {
        [
            PlayerAction::Hit,
            PlayerAction::Stand,
            PlayerAction::Double,
            PlayerAction::Split,
            PlayerAction::Surrender,
        ]
        .into_iter()
        .filter(|a| self.allows(*a))
        .collect()
    }
}
