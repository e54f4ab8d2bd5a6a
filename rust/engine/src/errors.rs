use thiserror::Error;

use crate::game::Phase;
use crate::player::HandStatus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("Invalid action: {0}")]
    InvalidAction(#[from] ActionError),
    #[error("Shoe is empty")]
    EmptyShoe,
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u64, minimum: u64 },
    #[error("Invalid hand count: {requested} (allowed 1 to {max})")]
    InvalidHandCount { requested: usize, max: usize },
    #[error("Illegal hand transition from {from} to {to}")]
    IllegalTransition { from: HandStatus, to: HandStatus },
}

/// Why a player action is not legal right now.
///
/// The `Display` text doubles as the reason shown next to a disabled action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not your turn (phase: {0})")]
    WrongPhase(Phase),
    #[error("No hand is waiting for an action")]
    NoActiveHand,
    #[error("Hand not active")]
    HandNotActive,
    #[error("Hand is already at 21 or more")]
    HandComplete,
    #[error("Need exactly two cards")]
    NeedTwoCards,
    #[error("Cards are not a pair")]
    NotAPair,
    #[error("Maximum {0} hands reached")]
    MaxHandsReached(usize),
    #[error("A round is already in progress")]
    RoundInProgress,
}
