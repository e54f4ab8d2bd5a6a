use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::rules::STARTING_BANKROLL;
use crate::settlement::RoundSettlement;

/// Read-only view of the session ledger.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub bankroll: u64,
    pub rounds_played: u64,
    pub rounds_won: u64,
    /// Percentage of rounds with at least one winning hand, rounded.
    pub win_rate: u32,
    pub total_wagered: u64,
    /// Hands dealt this session, split hands included.
    pub hands_played: u64,
}

/// Bankroll and running totals that survive from one round to the next.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    starting_bankroll: u64,
    bankroll: u64,
    rounds_played: u64,
    rounds_won: u64,
    total_wagered: u64,
    hands_played: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(STARTING_BANKROLL)
    }
}

impl Session {
    pub fn new(bankroll: u64) -> Self {
        Self {
            starting_bankroll: bankroll,
            bankroll,
            rounds_played: 0,
            rounds_won: 0,
            total_wagered: 0,
            hands_played: 0,
        }
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }
    pub fn starting_bankroll(&self) -> u64 {
        self.starting_bankroll
    }
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }
    pub fn rounds_won(&self) -> u64 {
        self.rounds_won
    }
    pub fn total_wagered(&self) -> u64 {
        self.total_wagered
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn win_rate(&self) -> u32 {
        if self.rounds_played == 0 {
            return 0;
        }
        ((self.rounds_won * 100 + self.rounds_played / 2) / self.rounds_played) as u32
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        amount <= self.bankroll
    }

    /// Takes `amount` off the bankroll and counts it as wagered.
    pub(crate) fn place_stake(&mut self, amount: u64) -> Result<(), GameError> {
        if !self.can_afford(amount) {
            return Err(GameError::InsufficientFunds {
                required: amount,
                available: self.bankroll,
            });
        }
        self.bankroll -= amount;
        self.total_wagered = self.total_wagered.saturating_add(amount);
        Ok(())
    }

    pub(crate) fn refund(&mut self, amount: u64) {
        self.bankroll = self.bankroll.saturating_add(amount);
    }

    pub(crate) fn record_hands(&mut self, n: u64) {
        self.hands_played = self.hands_played.saturating_add(n);
    }

    /// Credits the payout in one step and closes the round in the tallies.
    pub(crate) fn record_settlement(&mut self, s: &RoundSettlement) {
        self.bankroll = self.bankroll.saturating_add(s.total_payout);
        self.rounds_played += 1;
        if s.round_won() {
            self.rounds_won += 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.starting_bankroll);
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            bankroll: self.bankroll,
            rounds_played: self.rounds_played,
            rounds_won: self.rounds_won,
            win_rate: self.win_rate(),
            total_wagered: self.total_wagered,
            hands_played: self.hands_played,
        }
    }
}
