//! Round settlement: per-hand outcomes and payouts against the dealer.
//!
//! Payouts are gross amounts returned to the bankroll, stake included. A
//! plain win returns twice the bet, a natural returns two and a half times
//! the bet (rounded down to whole chips), a push returns the bet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{hand_value, is_blackjack, BLACKJACK};
use crate::player::{HandStatus, PlayerHand};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Surrendered,
    Bust,
    BlackjackWin,
    Win,
    DealerBlackjack,
    Push,
    Lose,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Surrendered => "Surrendered",
            Outcome::Bust => "Bust",
            Outcome::BlackjackWin => "Blackjack Win!",
            Outcome::Win => "Win",
            Outcome::DealerBlackjack => "Dealer Blackjack",
            Outcome::Push => "Push",
            Outcome::Lose => "Lose",
        }
    }

    /// Counts toward the round being won.
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win | Outcome::BlackjackWin)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gross return for a winning natural: bet × 2.5, rounded down.
pub fn blackjack_payout(bet: u64) -> u64 {
    bet.saturating_mul(5) / 2
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSettlement {
    pub hand_index: usize,
    pub outcome: Outcome,
    pub bet: u64,
    pub payout: u64,
    pub player_value: u8,
}

/// Result of settling every hand of a round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSettlement {
    pub hands: Vec<HandSettlement>,
    pub dealer_value: u8,
    pub dealer_busted: bool,
    pub dealer_blackjack: bool,
    pub total_payout: u64,
    /// Everything staked this round, doubles and splits included.
    pub stake: u64,
    /// Chips already handed back by surrenders during play.
    pub surrender_refunds: u64,
    /// `total_payout - stake`.
    pub net: i64,
    pub hands_won: usize,
}

impl RoundSettlement {
    pub fn round_won(&self) -> bool {
        self.hands_won > 0
    }

    /// `"Win | Push | Net: 10"`
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .hands
            .iter()
            .map(|h| h.outcome.label().to_string())
            .collect();
        parts.push(format!("Net: {}", self.net));
        parts.join(" | ")
    }
}

/// Outcome and gross payout of one hand against the dealer's final cards.
pub fn settle_hand(dealer: &[Card], hand: &PlayerHand) -> (Outcome, u64) {
    let bet = hand.bet();
    if hand.status() == HandStatus::Surrendered {
        return (Outcome::Surrendered, 0);
    }

    let player_value = hand.value();
    let player_natural = hand.is_blackjack();
    let dealer_value = hand_value(dealer);
    let dealer_natural = is_blackjack(dealer);

    if player_value > BLACKJACK {
        (Outcome::Bust, 0)
    } else if dealer_value > BLACKJACK {
        if player_natural {
            (Outcome::BlackjackWin, blackjack_payout(bet))
        } else {
            (Outcome::Win, bet.saturating_mul(2))
        }
    } else if player_natural && !dealer_natural {
        (Outcome::BlackjackWin, blackjack_payout(bet))
    } else if dealer_natural && !player_natural {
        (Outcome::DealerBlackjack, 0)
    } else if player_natural && dealer_natural {
        (Outcome::Push, bet)
    } else if player_value > dealer_value {
        (Outcome::Win, bet.saturating_mul(2))
    } else if player_value < dealer_value {
        (Outcome::Lose, 0)
    } else {
        (Outcome::Push, bet)
    }
}

/// Settles all hands in order. `stake` is the round's total stake and
/// `surrender_refunds` what surrenders already returned.
pub fn settle_round(
    dealer: &[Card],
    hands: &[PlayerHand],
    stake: u64,
    surrender_refunds: u64,
) -> RoundSettlement {
    let mut settled = Vec::with_capacity(hands.len());
    let mut total_payout = 0u64;
    let mut hands_won = 0usize;

    for (i, h) in hands.iter().enumerate() {
        let (outcome, payout) = settle_hand(dealer, h);
        total_payout = total_payout.saturating_add(payout);
        if outcome.is_win() {
            hands_won += 1;
        }
        settled.push(HandSettlement {
            hand_index: i,
            outcome,
            bet: h.bet(),
            payout,
            player_value: h.value(),
        });
    }

    let dealer_value = hand_value(dealer);
    RoundSettlement {
        hands: settled,
        dealer_value,
        dealer_busted: dealer_value > BLACKJACK,
        dealer_blackjack: is_blackjack(dealer),
        total_payout,
        stake,
        surrender_refunds,
        net: total_payout as i64 - stake as i64,
        hands_won,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cards::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Diamonds)).collect()
    }

    fn hand(ranks: &[Rank], bet: u64) -> PlayerHand {
        let mut h = PlayerHand::new(bet);
        for c in cards(ranks) {
            h.give_card(c);
        }
        h
    }

    #[test]
    fn settle_hand_follows_precedence() {
        use Rank::*;
        let cases: &[(&[Rank], &[Rank], Outcome, u64)] = &[
            // player bust loses even when the dealer busts too
            (&[Ten, Six, Nine], &[Ten, Six, Eight], Outcome::Bust, 0),
            (&[Ten, Eight], &[Ten, Six, Eight], Outcome::Win, 20),
            (&[Ace, King], &[Ten, Six, Eight], Outcome::BlackjackWin, 25),
            (&[Ace, King], &[Ten, Seven, Four], Outcome::BlackjackWin, 25),
            (&[Ten, Seven, Four], &[Ace, Queen], Outcome::DealerBlackjack, 0),
            (&[Ace, Jack], &[Ace, Queen], Outcome::Push, 10),
            (&[Ten, Nine], &[Ten, Eight], Outcome::Win, 20),
            (&[Ten, Seven], &[Ten, Eight], Outcome::Lose, 0),
            (&[Ten, Eight], &[Ten, Eight], Outcome::Push, 10),
        ];
        for (player, dealer, outcome, payout) in cases {
            let got = settle_hand(&cards(dealer), &hand(player, 10));
            assert_eq!(got, (*outcome, *payout), "{:?} vs {:?}", player, dealer);
        }
    }

    #[test]
    fn surrendered_hand_is_never_compared() {
        let mut h = hand(&[Rank::Ten, Rank::Nine], 10);
        h.transition(HandStatus::Surrendered).unwrap();
        let dealer = cards(&[Rank::Ten, Rank::Six, Rank::Nine]);
        assert_eq!(settle_hand(&dealer, &h), (Outcome::Surrendered, 0));
    }

    #[test]
    fn settle_round_nets_against_stake() {
        let hands = vec![hand(&[Rank::Ten, Rank::Nine], 10), hand(&[Rank::Ten, Rank::Six], 20)];
        let dealer = cards(&[Rank::Ten, Rank::Eight]);
        let s = settle_round(&dealer, &hands, 30, 0);
        assert_eq!(s.total_payout, 20);
        assert_eq!(s.net, -10);
        assert_eq!(s.hands_won, 1);
        assert_eq!(s.dealer_value, 18);
        assert!(!s.dealer_busted);
    }

    #[test]
    fn blackjack_payout_rounds_down_odd_bets() {
        assert_eq!(blackjack_payout(10), 25);
        assert_eq!(blackjack_payout(5), 12);
        assert_eq!(blackjack_payout(1), 2);
    }

    #[test]
    fn summary_joins_labels_and_net() {
        let s = RoundSettlement {
            hands: vec![
                HandSettlement {
                    hand_index: 0,
                    outcome: Outcome::Win,
                    bet: 10,
                    payout: 20,
                    player_value: 20,
                },
                HandSettlement {
                    hand_index: 1,
                    outcome: Outcome::Push,
                    bet: 10,
                    payout: 10,
                    player_value: 18,
                },
            ],
            dealer_value: 18,
            dealer_busted: false,
            dealer_blackjack: false,
            total_payout: 30,
            stake: 20,
            surrender_refunds: 0,
            net: 10,
            hands_won: 1,
        };
        assert_eq!(s.summary(), "Win | Push | Net: 10");
        assert!(s.round_won());
    }
}
