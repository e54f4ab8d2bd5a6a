//! Card, hand, and table formatters for terminal display.
//!
//! Pure functions from engine views to strings. Suits render as Unicode
//! symbols where the terminal supports them, with an ASCII fallback.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_cards};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_cards(&[ace_spades]).starts_with("[A"));
//! ```

use blackjack_engine::cards::{Card, Rank, Suit};
use blackjack_engine::game::{DealerView, HandView, RoundSnapshot};
use blackjack_engine::player::PlayerAction;
use blackjack_engine::settlement::RoundSettlement;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single-character rank (2-9, T, J, Q, K, A) so columns line up.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ten => "T".to_string(),
        other => other.label().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in bracket notation, `[A♠ K♥]`, or `[]` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Total with a `soft` marker, e.g. `soft 17`.
pub fn format_total(value: u8, soft: bool) -> String {
    if soft && value < 21 {
        format!("soft {}", value)
    } else {
        value.to_string()
    }
}

/// One line per hand: `> Hand 1 [8♠ 3♥] 11  bet 10  playing`.
pub fn format_hand(index: usize, hand: &HandView, current: bool) -> String {
    let marker = if current { ">" } else { " " };
    format!(
        "{} Hand {} {} {}  bet {}  {}",
        marker,
        index + 1,
        format_cards(&hand.cards),
        format_total(hand.value, hand.soft),
        hand.bet,
        hand.status
    )
}

/// The dealer line; the hole card shows as `??` while hidden.
pub fn format_dealer(dealer: &DealerView) -> String {
    let mut shown: Vec<String> = dealer.cards.iter().map(format_card).collect();
    if dealer.hole_hidden {
        shown.push("??".to_string());
    }
    match dealer.value {
        Some(v) => format!("Dealer [{}] {}", shown.join(" "), v),
        None => format!("Dealer [{}]", shown.join(" ")),
    }
}

/// Dealer line followed by every hand, the current one marked.
pub fn format_table(snapshot: &RoundSnapshot) -> String {
    let mut lines = vec![format_dealer(&snapshot.dealer)];
    let awaiting = snapshot.awaiting_action();
    for (i, hand) in snapshot.hands.iter().enumerate() {
        lines.push(format_hand(
            i,
            hand,
            awaiting && i == snapshot.current_hand_index,
        ));
    }
    lines.join("\n")
}

/// Prompt listing the legal moves, with the reason split is unavailable.
pub fn format_prompt(snapshot: &RoundSnapshot) -> Option<String> {
    let available = snapshot.available.as_ref()?;
    let mut choices: Vec<&str> = available
        .legal_actions()
        .into_iter()
        .map(action_key)
        .collect();
    choices.push("(q)uit");
    let mut line = format!(
        "Hand {}: {}",
        snapshot.current_hand_index + 1,
        choices.join(" ")
    );
    let two_cards = snapshot.current_hand().is_some_and(|h| h.cards.len() == 2);
    if let Some(reason) = available.split_blocked.as_ref().filter(|_| two_cards) {
        line.push_str(&format!("  [no split: {}]", reason));
    }
    Some(line)
}

fn action_key(action: PlayerAction) -> &'static str {
    match action {
        PlayerAction::Hit => "(h)it",
        PlayerAction::Stand => "(s)tand",
        PlayerAction::Double => "(d)ouble",
        PlayerAction::Split => "s(p)lit",
        PlayerAction::Surrender => "su(r)render",
    }
}

pub fn format_action(action: &PlayerAction) -> String {
    action.as_str().to_string()
}

/// Per-hand outcomes and the round net.
pub fn format_settlement(settlement: &RoundSettlement) -> String {
    let mut lines: Vec<String> = settlement
        .hands
        .iter()
        .map(|h| {
            format!(
                "  Hand {}: {} ({}), payout {}",
                h.hand_index + 1,
                h.outcome,
                h.player_value,
                h.payout
            )
        })
        .collect();
    let dealer = if settlement.dealer_busted {
        format!("Dealer busts with {}", settlement.dealer_value)
    } else {
        format!("Dealer has {}", settlement.dealer_value)
    };
    lines.insert(0, dealer);
    lines.push(format!("Result: {}", settlement.summary()));
    lines.join("\n")
}
