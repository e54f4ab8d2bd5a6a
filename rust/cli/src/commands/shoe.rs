//! Shoe command: shows the top of a shuffled shoe and checks its makeup.
//!
//! Useful for confirming that a seed reproduces the same shoe and that the
//! shuffle kept every card: 208 cards, 16 of each rank, 52 of each suit.

use std::collections::BTreeMap;
use std::io::Write;

use blackjack_engine::cards::{all_ranks, all_suits};
use blackjack_engine::deck::{Shoe, DECKS_PER_SHOE, SHOE_SIZE};

use crate::error::CliError;
use crate::formatters::{format_card, format_rank, format_suit};

pub fn handle_shoe_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let shoe = Shoe::new_with_seed(seed);

    let top: Vec<String> = shoe.peek_order().take(count).map(format_card).collect();
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Top {}: {}", top.len(), top.join(" "))?;

    let mut ranks = BTreeMap::new();
    let mut suits = BTreeMap::new();
    for card in shoe.peek_order() {
        *ranks.entry(card.rank).or_insert(0usize) += 1;
        *suits.entry(card.suit).or_insert(0usize) += 1;
    }
    let per_rank = 4 * DECKS_PER_SHOE;
    let per_suit = 13 * DECKS_PER_SHOE;
    let ranks_ok = all_ranks()
        .iter()
        .all(|r| ranks.get(r).copied() == Some(per_rank));
    let suits_ok = all_suits()
        .iter()
        .all(|s| suits.get(s).copied() == Some(per_suit));

    let rank_line: Vec<String> = ranks
        .iter()
        .map(|(r, n)| format!("{}:{}", format_rank(r), n))
        .collect();
    let suit_line: Vec<String> = suits
        .iter()
        .map(|(s, n)| format!("{}:{}", format_suit(s), n))
        .collect();
    writeln!(out, "Cards: {}/{}", shoe.remaining(), SHOE_SIZE)?;
    writeln!(out, "Ranks: {}", rank_line.join(" "))?;
    writeln!(out, "Suits: {}", suit_line.join(" "))?;

    if shoe.remaining() == SHOE_SIZE && ranks_ok && suits_ok {
        writeln!(out, "Composition: ok")?;
        Ok(())
    } else {
        writeln!(out, "Composition: MISMATCH")?;
        Err(CliError::InvalidInput(
            "shoe composition does not match four full decks".to_string(),
        ))
    }
}
