//! Deal command: deals one round from a seeded shoe and shows the table,
//! hole card included, without playing it out.

use std::io::Write;

use blackjack_engine::engine::{DealerMode, Engine, EngineConfig};

use crate::error::CliError;
use crate::formatters::{format_card, format_table};

/// Bet used for the dealt hands; it only shows in the table line.
const DEAL_BET: u64 = 10;

pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(1);
    let mut engine = Engine::with_config(EngineConfig {
        seed,
        dealer_mode: DealerMode::Paced,
        ..EngineConfig::default()
    });
    let snap = engine.start_round(seats, DEAL_BET)?;

    writeln!(out, "Seed: {}", engine.seed().unwrap_or_default())?;
    writeln!(out, "{}", format_table(&snap))?;
    if let Some(hole) = engine.round().dealer().get(1).filter(|_| snap.dealer.hole_hidden) {
        writeln!(out, "Hole card: {}", format_card(hole))?;
    }
    writeln!(out, "Phase: {}", snap.phase)?;
    Ok(())
}
