//! Simulation command: a strategy plays many rounds without pauses.
//!
//! Rounds can be written to a JSONL file for `stats`. The run stops early
//! when the bankroll can no longer cover the stake.
//!
//! # Environment Variables
//!
//! - `BLACKJACK_SIM_BREAK_AFTER`: stop after N rounds as if interrupted

use std::io::Write;
use std::path::PathBuf;

use blackjack_ai::create_strategy;
use blackjack_engine::engine::{DealerMode, Engine, EngineConfig};
use blackjack_engine::logger::RoundLogger;
use tracing::info;

use crate::config::{self, FlagOverrides};
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;

/// Handle the sim command.
///
/// # Errors
///
/// `InvalidInput` for zero rounds or an unknown strategy, `Config` for a bad
/// configuration, `Interrupted` when stopped early, `Io` on write failures.
pub fn handle_sim_command(
    rounds: u32,
    flags: FlagOverrides,
    output: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = config::resolve(&flags)?.config;
    let mut strategy = create_strategy(&cfg.strategy, cfg.seed)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let mut engine = Engine::with_config(EngineConfig {
        seed: cfg.seed,
        starting_bankroll: cfg.bankroll,
        dealer_mode: DealerMode::Immediate,
    });
    let mut logger = match &output {
        Some(path) => {
            ensure_parent_dir(path)?;
            Some(RoundLogger::create(path)?)
        }
        None => None,
    };
    let break_after = std::env::var("BLACKJACK_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u32>().ok());

    let stake = cfg.bet.saturating_mul(cfg.seats as u64);
    let mut completed = 0u32;
    while completed < rounds {
        if break_after.is_some_and(|n| completed >= n) {
            writeln!(out, "Interrupted: completed {}/{}", completed, rounds)?;
            return Err(CliError::Interrupted(format!(
                "completed {}/{}",
                completed, rounds
            )));
        }
        if engine.session().bankroll() < stake {
            ui::display_warning(
                err,
                &format!("Bankroll exhausted after {} rounds", completed),
            )?;
            break;
        }

        let mut snap = engine.start_round(cfg.seats, cfg.bet)?;
        while snap.awaiting_action() {
            let action = strategy.decide(&snap);
            snap = engine.apply(action)?;
        }
        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            if let Some(record) = engine.round_record(id) {
                logger.write(&record)?;
            }
        }
        completed += 1;
    }

    let stats = engine.session().stats();
    let net = stats.bankroll as i64 - cfg.bankroll as i64;
    info!(rounds = completed, net, strategy = strategy.name(), "simulation done");

    writeln!(
        out,
        "sim: rounds={} seats={} bet={} strategy={} seed={}",
        completed,
        cfg.seats,
        cfg.bet,
        strategy.name(),
        engine.seed().unwrap_or_default()
    )?;
    ui::write_session_summary(out, &stats)?;
    writeln!(out, "Net: {}", net)?;
    if let Some(path) = &output {
        writeln!(out, "Saved {} rounds to {}", completed, path.display())?;
    }
    Ok(())
}
