//! # Play Command
//!
//! Rounds at the table against the dealer, in one of two modes:
//!
//! - **Human**: actions are read from stdin, one per line
//! - **AI**: a named strategy decides every move
//!
//! The engine runs with a paced dealer; each dealer card is printed and
//! followed by the configured delay. Between rounds a short bankroll can be
//! restored with `reset`. Finished rounds are appended to `--log` as JSONL.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use blackjack_ai::{create_strategy, Strategy};
use blackjack_engine::engine::{DealerMode, DealerStep, Engine, EngineConfig};
use blackjack_engine::game::RoundSnapshot;
use blackjack_engine::logger::RoundLogger;
use tracing::debug;

use crate::cli::Vs;
use crate::config::{self, Config, FlagOverrides};
use crate::error::CliError;
use crate::formatters::{format_action, format_card, format_prompt, format_settlement, format_table};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_player_action, ParseResult};

pub struct PlayOptions {
    pub vs: Vs,
    pub rounds: Option<u32>,
    pub log: Option<PathBuf>,
    pub flags: FlagOverrides,
}

enum RoundEnd {
    Settled,
    Quit,
}

/// Handle the play command.
///
/// # Errors
///
/// Fails on an invalid configuration, an unknown strategy name, a rejected
/// round start, or an I/O error on the streams or the log file. Bad input
/// at the table is reported on `err` and asked for again.
pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if opts.rounds == Some(0) {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = config::resolve(&opts.flags)?.config;

    let mut strategy = match opts.vs {
        Vs::Ai => Some(
            create_strategy(&cfg.strategy, cfg.seed)
                .map_err(|e| CliError::InvalidInput(e.to_string()))?,
        ),
        Vs::Human => None,
    };

    let mut engine = Engine::with_config(EngineConfig {
        seed: cfg.seed,
        starting_bankroll: cfg.bankroll,
        dealer_mode: DealerMode::Paced,
    });
    let mut logger = opts.log.as_ref().map(RoundLogger::create).transpose()?;

    writeln!(
        out,
        "play: vs={} seats={} bet={} seed={}",
        opts.vs.as_str(),
        cfg.seats,
        cfg.bet,
        engine.seed().unwrap_or_default()
    )?;
    if let Some(s) = &strategy {
        writeln!(out, "Strategy: {}", s.name())?;
    }

    let mut played = 0u32;
    loop {
        if opts.rounds.is_some_and(|limit| played >= limit) {
            break;
        }
        let stake = cfg.bet.saturating_mul(cfg.seats as u64);
        if engine.session().bankroll() < stake {
            if !offer_reset(&mut engine, &opts.vs, stake, out, stdin)? {
                break;
            }
            continue;
        }

        writeln!(out, "\nRound {}", played + 1)?;
        let snap = engine.start_round(cfg.seats, cfg.bet)?;
        writeln!(out, "{}", format_table(&snap))?;

        let end = match strategy.as_mut() {
            Some(s) => play_with_strategy(&mut engine, snap, s.as_mut(), out)?,
            None => play_from_input(&mut engine, snap, out, err, stdin)?,
        };
        if let RoundEnd::Quit = end {
            writeln!(out, "Round abandoned.")?;
            break;
        }

        run_dealer(&mut engine, &cfg, out)?;
        let snap = engine.snapshot();
        writeln!(out, "{}", format_table(&snap))?;
        if let Some(settlement) = &snap.settlement {
            writeln!(out, "{}", format_settlement(settlement))?;
        }
        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            if let Some(record) = engine.round_record(id) {
                logger.write(&record)?;
            }
        }
        played += 1;
    }

    ui::write_session_summary(out, &engine.session().stats())?;
    Ok(())
}

/// `true` when the player chose to start over.
fn offer_reset(
    engine: &mut Engine,
    vs: &Vs,
    stake: u64,
    out: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<bool, CliError> {
    writeln!(
        out,
        "Bankroll {} cannot cover a stake of {}.",
        engine.session().bankroll(),
        stake
    )?;
    if *vs == Vs::Ai {
        return Ok(false);
    }
    loop {
        write!(out, "Type 'reset' to start a new session or 'q' to quit: ")?;
        out.flush()?;
        match read_stdin_line(stdin).as_deref().map(parse_player_action) {
            Some(ParseResult::Reset) => {
                engine.reset_session();
                writeln!(out, "New session, bankroll {}", engine.session().bankroll())?;
                return Ok(true);
            }
            Some(ParseResult::Quit) | None => return Ok(false),
            Some(_) => continue,
        }
    }
}

fn play_with_strategy(
    engine: &mut Engine,
    mut snap: RoundSnapshot,
    strategy: &mut dyn Strategy,
    out: &mut dyn Write,
) -> Result<RoundEnd, CliError> {
    while snap.awaiting_action() {
        let hand = snap.current_hand_index;
        let action = strategy.decide(&snap);
        snap = engine.apply(action)?;
        writeln!(out, "Hand {}: {}", hand + 1, format_action(&action))?;
    }
    Ok(RoundEnd::Settled)
}

fn play_from_input(
    engine: &mut Engine,
    mut snap: RoundSnapshot,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<RoundEnd, CliError> {
    while let Some(prompt) = format_prompt(&snap) {
        write!(out, "{}: ", prompt)?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(RoundEnd::Quit);
        };
        match parse_player_action(&line) {
            ParseResult::Action(action) => match engine.apply(action) {
                Ok(next) => {
                    snap = next;
                    writeln!(out, "Action: {}", format_action(&action))?;
                    writeln!(out, "{}", format_table(&snap))?;
                }
                Err(e) => {
                    debug!(error = %e, "rejected input");
                    ui::write_error(err, &e.to_string())?;
                }
            },
            ParseResult::Quit => return Ok(RoundEnd::Quit),
            ParseResult::Reset => {
                ui::write_error(err, "Finish the round before resetting")?;
            }
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
            }
        }
    }
    Ok(RoundEnd::Settled)
}

/// Steps the dealer one card at a time with the configured pause.
fn run_dealer(engine: &mut Engine, cfg: &Config, out: &mut dyn Write) -> Result<(), CliError> {
    let pause = Duration::from_millis(cfg.dealer_delay_ms);
    loop {
        match engine.dealer_step() {
            DealerStep::Draw(card) => {
                writeln!(out, "Dealer draws {}", format_card(&card))?;
                out.flush()?;
                if !pause.is_zero() {
                    std::thread::sleep(pause);
                }
            }
            DealerStep::Finished | DealerStep::Idle => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn options(vs: Vs, rounds: u32) -> PlayOptions {
        PlayOptions {
            vs,
            rounds: Some(rounds),
            log: None,
            flags: FlagOverrides {
                seed: Some(11),
                dealer_delay_ms: Some(0),
                ..FlagOverrides::default()
            },
        }
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(Vec::new());
        let result = handle_play_command(options(Vs::Human, 0), &mut out, &mut err, &mut input);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn human_standing_every_hand_finishes_rounds() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(b"s\ns\ns\ns\ns\ns\n".to_vec());
        handle_play_command(options(Vs::Human, 2), &mut out, &mut err, &mut input).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Round 1"));
        assert!(text.contains("Round 2"));
        assert!(text.contains("Session: 2 rounds"));
    }

    #[test]
    fn eof_abandons_the_round() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(Vec::new());
        handle_play_command(options(Vs::Human, 3), &mut out, &mut err, &mut input).unwrap();
        let text = String::from_utf8(out).unwrap();
        // a dealt natural settles without asking, so only check the summary
        assert!(text.contains("Session: "));
    }
}
