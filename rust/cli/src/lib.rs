//! # Blackjack CLI Library
//!
//! Command-line front end for the blackjack engine: play at the table,
//! simulate strategies, and summarize round histories.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a subcommand and returns the
//! process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["blackjack", "shoe", "--seed", "42", "--count", "5"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play rounds by hand or with a strategy
//! - `sim`: Auto-play rounds and optionally save them as JSONL
//! - `stats`: Aggregate JSONL round histories
//! - `deal`: Deal a single round for inspection
//! - `shoe`: Show the top of a seeded shoe and check its composition
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_shoe_command,
    handle_sim_command, handle_stats_command, PlayOptions,
};
use config::FlagOverrides;

pub use cli::Vs;
pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["play", "sim", "stats", "deal", "shoe", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "deal", "--seed", "42", "--seats", "2"];
/// let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };
    logging::init_logging(cli.verbose);
    tracing::debug!(command = cli.cmd.name(), "dispatching");

    let result = match cli.cmd {
        Commands::Play {
            seats,
            bet,
            rounds,
            seed,
            vs,
            strategy,
            dealer_delay_ms,
            log,
        } => {
            let opts = PlayOptions {
                vs,
                rounds,
                log,
                flags: FlagOverrides {
                    bet,
                    seats,
                    seed,
                    strategy,
                    dealer_delay_ms,
                },
            };
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(opts, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            rounds,
            seats,
            bet,
            seed,
            strategy,
            output,
        } => {
            let flags = FlagOverrides {
                bet,
                seats,
                seed,
                strategy,
                dealer_delay_ms: None,
            };
            handle_sim_command(rounds, flags, output, out, err)
        }
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Deal { seed, seats } => handle_deal_command(seed, seats, out),
        Commands::Shoe { seed, count } => handle_shoe_command(seed, count, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    if let Err(e) = &result
        && !matches!(e, CliError::Interrupted(_))
        && writeln!(err, "Error: {}", e).is_err()
    {
        return exit_code::ERROR;
    }
    exit_code::for_result(&result)
}

/// Help and version go to `out` with success; anything else prints the
/// clap error and a command list to `err`.
fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let mut text = format!("{}\nBlackjack CLI\nUsage: blackjack <command> [options]\n\nCommands:\n", e);
    for c in COMMANDS {
        text.push_str(&format!("  {}\n", c));
    }
    text.push_str("\nFor full help, run: blackjack --help\n");
    let _ = err.write_all(text.as_bytes());
    exit_code::ERROR
}
