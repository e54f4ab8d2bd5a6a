//! Process exit codes for the `blackjack` binary.

use crate::error::CliError;

/// Command finished.
pub const SUCCESS: i32 = 0;

/// Bad input, bad configuration, an engine refusal or an I/O failure.
pub const ERROR: i32 = 2;

/// Stopped before the requested work was done (Ctrl+C convention).
pub const INTERRUPTED: i32 = 130;

/// Maps a command result to its exit code.
pub fn for_result(result: &Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(CliError::Interrupted(_)) => INTERRUPTED,
        Err(_) => ERROR,
    }
}
