//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! the error to an exit code.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context. The
//! `stats` command uses it to report which history lines did not balance.

use std::fmt;

use blackjack_engine::errors::GameError;
use thiserror::Error;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A table operation the engine refused
    #[error("Engine error: {0}")]
    Engine(#[from] GameError),

    /// Operation was interrupted (e.g., by user with Ctrl+C)
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

/// One failed item of a batch, with the context that identifies it.
///
/// # Examples
///
/// ```rust
/// use blackjack_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "net does not match payout".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: net does not match payout");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    pub item_context: T,
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
