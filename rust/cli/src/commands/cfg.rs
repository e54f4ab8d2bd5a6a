//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value paired with where
//! it came from (`default`, `file`, `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "bankroll": {
//!     "value": 1000,
//!     "source": "default"
//!   },
//!   "bet": {
//!     "value": 25,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// # Errors
///
/// Returns `CliError::Config` if the file or environment holds an invalid
/// value, `CliError::Io` if writing fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "bankroll": { "value": config.bankroll, "source": sources.bankroll },
        "bet": { "value": config.bet, "source": sources.bet },
        "seats": { "value": config.seats, "source": sources.seats },
        "seed": { "value": config.seed, "source": sources.seed },
        "dealer_delay_ms": { "value": config.dealer_delay_ms, "source": sources.dealer_delay_ms },
        "strategy": { "value": config.strategy, "source": sources.strategy },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
