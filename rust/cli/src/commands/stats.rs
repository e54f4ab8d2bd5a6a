//! Statistics over round history files.
//!
//! Reads `RoundRecord` JSON lines (plain or `.zst`) from one file or every
//! history file under a directory, and prints a JSON summary. Lines that do
//! not parse are skipped and counted; a record whose money does not add up
//! fails the command after the summary is printed.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use blackjack_engine::logger::RoundRecord;
use blackjack_engine::settlement::Outcome;
use serde::Serialize;

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::{collect_history_files, read_text_auto};
use crate::ui;

#[derive(Debug, Default, Serialize)]
struct StatsSummary {
    rounds: u64,
    rounds_won: u64,
    hands: u64,
    outcomes: BTreeMap<String, u64>,
    total_wagered: u64,
    total_payout: u64,
    total_refunds: u64,
    /// Bankroll change over the rounds: payouts plus surrender refunds
    /// minus everything wagered.
    net: i64,
    /// Percent of rounds with a winning hand, rounded.
    win_rate: u32,
    corrupted: u64,
    incomplete: u64,
    unbalanced: u64,
}

impl StatsSummary {
    fn add(&mut self, record: &RoundRecord) {
        self.rounds += 1;
        self.hands += record.hands.len() as u64;
        if record.hands.iter().any(|h| h.outcome.is_win()) {
            self.rounds_won += 1;
        }
        for hand in &record.hands {
            *self.outcomes.entry(outcome_key(hand.outcome)).or_default() += 1;
        }
        self.total_wagered += record.stake;
        self.total_payout += record.total_payout;
        self.total_refunds += record.surrender_refunds;
        self.net += record.net + record.surrender_refunds as i64;
    }

    fn finish(&mut self) {
        if self.rounds > 0 {
            self.win_rate = ((self.rounds_won * 100 + self.rounds / 2) / self.rounds) as u32;
        }
    }
}

fn outcome_key(outcome: Outcome) -> String {
    match outcome {
        Outcome::Surrendered => "surrendered",
        Outcome::Bust => "bust",
        Outcome::BlackjackWin => "blackjack",
        Outcome::Win => "win",
        Outcome::DealerBlackjack => "dealer_blackjack",
        Outcome::Push => "push",
        Outcome::Lose => "lose",
    }
    .to_string()
}

/// Handle the stats command.
///
/// # Errors
///
/// `Io` when the input cannot be read, `InvalidInput` when a single file
/// holds nothing usable or any record is unbalanced.
pub fn handle_stats_command(
    input: PathBuf,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let files = match collect_history_files(&input) {
        Ok(files) => files,
        Err(e) => {
            ui::write_error(err, &format!("Failed to read {}: {}", input.display(), e))?;
            return Err(e.into());
        }
    };

    let mut summary = StatsSummary::default();
    let mut failures: Vec<BatchValidationError<String>> = Vec::new();
    for file in &files {
        let content = read_text_auto(file)?;
        consume(file, &content, &mut summary, &mut failures);
    }
    summary.unbalanced = failures.len() as u64;
    summary.finish();

    if summary.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", summary.corrupted),
        )?;
    }
    if summary.incomplete > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", summary.incomplete),
        )?;
    }
    if input.is_file() && summary.rounds == 0 && summary.corrupted + summary.incomplete > 0 {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;

    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        ui::write_error(err, &failure.to_string())?;
    }
    Err(CliError::InvalidInput(format!(
        "{} unbalanced record(s)",
        failures.len()
    )))
}

fn consume(
    file: &Path,
    content: &str,
    summary: &mut StatsSummary,
    failures: &mut Vec<BatchValidationError<String>>,
) {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();
    let last = lines.len().saturating_sub(1);
    for (i, (line_no, line)) in lines.iter().enumerate() {
        let record: RoundRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) if i == last && !has_trailing_nl => {
                summary.incomplete += 1;
                continue;
            }
            Err(_) => {
                summary.corrupted += 1;
                continue;
            }
        };
        if !record.is_balanced() {
            failures.push(BatchValidationError {
                item_context: format!("{}:{} ({})", file.display(), line_no + 1, record.round_id),
                message: "payout does not match stake and net".to_string(),
            });
            continue;
        }
        summary.add(&record);
    }
}
