//! Terminal output helpers shared by commands: error and warning lines,
//! and the end-of-session summary.

use std::io::Write;

use blackjack_engine::session::SessionStats;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// `Session: 12 rounds, 7 won (58%), wagered 140, bankroll 1030`
pub fn write_session_summary(out: &mut dyn Write, stats: &SessionStats) -> std::io::Result<()> {
    writeln!(
        out,
        "Session: {} rounds, {} won ({}%), wagered {}, bankroll {}",
        stats.rounds_played, stats.rounds_won, stats.win_rate, stats.total_wagered, stats.bankroll
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line() {
        let stats = SessionStats {
            bankroll: 1030,
            rounds_played: 12,
            rounds_won: 7,
            win_rate: 58,
            total_wagered: 140,
            hands_played: 15,
        };
        let mut out = Vec::new();
        write_session_summary(&mut out, &stats).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Session: 12 rounds, 7 won (58%), wagered 140, bankroll 1030\n"
        );
    }

    #[test]
    fn warning_prefix() {
        let mut err = Vec::new();
        display_warning(&mut err, "bankroll too low").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "WARNING: bankroll too low\n");
    }
}
