//! Input parsing for the interactive `play` command.
//!
//! Turns a line typed at the table into a player action or one of the
//! session commands (`quit`, `reset`). Anything else comes back as
//! [`ParseResult::Invalid`] with a message for the user.

use blackjack_engine::player::PlayerAction;

/// Outcome of parsing one line of input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A move for the current hand
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Start over with a fresh bankroll
    Reset,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into an action or a session command.
///
/// Accepts, case-insensitively:
/// - "h" or "hit"
/// - "s" or "stand"
/// - "d", "double" or "dd"
/// - "p" or "split"
/// - "r", "surrender" or "sur"
/// - "reset"
/// - "q" or "quit"
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_player_action, ParseResult};
/// use blackjack_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("hit"), ParseResult::Action(PlayerAction::Hit));
/// assert_eq!(parse_player_action(" P "), ParseResult::Action(PlayerAction::Split));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("fold") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let Some(word) = input.split_whitespace().next() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match word {
        "q" | "quit" => ParseResult::Quit,
        "reset" => ParseResult::Reset,
        "h" | "hit" => ParseResult::Action(PlayerAction::Hit),
        "s" | "stand" => ParseResult::Action(PlayerAction::Stand),
        "d" | "dd" | "double" => ParseResult::Action(PlayerAction::Double),
        "p" | "split" => ParseResult::Action(PlayerAction::Split),
        "r" | "sur" | "surrender" => ParseResult::Action(PlayerAction::Surrender),
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: hit, stand, double, split, surrender, q",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_agree() {
        for (short, long) in [("h", "hit"), ("s", "stand"), ("d", "double"), ("p", "split"), ("r", "surrender")] {
            assert_eq!(parse_player_action(short), parse_player_action(long));
        }
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(
            parse_player_action("  STAND \n"),
            ParseResult::Action(PlayerAction::Stand)
        );
        assert_eq!(parse_player_action("Reset"), ParseResult::Reset);
    }

    #[test]
    fn empty_input_is_invalid() {
        assert_eq!(
            parse_player_action("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }
}
