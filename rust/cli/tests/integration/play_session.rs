use crate::helpers::cli_runner::CliRunner;

use blackjack_engine::logger::RoundRecord;

const FAST: (&str, &str) = ("BLACKJACK_DEALER_DELAY_MS", "0");

#[test]
fn ai_play_runs_the_requested_rounds() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["play", "--vs", "ai", "--rounds", "3", "--seed", "42", "--seats", "2"],
        &[FAST],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Strategy: BasicStrategy"));
    assert!(res.stdout.contains("Round 3"));
    assert!(res.stdout.contains("Session: 3 rounds"));
}

#[test]
fn human_input_errors_reprompt_without_exiting() {
    let cli = CliRunner::new().expect("cli runner");
    // nonsense, then stand on every hand that asks
    let input = "fold\nstand\nstand\nstand\nstand\n";
    let res = cli.run_with_input(
        &["play", "--rounds", "1", "--seed", "8", "--dealer-delay-ms", "0"],
        input,
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Session: "));
    if res.stdout.contains("(s)tand") {
        assert!(res.stderr.contains("Unrecognized action 'fold'"), "stderr={}", res.stderr);
    }
}

#[test]
fn quitting_mid_round_exits_cleanly() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_input(&["play", "--seed", "8", "--dealer-delay-ms", "0"], "q\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Session: "));
}

#[test]
fn short_bankroll_offers_reset() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["play", "--bet", "50", "--seed", "2", "--rounds", "2"],
        &[FAST, ("BLACKJACK_BANKROLL", "40")],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Bankroll 40 cannot cover a stake of 50."));
    assert!(res.stdout.contains("Session: 0 rounds"));
}

#[test]
fn reset_starts_a_new_session() {
    let cli = CliRunner::new().expect("cli runner");
    let env = [FAST, ("BLACKJACK_BANKROLL", "40"), ("BLACKJACK_BET", "50")];
    let res = cli.run_with_input_and_env(&["play", "--seed", "2"], "nope\nreset\nq\n", &env);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("New session, bankroll 40"));
    assert_eq!(res.stdout.matches("cannot cover a stake of 50").count(), 2);
}

#[test]
fn log_flag_writes_balanced_records() {
    let cli = CliRunner::new().expect("cli runner");
    let log = cli.dir().join("logs").join("rounds.jsonl");
    let log_arg = log.to_string_lossy().into_owned();
    let res = cli.run_with_env(
        &[
            "play", "--vs", "ai", "--strategy", "mimic", "--rounds", "4", "--seed", "10", "--log",
            log_arg.as_str(),
        ],
        &[FAST],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);

    let content = std::fs::read_to_string(&log).expect("log written");
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid record"))
        .collect();
    assert_eq!(records.len(), 4);
    for r in &records {
        assert!(r.is_balanced());
        assert_eq!(r.seed, Some(10));
        assert!(r.ts.is_some());
    }
    assert!(records[0].round_id.ends_with("-000001"));
    assert!(records[3].round_id.ends_with("-000004"));
}

#[test]
fn unknown_strategy_fails_before_dealing() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["play", "--vs", "ai", "--strategy", "card-counter"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("card-counter"), "stderr={}", res.stderr);
    assert!(!res.stdout.contains("Round 1"));
}
