use crate::helpers::cli_runner::CliRunner;

#[test]
fn help_lists_every_command() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["--help"]);
    assert_eq!(res.exit_code, 0);
    for c in ["play", "sim", "stats", "deal", "shoe", "cfg"] {
        assert!(res.stdout.contains(c), "help missing {}: {}", c, res.stdout);
    }
}

#[test]
fn unknown_command_exits_with_two() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["roulette"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: blackjack"));
    assert!(res.stdout.is_empty());
}

#[test]
fn deal_is_deterministic_per_seed() {
    let cli = CliRunner::new().expect("cli runner");
    let a = cli.run(&["deal", "--seed", "77", "--seats", "3"]);
    let b = cli.run(&["deal", "--seed", "77", "--seats", "3"]);
    assert_eq!(a.exit_code, 0, "stderr={}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Hand 3"));
}

#[test]
fn deal_with_too_many_seats_reports_engine_error() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["deal", "--seed", "1", "--seats", "5"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid hand count"), "stderr={}", res.stderr);
}

#[test]
fn shoe_composition_is_checked() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["shoe", "--seed", "3", "--count", "4"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("Top 4: "));
    assert!(res.stdout.contains("Composition: ok"));
}

#[test]
fn verbose_flag_sends_engine_events_to_stderr() {
    let cli = CliRunner::new().expect("cli runner");
    let quiet = cli.run(&["deal", "--seed", "9"]);
    assert!(!quiet.stderr.contains("round started"));

    let loud = cli.run(&["-v", "deal", "--seed", "9"]);
    assert_eq!(loud.exit_code, 0);
    assert!(loud.stderr.contains("round started"), "stderr={}", loud.stderr);
    assert_eq!(quiet.stdout, loud.stdout);
}
