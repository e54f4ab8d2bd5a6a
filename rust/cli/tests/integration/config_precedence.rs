use crate::helpers::cli_runner::CliRunner;

use serde_json::Value;
use serial_test::serial;

const VARS: &[&str] = &[
    "BLACKJACK_CONFIG",
    "BLACKJACK_SEED",
    "BLACKJACK_BET",
    "BLACKJACK_SEATS",
    "BLACKJACK_BANKROLL",
    "BLACKJACK_DEALER_DELAY_MS",
    "BLACKJACK_STRATEGY",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg_in_process() -> (i32, Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = blackjack_cli::run(["blackjack", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json, String::from_utf8_lossy(&err).to_string())
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, json, _) = cfg_in_process();
    assert_eq!(code, 0);
    assert_eq!(json["bankroll"]["value"], 1000);
    assert_eq!(json["bankroll"]["source"], "default");
    assert_eq!(json["seats"]["value"], 1);
    assert_eq!(json["strategy"]["value"], "basic");
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_wins_over_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blackjack.toml");
    std::fs::write(&path, "bet = 5\nseats = 2\nstrategy = \"mimic\"\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &path);
        std::env::set_var("BLACKJACK_BET", "25");
    }

    let (code, json, err) = cfg_in_process();
    clear_env();

    assert_eq!(code, 0, "stderr={}", err);
    assert_eq!(json["bet"]["value"], 25);
    assert_eq!(json["bet"]["source"], "env");
    assert_eq!(json["seats"]["value"], 2);
    assert_eq!(json["seats"]["source"], "file");
    assert_eq!(json["strategy"]["value"], "mimic");
    assert_eq!(json["bankroll"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_fails_with_two() {
    clear_env();
    unsafe {
        std::env::set_var("BLACKJACK_SEATS", "9");
    }
    let (code, _, err) = cfg_in_process();
    clear_env();

    assert_eq!(code, 2);
    assert!(err.contains("seats must be between 1 and 4"), "stderr={}", err);
}

#[test]
#[serial]
fn malformed_config_file_is_reported() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "bet = [oops\n").unwrap();
    unsafe {
        std::env::set_var("BLACKJACK_CONFIG", &path);
    }
    let (code, _, err) = cfg_in_process();
    clear_env();

    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"), "stderr={}", err);
}

#[test]
fn flags_win_over_env() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["sim", "--rounds", "3", "--seed", "4", "--seats", "2"],
        &[("BLACKJACK_SEATS", "3"), ("BLACKJACK_BET", "20")],
    );
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("seats=2 bet=20"), "stdout={}", res.stdout);
}
