use crate::helpers::cli_runner::CliRunner;

use serde_json::Value;
use std::fs;

fn sim_to(cli: &CliRunner, rounds: &str, seed: &str, file: &str) -> String {
    let path = cli.dir().join(file);
    let arg = path.to_string_lossy().into_owned();
    let res = cli.run(&["sim", "--rounds", rounds, "--seed", seed, "--output", arg.as_str()]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    arg
}

#[test]
fn sim_output_feeds_stats() {
    let cli = CliRunner::new().expect("cli runner");
    let path = sim_to(&cli, "30", "21", "sim/run.jsonl");

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 30);

    let res = cli.run(&["stats", "--input", path.as_str()]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["rounds"], 30);
    assert_eq!(json["unbalanced"], 0);
    assert_eq!(json["corrupted"], 0);
    let wagered = json["total_wagered"].as_u64().unwrap();
    let payout = json["total_payout"].as_u64().unwrap();
    let refunds = json["total_refunds"].as_u64().unwrap();
    assert_eq!(
        json["net"].as_i64().unwrap(),
        (payout + refunds) as i64 - wagered as i64
    );
}

#[test]
fn stats_reads_directories_and_zstd() {
    let cli = CliRunner::new().expect("cli runner");
    let plain = sim_to(&cli, "5", "1", "hist/a.jsonl");
    let raw = fs::read(&plain).unwrap();
    let packed = zstd::encode_all(&raw[..], 3).unwrap();
    fs::write(cli.dir().join("hist").join("b.jsonl.zst"), packed).unwrap();

    let dir = cli.dir().join("hist");
    let res = cli.run(&["stats", "--input", dir.to_string_lossy().as_ref()]);
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["rounds"], 10);
}

#[test]
fn stats_flags_tampered_records() {
    let cli = CliRunner::new().expect("cli runner");
    let path = sim_to(&cli, "3", "6", "t.jsonl");
    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let net = lines[1]["net"].as_i64().unwrap();
    lines[1]["net"] = Value::from(net + 100);
    let tampered: String = lines.iter().map(|v| format!("{}\n", v)).collect();
    fs::write(&path, tampered + "not json\n").unwrap();

    let res = cli.run(&["stats", "--input", path.as_str()]);
    assert_eq!(res.exit_code, 2);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["rounds"], 2);
    assert_eq!(json["unbalanced"], 1);
    assert_eq!(json["corrupted"], 1);
    assert!(res.stderr.contains(":2 ("), "stderr={}", res.stderr);
}

#[test]
fn stats_on_missing_path_fails() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run(&["stats", "--input", "does/not/exist.jsonl"]);
    assert_eq!(res.exit_code, 2);
}

#[test]
fn sim_break_after_exits_130() {
    let cli = CliRunner::new().expect("cli runner");
    let res = cli.run_with_env(
        &["sim", "--rounds", "10", "--seed", "3"],
        &[("BLACKJACK_SIM_BREAK_AFTER", "4")],
    );
    assert_eq!(res.exit_code, 130);
    assert!(res.stdout.contains("Interrupted: completed 4/10"));
}

#[test]
fn sim_is_reproducible_with_random_strategy() {
    let cli = CliRunner::new().expect("cli runner");
    let args = ["sim", "--rounds", "20", "--seed", "12", "--strategy", "random", "--seats", "3"];
    let a = cli.run(&args);
    let b = cli.run(&args);
    assert_eq!(a.exit_code, 0, "stderr={}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("strategy=Random"));
}
