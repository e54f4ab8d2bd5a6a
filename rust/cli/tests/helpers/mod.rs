//! Shared helpers for the CLI integration tests.
//!
//! `CliRunner` spawns the built `blackjack` binary in a scratch directory
//! with every `BLACKJACK_*` variable cleared, so tests do not depend on the
//! caller's environment.

pub mod cli_runner {
    use std::io::Write as _;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Stdio};

    const ENV_VARS: &[&str] = &[
        "BLACKJACK_CONFIG",
        "BLACKJACK_SEED",
        "BLACKJACK_BET",
        "BLACKJACK_SEATS",
        "BLACKJACK_BANKROLL",
        "BLACKJACK_DEALER_DELAY_MS",
        "BLACKJACK_STRATEGY",
        "BLACKJACK_SIM_BREAK_AFTER",
        "RUST_LOG",
    ];

    #[derive(Debug, Clone)]
    pub struct CliResult {
        pub exit_code: i32,
        pub stdout: String,
        pub stderr: String,
    }

    #[derive(Debug)]
    pub struct CliRunner {
        binary_path: PathBuf,
        workdir: tempfile::TempDir,
    }

    impl CliRunner {
        pub fn new() -> std::io::Result<Self> {
            Ok(Self {
                binary_path: PathBuf::from(env!("CARGO_BIN_EXE_blackjack")),
                workdir: tempfile::tempdir()?,
            })
        }

        pub fn dir(&self) -> &Path {
            self.workdir.path()
        }

        pub fn run(&self, args: &[&str]) -> CliResult {
            self.run_inner(args, &[], None)
        }

        #[allow(dead_code)]
        pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
            self.run_inner(args, env, None)
        }

        #[allow(dead_code)]
        pub fn run_with_input(&self, args: &[&str], input: &str) -> CliResult {
            self.run_inner(args, &[], Some(input))
        }

        #[allow(dead_code)]
        pub fn run_with_input_and_env(
            &self,
            args: &[&str],
            input: &str,
            env: &[(&str, &str)],
        ) -> CliResult {
            self.run_inner(args, env, Some(input))
        }

        fn run_inner(&self, args: &[&str], env: &[(&str, &str)], input: Option<&str>) -> CliResult {
            let mut cmd = Command::new(&self.binary_path);
            cmd.args(args)
                .current_dir(self.workdir.path())
                .stdin(if input.is_some() {
                    Stdio::piped()
                } else {
                    Stdio::null()
                })
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            for key in ENV_VARS {
                cmd.env_remove(key);
            }
            for (key, value) in env {
                cmd.env(key, value);
            }

            let mut child = cmd.spawn().expect("failed to spawn CLI binary");
            if let Some(payload) = input
                && let Some(mut stdin) = child.stdin.take()
            {
                let _ = stdin.write_all(payload.as_bytes());
            }
            let output = child.wait_with_output().expect("failed to read output");
            CliResult {
                exit_code: output.status.code().unwrap_or(1),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
        }
    }
}
