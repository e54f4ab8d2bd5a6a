//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Multi-hand blackjack at the terminal"
)]
pub struct BlackjackCli {
    /// Log engine events to stderr (-v for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds at the table, by hand or with a strategy
    Play {
        /// Hands to play each round (1-4)
        #[arg(long)]
        seats: Option<usize>,
        /// Bet per hand
        #[arg(long)]
        bet: Option<u64>,
        /// Stop after this many rounds
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Vs::Human)]
        vs: Vs,
        /// Strategy used with `--vs ai`
        #[arg(long)]
        strategy: Option<String>,
        /// Pause between dealer cards, in milliseconds
        #[arg(long)]
        dealer_delay_ms: Option<u64>,
        /// Append finished rounds to this JSONL file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Auto-play rounds with a strategy and report the result
    Sim {
        #[arg(long)]
        rounds: u32,
        #[arg(long)]
        seats: Option<usize>,
        #[arg(long)]
        bet: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        strategy: Option<String>,
        /// Write every round as JSONL
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Aggregate round history files
    Stats {
        /// A .jsonl or .jsonl.zst file, or a directory of them
        #[arg(long)]
        input: PathBuf,
    },
    /// Deal one round and show the table
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        seats: Option<usize>,
    },
    /// Show the top of a shuffled shoe
    Shoe {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Stats { .. } => "stats",
            Commands::Deal { .. } => "deal",
            Commands::Shoe { .. } => "shoe",
            Commands::Cfg => "cfg",
        }
    }
}

/// Who makes the decisions in `play`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// Read actions from stdin
    Human,
    /// Let a strategy decide
    Ai,
}

impl Vs {
    /// # Examples
    ///
    /// ```
    /// # use blackjack_cli::cli::Vs;
    /// assert_eq!(Vs::Ai.as_str(), "ai");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Human => "human",
            Vs::Ai => "ai",
        }
    }
}
