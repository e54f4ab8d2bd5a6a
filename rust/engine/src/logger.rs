use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{HandStatus, PlayerAction};
use crate::settlement::Outcome;

/// One player decision and the card it drew, if any.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Index of the hand the action applied to, at the time it applied
    pub hand_index: usize,
    pub action: PlayerAction,
    /// Card drawn by hit or double. Splits draw two and record the first.
    #[serde(default)]
    pub card: Option<Card>,
}

/// Final state of one player hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub cards: Vec<Card>,
    pub bet: u64,
    pub status: HandStatus,
    pub outcome: Outcome,
    pub payout: u64,
}

/// A settled round, written one per line to the round history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub round_id: String,
    /// Shoe seed of the session (enables replaying the whole session)
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    pub dealer: Vec<Card>,
    pub hands: Vec<HandRecord>,
    pub stake: u64,
    pub total_payout: u64,
    /// `total_payout - stake`; surrender refunds are not part of it
    pub net: i64,
    /// Half-bets already returned by surrenders during play
    #[serde(default)]
    pub surrender_refunds: u64,
    pub bankroll_after: u64,
    /// RFC3339, filled in on write when missing
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    /// `stake + net == total_payout`, and the hands add up to the payout.
    pub fn is_balanced(&self) -> bool {
        let hands_total: u64 = self.hands.iter().map(|h| h.payout).sum();
        hands_total == self.total_payout
            && i128::from(self.total_payout) - i128::from(self.stake) == i128::from(self.net)
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s as JSON lines, flushing after each one.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that hands out ids but writes nowhere.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
