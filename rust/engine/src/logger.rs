use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Action, Round};
use crate::rules::Outcome;

/// Which side of the table acted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Dealer,
}

/// Records a single action after the opening deal.
/// Draws carry the card that came off the shoe.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: Seat,
    pub action: Action,
    #[serde(default)]
    pub card: Option<Card>,
}

/// Complete record of a settled round.
/// Serialized to JSONL format, one round per line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// RNG seed of the round's shoe (enables deterministic replay)
    pub seed: Option<u64>,
    /// Chronological list of hits, stands and dealer draws
    pub actions: Vec<ActionRecord>,
    /// Player's final hand in deal order
    pub player: Vec<Card>,
    /// Dealer's final hand in deal order
    pub dealer: Vec<Card>,
    pub outcome: Option<Outcome>,
    /// Human-readable result line
    pub result: Option<String>,
    /// Timestamp when the round was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl RoundRecord {
    pub fn from_round(round: &Round, round_id: String, seed: Option<u64>) -> Self {
        Self {
            round_id,
            seed,
            actions: round.actions().to_vec(),
            player: round.player().cards().to_vec(),
            dealer: round.dealer().cards().to_vec(),
            outcome: round.outcome(),
            result: round.message().map(str::to_string),
            ts: None,
            meta: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

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
        // inject timestamp if missing
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
