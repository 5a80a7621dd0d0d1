//! Statistics aggregation command for round log analysis.
//!
//! Aggregates JSONL round logs (a file, a `.jsonl.zst` file, or a directory
//! of them) into outcome and winner counts.

use crate::error::CliError;
use crate::io_utils::{collect_round_logs, read_text_auto};
use crate::ui;
use blackjack_engine::logger::RoundRecord;
use blackjack_engine::rules::{Outcome, Winner};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Default)]
struct StatsState {
    rounds: u64,
    outcomes: BTreeMap<String, u64>,
    player: u64,
    dealer: u64,
    nobody: u64,
    unsettled: u64,
    skipped: u64,
    corrupted: u64,
}

impl StatsState {
    fn record(&mut self, outcome: Outcome) {
        *self.outcomes.entry(format!("{:?}", outcome)).or_default() += 1;
        match outcome.winner() {
            Winner::Player => self.player += 1,
            Winner::Dealer => self.dealer += 1,
            Winner::Nobody => self.nobody += 1,
        }
    }

    /// A trailing line without a newline is a write still in progress, not
    /// corruption.
    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let rec: RoundRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => {
                    if i == lines.len() - 1 && !has_trailing_nl {
                        self.skipped += 1;
                    } else {
                        self.corrupted += 1;
                    }
                    continue;
                }
            };
            self.rounds += 1;
            match rec.outcome {
                Some(outcome) => self.record(outcome),
                None => self.unsettled += 1,
            }
        }
    }
}

/// Aggregates statistics from JSONL round logs.
///
/// # Returns
///
/// `Ok(())` when at least one record could be read or the input is empty,
/// otherwise an `Err` that maps to exit code `2`.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(&input);
    let mut state = StatsState::default();

    for file in collect_round_logs(path) {
        match read_text_auto(&file.to_string_lossy()) {
            Ok(content) => state.consume(&content),
            Err(e) if !path.is_dir() => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
            Err(_) => state.corrupted += 1,
        }
    }

    if state.corrupted > 0 {
        ui::write_error(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::write_error(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if state.unsettled > 0 {
        ui::display_warning(
            err,
            &format!("{} record(s) have no outcome", state.unsettled),
        )?;
    }
    if !path.is_dir() && state.rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let settled = state.player + state.dealer + state.nobody;
    let player_win_rate = if settled > 0 {
        state.player as f64 / settled as f64
    } else {
        0.0
    };
    let summary = serde_json::json!({
        "rounds": state.rounds,
        "outcomes": state.outcomes,
        "winners": {
            "player": state.player,
            "dealer": state.dealer,
            "nobody": state.nobody,
        },
        "player_win_rate": player_win_rate,
        "corrupted": state.corrupted,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
