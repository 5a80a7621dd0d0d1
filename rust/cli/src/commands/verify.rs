//! Verify command handler module.
//!
//! Re-checks every record of a JSONL round log against the game rules:
//!
//! - Valid round ids (format: YYYYMMDD-NNNNNN)
//! - At least two cards per hand, no card dealt twice
//! - Drawn cards in the action history match the cards in each hand
//! - The dealer drew only below 17 and stopped at 17 or more
//! - The recorded outcome and result text equal the ones recomputed from
//!   the hands
//! - When a seed is recorded, the shoe rebuilt from it deals the same cards
//!
//! Errors are collected using the shared `BatchValidationError` pattern for
//! structured reporting.

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::read_text_auto;
use blackjack_engine::cards::Card;
use blackjack_engine::hand::score;
use blackjack_engine::logger::{RoundRecord, Seat};
use blackjack_engine::rules::{dealer_should_draw, resolve, resolve_opening};
use blackjack_engine::shoe::Shoe;
use std::collections::HashSet;
use std::io::Write;

/// The `usize` context is the 1-based record number.
type VerifyError = BatchValidationError<usize>;

/// Byte-wise so a non-ASCII id from a tampered log is rejected, not sliced.
fn valid_id(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 15
        && b[..8].iter().all(u8::is_ascii_digit)
        && b[8] == b'-'
        && b[9..].iter().all(u8::is_ascii_digit)
}

/// Handle the verify command - validate round log integrity.
///
/// # Returns
///
/// `Ok(())` if every record passes, otherwise an `Err` that maps to exit
/// code `2` after all failures have been listed on `err`.
///
/// # Example
///
/// ```no_run
/// # use std::io;
/// let code = blackjack_cli::run(
///     ["blackjack", "verify", "--input", "data/rounds.jsonl"],
///     &mut io::stdout(),
///     &mut io::stderr(),
/// );
/// ```
pub fn handle_verify_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut errors: Vec<VerifyError> = Vec::new();
    let mut rounds = 0usize;
    let mut seen_ids = HashSet::new();

    let content = read_text_auto(&input)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", input, e)))?;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        rounds += 1;
        let rec: RoundRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                errors.push(VerifyError {
                    item_context: rounds,
                    message: format!("Invalid round record: {}", e),
                });
                continue;
            }
        };
        if !seen_ids.insert(rec.round_id.clone()) {
            errors.push(VerifyError {
                item_context: rounds,
                message: format!("Duplicate round_id {}", rec.round_id),
            });
        }
        for message in check_record(&rec) {
            errors.push(VerifyError {
                item_context: rounds,
                message,
            });
        }
    }

    if errors.is_empty() {
        writeln!(out, "Verify: OK (rounds={})", rounds)?;
        Ok(())
    } else {
        writeln!(out, "Verify: FAIL (rounds={})", rounds)?;
        writeln!(err)?;
        writeln!(err, "Errors found:")?;
        for error in &errors {
            writeln!(err, "  Round {}", error)?;
        }
        writeln!(err)?;
        let invalid: HashSet<usize> = errors.iter().map(|e| e.item_context).collect();
        writeln!(
            err,
            "Summary: {} error(s) in {} rounds ({} invalid rounds)",
            errors.len(),
            rounds,
            invalid.len()
        )?;
        Err(CliError::InvalidInput(format!(
            "{} validation errors found",
            errors.len()
        )))
    }
}

/// All rule violations of a single record, empty when it is consistent.
fn check_record(rec: &RoundRecord) -> Vec<String> {
    let mut problems = Vec::new();

    if !valid_id(&rec.round_id) {
        problems.push(format!("Invalid round_id format: {}", rec.round_id));
    }
    if rec.player.len() < 2 || rec.dealer.len() < 2 {
        problems.push(format!(
            "Opening deal incomplete: player {} card(s), dealer {} card(s)",
            rec.player.len(),
            rec.dealer.len()
        ));
        return problems;
    }

    let mut seen = HashSet::new();
    for card in rec.player.iter().chain(rec.dealer.iter()) {
        if !seen.insert(*card) {
            problems.push(format!("Card {} dealt more than once", card));
        }
    }

    let hits: Vec<Card> = drawn_by(rec, Seat::Player);
    let draws: Vec<Card> = drawn_by(rec, Seat::Dealer);
    if hits != rec.player[2..] {
        problems.push("Player hits do not match the player's hand".to_string());
    }
    if draws != rec.dealer[2..] {
        problems.push("Dealer draws do not match the dealer's hand".to_string());
    }

    let Some(outcome) = rec.outcome else {
        problems.push("Missing outcome".to_string());
        return problems;
    };

    let player = score(&rec.player);
    let dealer = score(&rec.dealer);
    let expected = match resolve_opening(&score(&rec.player[..2]), &score(&rec.dealer[..2])) {
        Some(opening) => {
            if rec.player.len() > 2 || rec.dealer.len() > 2 {
                problems.push("Cards drawn after a natural settled the round".to_string());
            }
            opening
        }
        None if player.is_bust => {
            if rec.dealer.len() > 2 {
                problems.push("Dealer drew after the player busted".to_string());
            }
            resolve(&player, &dealer)
        }
        None => {
            for k in 2..rec.dealer.len() {
                if !dealer_should_draw(&score(&rec.dealer[..k])) {
                    problems.push(format!(
                        "Dealer drew on {}",
                        score(&rec.dealer[..k]).total
                    ));
                }
            }
            if dealer_should_draw(&dealer) {
                problems.push(format!("Dealer stood on {}", dealer.total));
            }
            resolve(&player, &dealer)
        }
    };
    if expected != outcome {
        problems.push(format!(
            "Recorded outcome {:?} does not match hands ({:?})",
            outcome, expected
        ));
    }
    if let Some(result) = rec.result.as_deref()
        && result != outcome.message()
    {
        problems.push(format!("Result text {:?} does not match outcome", result));
    }

    if let Some(seed) = rec.seed
        && !replays(seed, rec, &hits, &draws)
    {
        problems.push(format!("Seed {} does not reproduce the dealt cards", seed));
    }
    problems
}

fn drawn_by(rec: &RoundRecord, seat: Seat) -> Vec<Card> {
    rec.actions
        .iter()
        .filter(|a| a.seat == seat)
        .filter_map(|a| a.card)
        .collect()
}

/// Deal order is player, dealer, player, dealer, then hits, then dealer
/// draws; the rebuilt shoe must yield exactly that prefix.
fn replays(seed: u64, rec: &RoundRecord, hits: &[Card], draws: &[Card]) -> bool {
    let mut shoe = Shoe::new_with_seed(seed);
    shoe.build();
    let dealt: Vec<Card> = [rec.player[0], rec.dealer[0], rec.player[1], rec.dealer[1]]
        .into_iter()
        .chain(hits.iter().copied())
        .chain(draws.iter().copied())
        .collect();
    shoe.undealt().starts_with(&dealt)
}
