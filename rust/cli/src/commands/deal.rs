//! Deal command handler for inspecting a single opening deal.
//!
//! Opens one round from a seeded shoe and prints both opening hands the way
//! the player sees them: the dealer's first card stays face down unless the
//! opening deal already settled the round.

use crate::error::CliError;
use crate::formatters::format_view;
use blackjack_engine::engine::Table;
use std::io::Write;

/// Handle the deal command.
///
/// # Arguments
///
/// * `seed` - Optional table seed; a random one is drawn otherwise
/// * `out` - Output stream for command results
///
/// # Examples
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_deal_command(Some(42), &mut out).unwrap();
/// ```
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let mut table = Table::new(base_seed);
    let id = table.new_round()?;
    let view = table
        .view()
        .ok_or_else(|| CliError::InvalidInput(format!("round {} was not dealt", id)))?;

    writeln!(out, "Seed: {}", base_seed)?;
    for line in format_view(&view) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
