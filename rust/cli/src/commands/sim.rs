//! Simulation command handler for batch round generation.
//!
//! Plays N rounds at one seeded table with an automated player that hits
//! below a stand threshold, then lets the dealer play out unpaced. Settled
//! rounds are optionally appended to a JSONL round log.
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//! let args = ["blackjack", "sim", "--rounds", "1000", "--seed", "42", "--output", "data/rounds.jsonl"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use crate::config::validate_stand_on;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use blackjack_engine::engine::Table;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::RoundState;
use blackjack_engine::logger::{RoundLogger, RoundRecord};
use blackjack_engine::rules::Winner;
use std::io::Write;
use std::path::Path;

/// Hits until the player's total reaches `stand_on`, the player busts, or
/// the round leaves the player's turn. Does not stand.
pub(crate) fn play_player_turn(table: &mut Table, stand_on: u8) -> Result<(), GameError> {
    while let Some(round) = table.round() {
        if round.state() != RoundState::PlayerTurn || round.player_score().total >= stand_on {
            break;
        }
        if table.fault().is_some() {
            break;
        }
        table.hit()?;
    }
    Ok(())
}

/// Handle the sim command.
///
/// # Arguments
///
/// * `rounds` - Number of rounds to play
/// * `output` - Optional JSONL path the settled rounds are appended to
/// * `seed` - Table seed; round `n` is shuffled from `seed + n`
/// * `stand_on` - Total at which the automated player stops hitting
/// * `out` - Output stream for the summary line
/// * `err` - Output stream for error messages
pub fn handle_sim_command(
    rounds: u64,
    output: Option<String>,
    seed: Option<u64>,
    stand_on: u8,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    if let Err(e) = validate_stand_on(stand_on) {
        ui::write_error(err, &e.to_string())?;
        return Err(e.into());
    }

    let mut logger = match output.as_deref() {
        Some(path) => {
            ensure_parent_dir(Path::new(path)).map_err(CliError::InvalidInput)?;
            Some(RoundLogger::create(path)?)
        }
        None => None,
    };

    let base_seed = seed.unwrap_or_else(rand::random);
    let mut table = Table::new(base_seed);
    let (mut player, mut dealer, mut nobody) = (0u64, 0u64, 0u64);

    for _ in 0..rounds {
        let id = table.new_round()?;
        play_player_turn(&mut table, stand_on)?;
        if let Some(ticket) = table.stand()? {
            table.play_dealer(ticket)?;
        }
        let round = table
            .round()
            .ok_or_else(|| CliError::InvalidInput(format!("round {} vanished", id)))?;
        match round.outcome().map(|o| o.winner()) {
            Some(Winner::Player) => player += 1,
            Some(Winner::Dealer) => dealer += 1,
            Some(Winner::Nobody) => nobody += 1,
            None => {
                return Err(CliError::InvalidInput(format!(
                    "round {} ended without an outcome",
                    id
                )));
            }
        }
        if let Some(logger) = logger.as_mut() {
            let mut record = RoundRecord::from_round(round, logger.next_id(), table.round_seed(id));
            record.meta = Some(serde_json::json!({ "stand_on": stand_on }));
            logger.write(&record)?;
        }
    }

    tracing::info!(rounds, seed = base_seed, stand_on, "simulation finished");
    writeln!(
        out,
        "Simulated: {} rounds (player {}, dealer {}, ties {})",
        rounds, player, dealer, nobody
    )?;
    Ok(())
}
