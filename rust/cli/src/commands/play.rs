//! Play command: one round at table speed.
//!
//! The automated player hits below the stand threshold and stands; the
//! dealer then draws through [`DealerPacer`], one card per configured delay,
//! on a current-thread tokio runtime. The table is printed after the deal and
//! again once the round settles.

use crate::config::validate_stand_on;
use crate::error::CliError;
use crate::formatters::format_view;
use crate::ui;
use blackjack_engine::engine::Table;
use blackjack_engine::pacer::{DealerPacer, SharedTable};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::sim::play_player_turn;

/// Handle the play command.
///
/// # Arguments
///
/// * `seed` - Optional table seed; a random one is drawn otherwise
/// * `stand_on` - Total at which the automated player stops hitting
/// * `delay` - Pause before each dealer draw
/// * `out` - Output stream for the table snapshots
/// * `err` - Output stream for error messages
pub fn handle_play_command(
    seed: Option<u64>,
    stand_on: u8,
    delay: Duration,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let Err(e) = validate_stand_on(stand_on) {
        ui::write_error(err, &e.to_string())?;
        return Err(e.into());
    }
    let base_seed = seed.unwrap_or_else(rand::random);
    let table: SharedTable = Arc::new(Mutex::new(Table::new(base_seed)));

    writeln!(out, "Seed: {}", base_seed)?;
    let opening = {
        let mut t = table.lock().unwrap_or_else(PoisonError::into_inner);
        t.new_round()?;
        t.view()
    };
    if let Some(view) = opening {
        write_view(out, &view)?;
    }

    {
        let mut t = table.lock().unwrap_or_else(PoisonError::into_inner);
        play_player_turn(&mut t, stand_on)?;
    }

    let pacer = DealerPacer::new(Arc::clone(&table), delay);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(async {
        if let Some(handle) = pacer.stand()? {
            handle.await??;
        }
        Ok::<(), CliError>(())
    })?;

    let settled = table.lock().unwrap_or_else(PoisonError::into_inner).view();
    if let Some(view) = settled {
        writeln!(out)?;
        write_view(out, &view)?;
    }
    Ok(())
}

fn write_view(
    out: &mut dyn Write,
    view: &blackjack_engine::engine::RoundView,
) -> std::io::Result<()> {
    for line in format_view(view) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
