//! # Blackjack CLI Library
//!
//! Command-line tooling over the blackjack engine: seeded deal inspection,
//! a paced single round, batch simulation into JSONL round logs, and
//! aggregation and verification of those logs.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one round and show the opening hands
//! - `play`: Play one round with the automated player and a paced dealer
//! - `sim`: Simulate many rounds and optionally record them
//! - `stats`: Aggregate outcomes from JSONL round logs
//! - `verify`: Re-check round logs against the rules
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
use std::time::Duration;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{BlackjackCli, Commands};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_sim_command,
    handle_stats_command, handle_verify_command,
};

pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
/// Options left off the command line fall back to the resolved configuration
/// (`BLACKJACK_CONFIG` file, then `BLACKJACK_*` environment variables).
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["blackjack", "deal", "--seed", "42"];
/// let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["deal", "play", "sim", "stats", "verify", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err);
            write_or_exit!(err, "Blackjack CLI");
            write_or_exit!(err, "Usage: blackjack <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: blackjack --help");
            return exit_code::ERROR;
        }
    };

    match execute(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

/// Commands that play rounds take their defaults from configuration, which
/// is only loaded for them.
fn execute(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Verify { input } => {
            let path = input.ok_or_else(|| CliError::InvalidInput("input required".into()))?;
            handle_verify_command(path, out, err)
        }
        Commands::Deal { seed } => {
            let cfg = config::load()?;
            handle_deal_command(seed.or(cfg.seed), out)
        }
        Commands::Play {
            seed,
            stand_on,
            delay_ms,
        } => {
            let cfg = config::load()?;
            handle_play_command(
                seed.or(cfg.seed),
                stand_on.unwrap_or(cfg.stand_on),
                Duration::from_millis(delay_ms.unwrap_or(cfg.dealer_delay_ms)),
                out,
                err,
            )
        }
        Commands::Sim {
            rounds,
            seed,
            stand_on,
            output,
        } => {
            let cfg = config::load()?;
            handle_sim_command(
                rounds,
                output,
                seed.or(cfg.seed),
                stand_on.unwrap_or(cfg.stand_on),
                out,
                err,
            )
        }
    }
}
