//! Command-line argument definitions (clap derive).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "blackjack",
    version,
    about = "Blackjack engine tooling: deal, simulate, and audit rounds"
)]
pub struct BlackjackCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one round and show the opening hands
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one round with the automated player, pacing the dealer's draws
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Stop hitting at this total (4-21)
        #[arg(long, value_parser = clap::value_parser!(u8).range(4..=21))]
        stand_on: Option<u8>,
        /// Pause before each dealer draw, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Play many rounds and optionally append them to a JSONL round log
    Sim {
        #[arg(long)]
        rounds: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop hitting at this total (4-21)
        #[arg(long, value_parser = clap::value_parser!(u8).range(4..=21))]
        stand_on: Option<u8>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Aggregate outcomes from JSONL round logs
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Re-check every record of a round log against the rules
    Verify {
        #[arg(long)]
        input: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
