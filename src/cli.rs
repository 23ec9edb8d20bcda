//! Command-line interface for domino_cafe.

use clap::{Parser, Subcommand};
use domino_match::MatchMode;

/// Domino Café - domino match runner
#[derive(Parser, Debug)]
#[command(name = "domino_cafe")]
#[command(about = "Play or simulate Domino Café matches in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Table mode (one_on_one or four_player)
        #[arg(short, long, default_value = "one_on_one")]
        mode: MatchMode,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Seed for move resolution
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a headless match with an autopilot in the player's seat
    Simulate {
        /// Table mode (one_on_one or four_player)
        #[arg(short, long, default_value = "one_on_one")]
        mode: MatchMode,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Seed for move resolution
        #[arg(long)]
        seed: Option<u64>,

        /// Time acceleration factor
        #[arg(long, default_value = "20")]
        speed: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the coin and XP payout for a match result
    Rewards {
        /// Table mode (one_on_one or four_player)
        #[arg(short, long)]
        mode: MatchMode,

        /// Payout for a win instead of a loss
        #[arg(long)]
        won: bool,
    },
}
