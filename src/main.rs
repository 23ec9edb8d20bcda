//! Domino Café - Unified CLI
//!
//! Terminal play and headless simulation of domino matches.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use domino_cafe::{AppConfig, play, simulate};
use domino_match::{MatchMode, MatchSession, calculate_rewards};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { mode, config, seed } => run_play(mode, config, seed).await,
        Command::Simulate {
            mode,
            config,
            seed,
            speed,
            json,
        } => run_simulate(mode, config, seed, speed, json).await,
        Command::Rewards { mode, won } => run_rewards(mode, won),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Run an interactive terminal match
async fn run_play(mode: MatchMode, config: Option<PathBuf>, seed: Option<u64>) -> Result<()> {
    // Log to file to avoid interfering with the TUI
    let log_file =
        std::fs::File::create("domino_cafe.log").context("Failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(%mode, "Starting Domino Café match");

    let app_config = AppConfig::load(config.as_deref())?.with_seed(seed);
    let session = MatchSession::new(app_config.match_config(mode));

    match play(session, app_config.pacing(1)).await? {
        Some(report) => println!("{report}"),
        None => println!("Match abandoned"),
    }
    Ok(())
}

/// Run a headless autopilot match
#[instrument(skip(config))]
async fn run_simulate(
    mode: MatchMode,
    config: Option<PathBuf>,
    seed: Option<u64>,
    speed: u32,
    json: bool,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load(config.as_deref())?.with_seed(seed);
    let session = MatchSession::new(app_config.match_config(mode));

    let report = simulate(session, app_config.pacing(speed)).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Print the payout table entry
fn run_rewards(mode: MatchMode, won: bool) -> Result<()> {
    let rewards = calculate_rewards(mode, won);
    println!(
        "{} {}: +{} coins, +{} XP",
        mode,
        if won { "win" } else { "loss" },
        rewards.coins_earned,
        rewards.xp_earned
    );
    Ok(())
}
