//! Jasper Backgammon - Unified CLI
//!
//! Offline tooling over game comments.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use jasper_backgammon::{Game, MergeRegion, auto_merge, classify};
use jasper_game_view::SyncConfig;
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };

    match cli.command {
        Command::Replay { file } => run_replay(&file, &config),
        Command::Classify { file } => run_classify(&file),
        Command::Resolve { regions } => run_resolve(&regions, &config),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Replay a comment and print board, dice and canonical log
#[instrument(skip(config))]
fn run_replay(file: &Path, config: &SyncConfig) -> Result<()> {
    let text = read(file)?;
    let game = Game::from_comment(&text);
    info!(records = game.log().len(), "Replayed comment");

    println!("{}", game.board().display());
    match game.active_roll() {
        Some(roll) => println!("{} to play, remaining {:?}", roll.owner(), roll.remaining()),
        None => println!("No roll in progress"),
    }
    println!();
    println!("{}", game.comment_with(config.line_separator()));
    Ok(())
}

/// Print the line kind of every line
#[instrument]
fn run_classify(file: &Path) -> Result<()> {
    let text = read(file)?;
    for (number, line) in text.lines().enumerate() {
        println!("{:>4} {:<7} {}", number + 1, classify(line), line);
    }
    Ok(())
}

/// Auto-merge regions, or report that a person must choose
#[instrument(skip(config))]
fn run_resolve(regions: &Path, config: &SyncConfig) -> Result<()> {
    let text = read(regions)?;
    let regions: Vec<MergeRegion> =
        serde_json::from_str(&text).context("Failed to parse merge regions")?;

    match auto_merge(&regions) {
        Some(lines) => {
            info!(lines = lines.len(), "Conflict resolved automatically");
            println!("{}", lines.join(config.line_separator()));
        }
        None => {
            warn!("Conflict needs manual resolution");
            println!("Manual resolution required");
        }
    }
    Ok(())
}
