//! Command-line interface for jasper_backgammon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Jasper Backgammon - inspect game comments and merge conflicts
#[derive(Parser, Debug)]
#[command(name = "jasper_backgammon")]
#[command(about = "Replay and merge backgammon game comments", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Sync configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a comment file and print the resulting board
    Replay {
        /// Comment file, one roll or move per line
        file: PathBuf,
    },

    /// Print how the merge policy reads each line of a comment file
    Classify {
        /// Comment file, one roll or move per line
        file: PathBuf,
    },

    /// Try to auto-resolve three-way merge regions from a JSON file
    Resolve {
        /// JSON array of `{"ok": [...]}` and `{"conflict": {...}}` regions
        regions: PathBuf,
    },
}
