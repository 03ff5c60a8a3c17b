//! Command-line interface for rewind.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rewind - tic-tac-toe with time travel and a running scoreboard
#[derive(Parser, Debug)]
#[command(name = "rewind")]
#[command(about = "Two-player tic-tac-toe with move history and scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "rewind.toml")]
    pub config: PathBuf,

    /// Name for player one (overrides the config file)
    #[arg(long, global = true)]
    pub player_one: Option<String>,

    /// Name for player two (overrides the config file)
    #[arg(long, global = true)]
    pub player_two: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Run intents from a file without a UI
    ///
    /// One intent per line: `start`, `click N`, `jump N`, `reset`,
    /// `name 1|2 TEXT`, `show`. Blank lines and `#` comments are skipped;
    /// a `name` line keeps everything after the seat, `#` included.
    Script {
        /// Script file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}
