//! Rewind - two-player tic-tac-toe with time travel
//!
//! Plays in the terminal, or replays intent scripts headlessly.

#![warn(missing_docs)]

mod cli;
mod config;
mod script;
mod tui;

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::AppConfig;
use rewind_tictactoe::Session;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .context("Failed to load configuration")?
        .with_names(cli.player_one, cli.player_two);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config),
        Command::Script { input, json } => run_script(&config, &input, json),
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Runs the terminal UI, logging to a file so the screen stays clean.
fn run_play(config: &AppConfig) -> Result<()> {
    let log_file = File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(player_one = %config.player_one(), player_two = %config.player_two(), "Starting game");
    tui::run(config.player_names())
}

/// Replays a script from a file or stdin, logging to stderr.
fn run_script(config: &AppConfig, input: &str, json: bool) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(io::stderr)
        .try_init();

    let mut session = Session::new(config.player_names());
    let stdout = io::stdout().lock();

    if input == "-" {
        info!("Reading script from stdin");
        script::run(&mut session, io::stdin().lock(), stdout, json)
    } else {
        info!(input, "Reading script from file");
        let file = File::open(input).with_context(|| format!("Failed to open script {input}"))?;
        script::run(&mut session, BufReader::new(file), stdout, json)
    }
}
