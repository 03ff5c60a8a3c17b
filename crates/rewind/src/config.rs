//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use rewind_tictactoe::PlayerNames;

/// Settings read from `rewind.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name shown for seat one.
    #[serde(default = "default_player_one")]
    player_one: String,

    /// Name shown for seat two.
    #[serde(default = "default_player_two")]
    player_two: String,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_player_one() -> String {
    PlayerNames::DEFAULT_ONE.to_string()
}

#[instrument]
fn default_player_two() -> String {
    PlayerNames::DEFAULT_TWO.to_string()
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("rewind.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            player_one: default_player_one(),
            player_two: default_player_two(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(player_one = %config.player_one, player_two = %config.player_two, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line name overrides.
    pub fn with_names(mut self, player_one: Option<String>, player_two: Option<String>) -> Self {
        if let Some(name) = player_one {
            self.player_one = name;
        }
        if let Some(name) = player_two {
            self.player_two = name;
        }
        self
    }

    /// Seat names for a new session.
    pub fn player_names(&self) -> PlayerNames {
        let mut names = PlayerNames::default();
        names.set(rewind_tictactoe::Seat::One, self.player_one.as_str());
        names.set(rewind_tictactoe::Seat::Two, self.player_two.as_str());
        names
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
