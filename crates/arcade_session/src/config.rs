//! Session configuration.

use super::difficulty::Difficulty;
use arcade_tictactoe::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings accepted from the collaborator layer.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Side the human plays. X moves first.
    #[serde(default = "default_human")]
    human: Player,

    /// Computer strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before the computer answers a human move, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Pause before the computer's opening move when it plays X.
    #[serde(default = "default_opening_delay_ms")]
    opening_delay_ms: u64,

    /// Seed for the computer's random choices. Entropy when unset.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_human() -> Player {
    Player::X
}

#[instrument]
fn default_think_delay_ms() -> u64 {
    400
}

#[instrument]
fn default_opening_delay_ms() -> u64 {
    600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human: default_human(),
            difficulty: Difficulty::default(),
            think_delay_ms: default_think_delay_ms(),
            opening_delay_ms: default_opening_delay_ms(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(human = %config.human, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML document.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Think delay as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Opening delay as a [`Duration`].
    pub fn opening_delay(&self) -> Duration {
        Duration::from_millis(self.opening_delay_ms)
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
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
