//! Driver configuration loaded from TOML.

use crate::driver::Strategy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use tzfe_engine::SessionConfig;

/// Everything the driver needs to run a game.
///
/// Session fields sit at the top level of the file next to the driver's own.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Engine parameters.
    #[serde(flatten)]
    session: SessionConfig,

    /// Seed for the engine and the move picker; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Upper bound on move requests per game.
    #[serde(default = "default_max_moves")]
    max_moves: u32,

    /// Score a personal best must beat.
    #[serde(default)]
    previous_high_score: u64,

    /// Move picker.
    #[serde(default)]
    strategy: Strategy,
}

fn default_max_moves() -> u32 {
    10_000
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            seed: None,
            max_moves: default_max_moves(),
            previous_high_score: 0,
            strategy: Strategy::default(),
        }
    }
}

impl DriverConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(dimension = *config.session.dimension(), "Config loaded successfully");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        dimension: Option<usize>,
        seed: Option<u64>,
        max_moves: Option<u32>,
        strategy: Option<Strategy>,
    ) -> Self {
        if let Some(dimension) = dimension {
            self.session = SessionConfig::new(dimension)
                .with_random_ratio(*self.session.random_ratio())
                .with_win_target(*self.session.win_target())
                .with_max_undos(*self.session.max_undos())
                .with_blank_value(*self.session.blank_value());
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(max_moves) = max_moves {
            self.max_moves = max_moves;
        }
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        self
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
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
