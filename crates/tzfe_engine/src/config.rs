//! Session configuration.

use crate::error::EngineError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest playable board edge.
pub const MIN_DIMENSION: usize = 2;
/// Sanity ceiling on the board edge.
pub const MAX_DIMENSION: usize = 100;
/// The value stored in a blank cell.
pub const BLANK_TILE: u32 = 0;

/// Immutable parameters of one session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Board edge length.
    #[serde(default = "default_dimension")]
    dimension: usize,

    /// Value of a blank cell. Only 0 is accepted.
    #[serde(default = "default_blank_value")]
    blank_value: u32,

    /// Percent chance that a random spawn is a 2 rather than a 4. Anything
    /// above 100 always spawns a 2.
    #[serde(default = "default_random_ratio")]
    random_ratio: u32,

    /// Tile value that counts as a win. Reached by any tile at or above it.
    #[serde(default = "default_win_target")]
    win_target: u32,

    /// How many moves can be taken back.
    #[serde(default = "default_max_undos")]
    max_undos: usize,
}

fn default_dimension() -> usize {
    4
}

fn default_blank_value() -> u32 {
    BLANK_TILE
}

fn default_random_ratio() -> u32 {
    70
}

fn default_win_target() -> u32 {
    2048
}

fn default_max_undos() -> usize {
    5
}

impl SessionConfig {
    /// Creates a configuration with default values for the given dimension.
    #[instrument]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Sets the spawn ratio.
    pub fn with_random_ratio(mut self, random_ratio: u32) -> Self {
        self.random_ratio = random_ratio;
        self
    }

    /// Sets the win target.
    pub fn with_win_target(mut self, win_target: u32) -> Self {
        self.win_target = win_target;
        self
    }

    /// Sets the undo depth.
    pub fn with_max_undos(mut self, max_undos: usize) -> Self {
        self.max_undos = max_undos;
        self
    }

    /// Sets the blank value.
    pub fn with_blank_value(mut self, blank_value: u32) -> Self {
        self.blank_value = blank_value;
        self
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfiguration` error naming the first bad field.
    #[instrument(skip(self), fields(dimension = self.dimension))]
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.dimension < MIN_DIMENSION {
            return Err(EngineError::invalid_configuration(format!(
                "board dimension {} is below the minimum of {}",
                self.dimension, MIN_DIMENSION
            )));
        }
        if self.dimension > MAX_DIMENSION {
            return Err(EngineError::invalid_configuration(format!(
                "board dimension {} exceeds the maximum of {}",
                self.dimension, MAX_DIMENSION
            )));
        }
        if self.blank_value != BLANK_TILE {
            return Err(EngineError::invalid_configuration(format!(
                "blank value must be {}, got {}",
                BLANK_TILE, self.blank_value
            )));
        }
        debug!("Session configuration is valid");
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            blank_value: default_blank_value(),
            random_ratio: default_random_ratio(),
            win_target: default_win_target(),
            max_undos: default_max_undos(),
        }
    }
}
