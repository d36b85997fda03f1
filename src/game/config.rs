use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest board that still fits a typical terminal
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells along each side of the square grid
    pub grid_size: usize,
    /// Length of the snake after a restart
    pub initial_snake_length: usize,
    /// Milliseconds between ticks
    pub tick_ms: u64,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            tick_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// The initial snake is laid out leftwards from the board centre, so its
    /// length is bounded by the distance from the centre to the left wall.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 3 {
            return Err(format!(
                "grid_size must be at least 3, got {}",
                self.grid_size
            ));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            ));
        }

        let max_length = self.grid_size / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(format!(
                "initial_snake_length must be in 1..={}, got {}",
                max_length, self.initial_snake_length
            ));
        }

        if self.tick_ms == 0 {
            return Err("tick_ms must be positive, got 0".to_string());
        }

        Ok(())
    }
}
