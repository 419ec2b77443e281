use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::state::Position;

/// Configuration for the game
///
/// Sizes are given in play-area units; the grid is derived by dividing
/// the play area by the cell size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the play area in units
    pub play_width: u32,
    /// Height of the play area in units
    pub play_height: u32,
    /// Size of one cell in units
    pub cell_size: u32,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Starting cell of the snake
    pub start_x: i32,
    pub start_y: i32,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_width: 600,
            play_height: 600,
            cell_size: 15,
            tick_interval_ms: 100,
            start_x: 5,
            start_y: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration whose grid is exactly `width` x `height` cells
    pub fn with_grid(width: u32, height: u32) -> Self {
        let defaults = Self::default();
        Self {
            play_width: width * defaults.cell_size,
            play_height: height * defaults.cell_size,
            ..defaults
        }
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Grid width in cells
    pub fn grid_width(&self) -> i32 {
        if self.cell_size == 0 {
            return 0;
        }
        (self.play_width / self.cell_size) as i32
    }

    /// Grid height in cells
    pub fn grid_height(&self) -> i32 {
        if self.cell_size == 0 {
            return 0;
        }
        (self.play_height / self.cell_size) as i32
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    /// Validate configuration parameters
    ///
    /// The engine assumes a non-empty grid that contains the starting cell,
    /// so hosts must call this before building one.
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 {
            return Err("cell_size must be at least 1".to_string());
        }

        if self.grid_width() <= 0 || self.grid_height() <= 0 {
            return Err(format!(
                "play area {}x{} holds no {}-unit cell",
                self.play_width, self.play_height, self.cell_size
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        let start = self.start();
        if start.x < 0
            || start.y < 0
            || start.x >= self.grid_width()
            || start.y >= self.grid_height()
        {
            return Err(format!(
                "start cell ({}, {}) lies outside the {}x{} grid",
                start.x,
                start.y,
                self.grid_width(),
                self.grid_height()
            ));
        }

        Ok(())
    }
}
