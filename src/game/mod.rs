//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A host drives it with `tick` on a timer and `set_direction` on input, and draws
//! from `GameState::snapshot`.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickInfo};
pub use food::{FoodPlacer, RandomFood};
pub use state::{CollisionType, GameState, Phase, Position, Snake, Snapshot};
