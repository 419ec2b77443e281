//! Grid Snake - a tick-driven snake game
//!
//! This library provides:
//! - Core game engine (game module), free of I/O
//! - Terminal rendering (render module) and key mapping (input module)
//! - Session bookkeeping (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
