//! Core game logic module for Snake
//!
//! Pure state transitions with no I/O or rendering: the driver owns a
//! `GameState`, hands it to `GameEngine::tick` once per period and gets the
//! next state back.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, TickOutcome};
pub use food::spawn_food;
pub use state::{CollisionType, GameState, Phase, Position, Snake};
