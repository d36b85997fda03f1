//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic with owned-state tick transitions (game module)
//! - Pure scene capture and swappable ratatui skins (render module)
//! - Keyboard mapping (input module)
//! - Session stats (metrics module)
//! - The interactive tokio driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
