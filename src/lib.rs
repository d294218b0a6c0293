//! snake_pilot - terminal snake on a wrap-around board
//!
//! This library provides:
//! - Core game logic on a toroidal grid (game module)
//! - An A* pathfinding autopilot (agent module)
//! - Keyboard input mapping (input module)
//! - Session statistics (metrics module)
//! - TUI rendering (render module)
//! - Human and autopilot execution modes (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
