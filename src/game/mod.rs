//! Core game logic for the toroidal snake game
//!
//! Everything in here is pure state and rules with no I/O or rendering
//! dependencies, so it can be driven by a human, by the pathfinding agent,
//! or directly from tests.

pub mod config;
pub mod engine;
pub mod heading;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use heading::{Heading, Steering};
pub use state::{Board, Cell, GameState, GameStatus, Snake};
