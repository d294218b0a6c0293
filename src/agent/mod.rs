//! Autopilot decision making
//!
//! Turns a read-only game snapshot into one heading per tick: A* toward
//! the food over the wrapped grid, with a fixed-order safe fallback when
//! no path exists.

pub mod pathfinder;

pub use pathfinder::Pathfinder;
