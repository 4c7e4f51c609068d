//! Core game logic module for Snake
//!
//! This module contains the whole simulation without any I/O or rendering
//! dependencies. The driver feeds one `TickInput` per frame to
//! `GameEngine::tick` and then reads the `GameState` to draw it.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, TickInput};
pub use config::GameConfig;
pub use engine::{GameEngine, TickResult};
pub use grid::{CellRegion, Grid};
pub use state::{
    CollisionType, Difficulty, Food, FoodKind, GameState, Phase, Position, Segment, SegmentTag,
    Snake,
};
