//! Snake Arcade - a single-screen snake game with difficulty tiers
//!
//! This library provides:
//! - Core simulation (game module), deterministic given a seed
//! - Key mapping for the terminal (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive driver loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
