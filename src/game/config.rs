use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Score at which the game promotes to side walls
pub const TIER_TWO_SCORE: u32 = 7;
/// Score at which all four walls become lethal
pub const TIER_THREE_SCORE: u32 = 15;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in field units
    pub field_width: i32,
    /// Height of the playfield in field units (the HUD lives below it)
    pub field_height: i32,
    /// Edge length of one square cell in field units
    pub cell_size: i32,
    /// Maximum number of snake segments
    pub max_length: usize,
    /// Ticks between two movement steps
    pub move_interval: u64,
    /// Ticks between two openings of the bonus food gate
    pub bonus_interval: u64,
    /// Thickness of lethal walls, in cells
    pub wall_inset: i32,
    /// Target ticks per second for the driver loop
    pub tick_rate: u32,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 450 - 31 * 2,
            cell_size: 31,
            max_length: 256,
            move_interval: 5,
            bonus_interval: 40,
            wall_inset: 1,
            tick_rate: 35,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Small 10x8 field for tests, movement every tick
    pub fn small() -> Self {
        Self {
            field_width: 100,
            field_height: 80,
            cell_size: 10,
            move_interval: 1,
            bonus_interval: 8,
            ..Default::default()
        }
    }

    /// Number of grid columns
    pub fn cols(&self) -> i32 {
        self.field_width / self.cell_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.field_height / self.cell_size
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(
            self.cols() >= 3 && self.rows() >= 3,
            "field must hold at least 3x3 cells, got {}x{}",
            self.cols(),
            self.rows()
        );
        ensure!(self.wall_inset >= 0, "wall_inset must not be negative");
        ensure!(
            self.cols() > 2 * self.wall_inset && self.rows() > 2 * self.wall_inset,
            "wall_inset {} leaves no interior cells",
            self.wall_inset
        );
        ensure!(self.max_length >= 1, "max_length must be at least 1");
        ensure!(self.move_interval > 0, "move_interval must be positive");
        ensure!(self.bonus_interval > 0, "bonus_interval must be positive");
        ensure!(self.tick_rate > 0, "tick_rate must be positive");
        Ok(())
    }

    /// Load a configuration override from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}
