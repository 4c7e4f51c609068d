use std::ops::Range;

use super::{
    config::GameConfig,
    state::{Difficulty, Position},
};

/// Square-cell partition of the playfield.
///
/// The field is rarely an exact multiple of the cell size, so the grid is
/// shifted by half of the remainder on each axis to sit centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cell_size: i32,
    pub cols: i32,
    pub rows: i32,
    pub offset: Position,
}

/// A rectangular block of cells, in column/row indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRegion {
    pub cols: Range<i32>,
    pub rows: Range<i32>,
}

impl CellRegion {
    pub fn cell_count(&self) -> usize {
        self.cols.len() * self.rows.len()
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.cols.contains(&col) && self.rows.contains(&row)
    }

    /// All (col, row) pairs, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| (col, row)))
    }
}

impl Grid {
    pub fn new(config: &GameConfig) -> Self {
        let cell = config.cell_size;
        Self {
            cell_size: cell,
            cols: config.cols(),
            rows: config.rows(),
            offset: Position::new(
                (config.field_width % cell) / 2,
                (config.field_height % cell) / 2,
            ),
        }
    }

    /// Top-left corner of a cell in field units
    pub fn cell_origin(&self, col: i32, row: i32) -> Position {
        Position::new(
            self.offset.x + col * self.cell_size,
            self.offset.y + row * self.cell_size,
        )
    }

    /// Cell containing a position; may lie outside the grid
    pub fn cell_of(&self, pos: Position) -> (i32, i32) {
        (
            (pos.x - self.offset.x).div_euclid(self.cell_size),
            (pos.y - self.offset.y).div_euclid(self.cell_size),
        )
    }

    pub fn min_x(&self) -> i32 {
        self.offset.x
    }

    pub fn max_x(&self) -> i32 {
        self.offset.x + (self.cols - 1) * self.cell_size
    }

    pub fn min_y(&self) -> i32 {
        self.offset.y
    }

    pub fn max_y(&self) -> i32 {
        self.offset.y + (self.rows - 1) * self.cell_size
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.min_x()..=self.max_x()).contains(&pos.x)
            && (self.min_y()..=self.max_y()).contains(&pos.y)
    }

    /// True when x lies in (or beyond) a side wall `inset` cells thick
    pub fn in_side_wall(&self, x: i32, inset: i32) -> bool {
        let band = inset * self.cell_size;
        x < self.min_x() + band || x > self.max_x() - band
    }

    /// True when y lies in (or beyond) a top/bottom wall `inset` cells thick
    pub fn in_end_wall(&self, y: i32, inset: i32) -> bool {
        let band = inset * self.cell_size;
        y < self.min_y() + band || y > self.max_y() - band
    }

    /// Cells food may appear in; lethal walls are excluded
    pub fn spawn_region(&self, difficulty: Difficulty, inset: i32) -> CellRegion {
        let all_cols = 0..self.cols;
        let all_rows = 0..self.rows;
        let inner_cols = inset..self.cols - inset;
        let inner_rows = inset..self.rows - inset;

        match difficulty {
            Difficulty::Easy => CellRegion {
                cols: all_cols,
                rows: all_rows,
            },
            Difficulty::Medium => CellRegion {
                cols: inner_cols,
                rows: all_rows,
            },
            Difficulty::Hard => CellRegion {
                cols: inner_cols,
                rows: inner_rows,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_centered() {
        let grid = Grid::new(&GameConfig::default());
        assert_eq!(grid.cols, 25);
        assert_eq!(grid.rows, 12);
        // 800 % 31 = 25, 388 % 31 = 16
        assert_eq!(grid.offset, Position::new(12, 8));
        assert_eq!(grid.max_x(), 12 + 24 * 31);
        assert_eq!(grid.max_y(), 8 + 11 * 31);
    }

    #[test]
    fn test_cell_round_trip() {
        let grid = Grid::new(&GameConfig::default());
        let origin = grid.cell_origin(3, 7);
        assert_eq!(origin, Position::new(12 + 93, 8 + 217));
        assert_eq!(grid.cell_of(origin), (3, 7));
        assert_eq!(grid.cell_of(origin.moved_by(30, 30)), (3, 7));
        assert_eq!(grid.cell_of(Position::new(0, 0)), (-1, -1));
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(&GameConfig::small());
        assert!(grid.contains(grid.cell_origin(0, 0)));
        assert!(grid.contains(grid.cell_origin(9, 7)));
        assert!(!grid.contains(grid.cell_origin(10, 0)));
        assert!(!grid.contains(grid.cell_origin(0, -1)));
    }

    #[test]
    fn test_wall_bands() {
        let grid = Grid::new(&GameConfig::small());
        assert!(grid.in_side_wall(grid.cell_origin(0, 3).x, 1));
        assert!(grid.in_side_wall(grid.cell_origin(9, 3).x, 1));
        assert!(!grid.in_side_wall(grid.cell_origin(1, 3).x, 1));
        assert!(!grid.in_side_wall(grid.cell_origin(0, 3).x, 0));
        assert!(grid.in_side_wall(grid.cell_origin(-1, 3).x, 0));

        assert!(grid.in_end_wall(grid.cell_origin(4, 7).y, 1));
        assert!(!grid.in_end_wall(grid.cell_origin(4, 6).y, 1));
    }

    #[test]
    fn test_spawn_regions() {
        let grid = Grid::new(&GameConfig::small());

        let easy = grid.spawn_region(Difficulty::Easy, 1);
        assert_eq!(easy.cell_count(), 80);
        assert!(easy.contains(0, 0));

        let medium = grid.spawn_region(Difficulty::Medium, 1);
        assert_eq!(medium.cell_count(), 8 * 8);
        assert!(!medium.contains(0, 4));
        assert!(medium.contains(1, 0));

        let hard = grid.spawn_region(Difficulty::Hard, 1);
        assert_eq!(hard.cell_count(), 8 * 6);
        assert!(!hard.contains(1, 0));
        assert_eq!(hard.cells().count(), hard.cell_count());
    }
}
