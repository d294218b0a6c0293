use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::state::{Board, Cell};

/// Pixel canvas the classic layout was designed for, and the size of one
/// grid cell at that resolution. 800x600 at 40px per cell gives the 20x15
/// default board.
const CANVAS_SIZE: (usize, usize) = (800, 600);
const CELL_SCALE: usize = 40;

/// Default milliseconds between game ticks.
const TICK_INTERVAL_MS: u64 = 100;

/// Session configuration, injected once at session start.
///
/// The board dimensions and the initial layout are fixed for the whole
/// session; a new session takes a fresh config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Milliseconds between game ticks.
    pub tick_interval_ms: u64,
    /// Starting snake, head first.
    pub initial_snake: Vec<Cell>,
    /// Starting food cell.
    pub initial_food: Cell,
    /// Starting direction of travel.
    pub initial_heading: Heading,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE.0 / CELL_SCALE,
            height: CANVAS_SIZE.1 / CELL_SCALE,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_snake: vec![Cell::new(8, 7), Cell::new(8, 8)],
            initial_food: Cell::new(8, 3),
            initial_heading: Heading::Up,
        }
    }
}

impl GameConfig {
    /// Builds a config for an arbitrary board size, deriving a starting
    /// layout from it: a two-cell snake at the center heading up, food on
    /// the diagonally opposite side of the torus.
    pub fn sized(width: usize, height: usize) -> Self {
        let board = Board::new(width.max(1), height.max(1));
        let cx = (width / 2) as i32;
        let cy = (height / 2) as i32;
        let head = Cell::new(cx, cy);
        Self {
            width,
            height,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_snake: vec![head, board.wrap(cx, cy + 1)],
            initial_food: board.wrap(cx + (width / 2) as i32, cy + (height / 2) as i32),
            initial_heading: Heading::Up,
        }
    }

    /// Derives board dimensions from a pixel canvas and a cell scale.
    pub fn from_canvas(canvas_width: usize, canvas_height: usize, cell_scale: usize) -> Self {
        Self::sized(canvas_width / cell_scale, canvas_height / cell_scale)
    }

    /// A small board for tests.
    pub fn small() -> Self {
        Self::sized(10, 10)
    }

    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Rejects configurations the engine cannot run. Checked once at
    /// session start; nothing here can fail mid-game.
    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            bail!(
                "board must be at least 2x2 cells, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be at least 1ms");
        }
        if self.initial_snake.is_empty() {
            bail!("initial snake must have at least one cell");
        }
        let board = self.board();
        for &cell in &self.initial_snake {
            if !board.contains(cell) {
                bail!(
                    "initial snake cell ({}, {}) is outside the {}x{} board",
                    cell.x,
                    cell.y,
                    self.width,
                    self.height
                );
            }
        }
        for (i, &cell) in self.initial_snake.iter().enumerate() {
            if self.initial_snake[..i].contains(&cell) {
                bail!("initial snake overlaps itself at ({}, {})", cell.x, cell.y);
            }
        }
        if !board.contains(self.initial_food) {
            bail!(
                "initial food ({}, {}) is outside the {}x{} board",
                self.initial_food.x,
                self.initial_food.y,
                self.width,
                self.height
            );
        }
        if self.initial_snake.contains(&self.initial_food) {
            bail!("initial food sits on the snake");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_the_classic_layout() {
        let config = GameConfig::default();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 15);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.initial_snake, vec![Cell::new(8, 7), Cell::new(8, 8)]);
        assert_eq!(config.initial_food, Cell::new(8, 3));
        assert_eq!(config.initial_heading, Heading::Up);
        config.validate().unwrap();
    }

    #[test]
    fn test_canvas_derivation_matches_default_dimensions() {
        let config = GameConfig::from_canvas(800, 600, 40);
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 15);
        config.validate().unwrap();
    }

    #[test]
    fn test_sized_layouts_are_valid_down_to_tiny_boards() {
        for (w, h) in [(2, 2), (3, 2), (2, 5), (10, 10), (40, 3)] {
            let config = GameConfig::sized(w, h);
            config
                .validate()
                .unwrap_or_else(|e| panic!("sized({w}, {h}) invalid: {e}"));
        }
    }

    #[test]
    fn test_validate_rejects_degenerate_boards() {
        let mut config = GameConfig::default();
        config.width = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tick_interval() {
        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_snake() {
        let mut config = GameConfig::default();
        config.initial_snake.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_snake() {
        let mut config = GameConfig::default();
        config.initial_snake.push(Cell::new(25, 7));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlapping_snake() {
        let mut config = GameConfig::default();
        config.initial_snake = vec![Cell::new(3, 3), Cell::new(3, 4), Cell::new(3, 3)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_food_on_snake() {
        let mut config = GameConfig::default();
        config.initial_food = config.initial_snake[1];
        assert!(config.validate().is_err());
    }
}
