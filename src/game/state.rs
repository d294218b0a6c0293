use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::heading::Heading;

/// A cell on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed board dimensions with toroidal coordinate arithmetic.
///
/// Every edge wraps to the opposite edge, so a unit step never leaves the
/// board and there is no out-of-bounds condition anywhere in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width as i32
            && cell.y >= 0
            && cell.y < self.height as i32
    }

    /// Maps arbitrary coordinates onto the board, wrapping both axes.
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell {
            x: x.rem_euclid(self.width as i32),
            y: y.rem_euclid(self.height as i32),
        }
    }

    /// The cell one unit step away in the given heading, with wrap.
    pub fn step(&self, cell: Cell, heading: Heading) -> Cell {
        let (dx, dy) = heading.delta();
        self.wrap(cell.x + dx, cell.y + dy)
    }

    /// The four toroidal neighbors of a cell, in heading probe order.
    pub fn neighbors(&self, cell: Cell) -> [Cell; 4] {
        Heading::ALL.map(|heading| self.step(cell, heading))
    }
}

/// The snake: an ordered run of cells, head first, tail last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Builds a snake from explicit cells, head first. `cells` must be
    /// non-empty; the configuration layer validates this before play.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake must have at least one cell");
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates the body from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Whether `cell` is occupied by the whole snake, tail included.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether `cell` is occupied by a segment that will still be there
    /// after the next move. The tail is about to vacate its cell, so it
    /// does not count; the engine's self-collision rule and the
    /// autopilot's obstacle set share this exact predicate.
    pub fn blocks(&self, cell: Cell) -> bool {
        let len = self.body.len();
        self.body.iter().take(len.saturating_sub(1)).any(|&c| c == cell)
    }

    /// Moves the head to `new_head`, growing by one segment when `grow` is
    /// set and dropping the tail otherwise.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

/// Whether the session is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: only a fresh reset returns the game to `Running`.
    GameOver,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Complete per-session game state.
///
/// Owned by one session driver and passed by reference to the engine for
/// ticking and to the renderer for drawing; nothing else holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub food: Cell,
    pub heading: Heading,
    pub score: u32,
    pub ticks: u32,
    pub status: GameStatus,
}

impl GameState {
    pub fn new(board: Board, snake: Snake, food: Cell, heading: Heading) -> Self {
        Self {
            board,
            snake,
            food,
            heading,
            score: 0,
            ticks: 0,
            status: GameStatus::Running,
        }
    }
}
