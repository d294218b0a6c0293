use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

use super::config::GameConfig;
use super::heading::Steering;
use super::state::{Board, Cell, GameState, GameStatus, Snake};

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick.
    pub ate_food: bool,
    /// Whether the game is over (either it just ended or it already was).
    pub game_over: bool,
}

/// The game engine that owns the rules: movement, collision, food.
///
/// State lives outside the engine and is passed to [`tick`](Self::tick) by
/// mutable reference, so callers can render or inspect it between ticks.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    board: Board,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create an engine with the given configuration and the thread-local RNG.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with an explicit RNG, for deterministic food spawns.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let board = config.board();
        Self { config, board, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Reset the game to the configured starting layout.
    pub fn reset(&self) -> GameState {
        GameState::new(
            self.board,
            Snake::from_cells(self.config.initial_snake.iter().copied()),
            self.config.initial_food,
            self.config.initial_heading,
        )
    }

    /// Execute one tick: steer, move the head one cell (wrapping at the
    /// edges), then resolve collision and food.
    pub fn tick(&mut self, state: &mut GameState, steer: Steering) -> TickOutcome {
        if !state.status.is_running() {
            return TickOutcome {
                ate_food: false,
                game_over: true,
            };
        }

        if let Steering::Turn(heading) = steer {
            state.heading = heading;
        }

        let new_head = self.board.step(state.snake.head(), state.heading);

        // The old tail vacates its cell this tick, so it is not an obstacle.
        if state.snake.blocks(new_head) {
            state.status = GameStatus::GameOver;
            state.ticks += 1;
            debug!(
                score = state.score,
                ticks = state.ticks,
                "snake ran into itself"
            );
            return TickOutcome {
                ate_food: false,
                game_over: true,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            debug!(score = state.score, food = ?state.food, "food eaten");
        }

        state.ticks += 1;

        TickOutcome {
            ate_food,
            game_over: false,
        }
    }

    /// Pick a uniformly random cell not occupied by the snake.
    fn spawn_food(&mut self, snake: &Snake) -> Cell {
        loop {
            let x = self.rng.gen_range(0..self.board.width()) as i32;
            let y = self.rng.gen_range(0..self.board.height()) as i32;
            let cell = Cell::new(x, y);

            if !snake.occupies(cell) {
                return cell;
            }
        }
    }
}
