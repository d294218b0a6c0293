use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::game::{Board, Cell, Heading, Snake};

/// Entry in the A* open set.
///
/// Ordering is reversed so the std max-heap pops the lowest `f` first;
/// equal `f` pops the oldest insertion first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u32,
    cell: Cell,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plans one heading per tick from a read-only game snapshot.
///
/// The plan is recomputed from scratch every tick, so the pathfinder holds
/// no state beyond the board dimensions.
pub struct Pathfinder {
    board: Board,
}

impl Pathfinder {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// Pick the next heading for the snake to reach the food.
    ///
    /// Follows the first step of an A* path when one exists; otherwise
    /// picks the first unblocked direction in a fixed probe order.
    pub fn next_heading(&self, snake: &Snake, food: Cell) -> Heading {
        let head = snake.head();
        let step = self
            .find_path(snake, head, food)
            .and_then(|path| path.get(1).copied())
            .and_then(|next| self.heading_between(head, next));

        match step {
            Some(heading) => heading,
            None => {
                debug!(head = ?head, food = ?food, "no path to food, picking a safe direction");
                self.fallback_heading(snake)
            }
        }
    }

    /// A* over the wrapped grid, unit cost per step. Cells covered by the
    /// snake are obstacles, except the tail, which vacates before the head
    /// arrives. Returns the full path, start and goal inclusive.
    fn find_path(&self, snake: &Snake, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        let mut open = BinaryHeap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, u32> = HashMap::new();
        let mut seq = 0u32;

        g_score.insert(start, 0);
        open.push(OpenNode {
            f: self.estimate(start, goal),
            g: 0,
            seq,
            cell: start,
        });

        while let Some(node) = open.pop() {
            if node.cell == goal {
                return Some(reconstruct_path(&came_from, start, goal));
            }
            // A cheaper route to this cell has been found since it was
            // queued; the entry is stale.
            if g_score.get(&node.cell).is_some_and(|&best| node.g > best) {
                continue;
            }

            for neighbor in self.board.neighbors(node.cell) {
                if snake.blocks(neighbor) {
                    continue;
                }
                let tentative = node.g + 1;
                if tentative < *g_score.get(&neighbor).unwrap_or(&u32::MAX) {
                    came_from.insert(neighbor, node.cell);
                    g_score.insert(neighbor, tentative);
                    seq += 1;
                    open.push(OpenNode {
                        f: tentative + self.estimate(neighbor, goal),
                        g: tentative,
                        seq,
                        cell: neighbor,
                    });
                }
            }
        }

        None
    }

    /// Planar Manhattan distance. Deliberately ignores wrap, so it can
    /// overestimate across an edge and the search then favors the planar
    /// route; the path is still valid, just not always the shortest.
    fn estimate(&self, a: Cell, b: Cell) -> u32 {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
    }

    /// Translate a one-cell step into a heading, treating a jump across
    /// the board edge the same as its one-cell equivalent.
    fn heading_between(&self, from: Cell, to: Cell) -> Option<Heading> {
        let w = self.board.width() as i32;
        let h = self.board.height() as i32;
        match (to.x - from.x, to.y - from.y) {
            (dx, 0) if dx == 1 || dx == -(w - 1) => Some(Heading::Right),
            (dx, 0) if dx == -1 || dx == w - 1 => Some(Heading::Left),
            (0, dy) if dy == 1 || dy == -(h - 1) => Some(Heading::Down),
            (0, dy) if dy == -1 || dy == h - 1 => Some(Heading::Up),
            _ => None,
        }
    }

    /// First direction whose next cell is not blocked, probed in the fixed
    /// order up, down, left, right. Up when everything is blocked.
    fn fallback_heading(&self, snake: &Snake) -> Heading {
        let head = snake.head();
        for heading in Heading::ALL {
            if !snake.blocks(self.board.step(head, heading)) {
                return heading;
            }
        }
        Heading::Up
    }
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Steering};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    fn single(head: Cell) -> Snake {
        Snake::from_cells([head])
    }

    #[test]
    fn test_open_nodes_pop_lowest_f_first_and_fifo_on_ties() {
        let mut heap = BinaryHeap::new();
        for (f, seq) in [(5, 0), (3, 1), (3, 2), (4, 3)] {
            heap.push(OpenNode {
                f,
                g: 0,
                seq,
                cell: cell(seq as i32, 0),
            });
        }

        let order: Vec<u32> = std::iter::from_fn(|| heap.pop()).map(|n| n.seq).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_beelines_to_food_on_an_open_board() {
        let pathfinder = Pathfinder::new(Board::new(5, 5));

        let heading = pathfinder.next_heading(&single(cell(0, 0)), cell(0, 2));

        assert_eq!(heading, Heading::Down);
    }

    #[test]
    fn test_reaches_nearby_food_in_exactly_two_ticks() {
        let config = GameConfig {
            width: 5,
            height: 5,
            tick_interval_ms: 100,
            initial_snake: vec![cell(0, 0)],
            initial_food: cell(0, 2),
            initial_heading: Heading::Down,
        };
        let mut engine = GameEngine::new(config);
        let pathfinder = Pathfinder::new(engine.board());
        let mut state = engine.reset();

        for _ in 0..2 {
            let heading = pathfinder.next_heading(&state.snake, state.food);
            engine.tick(&mut state, Steering::Turn(heading));
        }

        assert_eq!(state.snake.head(), cell(0, 2));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_takes_the_wrap_route_when_it_pops_first() {
        let pathfinder = Pathfinder::new(Board::new(8, 3));

        // Two steps left through the edge beat six steps right.
        assert_eq!(
            pathfinder.next_heading(&single(cell(0, 1)), cell(6, 1)),
            Heading::Left
        );
        assert_eq!(
            pathfinder.next_heading(&single(cell(7, 1)), cell(1, 1)),
            Heading::Right
        );
    }

    #[test]
    fn test_wrap_steps_translate_to_headings_on_both_axes() {
        let pathfinder = Pathfinder::new(Board::new(3, 8));

        assert_eq!(
            pathfinder.next_heading(&single(cell(1, 0)), cell(1, 6)),
            Heading::Up
        );
        assert_eq!(
            pathfinder.next_heading(&single(cell(1, 7)), cell(1, 1)),
            Heading::Down
        );
    }

    #[test]
    fn test_routes_around_the_body() {
        let mut engine = GameEngine::new(GameConfig {
            width: 5,
            height: 5,
            tick_interval_ms: 100,
            initial_snake: vec![cell(2, 2), cell(2, 3), cell(3, 3), cell(4, 3)],
            initial_food: cell(2, 4),
            initial_heading: Heading::Up,
        });
        let pathfinder = Pathfinder::new(engine.board());
        let mut state = engine.reset();

        // The body sits between head and food; the first move must sidestep.
        let first = pathfinder.next_heading(&state.snake, state.food);
        assert_eq!(first, Heading::Left);

        let mut ticks_to_food = 0;
        for _ in 0..10 {
            let heading = pathfinder.next_heading(&state.snake, state.food);
            let outcome = engine.tick(&mut state, Steering::Turn(heading));
            assert!(!outcome.game_over);
            ticks_to_food += 1;
            if outcome.ate_food {
                break;
            }
        }

        assert_eq!(ticks_to_food, 4);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_fallback_probes_down_when_up_is_blocked() {
        let pathfinder = Pathfinder::new(Board::new(5, 5));
        // Head walled in except straight down; food sealed off outside.
        let snake = Snake::from_cells([
            cell(2, 2),
            cell(2, 1),
            cell(1, 1),
            cell(1, 2),
            cell(1, 3),
            cell(1, 4),
            cell(2, 4),
            cell(3, 4),
            cell(3, 3),
            cell(3, 2),
            cell(3, 1),
        ]);

        assert_eq!(pathfinder.next_heading(&snake, cell(0, 0)), Heading::Down);
    }

    #[test]
    fn test_fallback_probes_left_when_up_and_down_are_blocked() {
        let pathfinder = Pathfinder::new(Board::new(5, 5));
        let snake = Snake::from_cells([
            cell(2, 2),
            cell(2, 1),
            cell(1, 1),
            cell(0, 1),
            cell(0, 2),
            cell(0, 3),
            cell(1, 3),
            cell(2, 3),
            cell(3, 3),
            cell(3, 2),
            cell(4, 2),
        ]);

        assert_eq!(pathfinder.next_heading(&snake, cell(4, 4)), Heading::Left);
    }

    #[test]
    fn test_fallback_defaults_up_when_fully_enclosed() {
        let pathfinder = Pathfinder::new(Board::new(5, 5));
        let snake = Snake::from_cells([
            cell(2, 2),
            cell(2, 1),
            cell(1, 1),
            cell(1, 2),
            cell(1, 3),
            cell(2, 3),
            cell(3, 3),
            cell(3, 2),
            cell(3, 1),
        ]);

        assert_eq!(pathfinder.next_heading(&snake, cell(0, 0)), Heading::Up);
    }

    #[test]
    fn test_head_already_on_food_falls_back_safely() {
        let pathfinder = Pathfinder::new(Board::new(5, 5));
        let snake = Snake::from_cells([cell(2, 2), cell(2, 3)]);

        // Food on the head never happens in play; the API must still answer.
        assert_eq!(pathfinder.next_heading(&snake, cell(2, 2)), Heading::Up);
    }

    fn torus_manhattan(board: Board, a: Cell, b: Cell) -> u32 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        dx.min(board.width() as u32 - dx) + dy.min(board.height() as u32 - dy)
    }

    proptest! {
        #[test]
        fn estimate_never_undershoots_the_wrapped_distance(
            w in 2usize..=12,
            h in 2usize..=12,
            ax in 0i32..12,
            ay in 0i32..12,
            bx in 0i32..12,
            by in 0i32..12,
        ) {
            let board = Board::new(w, h);
            let a = board.wrap(ax, ay);
            let b = board.wrap(bx, by);
            let pathfinder = Pathfinder::new(board);

            prop_assert!(torus_manhattan(board, a, b) <= pathfinder.estimate(a, b));
        }

        #[test]
        fn autopilot_reaches_food_on_an_open_board(
            w in 2usize..=10,
            h in 2usize..=10,
            sx in 0i32..10,
            sy in 0i32..10,
            fx in 0i32..10,
            fy in 0i32..10,
        ) {
            let board = Board::new(w, h);
            let start = board.wrap(sx, sy);
            let food = board.wrap(fx, fy);
            prop_assume!(start != food);

            let config = GameConfig {
                width: w,
                height: h,
                tick_interval_ms: 100,
                initial_snake: vec![start],
                initial_food: food,
                initial_heading: Heading::Up,
            };
            let mut engine = GameEngine::with_rng(config, StdRng::seed_from_u64(1));
            let pathfinder = Pathfinder::new(engine.board());
            let mut state = engine.reset();

            let mut reached = false;
            for _ in 0..(w * h + w + h) {
                let heading = pathfinder.next_heading(&state.snake, state.food);
                let outcome = engine.tick(&mut state, Steering::Turn(heading));
                prop_assert!(!outcome.game_over);
                if outcome.ate_food {
                    reached = true;
                    break;
                }
            }
            prop_assert!(reached);
        }
    }
}
