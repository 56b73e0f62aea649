//! Game state and core simulation types
//!
//! Everything the step function reads or writes lives here. Fields are
//! private to the `sim` module; callers get read-only views.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Board, Cell, Direction};
use crate::consts::*;

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Snake is moving
    #[default]
    Running,
    /// Snake ran into itself; terminal until restart
    Stopped,
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) board: Board,
    /// Head first, tail last
    pub(super) snake: VecDeque<Cell>,
    /// `None` only once the snake covers the whole board
    pub(super) food: Option<Cell>,
    /// Heading applied on the last completed step
    pub(super) direction: Direction,
    pub(super) score: u32,
    pub(super) phase: SessionState,
    /// Completed steps since the last restart
    pub(super) time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(board: Board, seed: u64) -> Self {
        let mut state = Self {
            seed,
            board,
            snake: initial_snake(board),
            food: None,
            direction: Direction::Right,
            score: 0,
            phase: SessionState::Running,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.place_food();
        state
    }

    /// Reset to the canonical opening position.
    ///
    /// Snake, heading, score and phase are identical no matter which state
    /// this is called from; only the food cell draws from the RNG again.
    pub fn restart(&mut self) {
        self.snake = initial_snake(self.board);
        self.direction = Direction::Right;
        self.score = 0;
        self.phase = SessionState::Running;
        self.time_ticks = 0;
        self.place_food();
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        // The snake is never empty: it starts at INITIAL_SNAKE_LEN and only grows.
        self.snake[0]
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> SessionState {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionState::Running
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// True if any snake segment sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Put food on a uniformly random free cell
    pub(super) fn place_food(&mut self) {
        self.food = self.sample_free_cell();
    }

    /// Rejection-sample a free cell, falling back to the explicit free list
    /// when the board is crowded. Both stages are uniform over free cells.
    fn sample_free_cell(&mut self) -> Option<Cell> {
        if self.snake.len() >= self.board.area() {
            return None;
        }

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let cell = Cell::new(
                self.rng.random_range(0..self.board.cols),
                self.rng.random_range(0..self.board.rows),
            );
            if !self.occupies(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self.board.cells().filter(|c| !self.occupies(*c)).collect();
        if free.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..free.len());
        Some(free[pick])
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, cells: &[Cell], direction: Direction) {
        self.snake = cells.iter().copied().collect();
        self.direction = direction;
    }
}

/// Three segments in the middle row, heading right
fn initial_snake(board: Board) -> VecDeque<Cell> {
    let y = board.rows / 2;
    (0..INITIAL_SNAKE_LEN as i32)
        .map(|i| Cell::new((INITIAL_HEAD_X - i).rem_euclid(board.cols), y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(Board::default(), 7);
        let snake: Vec<_> = state.snake().iter().copied().collect();
        assert_eq!(
            snake,
            vec![Cell::new(4, 6), Cell::new(3, 6), Cell::new(2, 6)]
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), SessionState::Running);
    }

    #[test]
    fn test_food_never_on_snake() {
        let mut state = GameState::new(Board::default(), 42);
        for _ in 0..500 {
            state.restart();
            let food = state.food().expect("board has free cells");
            assert!(state.board().contains(food));
            assert!(!state.occupies(food));
        }
    }

    #[test]
    fn test_restart_is_canonical() {
        let mut state = GameState::new(Board::default(), 3);
        state.set_snake(&[Cell::new(10, 2), Cell::new(10, 3)], Direction::Up);
        state.score = 4;
        state.phase = SessionState::Stopped;

        state.restart();
        let first: Vec<_> = state.snake().iter().copied().collect();
        let first_dir = state.direction();
        state.restart();
        let second: Vec<_> = state.snake().iter().copied().collect();

        assert_eq!(first, second);
        assert_eq!(first_dir, Direction::Right);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(state.is_running());
        assert!(!state.occupies(state.food().unwrap()));
    }

    #[test]
    fn test_crowded_board_falls_back_to_free_list() {
        // 5x1 board: three segments leave exactly two free cells.
        let mut state = GameState::new(Board::new(5, 1), 11);
        for _ in 0..200 {
            state.place_food();
            let food = state.food().unwrap();
            assert!(food == Cell::new(0, 0) || food == Cell::new(1, 0));
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut state = GameState::new(Board::new(3, 1), 1);
        state.place_food();
        assert_eq!(state.food(), None);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = GameState::new(Board::default(), 99999);
        let b = GameState::new(Board::default(), 99999);
        assert_eq!(a.food(), b.food());
    }
}
