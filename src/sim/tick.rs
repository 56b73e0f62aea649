//! Fixed step simulation
//!
//! Advances the grid by exactly one cell per call.

use serde::{Deserialize, Serialize};

use super::grid::Direction;
use super::state::{GameState, SessionState};

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// False once the snake has hit itself
    pub alive: bool,
    /// Food was consumed on this step
    pub ate: bool,
    /// Score after the step
    pub score: u32,
}

/// Advance the game state by one step.
///
/// `requested` replaces the heading unless it would reverse the heading
/// applied on the previous step, in which case it is dropped.
pub fn step(state: &mut GameState, requested: Option<Direction>) -> StepOutcome {
    if state.phase == SessionState::Stopped {
        return StepOutcome {
            alive: false,
            ate: false,
            score: state.score,
        };
    }

    if let Some(dir) = requested {
        if !dir.is_opposite(state.direction) {
            state.direction = dir;
        }
    }

    let next = state.board.neighbor(state.head(), state.direction);

    // The tail still counts: it has not moved out of the way yet.
    if state.occupies(next) {
        state.phase = SessionState::Stopped;
        log::debug!("Self-collision at ({}, {})", next.x, next.y);
        return StepOutcome {
            alive: false,
            ate: false,
            score: state.score,
        };
    }

    state.time_ticks += 1;
    state.snake.push_front(next);

    let ate = state.food == Some(next);
    if ate {
        state.score += 1;
        state.place_food();
    } else {
        state.snake.pop_back();
    }

    StepOutcome {
        alive: true,
        ate,
        score: state.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{Board, Cell};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn len(state: &GameState) -> usize {
        state.snake().len()
    }

    #[test]
    fn test_wrap_scenario() {
        let mut state = GameState::new(Board::new(24, 12), 5);
        state.set_snake(
            &[Cell::new(23, 5), Cell::new(22, 5), Cell::new(21, 5)],
            Direction::Right,
        );
        state.set_food(Cell::new(10, 10));

        let outcome = step(&mut state, None);
        assert!(outcome.alive);
        assert_eq!(state.head(), Cell::new(0, 5));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut state = GameState::new(Board::default(), 1);
        state.set_food(Cell::new(0, 0));

        step(&mut state, Some(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.head(), Cell::new(5, 6));
        assert!(state.is_running());
    }

    #[test]
    fn test_turn_applies() {
        let mut state = GameState::new(Board::default(), 1);
        state.set_food(Cell::new(0, 0));

        step(&mut state, Some(Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.head(), Cell::new(4, 5));
        // Down is now the reversal
        step(&mut state, Some(Direction::Down));
        assert_eq!(state.head(), Cell::new(4, 4));
    }

    #[test]
    fn test_growth_law() {
        let mut state = GameState::new(Board::default(), 1);
        state.set_food(Cell::new(5, 6));

        let before = len(&state);
        let outcome = step(&mut state, None);
        assert!(outcome.ate);
        assert_eq!(outcome.score, 1);
        assert_eq!(len(&state), before + 1);
        assert!(!state.occupies(state.food().unwrap()));

        state.set_food(Cell::new(0, 0));
        let outcome = step(&mut state, None);
        assert!(!outcome.ate);
        assert_eq!(outcome.score, 1);
        assert_eq!(len(&state), before + 1);
    }

    #[test]
    fn test_six_meals_reach_length_nine() {
        let mut state = GameState::new(Board::default(), 2024);
        for _ in 0..6 {
            let ahead = state.board().neighbor(state.head(), state.direction());
            state.set_food(ahead);
            assert!(step(&mut state, None).alive);
        }
        assert_eq!(state.score(), 6);
        assert_eq!(len(&state), 9);
    }

    #[test]
    fn test_self_collision_stops() {
        let mut state = GameState::new(Board::default(), 1);
        // A hook shape: turning down runs into (5, 7).
        state.set_snake(
            &[
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 7),
                Cell::new(5, 7),
                Cell::new(4, 7),
            ],
            Direction::Left,
        );
        state.set_food(Cell::new(0, 0));
        let before: Vec<_> = state.snake().iter().copied().collect();

        let outcome = step(&mut state, Some(Direction::Down));
        assert!(!outcome.alive);
        assert_eq!(state.phase(), SessionState::Stopped);
        let after: Vec<_> = state.snake().iter().copied().collect();
        assert_eq!(before, after);

        // Further steps are no-ops
        let outcome = step(&mut state, Some(Direction::Up));
        assert!(!outcome.alive);
        assert_eq!(state.time_ticks(), 0);
    }

    #[test]
    fn test_running_into_tail_is_fatal() {
        let mut state = GameState::new(Board::default(), 1);
        state.set_snake(
            &[
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Direction::Left,
        );
        state.set_food(Cell::new(0, 0));
        assert!(!step(&mut state, Some(Direction::Down)).alive);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Board::default(), 99999);
        let mut b = GameState::new(Board::default(), 99999);
        let inputs = [
            None,
            Some(Direction::Up),
            None,
            Some(Direction::Left),
            None,
            Some(Direction::Down),
        ];
        for _ in 0..20 {
            for input in inputs {
                step(&mut a, input);
                step(&mut b, input);
            }
        }
        assert_eq!(a.snake(), b.snake());
        assert_eq!(a.food(), b.food());
        assert_eq!(a.score(), b.score());
    }

    fn direction() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
        ]
    }

    proptest! {
        #[test]
        fn prop_no_duplicate_cells_while_running(
            seed in any::<u64>(),
            inputs in prop::collection::vec(direction(), 1..300),
        ) {
            let mut state = GameState::new(Board::default(), seed);
            for input in inputs {
                let before = state.direction();
                let outcome = step(&mut state, input);
                if input == Some(before.opposite()) {
                    prop_assert_eq!(state.direction(), before);
                }
                if !outcome.alive {
                    break;
                }
                let unique: HashSet<_> = state.snake().iter().collect();
                prop_assert_eq!(unique.len(), state.snake().len());
                if let Some(food) = state.food() {
                    prop_assert!(!state.occupies(food));
                }
            }
        }

        #[test]
        fn prop_length_tracks_score(
            seed in any::<u64>(),
            inputs in prop::collection::vec(direction(), 1..300),
        ) {
            let mut state = GameState::new(Board::default(), seed);
            for input in inputs {
                let score = state.score();
                let length = state.snake().len();
                let outcome = step(&mut state, input);
                if outcome.ate {
                    prop_assert_eq!(outcome.score, score + 1);
                    prop_assert_eq!(state.snake().len(), length + 1);
                } else {
                    prop_assert_eq!(outcome.score, score);
                    prop_assert_eq!(state.snake().len(), length);
                }
            }
        }
    }
}
