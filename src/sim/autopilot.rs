//! Idle/demo mode steering
//!
//! Picks a heading that closes the wrapped distance to the food while
//! avoiding any move that lands on the body. Used to feed input in the
//! headless demo; the simulation itself never calls it.

use super::grid::{Board, Cell, Direction};

/// Choose the next heading for a snake described by its cells (head first).
///
/// Returns `None` when staying on the current heading is already the best
/// option, so callers can skip sending input.
pub fn choose_direction(
    board: Board,
    snake: &[Cell],
    food: Option<Cell>,
    heading: Direction,
) -> Option<Direction> {
    let head = *snake.first()?;

    // The tail cell is still occupied on the step that would enter it.
    let safe = |dir: Direction| !snake.contains(&board.neighbor(head, dir));

    let candidates = Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(heading))
        .filter(|dir| safe(*dir));

    let best = match food {
        Some(food) => candidates.min_by_key(|dir| {
            let offset = board.wrapped_offset(board.neighbor(head, *dir), food);
            // Prefer keeping the heading on ties to avoid zig-zagging
            (offset.x.abs() + offset.y.abs(), *dir != heading)
        }),
        None => candidates.min_by_key(|dir| *dir != heading),
    };

    best.filter(|dir| *dir != heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(24, 12)
    }

    #[test]
    fn test_keeps_heading_toward_food() {
        let snake = [Cell::new(4, 6), Cell::new(3, 6), Cell::new(2, 6)];
        let choice = choose_direction(board(), &snake, Some(Cell::new(10, 6)), Direction::Right);
        assert_eq!(choice, None);
    }

    #[test]
    fn test_turns_toward_food() {
        let snake = [Cell::new(4, 6), Cell::new(3, 6), Cell::new(2, 6)];
        let choice = choose_direction(board(), &snake, Some(Cell::new(4, 2)), Direction::Right);
        assert_eq!(choice, Some(Direction::Up));
    }

    #[test]
    fn test_uses_wraparound() {
        let snake = [Cell::new(4, 1), Cell::new(3, 1), Cell::new(2, 1)];
        let choice = choose_direction(board(), &snake, Some(Cell::new(4, 11)), Direction::Right);
        assert_eq!(choice, Some(Direction::Up));
    }

    #[test]
    fn test_never_reverses() {
        let snake = [Cell::new(4, 6), Cell::new(3, 6), Cell::new(2, 6)];
        let choice = choose_direction(board(), &snake, Some(Cell::new(1, 6)), Direction::Right);
        assert_ne!(choice, Some(Direction::Left));
    }

    #[test]
    fn test_avoids_body() {
        // Food is straight up but the body occupies the cell above the head.
        let snake = [
            Cell::new(5, 6),
            Cell::new(6, 6),
            Cell::new(6, 5),
            Cell::new(5, 5),
            Cell::new(4, 5),
        ];
        let choice = choose_direction(board(), &snake, Some(Cell::new(5, 1)), Direction::Left);
        assert_ne!(choice, Some(Direction::Up));
    }
}
