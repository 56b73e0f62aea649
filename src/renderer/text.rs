//! Plain-text frame rendering

use std::fmt::Write;

use crate::session::{Snapshot, SwapOutcome};

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Render one frame: HUD line, bordered grid, then status lines
pub fn render_frame(snapshot: &Snapshot) -> String {
    let board = snapshot.board;
    let width = board.cols.max(0) as usize;
    let height = board.rows.max(0) as usize;

    let mut grid = vec![vec![EMPTY; width]; height];
    if let Some(food) = snapshot.food {
        grid[food.y as usize][food.x as usize] = FOOD;
    }
    for (i, cell) in snapshot.snake.iter().enumerate() {
        grid[cell.y as usize][cell.x as usize] = if i == 0 { HEAD } else { BODY };
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", hud_line(snapshot));

    let border = format!("+{}+", "-".repeat(width));
    let _ = writeln!(out, "{}", border);
    for row in grid {
        let _ = writeln!(out, "|{}|", row.into_iter().collect::<String>());
    }
    let _ = writeln!(out, "{}", border);

    if snapshot.banner {
        let _ = writeln!(
            out,
            "{} points reached! Triggering swap...",
            snapshot.milestone_threshold
        );
    }
    if let Some(status) = swap_line(&snapshot.swap) {
        let _ = writeln!(out, "{}", status);
    }
    if snapshot.is_stopped() {
        let _ = writeln!(out, "Game over  [R] Restart  [Esc] Exit");
    }
    out
}

/// Score line shown above the grid
pub fn hud_line(snapshot: &Snapshot) -> String {
    format!("S:{}  Esc=Exit", snapshot.score)
}

/// Status line for the milestone action, if there is anything to show
pub fn swap_line(outcome: &SwapOutcome) -> Option<String> {
    match outcome {
        SwapOutcome::Idle => None,
        SwapOutcome::Pending => Some("Swap pending...".to_string()),
        SwapOutcome::Succeeded { reference } => Some(format!("Swap confirmed: {}", reference)),
        SwapOutcome::Failed { reason } => Some(format!("Swap failed: {}", reason)),
        SwapOutcome::Skipped { reason } => Some(format!("Swap skipped: {}", reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Board, Cell, Direction, SessionState};

    fn snapshot() -> Snapshot {
        Snapshot {
            generation: 0,
            tick: 3,
            board: Board::new(6, 3),
            snake: vec![Cell::new(2, 1), Cell::new(1, 1), Cell::new(0, 1)],
            food: Some(Cell::new(4, 0)),
            heading: Direction::Right,
            score: 2,
            state: SessionState::Running,
            swap: SwapOutcome::Idle,
            banner: false,
            milestone_threshold: 6,
        }
    }

    #[test]
    fn test_grid_layout() {
        let frame = render_frame(&snapshot());
        let lines: Vec<_> = frame.lines().collect();
        assert_eq!(lines[0], "S:2  Esc=Exit");
        assert_eq!(lines[1], "+------+");
        assert_eq!(lines[2], "|....*.|");
        assert_eq!(lines[3], "|oo@...|");
        assert_eq!(lines[4], "|......|");
        assert_eq!(lines[5], "+------+");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_status_lines() {
        let mut snap = snapshot();
        snap.banner = true;
        snap.swap = SwapOutcome::Succeeded {
            reference: "0xabc".into(),
        };
        snap.state = SessionState::Stopped;
        let frame = render_frame(&snap);
        assert!(frame.contains("6 points reached!"));
        assert!(frame.contains("Swap confirmed: 0xabc"));
        assert!(frame.contains("[R] Restart"));
    }

    #[test]
    fn test_idle_has_no_swap_line() {
        assert_eq!(swap_line(&SwapOutcome::Idle), None);
        assert_eq!(
            swap_line(&SwapOutcome::Skipped {
                reason: "busy".into()
            }),
            Some("Swap skipped: busy".to_string())
        );
    }
}
