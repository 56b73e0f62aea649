//! Render-ready views of a session

use serde::{Deserialize, Serialize};

use crate::sim::{Board, Cell, Direction, SessionState};

/// Presentation-facing state of the milestone action
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SwapOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded { reference: String },
    Failed { reason: String },
    /// The collaborator was busy and refused to start
    Skipped { reason: String },
}

impl SwapOutcome {
    /// Settled outcomes are shown for a while, then revert to `Idle`
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SwapOutcome::Succeeded { .. } | SwapOutcome::Failed { .. } | SwapOutcome::Skipped { .. }
        )
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub tick: u64,
    pub board: Board,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub heading: Direction,
    pub score: u32,
    pub state: SessionState,
    pub swap: SwapOutcome,
    /// "Milestone reached" banner is visible
    pub banner: bool,
    pub milestone_threshold: u32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }
}
