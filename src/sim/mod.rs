//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no clocks
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use grid::{Board, Cell, Direction};
pub use state::{GameState, SessionState};
pub use tick::{StepOutcome, step};
