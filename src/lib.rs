//! Snake Milestone - a wrap-around Snake game with a score-triggered hook
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (snake, food, collisions, score)
//! - `session`: Fixed-tick session controller, input buffering, milestone arbitration
//! - `collaborator`: The external milestone action seen from the core
//! - `renderer`: Plain-text presentation of session snapshots
//! - `settings`: Board, timing and milestone configuration

pub mod collaborator;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use collaborator::{
    Collaborator, MilestoneError, MilestoneFuture, SimulatedSwap, SwapMode, SwapReceipt,
};
pub use session::{InputSignal, Session, SessionHandle, SessionRunner, Snapshot, SwapOutcome};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default board width in cells
    pub const COLS: i32 = 24;
    /// Default board height in cells
    pub const ROWS: i32 = 12;

    /// Fixed simulation period (ms)
    pub const TICK_MS: u64 = 120;

    /// Segments in a freshly spawned snake
    pub const INITIAL_SNAKE_LEN: usize = 3;
    /// Column of the initial head; the body trails to the left of it
    pub const INITIAL_HEAD_X: i32 = 4;

    /// Score at which the milestone hook fires
    pub const MILESTONE_THRESHOLD: u32 = 6;

    /// How long a settled swap outcome stays on screen (ms)
    pub const OUTCOME_DISPLAY_MS: u64 = 5_000;
    /// How long the "milestone reached" banner stays on screen (ms)
    pub const BANNER_DISPLAY_MS: u64 = 3_000;

    /// Random probes before food placement falls back to the free-cell list
    pub const FOOD_SAMPLE_ATTEMPTS: u32 = 64;
}
