//! Session controller
//!
//! Bridges real-time input and a fixed-rate clock to the simulation:
//! - `Session`: clock-free core (input slot, milestone flag, generation, outcome)
//! - `SessionRunner`: tokio driver (tick schedule, milestone task, display timers)
//! - `SessionHandle`: what the presentation layer holds

pub mod controller;
pub mod input;
pub mod runner;
pub mod snapshot;

pub use controller::{InputEffect, MilestoneTrigger, Session};
pub use input::InputSignal;
pub use runner::{Command, RunEnd, SessionHandle, SessionRunner};
pub use snapshot::{Snapshot, SwapOutcome};
