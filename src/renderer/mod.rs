//! Text rendering module
//!
//! Draws session snapshots as plain-text frames for terminals and logs.

pub mod text;

pub use text::{hud_line, render_frame, swap_line};
