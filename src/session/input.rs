//! Input signals and their keyboard/pointer mappings

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Direction;

/// Everything the input surface can say to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSignal {
    /// Request a heading for the next tick
    Move(Direction),
    /// Leave the game immediately
    Exit,
}

impl InputSignal {
    /// Map a key name (as reported by the platform) to a signal.
    ///
    /// Arrow keys and WASD steer, Escape exits. Case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        let signal = match key.to_lowercase().as_str() {
            "arrowup" | "up" | "w" => InputSignal::Move(Direction::Up),
            "arrowdown" | "down" | "s" => InputSignal::Move(Direction::Down),
            "arrowleft" | "left" | "a" => InputSignal::Move(Direction::Left),
            "arrowright" | "right" | "d" => InputSignal::Move(Direction::Right),
            "escape" | "esc" => InputSignal::Exit,
            _ => return None,
        };
        Some(signal)
    }

    /// Map a pointer press to a heading by the dominant axis of its offset
    /// from the centre of the input surface (screen coords, y down).
    ///
    /// Horizontal wins only when strictly larger; a press dead centre is ignored.
    pub fn from_pointer(offset: Vec2) -> Option<Self> {
        let dir = if offset.x.abs() > offset.y.abs() {
            if offset.x < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if offset.y < 0.0 {
            Direction::Up
        } else if offset.y > 0.0 {
            Direction::Down
        } else {
            return None;
        };
        Some(InputSignal::Move(dir))
    }

    /// Pointer position relative to a surface of `size`, origin top-left
    pub fn from_pointer_on_surface(pos: Vec2, size: Vec2) -> Option<Self> {
        Self::from_pointer(pos - size / 2.0)
    }
}
