//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Board;

/// Settings loading/validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Board, timing and milestone configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Columns
    pub cols: i32,
    /// Rows
    pub rows: i32,

    // === Timing ===
    /// Simulation period (ms)
    pub tick_ms: u64,
    /// How long a settled swap outcome is displayed (ms)
    pub outcome_display_ms: u64,
    /// How long the milestone banner is displayed (ms)
    pub banner_display_ms: u64,

    // === Milestone ===
    /// Score that triggers the milestone action
    pub milestone_threshold: u32,

    /// Fixed RNG seed for food placement (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,

            tick_ms: TICK_MS,
            outcome_display_ms: OUTCOME_DISPLAY_MS,
            banner_display_ms: BANNER_DISPLAY_MS,

            milestone_threshold: MILESTONE_THRESHOLD,

            seed: None,
        }
    }
}

impl Settings {
    pub fn board(&self) -> Board {
        Board::new(self.cols, self.rows)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn outcome_display(&self) -> Duration {
        Duration::from_millis(self.outcome_display_ms)
    }

    pub fn banner_display(&self) -> Duration {
        Duration::from_millis(self.banner_display_ms)
    }

    /// Reject boards the opening position cannot fit on and zero periods
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min_cols = INITIAL_HEAD_X + 1;
        if self.cols < min_cols || self.rows < 1 {
            return Err(SettingsError::Invalid(format!(
                "board must be at least {}x1, got {}x{}",
                min_cols, self.cols, self.rows
            )));
        }
        if self.board().area() <= INITIAL_SNAKE_LEN {
            return Err(SettingsError::Invalid(
                "board leaves no room for food".to_string(),
            ));
        }
        if self.tick_ms == 0 {
            return Err(SettingsError::Invalid("tick_ms must be positive".to_string()));
        }
        if self.milestone_threshold == 0 {
            return Err(SettingsError::Invalid(
                "milestone_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}
