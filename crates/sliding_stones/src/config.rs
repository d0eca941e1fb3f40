//! Puzzle configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sliding_stones_core::{DEFAULT_CELL_SIZE_PX, Layout, StoreSettings, WIN_SETTLE_DELAY};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Smallest pointer travel, in pixels, that counts as a swipe.
pub const MIN_DRAG_DISTANCE_PX: f64 = 30.0;

/// Tunables for a play session.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Pixel size of one board cell.
    #[serde(default = "default_cell_size_px")]
    cell_size_px: f64,

    /// Swipe threshold in pixels.
    #[serde(default = "default_min_drag_distance_px")]
    min_drag_distance_px: f64,

    /// Settle delay before a win is latched, in milliseconds.
    #[serde(default = "default_win_settle_ms")]
    win_settle_ms: u64,

    /// Starting arrangement.
    #[serde(default)]
    layout: Layout,
}

fn default_cell_size_px() -> f64 {
    DEFAULT_CELL_SIZE_PX
}

fn default_min_drag_distance_px() -> f64 {
    MIN_DRAG_DISTANCE_PX
}

fn default_win_settle_ms() -> u64 {
    WIN_SETTLE_DELAY.as_millis() as u64
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            cell_size_px: default_cell_size_px(),
            min_drag_distance_px: default_min_drag_distance_px(),
            win_settle_ms: default_win_settle_ms(),
            layout: Layout::default(),
        }
    }
}

impl PuzzleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(layout = %config.layout, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the starting layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Settle delay as a duration.
    pub fn win_settle_delay(&self) -> Duration {
        Duration::from_millis(self.win_settle_ms)
    }

    /// Settings handed to the game store.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings::new(self.cell_size_px, self.win_settle_delay())
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size_px.is_finite() || self.cell_size_px <= 0.0 {
            return Err(ConfigError::new(format!(
                "cell_size_px must be a positive number, got {}",
                self.cell_size_px
            )));
        }
        if !self.min_drag_distance_px.is_finite() || self.min_drag_distance_px < 0.0 {
            return Err(ConfigError::new(format!(
                "min_drag_distance_px must be zero or more, got {}",
                self.min_drag_distance_px
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
