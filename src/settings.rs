//! Game settings
//!
//! Loaded once at startup (JSON) and fixed for the lifetime of a controller.
//! Only the speed tier can change while a game runs.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the bricks go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    /// Bricks per row (both layers)
    pub columns: usize,
    /// Rows of one-hit bricks below the reinforcement rows
    pub primary_rows: usize,
    /// Rows of two-hit bricks at the top of the field
    pub reinforcement_rows: usize,
    /// Top-left corner of the first brick
    pub origin_x: f32,
    pub origin_y: f32,
    /// Distance between brick origins
    pub column_pitch: f32,
    pub row_pitch: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            columns: BRICK_COLUMNS,
            primary_rows: PRIMARY_ROWS,
            reinforcement_rows: REINFORCEMENT_ROWS,
            origin_x: BRICK_ORIGIN_X,
            origin_y: BRICK_ORIGIN_Y,
            column_pitch: COLUMN_PITCH,
            row_pitch: ROW_PITCH,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub width: f32,
    pub height: f32,
    /// Border offset (left, right, bottom)
    pub border: f32,
    /// Menu bar offset (top)
    pub menu: f32,

    // === Objects ===
    pub ball_size: f32,
    /// Units per tick along each axis
    pub ball_speed: f32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Distance the bat moves per command
    pub bat_move: f32,
    pub layout: BrickLayout,

    // === Scoring ===
    pub brick_bonus: i64,
    pub bottom_penalty: i64,

    // === Pacing ===
    pub fast_pace_ms: u64,
    pub normal_pace_ms: u64,

    // === Audio ===
    /// Play sound cues
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            border: BORDER,
            menu: MENU,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            bat_move: BAT_MOVE,
            layout: BrickLayout::default(),

            brick_bonus: HIT_BRICK,
            bottom_penalty: HIT_BOTTOM,

            fast_pace_ms: FAST_PACE_MS,
            normal_pace_ms: NORMAL_PACE_MS,

            sound: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sleep between ticks for the given speed tier
    pub fn pace(&self, fast: bool) -> Duration {
        Duration::from_millis(if fast {
            self.fast_pace_ms
        } else {
            self.normal_pace_ms
        })
    }

    /// Bat size: three bricks wide, a quarter brick high
    pub fn bat_size(&self) -> Vec2 {
        Vec2::new(self.brick_width * 3.0, self.brick_height / 4.0)
    }

    /// Legal x-range for the bat's left edge
    pub fn bat_range(&self) -> (f32, f32) {
        let min = self.border;
        let max = (self.width - self.border - self.bat_size().x).max(min);
        (min, max)
    }

    /// Ball position at which each wall reflects it
    pub fn right_limit(&self) -> f32 {
        self.width - self.border - self.ball_size
    }

    pub fn left_limit(&self) -> f32 {
        self.border
    }

    pub fn bottom_limit(&self) -> f32 {
        self.height - self.border - self.ball_size
    }

    pub fn top_limit(&self) -> f32 {
        self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.border, 6.0);
        assert_eq!(settings.menu, 40.0);
        assert_eq!(settings.brick_bonus, 200);
        assert_eq!(settings.bottom_penalty, -200);
        assert_eq!(settings.layout.columns, 8);
        assert_eq!(settings.bat_size(), Vec2::new(150.0, 7.5));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "ball_speed": 5.0, "layout": { "primary_rows": 1 } }"#)
                .unwrap();
        assert_eq!(settings.ball_speed, 5.0);
        assert_eq!(settings.layout.primary_rows, 1);
        assert_eq!(settings.layout.columns, BRICK_COLUMNS);
        assert_eq!(settings.width, WIDTH);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Settings::from_json("{ width: nope }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_pace_tiers() {
        let settings = Settings::default();
        assert_eq!(settings.pace(true), Duration::from_millis(2));
        assert_eq!(settings.pace(false), Duration::from_millis(20));
    }

    #[test]
    fn test_bat_range() {
        let settings = Settings::default();
        assert_eq!(settings.bat_range(), (6.0, 444.0));
    }
}
