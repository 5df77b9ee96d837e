//! Brick Breaker - threaded simulation core for a two-layer brick breaking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bricks, score, tick)
//! - `clock`: Background thread that ticks the simulation at a fixed pace
//! - `controller`: Facade owning the game state and the clock lifecycle
//! - `notify`: Change notifications for observers (the view)
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Data-driven game constants

pub mod audio;
pub mod clock;
pub mod controller;
pub mod notify;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, LogAudio, SilentAudio, SoundEffect};
pub use controller::GameController;
pub use notify::{ChangeNotifier, ModelChanged};
pub use settings::{BrickLayout, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const WIDTH: f32 = 600.0;
    pub const HEIGHT: f32 = 800.0;
    /// Border offset on the left, right and bottom
    pub const BORDER: f32 = 6.0;
    /// Menu bar height at the top
    pub const MENU: f32 = 40.0;

    /// Ball side
    pub const BALL_SIZE: f32 = 30.0;
    /// Units the ball moves along each axis per tick
    pub const BALL_SPEED: f32 = 3.0;

    /// Brick size
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 30.0;

    /// Distance to move the bat per command
    pub const BAT_MOVE: f32 = 10.0;

    /// Score deltas
    pub const HIT_BRICK: i64 = 200;
    pub const HIT_BOTTOM: i64 = -200;

    /// Pacing between ticks (milliseconds)
    pub const FAST_PACE_MS: u64 = 2;
    pub const NORMAL_PACE_MS: u64 = 20;

    /// Brick layout
    pub const BRICK_COLUMNS: usize = 8;
    pub const PRIMARY_ROWS: usize = 3;
    pub const REINFORCEMENT_ROWS: usize = 1;
    pub const BRICK_ORIGIN_X: f32 = 28.0;
    pub const BRICK_ORIGIN_Y: f32 = 100.0;
    pub const COLUMN_PITCH: f32 = 70.0;
    pub const ROW_PITCH: f32 = 40.0;
}
