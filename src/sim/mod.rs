//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module is pure and single-threaded:
//! - Fixed step per tick
//! - Stable iteration order (bricks are never removed)
//! - No threading, audio or rendering dependencies

pub mod bricks;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use bricks::BrickField;
pub use rect::{Colour, GameObj};
pub use score::Score;
pub use state::{BatDirection, GameState};
pub use tick::{GameEvent, tick};
