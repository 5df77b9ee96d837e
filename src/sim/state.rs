//! Game state and core simulation types
//!
//! Everything the clock mutates and observers read lives here.

use serde::{Deserialize, Serialize};

use super::bricks::BrickField;
use super::rect::{Colour, GameObj};
use super::score::Score;
use crate::settings::Settings;

/// Bat move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatDirection {
    Left,
    Right,
}

impl BatDirection {
    /// Map an input sign (-1 / +1) to a direction; zero means no move
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign.signum() {
            -1 => Some(BatDirection::Left),
            1 => Some(BatDirection::Right),
            _ => None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            BatDirection::Left => -1.0,
            BatDirection::Right => 1.0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: GameObj,
    pub bat: GameObj,
    pub bricks: BrickField,
    pub score: Score,
    /// Completed ticks since the objects were created
    pub ticks: u64,
    /// Legal x-range for the bat's left edge
    bat_range: (f32, f32),
    bat_move: f32,
}

impl GameState {
    /// Create the objects that form the game
    pub fn new(settings: &Settings) -> Self {
        let bat_size = settings.bat_size();
        let ball = GameObj::new(
            settings.width / 2.0,
            settings.height / 2.0,
            settings.ball_size,
            settings.ball_size,
            Colour::Red,
        );
        let bat = GameObj::new(
            settings.width / 2.0,
            settings.height - settings.brick_height * 1.5,
            bat_size.x,
            bat_size.y,
            Colour::Gray,
        );

        Self {
            ball,
            bat,
            bricks: BrickField::layout(settings),
            score: Score::new(),
            ticks: 0,
            bat_range: settings.bat_range(),
            bat_move: settings.bat_move,
        }
    }

    /// Same as `new` but with an empty brick field
    #[cfg(test)]
    pub(crate) fn without_bricks(settings: &Settings) -> Self {
        let mut state = Self::new(settings);
        state.bricks = BrickField::default();
        state
    }

    /// Move the bat one step. A step that would leave the legal range snaps
    /// the bat to the nearest edge instead.
    pub fn move_bat(&mut self, direction: BatDirection) {
        let (min, max) = self.bat_range;
        let target = self.bat.x() + direction.sign() * self.bat_move;
        let next = target.clamp(min, max);
        log::debug!("Move bat {:?}: {:.2} -> {:.2}", direction, self.bat.x(), next);
        self.bat.pos.x = next;
    }

    pub fn bat_range(&self) -> (f32, f32) {
        self.bat_range
    }

    pub fn score(&self) -> i64 {
        self.score.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_initial_objects() {
        let state = GameState::new(&Settings::default());
        assert_eq!(state.ball.pos, Vec2::new(300.0, 400.0));
        assert_eq!(state.ball.dir, Vec2::ONE);
        assert_eq!(state.bat.pos, Vec2::new(300.0, 755.0));
        assert_eq!(state.bat.size(), Vec2::new(150.0, 7.5));
        assert_eq!(state.score(), 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.bricks.visible_count(), 32);
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(BatDirection::from_sign(-1), Some(BatDirection::Left));
        assert_eq!(BatDirection::from_sign(1), Some(BatDirection::Right));
        assert_eq!(BatDirection::from_sign(7), Some(BatDirection::Right));
        assert_eq!(BatDirection::from_sign(0), None);
    }

    #[test]
    fn test_bat_steps() {
        let mut state = GameState::new(&Settings::default());
        state.move_bat(BatDirection::Right);
        assert_eq!(state.bat.x(), 310.0);
        state.move_bat(BatDirection::Left);
        state.move_bat(BatDirection::Left);
        assert_eq!(state.bat.x(), 290.0);
    }

    #[test]
    fn test_bat_snaps_to_edges() {
        let mut state = GameState::new(&Settings::default());
        state.bat.pos.x = 440.0;
        state.move_bat(BatDirection::Right);
        assert_eq!(state.bat.x(), 444.0);
        state.move_bat(BatDirection::Right);
        assert_eq!(state.bat.x(), 444.0);

        state.bat.pos.x = 9.0;
        state.move_bat(BatDirection::Left);
        assert_eq!(state.bat.x(), 6.0);
    }

    proptest! {
        #[test]
        fn prop_bat_never_leaves_range(moves in prop::collection::vec(prop::bool::ANY, 0..200)) {
            let mut state = GameState::new(&Settings::default());
            let (min, max) = state.bat_range();
            for right in moves {
                let dir = if right { BatDirection::Right } else { BatDirection::Left };
                state.move_bat(dir);
                prop_assert!(state.bat.x() >= min && state.bat.x() <= max);
            }
        }

        #[test]
        fn prop_bat_reaches_and_holds_edge(extra in 0usize..20) {
            let mut state = GameState::new(&Settings::default());
            let (min, max) = state.bat_range();
            for _ in 0..(50 + extra) {
                state.move_bat(BatDirection::Right);
            }
            prop_assert_eq!(state.bat.x(), max);
            for _ in 0..(50 + extra) {
                state.move_bat(BatDirection::Left);
            }
            prop_assert_eq!(state.bat.x(), min);
        }
    }
}
