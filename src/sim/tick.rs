//! Fixed-step simulation tick
//!
//! One tick resolves collisions against the ball's current position and
//! only then moves it, so a reflection takes effect before the next
//! displacement. Order: walls, one-hit bricks, reinforcement bricks, bat,
//! move.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the left, right or top wall
    WallBounce,
    /// Ball reached the bottom (penalty applied, ball reflected)
    BallLost,
    /// One-hit brick knocked out
    BrickBroken { index: usize },
    /// Reinforcement brick knocked out, leaving a one-hit brick behind
    BrickPromoted { index: usize, spawned: usize },
    /// Ball reflected off the bat
    BatBounce,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, settings: &Settings) -> Vec<GameEvent> {
    let mut events = Vec::new();

    bounce_off_walls(state, settings, &mut events);
    break_bricks(state, settings, &mut events);
    promote_reinforcements(state, settings, &mut events);

    if state.ball.overlaps(&state.bat) {
        state.ball.invert_y();
        events.push(GameEvent::BatBounce);
    }

    state.ball.advance(settings.ball_speed);
    state.ticks += 1;

    log::trace!(
        "tick {} ball=({:.1}, {:.1}) score={}",
        state.ticks,
        state.ball.x(),
        state.ball.y(),
        state.score()
    );

    events
}

/// Reflect off a wall only while heading into it, so each crossing flips
/// the direction once.
fn bounce_off_walls(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;

    if ball.x() >= settings.right_limit() && ball.dir.x > 0.0 {
        ball.invert_x();
        events.push(GameEvent::WallBounce);
    }
    if ball.x() <= settings.left_limit() && ball.dir.x < 0.0 {
        ball.invert_x();
        events.push(GameEvent::WallBounce);
    }
    if ball.y() >= settings.bottom_limit() && ball.dir.y > 0.0 {
        ball.invert_y();
        state.score.add(settings.bottom_penalty);
        log::debug!("Ball lost at x={:.1}, score {}", ball.x(), state.score.value());
        events.push(GameEvent::BallLost);
    }
    if ball.y() <= settings.top_limit() && ball.dir.y < 0.0 {
        ball.invert_y();
        events.push(GameEvent::WallBounce);
    }
}

/// Every visible brick under the ball is knocked out; several may go in one
/// tick and each flips the ball.
fn break_bricks(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;

    for (index, brick) in state.bricks.primary.iter_mut().enumerate() {
        if brick.is_visible() && brick.overlaps(ball) {
            brick.hide();
            ball.invert_y();
            state.score.add(settings.brick_bonus);
            events.push(GameEvent::BrickBroken { index });
        }
    }
}

/// Bricks spawned here land in the one-hit list after it has been checked,
/// so they can only be hit from the next tick on.
fn promote_reinforcements(
    state: &mut GameState,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    let hits: Vec<usize> = state
        .bricks
        .reinforcement
        .iter()
        .enumerate()
        .filter(|(_, brick)| brick.is_visible() && brick.overlaps(&state.ball))
        .map(|(index, _)| index)
        .collect();

    for index in hits {
        if let Some(spawned) = state.bricks.promote(index) {
            state.ball.invert_y();
            state.score.add(settings.brick_bonus);
            log::debug!("Reinforcement {} promoted to brick {}", index, spawned);
            events.push(GameEvent::BrickPromoted { index, spawned });
        }
    }
}
