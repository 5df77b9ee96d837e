//! Brick field: one-hit bricks plus a reinforcement layer
//!
//! A reinforcement brick is a two-hit brick without a hit counter: the first
//! hit hides it and drops a fresh one-hit brick in its place. Bricks are
//! never removed from either list, so indices stay stable for drawing.

use serde::{Deserialize, Serialize};

use super::rect::{Colour, GameObj};
use crate::settings::Settings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrickField {
    /// One-hit bricks (including promoted ones, appended at the end)
    pub primary: Vec<GameObj>,
    /// Second-layer bricks
    pub reinforcement: Vec<GameObj>,
}

impl BrickField {
    /// Lay out the starting field: reinforcement rows on top, primary rows
    /// immediately below, each row one pitch further down.
    pub fn layout(settings: &Settings) -> Self {
        let layout = &settings.layout;
        let mut field = Self::default();
        let mut y = layout.origin_y;

        for _ in 0..layout.reinforcement_rows {
            field.reinforcement.extend(Self::row(settings, y, Colour::DarkGray));
            y += layout.row_pitch;
        }
        for _ in 0..layout.primary_rows {
            field.primary.extend(Self::row(settings, y, Colour::Blue));
            y += layout.row_pitch;
        }

        field
    }

    fn row(settings: &Settings, y: f32, colour: Colour) -> impl Iterator<Item = GameObj> + '_ {
        let layout = &settings.layout;
        (0..layout.columns).map(move |col| {
            GameObj::new(
                layout.origin_x + col as f32 * layout.column_pitch,
                y,
                settings.brick_width,
                settings.brick_height,
                colour,
            )
        })
    }

    /// Hide reinforcement brick `index` and spawn a visible one-hit brick at
    /// its coordinates. Returns the index of the spawned brick, or `None` if
    /// the brick does not exist or was already hit.
    pub fn promote(&mut self, index: usize) -> Option<usize> {
        let brick = self.reinforcement.get_mut(index)?;
        if !brick.is_visible() {
            return None;
        }
        brick.hide();
        let spawned = GameObj::new(
            brick.x(),
            brick.y(),
            brick.width(),
            brick.height(),
            Colour::Blue,
        );
        self.primary.push(spawned);
        Some(self.primary.len() - 1)
    }

    /// Visible bricks across both layers
    pub fn visible_count(&self) -> usize {
        self.primary
            .iter()
            .chain(&self.reinforcement)
            .filter(|b| b.is_visible())
            .count()
    }

    /// True once every brick in both layers has been knocked out
    pub fn is_cleared(&self) -> bool {
        self.visible_count() == 0
    }
}
