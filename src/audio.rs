//! Sound cues
//!
//! Fire-and-forget: the clock hands each cue to an [`AudioSink`] after the
//! tick is committed. A sink that fails is logged and ignored, it never
//! stops the game.

use thiserror::Error;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Brick knocked out (either layer)
    BrickBreak,
    /// Ball hits the bat
    Bounce,
}

impl SoundEffect {
    /// Cue for a tick event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickBroken { .. } | GameEvent::BrickPromoted { .. } => {
                Some(SoundEffect::BrickBreak)
            }
            GameEvent::BatBounce => Some(SoundEffect::Bounce),
            GameEvent::WallBounce | GameEvent::BallLost => None,
        }
    }

    /// Asset name a file-backed sink would load
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::BrickBreak => "break.wav",
            SoundEffect::Bounce => "bounce.wav",
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    Unavailable,
}

/// Something that can play sound cues
pub trait AudioSink: Send + Sync {
    fn play(&self, effect: SoundEffect) -> Result<(), AudioError>;
}

/// Play a cue, swallowing any failure
pub fn play_quietly(sink: &dyn AudioSink, effect: SoundEffect) {
    if let Err(err) = sink.play(effect) {
        log::debug!("Sound {:?} dropped: {}", effect, err);
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&self, _effect: SoundEffect) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Logs each cue instead of playing it (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&self, effect: SoundEffect) -> Result<(), AudioError> {
        log::info!("♪ {}", effect.file_name());
        Ok(())
    }
}
