//! Game controller
//!
//! The one place input, the view and the clock meet. The controller owns the
//! game state behind a single lock; the clock borrows it for each tick and
//! observers only ever get copies.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::audio::{AudioSink, SilentAudio};
use crate::clock::{ClockError, ClockHandle, SharedState, SimulationClock};
use crate::notify::{ChangeNotifier, ModelChanged};
use crate::settings::Settings;
use crate::sim::{BatDirection, GameObj, GameState};

pub struct GameController {
    settings: Arc<Settings>,
    state: SharedState,
    notifier: Arc<ChangeNotifier>,
    audio: Arc<dyn AudioSink>,
    fast: Arc<AtomicBool>,
    /// Running clock, if any. Held across start/stop so lifecycle calls
    /// never interleave.
    clock: Mutex<Option<ClockHandle>>,
    /// Alive flag of the latest clock. Kept apart from `clock` so status
    /// reads never wait on a start or stop that is joining a thread.
    alive: Mutex<Arc<AtomicBool>>,
}

impl GameController {
    /// Controller with a fresh game and no sound
    pub fn new(settings: Settings) -> Self {
        Self::with_audio(settings, Arc::new(SilentAudio))
    }

    pub fn with_audio(settings: Settings, audio: Arc<dyn AudioSink>) -> Self {
        let state = GameState::new(&settings);
        Self {
            settings: Arc::new(settings),
            state: Arc::new(Mutex::new(state)),
            notifier: Arc::new(ChangeNotifier::new()),
            audio,
            fast: Arc::new(AtomicBool::new(false)),
            clock: Mutex::new(None),
            alive: Mutex::new(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Replace the game state (before or between runs)
    pub fn with_state(self, state: GameState) -> Self {
        *self.state.lock() = state;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // === Lifecycle ===

    /// Start ticking. A running clock is stopped first, so at most one clock
    /// ever touches the state.
    pub fn start(&self) -> Result<(), ClockError> {
        let mut clock = self.clock.lock();
        if let Some(mut running) = clock.take() {
            log::info!("Restarting game");
            running.stop();
        }

        let handle = SimulationClock::new(
            self.state.clone(),
            self.notifier.clone(),
            self.audio.clone(),
            self.settings.clone(),
            self.fast.clone(),
        )
        .spawn()?;
        *self.alive.lock() = handle.alive_flag();
        *clock = Some(handle);
        log::info!("Game started");
        Ok(())
    }

    /// Stop ticking after the current tick. No-op when already stopped.
    pub fn stop(&self) {
        if let Some(mut running) = self.clock.lock().take() {
            running.stop();
            log::info!("Game stopped");
        }
    }

    /// True while a clock is ticking (a clock whose tick failed is not)
    pub fn is_running(&self) -> bool {
        self.alive.lock().load(Ordering::SeqCst)
    }

    /// Stop and put fresh objects on the field
    pub fn new_game(&self) {
        self.stop();
        *self.state.lock() = GameState::new(&self.settings);
        log::info!("New game");
    }

    // === Input ===

    /// Move the bat one step, clamped to the playfield
    pub fn move_bat(&self, direction: BatDirection) {
        self.state.lock().move_bat(direction);
    }

    /// Move the bat by input sign (-1 left, +1 right, 0 nothing)
    pub fn move_bat_by(&self, sign: i32) {
        if let Some(direction) = BatDirection::from_sign(sign) {
            self.move_bat(direction);
        }
    }

    /// Pick the pacing tier; takes effect at the clock's next sleep
    pub fn set_speed(&self, fast: bool) {
        self.fast.store(fast, Ordering::Relaxed);
    }

    pub fn is_fast(&self) -> bool {
        self.fast.load(Ordering::Relaxed)
    }

    // === Observers ===

    /// Run `callback` on the clock thread after every tick. The callback may
    /// read state and `is_running` but must not call `start`, `stop` or
    /// `new_game`.
    pub fn on_change(&self, callback: impl Fn(ModelChanged) + Send + Sync + 'static) {
        self.notifier.on_change(callback);
    }

    /// Receive a notification per tick on a channel
    pub fn subscribe(&self) -> crossbeam_channel::Receiver<ModelChanged> {
        self.notifier.subscribe()
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> GameState {
        self.state.lock().clone()
    }

    pub fn ball(&self) -> GameObj {
        self.state.lock().ball.clone()
    }

    pub fn bat(&self) -> GameObj {
        self.state.lock().bat.clone()
    }

    pub fn bricks(&self) -> Vec<GameObj> {
        self.state.lock().bricks.primary.clone()
    }

    pub fn reinforcement_bricks(&self) -> Vec<GameObj> {
        self.state.lock().bricks.reinforcement.clone()
    }

    pub fn score(&self) -> i64 {
        self.state.lock().score()
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.stop();
    }
}
