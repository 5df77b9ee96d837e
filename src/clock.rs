//! Simulation clock
//!
//! A background thread that ticks the shared game state at a fixed pace.
//! Each tick runs on a copy of the state under the state lock and is only
//! committed if it completes, so a failing tick can never leave a half
//! applied update behind. Notifications and sound cues go out after the
//! lock is released, in tick order.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use parking_lot::Mutex;
use thiserror::Error;

use crate::audio::{self, AudioSink, SoundEffect};
use crate::notify::{ChangeNotifier, ModelChanged};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

/// Game state shared between the clock and the controller
pub type SharedState = Arc<Mutex<GameState>>;

/// The function that advances the state by one tick
type TickFn = fn(&mut GameState, &Settings) -> Vec<GameEvent>;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("tick {tick} failed: {reason}")]
    TickFailed { tick: u64, reason: String },
}

/// Result of one committed tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<GameEvent>,
}

/// Everything a clock thread needs to run
pub struct SimulationClock {
    state: SharedState,
    notifier: Arc<ChangeNotifier>,
    audio: Arc<dyn AudioSink>,
    settings: Arc<Settings>,
    fast: Arc<AtomicBool>,
    advance: TickFn,
}

impl SimulationClock {
    pub fn new(
        state: SharedState,
        notifier: Arc<ChangeNotifier>,
        audio: Arc<dyn AudioSink>,
        settings: Arc<Settings>,
        fast: Arc<AtomicBool>,
    ) -> Self {
        Self {
            state,
            notifier,
            audio,
            settings,
            fast,
            advance: tick,
        }
    }

    /// Replace the tick function
    #[cfg(test)]
    fn with_tick(mut self, advance: TickFn) -> Self {
        self.advance = advance;
        self
    }

    /// Run one tick under the state lock and commit it if it completes
    pub fn step(&self) -> Result<TickReport, ClockError> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        let advance = self.advance;

        match panic::catch_unwind(AssertUnwindSafe(|| advance(&mut next, &self.settings))) {
            Ok(events) => {
                *state = next;
                Ok(TickReport {
                    tick: state.ticks,
                    events,
                })
            }
            Err(payload) => Err(ClockError::TickFailed {
                tick: state.ticks + 1,
                reason: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Launch the clock on its own thread
    pub fn spawn(self) -> Result<ClockHandle, ClockError> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let alive = Arc::new(AtomicBool::new(true));
        let flag = alive.clone();

        let thread = thread::Builder::new()
            .name("sim-clock".into())
            .spawn(move || {
                let _alive = AliveGuard(flag);
                self.run(&stop_rx);
            });

        let thread = match thread {
            Ok(thread) => thread,
            Err(err) => {
                alive.store(false, Ordering::SeqCst);
                return Err(err.into());
            }
        };

        Ok(ClockHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
            alive,
        })
    }

    fn run(&self, stop: &Receiver<()>) {
        log::debug!("Simulation clock running");
        loop {
            if !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            let report = match self.step() {
                Ok(report) => report,
                Err(err) => {
                    log::error!("Simulation clock stopped: {}", err);
                    return;
                }
            };

            self.notifier.publish(ModelChanged { tick: report.tick });
            if self.settings.sound {
                for effect in report.events.iter().filter_map(SoundEffect::for_event) {
                    audio::play_quietly(self.audio.as_ref(), effect);
                }
            }

            let pace = self.settings.pace(self.fast.load(Ordering::Relaxed));
            match stop.recv_timeout(pace) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::debug!("Simulation clock stopped");
    }
}

/// Clears the alive flag however the clock thread ends
struct AliveGuard(Arc<AtomicBool>);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            log::warn!("Simulation clock thread panicked");
        }
        self.0.store(false, Ordering::SeqCst);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Owner's handle on a running clock thread. Dropping it stops the clock.
#[derive(Debug)]
pub struct ClockHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    alive: Arc<AtomicBool>,
}

impl ClockHandle {
    /// Whether the clock loop is still running
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Flag cleared when the clock loop ends, readable without the handle
    pub fn alive_flag(&self) -> Arc<AtomicBool> {
        self.alive.clone()
    }

    /// Stop the clock after its current tick and wait for the thread to
    /// exit. From the clock thread itself (an observer callback) this only
    /// signals; the loop exits once the callback returns.
    pub fn stop(&mut self) {
        // Disconnecting wakes a sleeping clock immediately
        drop(self.stop_tx.take());

        let Some(thread) = self.thread.take() else {
            return;
        };
        if thread.thread().id() == thread::current().id() {
            return;
        }
        if thread.join().is_err() {
            log::warn!("Simulation clock exited with a panic");
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
