//! Brick Breaker headless runner
//!
//! Runs the simulation with a simple bat-follows-ball observer standing in
//! for a player. Rendering lives elsewhere; this just logs what happens.
//!
//! Usage: `brick-breaker [settings.json]`

use std::sync::Arc;
use std::time::Duration;

use brick_breaker::sim::BatDirection;
use brick_breaker::{GameController, LogAudio, Settings};

/// Ticks to play before stopping
const DEMO_TICKS: u64 = 3_000;

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let game = GameController::with_audio(settings, Arc::new(LogAudio));
    let changes = game.subscribe();
    game.set_speed(true);

    if let Err(err) = game.start() {
        log::error!("{}", err);
        std::process::exit(1);
    }

    let step = game.settings().bat_move;
    while let Ok(change) = changes.recv_timeout(Duration::from_secs(1)) {
        // Keep the bat's centre under the ball's centre
        let ball = game.ball();
        let bat = game.bat();
        let offset = (ball.x() + ball.width() / 2.0) - (bat.x() + bat.width() / 2.0);
        if offset > step {
            game.move_bat(BatDirection::Right);
        } else if offset < -step {
            game.move_bat(BatDirection::Left);
        }

        if change.tick >= DEMO_TICKS {
            break;
        }
        let state = game.snapshot();
        if state.bricks.is_cleared() {
            log::info!("Field cleared after {} ticks", state.ticks);
            break;
        }
    }

    game.stop();
    let state = game.snapshot();
    println!(
        "Score {} after {} ticks, {} bricks left",
        state.score(),
        state.ticks,
        state.bricks.visible_count()
    );
}
