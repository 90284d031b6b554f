//! Rat Escape - headless native runner
//!
//! Plays one session with the demo autopilot on a 60 fps stepped clock and
//! logs the result. Set `RUST_LOG=debug` (or `trace` for every draw call) to
//! watch it.
//!
//! Usage: `rat-escape [seed]`

use rat_escape::audio::LogSink;
use rat_escape::platform::{DemoPilot, SteppedClock};
use rat_escape::renderer::LogRenderer;
use rat_escape::{ConfigError, Game, Settings, Tuning};

/// Give up after a minute of game time
const MAX_FRAMES: u32 = 60 * 60;
/// Frames to keep running after the session ends (covers the jump-scare)
const LINGER_FRAMES: u32 = 360;

fn seed_from_args() -> u64 {
    match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring non-numeric seed {arg:?}");
            default_seed()
        }),
        None => default_seed(),
    }
}

fn default_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    log::info!("Rat Escape (headless) starting...");

    let tuning = Tuning::load_from_env()?;
    let settings = Settings::load_from_env()?;
    let seed = seed_from_args();

    let mut game = Game::with_config(seed, tuning, settings);
    let mut pilot = DemoPilot::new(seed, MAX_FRAMES, LINGER_FRAMES);
    let mut clock = SteppedClock::from_fps(60.0);
    let mut renderer = LogRenderer::default();
    let mut sink = LogSink;

    let outcome = game.run(&mut pilot, &mut clock, &mut renderer, &mut sink);

    log::info!(
        "Finished: {:?} (seed {}, {} frames, player at {:?})",
        outcome,
        seed,
        renderer.frames,
        game.state.player.pos
    );
    Ok(())
}
