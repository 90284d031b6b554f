//! Top-level loop driver
//!
//! `Game` owns the simulation context and everything the outer loop needs
//! between frames: the accumulator, the pending input and the audio state.

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::platform::{Clock, InputSource, KeyState};
use crate::renderer::{Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::{FixedTimestep, GameState, Outcome, StepReport, TickInput};
use crate::tuning::Tuning;

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    audio: AudioManager,
    timestep: FixedTimestep,
    /// Held keys plus a jump press not yet consumed by a step
    input: TickInput,
    last_time: Option<f64>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            audio: AudioManager::from_settings(&settings),
            settings,
            timestep: FixedTimestep::default(),
            input: TickInput::default(),
            last_time: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// Pending input for the next step
    pub fn pending_input(&self) -> &TickInput {
        &self.input
    }

    /// Start the music and the clock
    pub fn start(&mut self, now: f64, sink: &mut dyn AudioSink) {
        self.audio.play_music(sink);
        self.last_time = Some(now);
        log::info!("game started (seed {})", self.state.seed);
    }

    /// Apply one frame of input. Returns false when the player asked to quit.
    pub fn handle_input(&mut self, keys: &KeyState, sink: &mut dyn AudioSink) -> bool {
        if keys.quit {
            return false;
        }
        if keys.halt_music {
            self.audio.halt_music(sink);
        }
        if keys.play_music {
            self.audio.play_music(sink);
        }

        self.input.left = keys.left;
        self.input.right = keys.right;
        self.input.down = keys.down;
        // Stays set until a step consumes it
        self.input.jump |= keys.jump;
        true
    }

    /// Advance to `now` (seconds): scare bookkeeping, then fixed steps.
    /// Long gaps between calls are capped by the timestep.
    pub fn update(&mut self, now: f64, sink: &mut dyn AudioSink) -> StepReport {
        let elapsed = self.last_time.map_or(0.0, |t| (now - t) as f32);
        self.last_time = Some(now);

        let scream_at = self.state.tuning.scream_delay_ticks;
        if self.state.session.advance_scare(scream_at) && self.settings.jump_scare {
            log::info!("scream");
            self.audio.play(SoundEffect::Scream, sink);
        }

        self.timestep
            .advance(&mut self.state, &mut self.input, elapsed)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        draw_frame(&self.state, &self.settings, renderer);
    }

    /// Run until the input source asks to quit. Returns the final outcome.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        clock: &mut dyn Clock,
        renderer: &mut dyn Renderer,
        sink: &mut dyn AudioSink,
    ) -> Outcome {
        let now = clock.now();
        self.start(now, sink);

        loop {
            let keys = input.poll(&self.state);
            if !self.handle_input(&keys, sink) {
                break;
            }
            self.update(clock.now(), sink);
            self.render(renderer);
        }

        log::info!(
            "game over: {:?} after {} ticks",
            self.outcome(),
            self.state.time_ticks
        );
        self.outcome()
    }
}
