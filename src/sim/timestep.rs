//! Fixed-timestep driver
//!
//! Turns variable wall-clock deltas into whole simulation steps. Time below
//! one step is carried to the next call, so the same sequence of deltas
//! always produces the same sequence of steps.

use super::state::{GameState, Outcome};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DELTA, SIM_DT};

/// What one `advance` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Whole steps run
    pub steps: u32,
    /// Set if the session ended during this call
    pub ended: Option<Outcome>,
}

/// Accumulates elapsed time and runs fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Time carried over to the next call, always in [0, step)
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Add `elapsed` seconds and run as many whole steps as fit.
    ///
    /// `elapsed` is capped at `MAX_FRAME_DELTA`, so one call runs a bounded
    /// number of steps and the accumulator never grows past where
    /// subtracting a step stops changing it.
    ///
    /// One-shot inputs (jump) are cleared once a step has consumed them. If
    /// no step runs they stay pending for the next call. Once the session is
    /// over this returns immediately.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        input: &mut TickInput,
        elapsed: f32,
    ) -> StepReport {
        let mut report = StepReport::default();
        if !state.session.is_running() {
            return report;
        }

        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            report.steps += 1;

            let ended = tick(state, input, self.step);

            // Clear one-shot inputs after processing
            input.jump = false;

            if ended.is_some() {
                report.ended = ended;
                // Later whole steps of this frame never happen
                self.accumulator %= self.step;
                break;
            }
        }

        report
    }
}
