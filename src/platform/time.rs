//! Clock sources

use std::time::Instant;

/// Monotonic time in seconds
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall clock, measured from creation
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Advances a fixed amount every time it is read.
///
/// The first read returns 0.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    time: f64,
    step: f64,
}

impl SteppedClock {
    pub fn new(step: f64) -> Self {
        Self {
            time: 0.0,
            step: step.max(0.0),
        }
    }

    /// One read per frame at the given rate
    pub fn from_fps(fps: f64) -> Self {
        Self::new(if fps > 0.0 { 1.0 / fps } else { 0.0 })
    }
}

impl Clock for SteppedClock {
    fn now(&mut self) -> f64 {
        let t = self.time;
        self.time += self.step;
        t
    }
}
