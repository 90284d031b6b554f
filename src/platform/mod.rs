//! Platform abstraction layer
//!
//! Handles the outside world the game loop talks to:
//! - Time (`Clock`)
//! - Input events (`InputSource`)
//!
//! Only native implementations live here: a wall clock, a stepped clock for
//! tests and headless runs, scripted input and an autopilot.

pub mod input;
pub mod time;

pub use input::{DemoPilot, InputSource, KeyState, ScriptedInput};
pub use time::{Clock, SteppedClock, SystemClock};
