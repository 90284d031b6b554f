//! Input sources
//!
//! An `InputSource` is polled once per outer loop iteration and reports what
//! the keyboard looks like right now. Held keys (left, right, down) are plain
//! state; jump, quit and the music keys are one-shot presses.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::GameState;

/// Keyboard snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Hide
    pub down: bool,
    /// Space pressed this frame
    pub jump: bool,
    /// Window closed
    pub quit: bool,
    /// H pressed this frame
    pub halt_music: bool,
    /// P pressed this frame
    pub play_music: bool,
}

/// Polled once per frame; may look at the post-step state
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> KeyState;
}

/// Replays a fixed list of frames, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeyState>,
}

impl ScriptedInput {
    /// Hold `keys` for `count` frames
    pub fn hold(mut self, keys: KeyState, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(keys, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> KeyState {
        self.frames.pop_front().unwrap_or(KeyState {
            quit: true,
            ..Default::default()
        })
    }
}

/// Frames a hide lasts once the pilot ducks
const HIDE_FRAMES: u32 = 30;
/// Frames before the pilot will hide again
const HIDE_COOLDOWN_FRAMES: u32 = 60;
/// Enemies closer than this make the pilot hide
const THREAT_RADIUS: f32 = 0.6;
/// Chance per grounded frame of a spontaneous jump
const HOP_CHANCE: f64 = 0.03;

/// Autopilot for the headless demo.
///
/// Walks toward the target, jumps when blocked (and now and then at random),
/// and hides for a moment when an enemy gets close. Asks to quit after
/// `max_frames`, or once the session has been over for `linger_frames`.
#[derive(Debug, Clone)]
pub struct DemoPilot {
    rng: Pcg32,
    frame: u32,
    max_frames: u32,
    linger_frames: u32,
    ended_frames: u32,
    hide_left: u32,
    hide_cooldown: u32,
}

impl DemoPilot {
    pub fn new(seed: u64, max_frames: u32, linger_frames: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            max_frames,
            linger_frames,
            ended_frames: 0,
            hide_left: 0,
            hide_cooldown: 0,
        }
    }

    fn threatened(state: &GameState) -> bool {
        let player = &state.player;
        state
            .enemies
            .iter()
            .any(|e| e.body.pos.distance(player.pos) < THREAT_RADIUS)
    }
}

impl InputSource for DemoPilot {
    fn poll(&mut self, state: &GameState) -> KeyState {
        self.frame += 1;
        if self.frame > self.max_frames {
            log::info!("demo pilot giving up after {} frames", self.max_frames);
            return KeyState {
                quit: true,
                ..Default::default()
            };
        }

        if !state.session.is_running() {
            self.ended_frames += 1;
            return KeyState {
                quit: self.ended_frames >= self.linger_frames,
                ..Default::default()
            };
        }

        self.hide_cooldown = self.hide_cooldown.saturating_sub(1);
        if self.hide_left > 0 {
            self.hide_left -= 1;
            return KeyState {
                down: true,
                ..Default::default()
            };
        }

        let player = &state.player;
        let grounded = player.collisions.bottom;
        if grounded && self.hide_cooldown == 0 && Self::threatened(state) {
            self.hide_left = HIDE_FRAMES;
            self.hide_cooldown = HIDE_FRAMES + HIDE_COOLDOWN_FRAMES;
            log::debug!("demo pilot hiding at {:?}", player.pos);
            return KeyState {
                down: true,
                ..Default::default()
            };
        }

        let right = player.pos.x < state.target.pos.x;
        let blocked = player.collisions.right || player.collisions.left;
        let jump = grounded && (blocked || self.rng.random_bool(HOP_CHANCE));
        KeyState {
            right,
            jump,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_then_quits() {
        let state = GameState::new(1);
        let right = KeyState {
            right: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::default().hold(right, 2);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll(&state), right);
        assert_eq!(input.poll(&state), right);
        assert!(input.poll(&state).quit);
    }

    #[test]
    fn test_pilot_heads_for_target() {
        let mut state = GameState::new(1);
        state.player.collisions.bottom = false;
        let mut pilot = DemoPilot::new(3, 100, 10);
        let keys = pilot.poll(&state);
        assert!(keys.right);
        assert!(!keys.left);
        assert!(!keys.jump);
        assert!(!keys.quit);
    }

    #[test]
    fn test_pilot_hides_from_nearby_enemy() {
        let mut state = GameState::new(1);
        state.player.collisions.bottom = true;
        state.enemies[0].body.pos = state.player.pos + glam::Vec2::new(0.3, 0.0);
        let mut pilot = DemoPilot::new(3, 1000, 10);
        for _ in 0..=HIDE_FRAMES {
            assert!(pilot.poll(&state).down);
        }
        // Cooldown: walks on even though the enemy is still there
        assert!(!pilot.poll(&state).down);
    }

    #[test]
    fn test_pilot_quits() {
        let state = GameState::new(1);
        let mut pilot = DemoPilot::new(3, 2, 10);
        assert!(!pilot.poll(&state).quit);
        assert!(!pilot.poll(&state).quit);
        assert!(pilot.poll(&state).quit);

        let mut state = GameState::new(1);
        state.session.finish(crate::sim::Outcome::Lost);
        let mut pilot = DemoPilot::new(3, 1000, 3);
        assert!(!pilot.poll(&state).quit);
        assert!(!pilot.poll(&state).quit);
        assert!(pilot.poll(&state).quit);
    }
}
