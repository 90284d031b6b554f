//! Rat Escape - A small 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, enemy behavior, session)
//! - `game`: Top-level loop driver (input -> fixed steps -> render)
//! - `renderer`: Draw order and the renderer interface
//! - `platform`: Input and clock abstraction
//! - `audio`: Audio commands and the sink interface
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volumes, help text, jump-scare)

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Longest frame delta fed to the accumulator (seconds). Anything beyond
    /// this, e.g. after a suspend, is dropped.
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Gravity applied to the player and every enemy (units/s²)
    pub const GRAVITY: f32 = -9.81;

    /// Horizontal arena borders the player is clamped to
    pub const LEFT_BORDER: f32 = -4.55;
    pub const RIGHT_BORDER: f32 = 4.55;

    /// Player defaults
    pub const PLAYER_SPAWN: (f32, f32) = (-4.0, -2.0);
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_JUMP_POWER: f32 = 4.5;
    pub const PLAYER_WIDTH: f32 = 0.22;
    pub const PLAYER_HEIGHT: f32 = 0.44;

    /// Win region: player x and y must both reach these
    pub const WIN_X: f32 = 4.5;
    pub const WIN_Y: f32 = 1.57;

    /// Update ticks after losing before the scream plays
    pub const SCREAM_DELAY_TICKS: u32 = 290;
    /// Update ticks after losing before the jump-scare image shows
    pub const JUMP_SCARE_DELAY_TICKS: u32 = 300;

    /// Minimum overlap on each axis that counts as penetration
    pub const COLLISION_EPSILON: f32 = 1e-4;
}

/// Clamp a movement intent to unit length so diagonals aren't faster
#[inline]
pub fn clamp_to_unit(v: Vec2) -> Vec2 {
    if v.length_squared() > 1.0 {
        v.normalize_or_zero()
    } else {
        v
    }
}
