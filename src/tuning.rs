//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads at runtime, loadable from a
//! JSON file. Missing fields fall back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Env var naming the tuning file
pub const TUNING_ENV_VAR: &str = "RAT_ESCAPE_TUNING";
/// Tuning file used when the env var is unset
pub const DEFAULT_TUNING_PATH: &str = "config/tuning.json";

/// Errors loading tuning or settings files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical acceleration for every body (negative is down)
    pub gravity: f32,
    pub player_speed: f32,
    pub player_jump_power: f32,
    pub enemy_speed: f32,
    pub enemy_jump_power: f32,
    /// Patrollers turn around this far from their spawn x
    pub patrol_extent: f32,
    /// Steps a jumper waits on the ground between jumps
    pub jumper_period_steps: u32,
    /// Random +/- spread on the jumper period
    pub jumper_jitter_steps: u32,
    /// Guards watch a visible player within this distance
    pub guard_sight_radius: f32,
    pub left_border: f32,
    pub right_border: f32,
    pub win_x: f32,
    pub win_y: f32,
    pub scream_delay_ticks: u32,
    pub jump_scare_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            player_speed: PLAYER_SPEED,
            player_jump_power: PLAYER_JUMP_POWER,
            enemy_speed: 1.0,
            enemy_jump_power: 3.0,
            patrol_extent: 0.75,
            jumper_period_steps: 45,
            jumper_jitter_steps: 15,
            guard_sight_radius: 2.5,
            left_border: LEFT_BORDER,
            right_border: RIGHT_BORDER,
            win_x: WIN_X,
            win_y: WIN_Y,
            scream_delay_ticks: SCREAM_DELAY_TICKS,
            jump_scare_delay_ticks: JUMP_SCARE_DELAY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON text
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Load from `RAT_ESCAPE_TUNING` or `config/tuning.json`.
    ///
    /// A file named by the env var must load; the default path is optional.
    /// Any failure on the default path falls back to built-in values.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var(TUNING_ENV_VAR) {
            Ok(path) => {
                let tuning = Self::load(&path)?;
                log::info!("Loaded tuning from {path}");
                Ok(tuning)
            }
            Err(_) => Ok(Self::load_or_default(DEFAULT_TUNING_PATH)),
        }
    }

    /// Load a tuning file, or use defaults if it is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}, using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("player_jump_power", self.player_jump_power),
            ("enemy_speed", self.enemy_speed),
            ("enemy_jump_power", self.enemy_jump_power),
            ("patrol_extent", self.patrol_extent),
            ("guard_sight_radius", self.guard_sight_radius),
            ("left_border", self.left_border),
            ("right_border", self.right_border),
            ("win_x", self.win_x),
            ("win_y", self.win_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not finite"),
                });
            }
        }
        for (field, value) in [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("patrol_extent", self.patrol_extent),
            ("guard_sight_radius", self.guard_sight_radius),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is negative"),
                });
            }
        }
        if self.left_border >= self.right_border {
            return Err(ConfigError::Invalid {
                field: "left_border",
                reason: format!(
                    "{} is not left of right_border {}",
                    self.left_border, self.right_border
                ),
            });
        }
        if self.scream_delay_ticks > self.jump_scare_delay_ticks {
            return Err(ConfigError::Invalid {
                field: "scream_delay_ticks",
                reason: "scream must not come after the jump-scare image".to_string(),
            });
        }
        Ok(())
    }
}
