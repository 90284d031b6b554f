//! Player preferences
//!
//! Stored as JSON next to the tuning file. Unlike tuning, settings never
//! change how the simulation behaves; they only affect audio and what gets
//! drawn on top of it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Env var naming the settings file
pub const SETTINGS_ENV_VAR: &str = "RAT_ESCAPE_SETTINGS";
/// Settings file used when the env var is unset
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === HUD ===
    /// Draw the two controls help lines
    pub show_controls: bool,

    // === Accessibility ===
    /// Scream and jump-scare image after losing
    pub jump_scare: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
            show_controls: true,
            jump_scare: true,
        }
    }
}

impl Settings {
    /// Volumes pulled into range; non-finite values become 0
    pub fn clamped(mut self) -> Self {
        for v in [
            &mut self.master_volume,
            &mut self.music_volume,
            &mut self.sfx_volume,
        ] {
            *v = if v.is_finite() { (*v).clamp(0.0, 1.0) } else { 0.0 };
        }
        self
    }

    /// Read a settings file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(settings.clamped())
    }

    /// Load settings, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `RAT_ESCAPE_SETTINGS` (must succeed) or the default path
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var(SETTINGS_ENV_VAR) {
            Ok(path) => {
                let settings = Self::read(&path)?;
                log::info!("Loaded settings from {path}");
                Ok(settings)
            }
            Err(_) => Ok(Self::load(DEFAULT_SETTINGS_PATH)),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
