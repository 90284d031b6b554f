//! Audio commands
//!
//! The game never touches a mixer directly. It emits `AudioCommand`s into an
//! `AudioSink`, which a platform layer turns into actual playback.

use crate::settings::Settings;

/// Background track plays at this fraction of the music volume
pub const MUSIC_BASE_VOLUME: f32 = 0.5;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Played once, shortly before the jump-scare image
    Scream,
}

/// One request to the audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// Start the background track
    PlayMusic { looping: bool },
    /// Stop the background track
    HaltMusic,
    /// Set the background track volume (0.0 - 1.0)
    SetMusicVolume(f32),
    /// Fire a one-shot effect
    PlayEffect { effect: SoundEffect, volume: f32 },
}

/// Anything that accepts audio commands
pub trait AudioSink {
    fn submit(&mut self, command: AudioCommand);
}

/// Collects commands, mostly for tests
impl AudioSink for Vec<AudioCommand> {
    fn submit(&mut self, command: AudioCommand) {
        self.push(command);
    }
}

/// Logs every command instead of playing it
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn submit(&mut self, command: AudioCommand) {
        log::debug!("audio: {command:?}");
    }
}

/// Applies volume and mute settings before commands reach the sink
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self {
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_music_volume(settings.music_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective effect volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective background track volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * MUSIC_BASE_VOLUME
        }
    }

    /// Start the looping background track
    pub fn play_music(&self, sink: &mut dyn AudioSink) {
        sink.submit(AudioCommand::SetMusicVolume(self.effective_music_volume()));
        sink.submit(AudioCommand::PlayMusic { looping: true });
    }

    pub fn halt_music(&self, sink: &mut dyn AudioSink) {
        sink.submit(AudioCommand::HaltMusic);
    }

    /// Play a sound effect. Silent effects are not submitted at all.
    pub fn play(&self, effect: SoundEffect, sink: &mut dyn AudioSink) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        sink.submit(AudioCommand::PlayEffect { effect, volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_starts_at_half_volume() {
        let audio = AudioManager::default();
        let mut sink: Vec<AudioCommand> = Vec::new();
        audio.play_music(&mut sink);
        assert_eq!(
            sink,
            vec![
                AudioCommand::SetMusicVolume(0.5),
                AudioCommand::PlayMusic { looping: true },
            ]
        );
    }

    #[test]
    fn test_muted_effects_are_dropped() {
        let mut audio = AudioManager::default();
        audio.set_muted(true);
        let mut sink: Vec<AudioCommand> = Vec::new();
        audio.play(SoundEffect::Scream, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_effect_volume_scales() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(&settings);
        let mut sink: Vec<AudioCommand> = Vec::new();
        audio.play(SoundEffect::Scream, &mut sink);
        assert_eq!(
            sink,
            vec![AudioCommand::PlayEffect {
                effect: SoundEffect::Scream,
                volume: 0.25
            }]
        );
    }
}
