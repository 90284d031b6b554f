//! Rendering interface
//!
//! The core only decides what gets drawn and in which order. A `Renderer`
//! implementation owns the textures, the 16x16 glyph font and the actual
//! draw calls.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::entity::clip;
use crate::sim::{Entity, GameState, Heading, Outcome};

pub use crate::sim::Sprite;

/// Overlay text after losing
pub const LOSE_TEXT: &str = "**You Lose**";
/// Overlay text after winning
pub const WIN_TEXT: &str = "You Win!";
/// Controls help, drawn along the bottom edge
pub const HELP_LINES: [&str; 2] = [
    "left-move left  right-move right",
    "space-jump  down-hide(hide you from attack)",
];

const OUTCOME_FONT_SIZE: f32 = 0.5;
const OUTCOME_SPACING: f32 = 0.05;
const LOSE_TEXT_POS: Vec2 = Vec2::new(-3.1, 3.0);
const WIN_TEXT_POS: Vec2 = Vec2::new(-3.5, 2.0);
const HELP_FONT_SIZE: f32 = 0.23;
const HELP_LINE_POS: [Vec2; 2] = [Vec2::new(-4.8, -3.3), Vec2::new(-4.8, -3.6)];

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: Sprite,
    pub pos: Vec2,
    pub scale: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Cell in a sprite sheet, if the texture is one
    pub frame: Option<u32>,
    /// Mirror horizontally
    pub flip_x: bool,
}

impl SpriteDraw {
    pub fn of(entity: &Entity) -> Self {
        Self {
            sprite: entity.texture,
            pos: entity.pos,
            scale: entity.scale,
            rotation: entity.rotation,
            frame: entity.animation.as_ref().map(|a| a.sheet_index()),
            flip_x: false,
        }
    }
}

/// Draw target
pub trait Renderer {
    fn draw_sprite(&mut self, draw: &SpriteDraw);
    fn draw_text(&mut self, text: &str, font_size: f32, spacing: f32, pos: Vec2);
    /// Called once after the last draw of a frame
    fn end_frame(&mut self) {}
}

/// Draw one frame of the current state.
///
/// Order: background, player, platforms, enemies, outcome text, target,
/// controls help, jump-scare image.
pub fn draw_frame(state: &GameState, settings: &Settings, renderer: &mut dyn Renderer) {
    renderer.draw_sprite(&SpriteDraw::of(&state.background));
    renderer.draw_sprite(&player_draw(&state.player));

    for platform in &state.platforms {
        renderer.draw_sprite(&SpriteDraw::of(platform));
    }
    for enemy in &state.enemies {
        let mut draw = SpriteDraw::of(&enemy.body);
        draw.flip_x = enemy.facing == Heading::Right;
        renderer.draw_sprite(&draw);
    }

    match state.outcome() {
        Outcome::Lost => {
            renderer.draw_text(LOSE_TEXT, OUTCOME_FONT_SIZE, OUTCOME_SPACING, LOSE_TEXT_POS)
        }
        Outcome::Won => {
            renderer.draw_text(WIN_TEXT, OUTCOME_FONT_SIZE, OUTCOME_SPACING, WIN_TEXT_POS)
        }
        Outcome::Running => {}
    }

    renderer.draw_sprite(&SpriteDraw::of(&state.target));

    if settings.show_controls {
        for (line, pos) in HELP_LINES.iter().zip(HELP_LINE_POS) {
            renderer.draw_text(line, HELP_FONT_SIZE, 0.0, pos);
        }
    }

    if settings.jump_scare
        && state
            .session
            .jump_scare_visible(state.tuning.jump_scare_delay_ticks)
    {
        renderer.draw_sprite(&SpriteDraw::of(&state.jump_scare));
    }

    renderer.end_frame();
}

/// Hiding shows the crouch frame
fn player_draw(player: &Entity) -> SpriteDraw {
    let mut draw = SpriteDraw::of(player);
    if player.hidden {
        if let Some(anim) = &player.animation {
            draw.frame = anim.clips.get(clip::DOWN).and_then(|c| c.first()).copied();
        }
    }
    draw
}

/// Headless renderer that traces every call
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        log::trace!("sprite {:?} at {:?}", draw.sprite, draw.pos);
    }

    fn draw_text(&mut self, text: &str, font_size: f32, _spacing: f32, pos: Vec2) {
        log::trace!("text {text:?} size {font_size} at {pos:?}");
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Sprite(Sprite),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        draws: Vec<SpriteDraw>,
    }

    impl Renderer for Recorder {
        fn draw_sprite(&mut self, draw: &SpriteDraw) {
            self.calls.push(Call::Sprite(draw.sprite));
            self.draws.push(*draw);
        }

        fn draw_text(&mut self, text: &str, _font_size: f32, _spacing: f32, _pos: Vec2) {
            self.calls.push(Call::Text(text.to_string()));
        }
    }

    #[test]
    fn test_running_frame_order() {
        let state = GameState::new(1);
        let mut r = Recorder::default();
        draw_frame(&state, &Settings::default(), &mut r);

        let n_platforms = state.platforms.len();
        let n_enemies = state.enemies.len();
        assert_eq!(r.calls.len(), 2 + n_platforms + n_enemies + 1 + 2);
        assert_eq!(r.calls[0], Call::Sprite(Sprite::Background));
        assert_eq!(r.calls[1], Call::Sprite(Sprite::Player));
        let target_at = 2 + n_platforms + n_enemies;
        assert_eq!(r.calls[target_at], Call::Sprite(Sprite::Target));
        assert_eq!(r.calls[target_at + 1], Call::Text(HELP_LINES[0].to_string()));
        assert_eq!(r.calls[target_at + 2], Call::Text(HELP_LINES[1].to_string()));
    }

    #[test]
    fn test_lost_frame_has_text_then_scare() {
        let mut state = GameState::new(1);
        state.session.finish(Outcome::Lost);
        let mut r = Recorder::default();
        draw_frame(&state, &Settings::default(), &mut r);
        let target_at = 2 + state.platforms.len() + state.enemies.len();
        assert_eq!(r.calls[target_at], Call::Text(LOSE_TEXT.to_string()));
        assert_eq!(r.calls[target_at + 1], Call::Sprite(Sprite::Target));
        assert!(!r.calls.contains(&Call::Sprite(Sprite::JumpScare)));

        state.session.scare_counter = 300;
        let mut r = Recorder::default();
        draw_frame(&state, &Settings::default(), &mut r);
        assert_eq!(r.calls.last(), Some(&Call::Sprite(Sprite::JumpScare)));

        let quiet = Settings {
            jump_scare: false,
            show_controls: false,
            ..Default::default()
        };
        let mut r = Recorder::default();
        draw_frame(&state, &quiet, &mut r);
        assert_eq!(r.calls.last(), Some(&Call::Sprite(Sprite::Target)));
    }

    #[test]
    fn test_won_frame_has_win_text() {
        let mut state = GameState::new(1);
        state.session.finish(Outcome::Won);
        let mut r = Recorder::default();
        draw_frame(&state, &Settings::default(), &mut r);
        assert!(r.calls.contains(&Call::Text(WIN_TEXT.to_string())));
        assert!(!r.calls.contains(&Call::Text(LOSE_TEXT.to_string())));
    }

    #[test]
    fn test_hidden_player_uses_crouch_frame() {
        let mut state = GameState::new(1);
        state.player.hidden = true;
        let mut r = Recorder::default();
        draw_frame(&state, &Settings::default(), &mut r);
        assert_eq!(r.draws[1].frame, Some(6));
    }
}
