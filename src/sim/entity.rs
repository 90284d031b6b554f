//! Simulated entities: player, enemies, platforms and props
//!
//! Every object in the level is an `Entity`. Platforms and decorations are
//! built once and never move; the player and enemies are integrated every
//! fixed step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{Axis, resolve_axis};
use crate::clamp_to_unit;

/// Texture handle. Renderers map each to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Player,
    /// Square ground tile
    Platform,
    /// Long floating cave ledge
    CavePlatform,
    Monster,
    MonsterAlt,
    Target,
    JumpScare,
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Platform,
    Decorative,
}

/// Per-step contact flags. Cleared at the start of every update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collisions {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    /// Player only: overlapping an enemy this step
    pub enemy: bool,
}

/// Sprite-sheet animation state (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animation {
    /// Frame indices per clip (row-major into the sheet)
    pub clips: Vec<Vec<u32>>,
    /// Sheet layout (columns, rows)
    pub sheet: (u32, u32),
    /// Active clip
    pub clip: usize,
    /// Frame within the active clip
    pub frame: usize,
    pub timer: f32,
}

impl Animation {
    pub const FRAMES_PER_SECOND: f32 = 4.0;

    /// Player walk sheet: 3 columns x 4 rows (right, left, down, up)
    pub fn walk_sheet() -> Self {
        Self {
            clips: vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9, 10, 11]],
            sheet: (3, 4),
            clip: 0,
            frame: 0,
            timer: 0.0,
        }
    }

    /// Index into the sheet for the current frame
    pub fn sheet_index(&self) -> u32 {
        self.clips
            .get(self.clip)
            .and_then(|c| c.get(self.frame))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_clip(&mut self, clip: usize) {
        if clip < self.clips.len() && clip != self.clip {
            self.clip = clip;
            self.frame = 0;
            self.timer = 0.0;
        }
    }

    /// Advance while moving, rest on frame 0 when idle
    pub fn advance(&mut self, dt: f32, moving: bool) {
        if !moving {
            self.frame = 0;
            self.timer = 0.0;
            return;
        }
        let len = self.clips.get(self.clip).map_or(1, |c| c.len().max(1));
        self.timer += dt;
        let frame_time = 1.0 / Self::FRAMES_PER_SECOND;
        while self.timer >= frame_time {
            self.timer -= frame_time;
            self.frame = (self.frame + 1) % len;
        }
    }
}

/// Clip indices for the player walk sheet
pub mod clip {
    pub const RIGHT: usize = 0;
    pub const LEFT: usize = 1;
    pub const DOWN: usize = 2;
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub texture: Sprite,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Desired direction, unit range per axis
    movement: Vec2,
    /// Render scale
    pub scale: Vec2,
    /// Collision box extents in world units
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub jump_power: f32,
    /// Degrees, cosmetic only
    pub rotation: f32,
    pub animation: Option<Animation>,
    pub collisions: Collisions,
    /// Player only: hiding from enemies
    pub hidden: bool,
}

impl Entity {
    fn base(kind: EntityKind, texture: Sprite, pos: Vec2) -> Self {
        Self {
            kind,
            texture,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            movement: Vec2::ZERO,
            scale: Vec2::ONE,
            width: 0.0,
            height: 0.0,
            speed: 0.0,
            jump_power: 0.0,
            rotation: 0.0,
            animation: None,
            collisions: Collisions::default(),
            hidden: false,
        }
    }

    /// A static platform with a collision box
    pub fn platform(texture: Sprite, pos: Vec2, width: f32, height: f32, scale: Vec2) -> Self {
        Self {
            width,
            height,
            scale,
            ..Self::base(EntityKind::Platform, texture, pos)
        }
    }

    /// A non-colliding prop (background, target marker, jump-scare image)
    pub fn decorative(texture: Sprite, pos: Vec2, scale: Vec2) -> Self {
        Self {
            scale,
            ..Self::base(EntityKind::Decorative, texture, pos)
        }
    }

    /// A gravity-driven body (player or enemy)
    #[allow(clippy::too_many_arguments)]
    pub fn body(
        kind: EntityKind,
        texture: Sprite,
        pos: Vec2,
        width: f32,
        height: f32,
        speed: f32,
        jump_power: f32,
        gravity: f32,
    ) -> Self {
        Self {
            width,
            height,
            speed,
            jump_power,
            accel: Vec2::new(0.0, gravity),
            ..Self::base(kind, texture, pos)
        }
    }

    /// Collision box at the current position
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.width, self.height)
    }

    /// Whether this entity takes part in collision tests at all
    #[inline]
    pub fn collides(&self) -> bool {
        !self.aabb().is_degenerate()
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Record a desired direction, normalised so diagonals aren't faster
    pub fn set_movement(&mut self, v: Vec2) {
        self.movement = if v.is_finite() { clamp_to_unit(v) } else { Vec2::ZERO };
    }

    pub fn move_left(&mut self) {
        self.set_movement(Vec2::new(-1.0, self.movement.y));
        if let Some(anim) = &mut self.animation {
            anim.set_clip(clip::LEFT);
        }
    }

    pub fn move_right(&mut self) {
        self.set_movement(Vec2::new(1.0, self.movement.y));
        if let Some(anim) = &mut self.animation {
            anim.set_clip(clip::RIGHT);
        }
    }

    /// Jump if standing on something and not hiding. Returns whether it happened.
    pub fn jump(&mut self) -> bool {
        if !self.collisions.bottom || self.hidden {
            return false;
        }
        self.vel.y = self.jump_power;
        true
    }

    /// Advance one fixed step: gravity, Y move + resolve, X move + resolve
    pub fn update(&mut self, dt: f32, platforms: &[Entity]) {
        self.collisions = Collisions::default();

        self.vel.x = self.movement.x * self.speed;
        self.vel += self.accel * dt;

        self.pos.y += self.vel.y * dt;
        resolve_axis(self, platforms, Axis::Y);

        self.pos.x += self.vel.x * dt;
        resolve_axis(self, platforms, Axis::X);

        let moving = self.movement.x != 0.0;
        if let Some(anim) = &mut self.animation {
            anim.advance(dt, moving);
        }
    }
}
