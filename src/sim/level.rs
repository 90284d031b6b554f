//! The fixed level layout
//!
//! Geometry is authored in world units on a 10 x 7.5 view centred on the
//! origin. Collision extents are given directly; scale only affects drawing.

use glam::Vec2;

use super::behavior::{Enemy, Heading};
use super::entity::{Animation, Entity, EntityKind, Sprite};
use crate::consts::*;
use crate::tuning::Tuning;

/// Number of ground tiles along the bottom
const GROUND_TILES: usize = 24;
/// Cave ledges forming the left staircase row
const STAIR_LEDGES: usize = 6;
/// Cave ledges forming the long middle row
const MIDDLE_LEDGES: usize = 10;

const CAVE_SCALE: Vec2 = Vec2::new(3.16, 0.5);

/// The player at the spawn point
pub fn player(tuning: &Tuning) -> Entity {
    let mut player = Entity::body(
        EntityKind::Player,
        Sprite::Player,
        Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
        tuning.player_speed,
        tuning.player_jump_power,
        tuning.gravity,
    );
    player.scale = Vec2::splat(0.8);
    player.animation = Some(Animation::walk_sheet());
    player
}

/// All platforms, in collision-test order
pub fn platforms() -> Vec<Entity> {
    let mut out = Vec::with_capacity(GROUND_TILES + STAIR_LEDGES + MIDDLE_LEDGES + 5);

    // Ground: square tiles, most of the run off-screen to the left
    for i in 0..GROUND_TILES {
        out.push(Entity::platform(
            Sprite::Platform,
            Vec2::new(i as f32 - 18.0, -3.5),
            1.35,
            1.35,
            Vec2::ONE,
        ));
    }

    // Left row of overlapping cave ledges; every other one is drawn flipped
    for i in 0..STAIR_LEDGES {
        let mut ledge = Entity::platform(
            Sprite::CavePlatform,
            Vec2::new(i as f32 - 10.0 / 1.5 + 1.3, -1.15),
            2.7,
            0.35,
            CAVE_SCALE,
        );
        if i % 2 == 0 {
            ledge.rotation = 180.0;
        }
        out.push(ledge);
    }

    // Low step on the right
    out.push(Entity::platform(
        Sprite::CavePlatform,
        Vec2::new(23.0 / 1.5 - 11.7, -2.05),
        3.1,
        0.35,
        CAVE_SCALE,
    ));

    // Long middle row, laid out right to left
    for i in 0..MIDDLE_LEDGES {
        out.push(Entity::platform(
            Sprite::CavePlatform,
            Vec2::new(10.0 / 1.5 + 1.5 - i as f32, -0.1),
            2.5,
            0.36,
            CAVE_SCALE,
        ));
    }

    // Left-hand ledge just under the middle row
    out.push(Entity::platform(
        Sprite::CavePlatform,
        Vec2::new(-(10.0 - 10.0 / 1.5 + 1.7), -0.5),
        2.6,
        0.36,
        CAVE_SCALE,
    ));

    // Thin stepping stones climbing toward the target
    let stones = [(11.0, 9.0, 1.2, 1.58), (12.0, 8.8, 0.9, 1.30), (13.0, 8.6, 0.6, 1.30)];
    for (n, shift, y, scale_x) in stones {
        out.push(Entity::platform(
            Sprite::CavePlatform,
            Vec2::new(-(n - 10.0 / 1.5 - shift), y),
            1.2,
            0.09,
            Vec2::new(scale_x, 0.25),
        ));
    }

    out
}

/// Guard on the ground, patroller on the middle row, jumper dropping in above it
pub fn enemies(tuning: &Tuning) -> Vec<Enemy> {
    let mut patroller = Enemy::patrolling(
        Sprite::MonsterAlt,
        Vec2::new(-1.3, 0.5),
        0.5,
        0.7,
        Heading::Right,
        tuning,
    );
    patroller.body.scale = Vec2::new(1.46, 1.2);

    vec![
        Enemy::guard(Sprite::Monster, Vec2::new(1.7, -2.45), 0.7, 0.7, tuning),
        patroller,
        Enemy::jumper(Sprite::Monster, Vec2::new(0.2, 1.8), 0.7, 0.9, tuning),
    ]
}

/// Background, target marker and jump-scare image
pub fn props() -> (Entity, Entity, Entity) {
    (
        Entity::decorative(Sprite::Background, Vec2::ZERO, Vec2::new(13.26, 7.6)),
        Entity::decorative(Sprite::Target, Vec2::new(WIN_X, WIN_Y), Vec2::splat(0.8)),
        Entity::decorative(Sprite::JumpScare, Vec2::ZERO, Vec2::splat(8.0)),
    )
}
