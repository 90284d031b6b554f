//! Enemy behavior controller
//!
//! Each enemy owns one `Behavior`: its archetype and current sub-state in a
//! single variant. Only `Enemy::update` moves between sub-states.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Sprite};
use super::state::RngState;
use crate::tuning::Tuning;

/// Fixed enemy class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Guard,
    Patrolling,
    Jumper,
}

/// Horizontal movement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Idle,
    LeftMoving,
    RightMoving,
}

/// Patrol heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn flipped(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// Guard awareness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardState {
    Idle,
    /// Player in sight; the guard turns toward them but holds position
    Watching,
}

/// Archetype plus sub-state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Guard {
        state: GuardState,
    },
    Patrolling {
        heading: Heading,
        /// Center of the patrol range
        origin_x: f32,
    },
    Jumper {
        /// Steps left before the next jump is allowed
        cooldown: u32,
    },
}

impl Behavior {
    pub fn archetype(&self) -> Archetype {
        match self {
            Behavior::Guard { .. } => Archetype::Guard,
            Behavior::Patrolling { .. } => Archetype::Patrolling,
            Behavior::Jumper { .. } => Archetype::Jumper,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Behavior::Patrolling {
                heading: Heading::Left,
                ..
            } => Mode::LeftMoving,
            Behavior::Patrolling {
                heading: Heading::Right,
                ..
            } => Mode::RightMoving,
            Behavior::Guard { .. } | Behavior::Jumper { .. } => Mode::Idle,
        }
    }

    /// Horizontal intent for the coming step
    fn intent(&self) -> Vec2 {
        match self {
            Behavior::Patrolling { heading, .. } => Vec2::new(heading.sign(), 0.0),
            Behavior::Guard { .. } | Behavior::Jumper { .. } => Vec2::ZERO,
        }
    }
}

/// An enemy: a body plus its behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Entity,
    behavior: Behavior,
    /// Which way the sprite faces (cosmetic)
    pub facing: Heading,
}

impl Enemy {
    /// Stationary guard
    pub fn guard(texture: Sprite, pos: Vec2, width: f32, height: f32, tuning: &Tuning) -> Self {
        Self::new(
            texture,
            pos,
            width,
            height,
            tuning,
            Behavior::Guard {
                state: GuardState::Idle,
            },
        )
    }

    /// Walks back and forth around its spawn point
    pub fn patrolling(
        texture: Sprite,
        pos: Vec2,
        width: f32,
        height: f32,
        heading: Heading,
        tuning: &Tuning,
    ) -> Self {
        let mut enemy = Self::new(
            texture,
            pos,
            width,
            height,
            tuning,
            Behavior::Patrolling {
                heading,
                origin_x: pos.x,
            },
        );
        enemy.facing = heading;
        enemy
    }

    /// Bounces in place
    pub fn jumper(texture: Sprite, pos: Vec2, width: f32, height: f32, tuning: &Tuning) -> Self {
        Self::new(
            texture,
            pos,
            width,
            height,
            tuning,
            Behavior::Jumper { cooldown: 0 },
        )
    }

    fn new(
        texture: Sprite,
        pos: Vec2,
        width: f32,
        height: f32,
        tuning: &Tuning,
        behavior: Behavior,
    ) -> Self {
        let body = Entity::body(
            EntityKind::Enemy,
            texture,
            pos,
            width,
            height,
            tuning.enemy_speed,
            tuning.enemy_jump_power,
            tuning.gravity,
        );
        Self {
            body,
            behavior,
            facing: Heading::Left,
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn archetype(&self) -> Archetype {
        self.behavior.archetype()
    }

    pub fn mode(&self) -> Mode {
        self.behavior.mode()
    }

    /// One fixed step: pick intent, integrate and collide, then react to contacts
    pub fn update(
        &mut self,
        dt: f32,
        player: &Entity,
        platforms: &[Entity],
        rng: &mut RngState,
        tuning: &Tuning,
    ) {
        self.body.set_movement(self.behavior.intent());
        self.body.update(dt, platforms);
        self.react(player, rng, tuning);
    }

    /// Sub-state transitions, using this step's fresh flags and positions
    fn react(&mut self, player: &Entity, rng: &mut RngState, tuning: &Tuning) {
        let body = &mut self.body;
        match &mut self.behavior {
            Behavior::Guard { state } => {
                let to_player = player.pos - body.pos;
                let in_sight = !player.hidden && to_player.length() <= tuning.guard_sight_radius;
                let next = if in_sight {
                    GuardState::Watching
                } else {
                    GuardState::Idle
                };
                if next != *state {
                    log::debug!("guard at {:?}: {:?} -> {:?}", body.pos, state, next);
                    *state = next;
                }
                if in_sight {
                    self.facing = if to_player.x < 0.0 {
                        Heading::Left
                    } else {
                        Heading::Right
                    };
                }
            }
            Behavior::Patrolling { heading, origin_x } => {
                let min_x = (*origin_x - tuning.patrol_extent).max(tuning.left_border);
                let max_x = (*origin_x + tuning.patrol_extent).min(tuning.right_border);
                let blocked = match heading {
                    Heading::Left => body.collisions.left || body.pos.x <= min_x,
                    Heading::Right => body.collisions.right || body.pos.x >= max_x,
                };
                if blocked {
                    *heading = heading.flipped();
                    self.facing = *heading;
                    log::debug!("patroller reversed at x={:.2}, now {:?}", body.pos.x, heading);
                }
            }
            Behavior::Jumper { cooldown } => {
                if *cooldown > 0 {
                    *cooldown -= 1;
                } else if body.jump() {
                    *cooldown = rng.jitter(tuning.jumper_period_steps, tuning.jumper_jitter_steps);
                    log::debug!("jumper jumped, next in {} steps", cooldown);
                }
            }
        }
    }
}
