//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platforms and enemies keep their level order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod behavior;
pub mod collision;
pub mod entity;
pub mod level;
pub mod state;
pub mod tick;
pub mod timestep;

pub use aabb::Aabb;
pub use behavior::{Archetype, Behavior, Enemy, GuardState, Heading, Mode};
pub use collision::{Axis, Contact, penetration, resolve_axis, touching};
pub use entity::{Animation, Collisions, Entity, EntityKind, Sprite};
pub use state::{GameState, Outcome, RngState, Session};
pub use tick::{TickInput, evaluate_outcome, tick};
pub use timestep::{FixedTimestep, StepReport};
