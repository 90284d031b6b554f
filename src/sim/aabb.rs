//! Axis-aligned bounding boxes for entity collision
//!
//! A box is stored as a center plus half-extents:
//! - center: the entity position
//! - half: (width / 2, height / 2)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_EPSILON;

/// An axis-aligned box centred on an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width, height) * 0.5,
        }
    }

    /// Zero, negative or non-finite extents never collide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.half.x > 0.0 && self.half.y > 0.0)
            || !self.half.is_finite()
            || !self.center.is_finite()
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Overlap depth on each axis (negative means separated on that axis)
    #[inline]
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        (self.half + other.half) - (self.center - other.center).abs()
    }

    /// True when the boxes penetrate on both axes by more than epsilon
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        let o = self.overlap(other);
        o.x > COLLISION_EPSILON && o.y > COLLISION_EPSILON
    }

    /// True when `other` lies entirely inside this box
    pub fn contains(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        b_min.x >= a_min.x && b_min.y >= a_min.y && b_max.x <= a_max.x && b_max.y <= a_max.y
    }
}
