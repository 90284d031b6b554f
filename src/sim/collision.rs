//! Axis-aligned collision resolution against static platforms
//!
//! Movement is resolved one axis at a time: Y first so that ground contact is
//! known before lateral contact, then X. Every overlapping platform pushes the
//! body out by the minimum depth along the axis being resolved.

use super::aabb::Aabb;
use super::entity::Entity;

/// Axis being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Result of resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub axis: Axis,
    /// Signed correction applied to the body along `axis`
    pub correction: f32,
}

/// Penetration of `body` into `other` along `axis`, if they overlap.
///
/// Returns the signed correction that separates `body` from `other`: positive
/// pushes toward +axis (other is below / to the left), negative toward -axis.
pub fn penetration(body: &Aabb, other: &Aabb, axis: Axis) -> Option<f32> {
    if !body.intersects(other) {
        return None;
    }
    let overlap = body.overlap(other);
    let delta = body.center - other.center;
    Some(match axis {
        Axis::Y => {
            if delta.y >= 0.0 {
                overlap.y
            } else {
                -overlap.y
            }
        }
        Axis::X => {
            if delta.x >= 0.0 {
                overlap.x
            } else {
                -overlap.x
            }
        }
    })
}

/// Resolve `body` against every colliding entity in `statics` along one axis.
///
/// Candidates are visited in order; when two platforms overlap the body the
/// later correction is applied on top of the earlier one.
pub fn resolve_axis(body: &mut Entity, statics: &[Entity], axis: Axis) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if !body.collides() {
        return contacts;
    }

    for other in statics.iter().filter(|e| e.collides()) {
        let Some(correction) = penetration(&body.aabb(), &other.aabb(), axis) else {
            continue;
        };

        match axis {
            Axis::Y => {
                body.pos.y += correction;
                body.vel.y = 0.0;
                if correction > 0.0 {
                    body.collisions.bottom = true;
                } else {
                    body.collisions.top = true;
                }
            }
            Axis::X => {
                body.pos.x += correction;
                body.vel.x = 0.0;
                if correction > 0.0 {
                    body.collisions.left = true;
                } else {
                    body.collisions.right = true;
                }
            }
        }
        contacts.push(Contact { axis, correction });
    }

    contacts
}

/// Non-positional overlap check between two bodies (player vs enemy)
#[inline]
pub fn touching(a: &Entity, b: &Entity) -> bool {
    a.aabb().intersects(&b.aabb())
}
