//! Collision primitives
//!
//! Every hit test in the game reduces to circle-vs-axis-aligned-box:
//! bullets and discs are circles, the player and enemies are boxes. The
//! circle test clamps the circle center onto the box and compares the
//! Euclidean distance to the radius, which is exact for this pairing and
//! symmetric in which entity initiates the check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point on (or inside) the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Box-vs-box overlap (strict, touching edges do not collide)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// Circle-vs-box overlap (strict: distance must be less than the radius)
#[inline]
pub fn circle_hits_box(center: Vec2, radius: f32, bb: &Aabb) -> bool {
    let closest = bb.closest_point(center);
    center.distance_squared(closest) < radius * radius
}
