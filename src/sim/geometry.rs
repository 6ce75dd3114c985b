//! Axis-aligned collision geometry
//!
//! Everything in this file is a pure query; nothing holds state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, top-left anchored. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on a point
    pub fn centered_on(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Separating-axis overlap test. Overlap must be strictly positive on
    /// both axes: boxes that merely touch along an edge do not collide.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether an x coordinate lies within the horizontal extent (inclusive)
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }
}

/// How close the player passed to an obstacle, bucketed by tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearMiss {
    /// Index into the tier table; 0 is the tightest
    pub tier: usize,
    /// Center-to-center distance
    pub distance: f32,
}

/// Bucket a center-to-center distance into the tightest tier containing it.
///
/// `tiers` is sorted ascending; returns `None` when the distance exceeds
/// every threshold.
pub fn near_miss_tier(
    player_center: Vec2,
    obstacle_center: Vec2,
    tiers: &[f32],
) -> Option<NearMiss> {
    let distance = player_center.distance(obstacle_center);
    tiers
        .iter()
        .position(|&threshold| distance <= threshold)
        .map(|tier| NearMiss { tier, distance })
}
