//! Axis-aligned collision predicates
//!
//! Everything in the world collides as a box except gravity wells, which are
//! radial. Entities are stored as center + half extents; static geometry
//! (platforms, goal) as a top-left `Rect`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
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

    /// True if both dimensions are strictly positive
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Box (center + half extents) vs rect overlap, open on all edges
///
/// Touching edges do not count as overlap.
#[inline]
pub fn box_overlaps_rect(center: Vec2, half: Vec2, rect: &Rect) -> bool {
    center.x + half.x > rect.x
        && center.x - half.x < rect.right()
        && center.y + half.y > rect.y
        && center.y - half.y < rect.bottom()
}

/// Box vs box overlap, both given as center + half extents
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    delta.x < a_half.x + b_half.x && delta.y < a_half.y + b_half.y
}

/// Strictly-inside radial test
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}
