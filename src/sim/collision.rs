//! Collision and bounds tests
//!
//! The rocket is treated as a point; the target is an axis-aligned box
//! centred on its position.

use glam::Vec2;

use super::state::{Projectile, Target};

/// Strict point-in-box test. Points on the edge are outside.
#[inline]
pub fn point_in_box(point: Vec2, center: Vec2, size: Vec2) -> bool {
    let half = size * 0.5;
    point.x > center.x - half.x
        && point.x < center.x + half.x
        && point.y > center.y - half.y
        && point.y < center.y + half.y
}

/// Whether a position has left the playfield.
///
/// Only the bottom, right and left edges count; rockets may arc above the
/// top of the screen and come back down.
#[inline]
pub fn out_of_bounds(pos: Vec2, width: f32, height: f32) -> bool {
    pos.y > height || pos.x > width || pos.x < 0.0
}

/// Check whether a live, not-yet-hit projectile overlaps the target
pub fn projectile_hits_target(projectile: &Projectile, target: Option<&Target>) -> bool {
    if projectile.hit {
        return false;
    }
    target.is_some_and(|t| t.contains(projectile.pos))
}
