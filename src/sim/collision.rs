//! Toroidal collision space
//!
//! The play area wraps on both axes, so every distance query has to consider
//! the shortcut across the edge. Collision is always circle-approximate: a
//! point against an entity's declared radius.

use glam::Vec2;

use crate::consts::SCREEN_SIZE_F;

/// Bring any finite coordinate back into `[0, SCREEN_SIZE)`
#[inline]
pub fn wrap_coord(v: f32) -> f32 {
    let w = v.rem_euclid(SCREEN_SIZE_F);
    // a tiny negative remainder can round up to the screen size
    if w < SCREEN_SIZE_F { w } else { 0.0 }
}

/// Wrap both axes of a position
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(wrap_coord(pos.x), wrap_coord(pos.y))
}

/// Fold an axis difference to the shorter way round the torus
#[inline]
fn fold_axis(diff: f32) -> f32 {
    let diff = diff.abs().rem_euclid(SCREEN_SIZE_F);
    if diff > SCREEN_SIZE_F / 2.0 {
        SCREEN_SIZE_F - diff
    } else {
        diff
    }
}

/// Euclidean distance between two points, taking the wrap-around shortcut per axis
pub fn toroidal_distance(p: Vec2, c: Vec2) -> f32 {
    let dx = fold_axis(p.x - c.x);
    let dy = fold_axis(p.y - c.y);
    Vec2::new(dx, dy).length()
}

/// Check if a point lies strictly inside a circle on the torus
#[inline]
pub fn point_inside_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    toroidal_distance(point, center) < radius
}
