//! Wireframe transform and outline drawing

use glam::Vec2;

use super::color::Color;
use super::surface::{RasterError, RasterSurface};
use crate::sim::{Body, Wireframe};

/// Rotate each local vertex by `angle`, then translate to `pos`
pub fn transform(model: &[Vec2], angle: f32, pos: Vec2) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(angle);
    model.iter().map(|&v| rotation.rotate(v) + pos).collect()
}

/// Draw a closed polygon, including the edge from the last vertex back to the first
pub fn draw_outline(surface: &mut RasterSurface, points: &[Vec2], color: Color) -> Result<(), RasterError> {
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        surface.draw_line(a.x, a.y, b.x, b.y, color)?;
    }
    Ok(())
}

/// Place a body's outline in the world and draw it
pub fn draw<W: Wireframe + ?Sized>(surface: &mut RasterSurface, body: &W, color: Color) -> Result<(), RasterError> {
    let points = transform(body.model(), body.angle(), body.pos());
    draw_outline(surface, &points, color)
}
