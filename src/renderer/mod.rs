//! Software rendering module
//!
//! Entities are drawn as wireframes into a `RasterSurface`, which is then
//! handed to a presenter.

pub mod color;
pub mod surface;
pub mod wireframe;

pub use color::{Color, palette};
pub use surface::{Frame, RasterError, RasterSurface};

use crate::round_to_pixel;
use crate::sim::{Body, World};

/// Ship color for the current state of the field
pub fn ship_color(world: &World) -> Color {
    if world.asteroids.is_empty() {
        palette::SHIP_FIELD_CLEARED
    } else {
        palette::SHIP
    }
}

/// Draw every entity of the world: bullets as single pixels, then asteroid and ship outlines
pub fn render_frame(world: &World, surface: &mut RasterSurface) -> Result<(), RasterError> {
    for bullet in &world.bullets {
        let pos = bullet.pos();
        surface.set_pixel(round_to_pixel(pos.x), round_to_pixel(pos.y), palette::BULLET)?;
    }

    for asteroid in &world.asteroids {
        wireframe::draw(surface, asteroid, palette::ASTEROID)?;
    }

    wireframe::draw(surface, &world.ship, ship_color(world))
}
