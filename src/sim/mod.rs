//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Stable iteration order (arena order, ids never reused)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{point_inside_circle, toroidal_distance, wrap_coord, wrap_position};
pub use state::{
    Asteroid, Body, Bullet, GamePhase, Motion, Ship, Spawner, Wireframe, World,
};
pub use tick::{TickInput, tick};
