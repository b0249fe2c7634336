//! Torus Asteroids - a wrap-around vector arcade game
//!
//! Core modules:
//! - `sim`: Simulation (bodies, toroidal collision, per-frame tick)
//! - `renderer`: Software rasterizer and wireframe drawing
//! - `platform`: Input, clock and presentation seams
//! - `game`: Frame loop tying the three together
//! - `settings`: Data-driven tuning

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Side of the square play area and of the pixel buffer
    pub const SCREEN_SIZE: u32 = 128;
    /// `SCREEN_SIZE` as a float, for world-space math
    pub const SCREEN_SIZE_F: f32 = SCREEN_SIZE as f32;

    /// Number of asteroids at game start
    pub const START_ASTEROIDS: usize = 3;
    /// Start positions as fractions of the screen size
    pub const START_POSITIONS: [(f32, f32); START_ASTEROIDS] = [(0.3, 0.3), (0.9, 0.3), (0.3, 0.9)];

    /// Ship outline in local space (nose up)
    pub const SHIP_MODEL: [(f32, f32); 3] = [(0.0, -5.0), (2.5, 2.5), (-2.5, 2.5)];
    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 2.5;

    /// Remaining distance at which the line tracer stops
    pub const LINE_END_THRESHOLD: f32 = 0.9;
    /// Tracer step along the unit direction
    pub const LINE_STEP: f32 = 0.5;
}

/// Round to the nearest pixel, halves going up (`-0.5` becomes `0`)
#[inline]
pub fn round_to_pixel(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Direction the nose points for a heading angle (0 = up, clockwise positive)
#[inline]
pub fn heading_vector(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.sin(), -angle.cos())
}
