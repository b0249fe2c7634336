//! Packed 24-bit colors

use serde::{Deserialize, Serialize};

/// RGB packed as `r | g << 8 | b << 16`, the layout the pixel buffer stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    /// Split into `(r, g, b)` channel bytes
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
        )
    }

    /// Packed value, upper byte cleared
    pub const fn packed(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

/// Colors for game elements
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const BULLET: Color = Color::from_rgb(255, 255, 255);
    pub const SHIP: Color = Color::from_rgb(0x1F, 0xFF, 0x1F); // Green
    pub const SHIP_FIELD_CLEARED: Color = Color::from_rgb(0xFF, 0x1F, 0x1F); // Red
    pub const ASTEROID: Color = Color::from_rgb(255, 207, 0); // Tan/yellow
}
