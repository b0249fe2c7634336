//! Software raster surface
//!
//! A fixed grid of packed RGB pixels. Writes wrap around both axes, which
//! matches the toroidal play field: a wireframe crossing the right edge
//! reappears on the left.

use super::color::Color;
use crate::consts::{LINE_END_THRESHOLD, LINE_STEP};
use crate::platform::Presenter;
use crate::round_to_pixel;

/// Rasterization errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// A pixel write that still misses the buffer after wrapping
    #[error("Trying to draw to invalid position {x}, {y}")]
    CoordinateOutOfRange { x: i32, y: i32 },
}

/// Borrowed view of a finished frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    /// Row-major packed pixels, `width * height` long
    pub pixels: &'a [u32],
}

impl Frame<'_> {
    /// Raw bytes in native endianness (R, G, B, 0 on little-endian)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels)
    }

    /// Color at a wrapped coordinate, black if the frame is empty
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::default();
        }
        let nx = x.rem_euclid(self.width as i32) as usize;
        let ny = y.rem_euclid(self.height as i32) as usize;
        Color(self.pixels.get(ny * self.width as usize + nx).copied().unwrap_or_default())
    }
}

/// Packed-RGB pixel buffer with wrap-around addressing
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RasterSurface {
    /// Create a black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Color at a wrapped coordinate
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        let index = self.wrapped_index(x, y);
        Color(self.pixels.get(index).copied().unwrap_or_default())
    }

    /// Buffer index for a coordinate, wrapping both axes
    #[inline]
    fn wrapped_index(&self, x: i32, y: i32) -> usize {
        let nx = x.rem_euclid(self.width as i32) as usize;
        let ny = y.rem_euclid(self.height as i32) as usize;
        ny * self.width as usize + nx
    }

    /// Write one pixel. Negative and oversized coordinates wrap.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<(), RasterError> {
        let index = self.wrapped_index(x, y);
        let cell = self
            .pixels
            .get_mut(index)
            .ok_or(RasterError::CoordinateOutOfRange { x, y })?;
        *cell = color.packed();
        Ok(())
    }

    /// Trace a line in half-pixel steps.
    ///
    /// Plots the nearest pixel at each step until the remaining distance to
    /// the end point drops under 0.9, so the end point itself is usually left
    /// to the next edge of a polygon. Pixels near corners may be plotted
    /// twice. Zero-length and non-finite segments draw nothing. The step
    /// count is bounded by the segment length and by `max_line_steps`, so
    /// huge coordinates or segments wrapping the surface many times still
    /// terminate.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) -> Result<(), RasterError> {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let length = dx.hypot(dy);
        if !length.is_finite() || length <= f32::EPSILON {
            return Ok(());
        }

        let step_x = dx / length * LINE_STEP;
        let step_y = dy / length * LINE_STEP;
        let steps = ((length / LINE_STEP).ceil() as usize)
            .saturating_add(1)
            .min(self.max_line_steps());

        for i in 0..steps {
            let t = i as f32;
            let x = x1 + step_x * t;
            let y = y1 + step_y * t;
            if (x2 - x).hypot(y2 - y) < LINE_END_THRESHOLD {
                break;
            }
            self.set_pixel(round_to_pixel(x), round_to_pixel(y), color)?;
        }
        Ok(())
    }

    /// Most steps one line may take: enough to cross every pixel twice
    pub fn max_line_steps(&self) -> usize {
        2 * self.pixels.len().max(1)
    }

    /// Reset every pixel to black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Borrow the current contents as a frame
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    /// Hand the finished frame to the presenter, then clear for the next one
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        presenter.present(self.frame());
        self.clear();
    }

    /// Number of non-black pixels
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}
