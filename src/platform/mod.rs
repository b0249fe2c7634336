//! Platform abstraction layer
//!
//! The game core only sees these seams:
//! - `InputSource` for per-frame key state
//! - `FrameClock` for elapsed wall-clock time
//! - `Presenter` for displaying a finished frame
//!
//! A windowed front end uploads each frame to a texture (nearest filtering,
//! clamp-to-edge) and owns its own setup and teardown. The headless
//! implementations here drive the game without one.

use std::time::Instant;

use crate::renderer::Frame;
use crate::sim::TickInput;

/// Source of per-frame input
pub trait InputSource {
    /// Input for the coming tick. `fire` and `restart` must already be edges.
    fn poll(&mut self) -> TickInput;
}

/// Receiver of finished frames
pub trait Presenter {
    fn present(&mut self, frame: Frame<'_>);
}

/// Turns a held key into a just-pressed edge
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    was_down: bool,
}

impl KeyLatch {
    /// True only on the frame the key goes down
    pub fn just_pressed(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}

/// Raw held state of the five game keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Converts held keys into tick input, edge-triggering fire and restart
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    fire: KeyLatch,
    restart: KeyLatch,
}

impl InputMapper {
    pub fn map(&mut self, keys: HeldKeys) -> TickInput {
        TickInput {
            thrust: keys.thrust,
            rotate_left: keys.rotate_left,
            rotate_right: keys.rotate_right,
            fire: self.fire.just_pressed(keys.fire),
            restart: self.restart.just_pressed(keys.restart),
        }
    }
}

/// Scripted input for the headless demo: circles, thrusts in bursts and
/// taps fire a few times a second. Taps restart while the game is over.
#[derive(Debug, Clone, Default)]
pub struct DemoPilot {
    frame: u32,
    mapper: InputMapper,
}

impl DemoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn keys_for(frame: u32) -> HeldKeys {
        HeldKeys {
            thrust: frame % 90 < 6,
            rotate_left: false,
            rotate_right: frame % 240 < 160,
            fire: frame % 12 < 3,
            restart: frame % 60 < 2,
        }
    }
}

impl InputSource for DemoPilot {
    fn poll(&mut self) -> TickInput {
        let keys = Self::keys_for(self.frame);
        self.frame = self.frame.wrapping_add(1);
        self.mapper.map(keys)
    }
}

/// Wall-clock delta between frames in whole milliseconds
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Milliseconds since the previous call (or since creation)
    pub fn elapsed_ms(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_millis();
        self.last = now;
        elapsed as f32
    }
}

/// Keeps the last presented frame in memory
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    width: u32,
    height: u32,
    last: Vec<u32>,
    frames: u64,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pixels of the most recent frame
    pub fn last_frame(&self) -> &[u32] {
        &self.last
    }

    /// Render the last frame as text, one character per `scale` x `scale` block
    pub fn to_ascii(&self, scale: u32) -> String {
        let scale = scale.max(1);
        let mut out = String::new();
        for by in (0..self.height).step_by(scale as usize) {
            for bx in (0..self.width).step_by(scale as usize) {
                let lit = (by..(by + scale).min(self.height)).any(|y| {
                    (bx..(bx + scale).min(self.width))
                        .any(|x| self.last[(y * self.width + x) as usize] != 0)
                });
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: Frame<'_>) {
        self.width = frame.width;
        self.height = frame.height;
        self.last.clear();
        self.last.extend_from_slice(frame.pixels);
        self.frames += 1;
        log::trace!("Presented frame {} ({} bytes)", self.frames, frame.as_bytes().len());
    }
}
