//! Frame loop
//!
//! One frame runs input → simulation → render → present to completion
//! before the next begins.

use crate::consts::SCREEN_SIZE;
use crate::platform::Presenter;
use crate::renderer::{RasterError, RasterSurface, render_frame};
use crate::settings::Settings;
use crate::sim::{GamePhase, TickInput, World, tick};

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    surface: RasterSurface,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self {
            world: World::new(settings),
            surface: RasterSurface::new(SCREEN_SIZE, SCREEN_SIZE),
        }
    }

    /// Run one frame of `dt` milliseconds and present it.
    ///
    /// While the game is over the frozen world is still drawn each frame.
    pub fn frame<P: Presenter + ?Sized>(
        &mut self,
        input: &TickInput,
        dt: f32,
        presenter: &mut P,
    ) -> Result<GamePhase, RasterError> {
        let before = self.world.phase;
        tick(&mut self.world, input, dt);
        if before != self.world.phase {
            log::info!("Phase {:?} -> {:?}", before, self.world.phase);
        }

        render_frame(&self.world, &mut self.surface)?;
        self.surface.present(presenter);
        Ok(self.world.phase)
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }
}
