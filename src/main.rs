//! Torus Asteroids entry point
//!
//! Runs the game headless: a scripted pilot flies the ship, frames are kept
//! in memory, and the last one is printed as text when the run ends.

use std::process::ExitCode;
use std::time::Duration;

use torus_asteroids::platform::{DemoPilot, FrameClock, HeadlessPresenter, InputSource};
use torus_asteroids::sim::GamePhase;
use torus_asteroids::{Game, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Torus Asteroids (headless) starting...");

    let settings = Settings::load();
    let frames = settings.demo_frames;
    let frame_time = Duration::from_millis(settings.frame_ms);
    log::info!("Game initialized with seed: {}", settings.seed);

    let mut game = Game::new(settings);
    let mut pilot = DemoPilot::new();
    let mut presenter = HeadlessPresenter::new();
    let mut clock = FrameClock::new();
    let mut game_overs = 0u32;

    for _ in 0..frames {
        std::thread::sleep(frame_time);
        let dt = clock.elapsed_ms();
        let input = pilot.poll();

        let before = game.world.phase;
        match game.frame(&input, dt, &mut presenter) {
            Ok(phase) => {
                if before == GamePhase::Playing && phase == GamePhase::GameOver {
                    game_overs += 1;
                }
            }
            Err(e) => {
                log::error!("Render error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    log::info!(
        "Ran {} frames: {} game overs, {} asteroids and {} bullets alive",
        presenter.frames(),
        game_overs,
        game.world.asteroids.len(),
        game.world.bullets.len()
    );
    println!("{}", presenter.to_ascii(2));
    ExitCode::SUCCESS
}
