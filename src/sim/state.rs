//! Game state and core simulation types
//!
//! The `World` owns every body. Asteroids and bullets live in id-keyed arenas
//! so removals can be collected during a scan and applied afterwards.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::wrap_position;
use crate::consts::*;
use crate::heading_vector;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship destroyed or field cleared; waiting for restart
    GameOver,
}

/// Kinematic state shared by every moving body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Motion {
    pub const fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Keep the position on the torus
    pub fn wrap(&mut self) {
        self.pos = wrap_position(self.pos);
    }
}

/// Anything with a position and a velocity
pub trait Body {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn pos(&self) -> Vec2 {
        self.motion().pos
    }

    fn vel(&self) -> Vec2 {
        self.motion().vel
    }
}

/// A body drawn as a closed polygon and collided as a circle
pub trait Wireframe: Body {
    /// Heading in radians
    fn angle(&self) -> f32;
    /// Outline in local space
    fn model(&self) -> &[Vec2];
    /// Collision radius
    fn radius(&self) -> f32;
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub motion: Motion,
    pub angle: f32,
    pub model: [Vec2; 3],
    pub radius: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            motion: Motion::new(Self::spawn_point(), Vec2::ZERO),
            angle: 0.0,
            model: SHIP_MODEL.map(|(x, y)| Vec2::new(x, y)),
            radius: SHIP_RADIUS,
        }
    }
}

impl Ship {
    /// Centre of the screen
    pub fn spawn_point() -> Vec2 {
        Vec2::splat(SCREEN_SIZE_F / 2.0)
    }

    /// Put the ship back at the centre, at rest. The heading is kept.
    pub fn reset(&mut self) {
        self.motion = Motion::new(Self::spawn_point(), Vec2::ZERO);
    }

    /// Direction the nose points
    pub fn heading(&self) -> Vec2 {
        heading_vector(self.angle)
    }
}

impl Body for Ship {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Wireframe for Ship {
    fn angle(&self) -> f32 {
        self.angle
    }

    fn model(&self) -> &[Vec2] {
        &self.model
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub motion: Motion,
    pub angle: f32,
    pub model: Vec<Vec2>,
    pub radius: f32,
}

impl Body for Asteroid {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Wireframe for Asteroid {
    fn angle(&self) -> f32 {
        self.angle
    }

    fn model(&self) -> &[Vec2] {
        &self.model
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub motion: Motion,
    /// Ticks left; zero or less means the bullet is dead
    pub lifetime: i32,
}

impl Bullet {
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0
    }
}

impl Body for Bullet {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

/// Seeded asteroid generator and entity id allocator
#[derive(Debug, Clone, Serialize)]
pub struct Spawner {
    #[serde(skip)]
    rng: Pcg32,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build an asteroid with a jittered outline and a random heading.
    ///
    /// Velocity is inversely proportional to the radius, so fragments fly
    /// faster than their parent. Returns `None` for a radius that is not a
    /// positive finite number.
    pub fn generate_asteroid(&mut self, pos: Vec2, radius: f32, settings: &Settings) -> Option<Asteroid> {
        if !(radius.is_finite() && radius > 0.0) {
            log::debug!("Refusing to generate asteroid with radius {}", radius);
            return None;
        }

        let sides = settings.asteroid_sides.max(3);
        let step = TAU / sides as f32;
        let model = (0..sides)
            .map(|i| {
                let theta = i as f32 * step;
                let jitter = self.rng.random::<f32>() * settings.asteroid_deformation;
                Vec2::new(-theta.sin() * radius + jitter, theta.cos() * radius + jitter)
            })
            .collect();

        let heading = self.rng.random::<f32>() * TAU;
        let vel = Vec2::new(-heading.sin(), heading.cos()) / radius;

        Some(Asteroid {
            id: self.next_entity_id(),
            motion: Motion::new(pos, vel),
            angle: heading,
            model,
            radius,
        })
    }

    /// Children left behind by a destroyed asteroid: two half-sized rocks at
    /// its position, or nothing once they would drop under the minimum radius
    pub fn fragment(&mut self, parent: &Asteroid, settings: &Settings) -> Vec<Asteroid> {
        let radius = parent.radius / 2.0;
        if radius < settings.min_fragment_radius {
            return Vec::new();
        }
        (0..2)
            .filter_map(|_| self.generate_asteroid(parent.motion.pos, radius, settings))
            .collect()
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub ship: Ship,
    /// Live asteroids (unique ids)
    pub asteroids: Vec<Asteroid>,
    /// Live bullets (unique ids)
    pub bullets: Vec<Bullet>,
    pub phase: GamePhase,
    /// Tuning in effect for this world
    pub settings: Settings,
    pub spawner: Spawner,
}

impl World {
    /// Create a world and start the first game
    pub fn new(settings: Settings) -> Self {
        let mut world = Self {
            ship: Ship::default(),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            phase: GamePhase::Playing,
            spawner: Spawner::new(settings.seed),
            settings,
        };
        world.start_new_game();
        world
    }

    /// Reset to the opening layout: three big rocks and a resting ship
    pub fn start_new_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.asteroids.clear();
        self.bullets.clear();

        for (fx, fy) in START_POSITIONS {
            let pos = Vec2::new(SCREEN_SIZE_F * fx, SCREEN_SIZE_F * fy);
            if let Some(asteroid) =
                self.spawner
                    .generate_asteroid(pos, self.settings.start_radius, &self.settings)
            {
                self.asteroids.push(asteroid);
            }
        }

        self.ship.reset();
        log::info!("New game with {} asteroids", self.asteroids.len());
    }

    /// Launch a bullet from the ship's nose direction
    pub fn fire_bullet(&mut self) {
        let id = self.spawner.next_entity_id();
        let vel = self.ship.heading() * self.settings.shot_speed;
        self.bullets.push(Bullet {
            id,
            motion: Motion::new(self.ship.motion.pos, vel),
            lifetime: self.settings.bullet_lifetime,
        });
        log::debug!("Bullet {} fired", id);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
