//! Per-frame simulation tick
//!
//! Advances the world by one frame. All motion is scaled by the wall-clock
//! milliseconds since the previous frame, so the simulation is frame-rate
//! dependent. Ship and asteroid positions integrate their velocity once per
//! tick without `dt`; the ship's velocity already accumulates `dt`-scaled
//! thrust.

use super::collision::point_inside_circle;
use super::state::{GamePhase, Ship, World};
use crate::consts::SCREEN_SIZE;
use crate::round_to_pixel;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thrust held
    pub thrust: bool,
    /// Rotate counter-clockwise held
    pub rotate_left: bool,
    /// Rotate clockwise held
    pub rotate_right: bool,
    /// Fire pressed this frame (edge, not held)
    pub fire: bool,
    /// Restart pressed this frame (only honoured after game over)
    pub restart: bool,
}

/// Advance the world by one frame of `dt` milliseconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.phase == GamePhase::GameOver {
        if input.restart {
            log::info!("Restart requested");
            world.start_new_game();
        }
        return;
    }

    steer_ship(world, input, dt);
    if input.fire {
        world.fire_bullet();
    }

    cull_bullets(world, dt);
    update_bullets(world, dt);

    move_ship(&mut world.ship);
    move_asteroids(world, dt);

    if world.asteroids.is_empty() {
        log::info!("Asteroid field cleared");
        world.phase = GamePhase::GameOver;
    }
}

fn steer_ship(world: &mut World, input: &TickInput, dt: f32) {
    let settings = &world.settings;
    let ship = &mut world.ship;

    if input.thrust {
        ship.motion.vel += ship.heading() * settings.acceleration * dt;
    }
    if input.rotate_left {
        ship.angle -= settings.rotation_speed * dt;
    }
    if input.rotate_right {
        ship.angle += settings.rotation_speed * dt;
    }
}

#[inline]
fn on_screen(pixel: i32) -> bool {
    (0..SCREEN_SIZE as i32).contains(&pixel)
}

/// Drop bullets that are spent or whose next step leaves the screen
fn cull_bullets(world: &mut World, dt: f32) {
    world.bullets.retain(|bullet| {
        let next = bullet.motion.pos + bullet.motion.vel * dt;
        on_screen(round_to_pixel(next.x)) && on_screen(round_to_pixel(next.y)) && !bullet.is_expired()
    });
}

/// Move bullets, age them and resolve hits against asteroids.
///
/// A bullet destroys every asteroid it overlaps this tick. Destroyed
/// asteroids are removed and their fragments added once the bullet's scan is
/// done, so later bullets in the same tick already see the fragments.
fn update_bullets(world: &mut World, dt: f32) {
    let World {
        bullets,
        asteroids,
        spawner,
        settings,
        ..
    } = world;

    for bullet in bullets.iter_mut() {
        bullet.motion.pos += bullet.motion.vel * dt;
        bullet.lifetime -= 1;

        let hit_ids: Vec<u32> = asteroids
            .iter()
            .filter(|a| point_inside_circle(bullet.motion.pos, a.motion.pos, a.radius))
            .map(|a| a.id)
            .collect();
        if hit_ids.is_empty() {
            continue;
        }

        bullet.lifetime = 0;

        let mut fragments = Vec::new();
        for asteroid in asteroids.iter().filter(|a| hit_ids.contains(&a.id)) {
            let children = spawner.fragment(asteroid, settings);
            log::debug!(
                "Bullet {} destroyed asteroid {} (radius {}), {} fragments",
                bullet.id,
                asteroid.id,
                asteroid.radius,
                children.len()
            );
            fragments.extend(children);
        }

        asteroids.retain(|a| !hit_ids.contains(&a.id));
        asteroids.extend(fragments);
    }
}

fn move_ship(ship: &mut Ship) {
    ship.motion.pos += ship.motion.vel;
    ship.motion.wrap();
}

fn move_asteroids(world: &mut World, dt: f32) {
    let ship_pos = world.ship.motion.pos;
    let spin = world.settings.asteroid_spin;
    let mut ship_hit = false;

    for asteroid in &mut world.asteroids {
        asteroid.angle += spin * dt;
        asteroid.motion.pos += asteroid.motion.vel;
        asteroid.motion.wrap();

        if point_inside_circle(ship_pos, asteroid.motion.pos, asteroid.radius) {
            ship_hit = true;
        }
    }

    if ship_hit {
        log::info!("Ship destroyed at ({:.1}, {:.1})", ship_pos.x, ship_pos.y);
        world.phase = GamePhase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Asteroid, Body, Bullet, Motion};
    use glam::Vec2;

    /// A world holding a single resting asteroid at `pos`
    fn world_with_asteroid(pos: Vec2, radius: f32) -> World {
        let mut world = World::new(Settings::default());
        world.asteroids.clear();
        push_still_asteroid(&mut world, pos, radius);
        world
    }

    fn push_still_asteroid(world: &mut World, pos: Vec2, radius: f32) -> u32 {
        let mut asteroid: Asteroid = world
            .spawner
            .generate_asteroid(pos, radius, &world.settings)
            .unwrap();
        asteroid.motion.vel = Vec2::ZERO;
        let id = asteroid.id;
        world.asteroids.push(asteroid);
        id
    }

    fn push_bullet(world: &mut World, pos: Vec2, vel: Vec2, lifetime: i32) {
        let id = world.spawner.next_entity_id();
        world.bullets.push(Bullet {
            id,
            motion: Motion::new(pos, vel),
            lifetime,
        });
    }

    #[test]
    fn test_thrust_and_rotation() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);

        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input, 10.0);
        assert!(world.ship.vel().x.abs() < 1e-6);
        assert!((world.ship.vel().y + 0.01).abs() < 1e-6);
        // position integrates velocity once, not scaled by dt
        assert!((world.ship.pos().y - (64.0 - 0.01)).abs() < 1e-4);

        let input = TickInput {
            rotate_left: true,
            ..Default::default()
        };
        tick(&mut world, &input, 10.0);
        assert!((world.ship.angle + 0.06).abs() < 1e-6);

        let input = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        tick(&mut world, &input, 5.0);
        assert!((world.ship.angle + 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_persists_without_input() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        world.ship.motion.vel = Vec2::new(0.5, 0.0);

        for _ in 0..4 {
            tick(&mut world, &TickInput::default(), 16.0);
        }
        assert_eq!(world.ship.vel(), Vec2::new(0.5, 0.0));
        assert!((world.ship.pos().x - 66.0).abs() < 1e-4);
    }

    #[test]
    fn test_ship_wraps_across_edge() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        world.ship.motion = Motion::new(Vec2::new(127.9, 64.0), Vec2::new(0.5, 0.0));

        tick(&mut world, &TickInput::default(), 16.0);
        assert!((world.ship.pos().x - 0.4).abs() < 1e-3);
    }

    #[test]
    fn test_ship_faster_than_screen_still_wraps() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        world.ship.angle = std::f32::consts::FRAC_PI_2;

        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut world, &input, 200_000.0);

        let pos = world.ship.pos();
        assert!(world.ship.vel().x > 128.0);
        assert!((0.0..128.0).contains(&pos.x) && (0.0..128.0).contains(&pos.y));
        // 64 + 200 lands 8 pixels into the screen
        assert!((pos.x - 8.0).abs() < 1e-2);
    }

    #[test]
    fn test_bullet_lifetime_counts_down_then_expires() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &fire, 1.0);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].lifetime, 99);

        let mut previous = 99;
        for _ in 0..99 {
            tick(&mut world, &TickInput::default(), 1.0);
            let lifetime = world.bullets[0].lifetime;
            assert_eq!(lifetime, previous - 1);
            previous = lifetime;
        }
        assert_eq!(world.bullets[0].lifetime, 0);

        tick(&mut world, &TickInput::default(), 1.0);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_bullet_leaving_screen_is_dropped() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        push_bullet(&mut world, Vec2::new(64.0, 0.5), Vec2::new(0.0, -0.08), 50);

        tick(&mut world, &TickInput::default(), 16.0);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_bullet_hit_fragments_asteroid() {
        let pos = Vec2::new(64.0, 20.0);
        let mut world = world_with_asteroid(pos, 16.0);
        let parent = world.asteroids[0].id;
        push_bullet(&mut world, pos, Vec2::ZERO, 10);

        tick(&mut world, &TickInput::default(), 1.0);

        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].lifetime, 0);
        assert_eq!(world.asteroids.len(), 2);
        for child in &world.asteroids {
            assert_ne!(child.id, parent);
            assert_eq!(child.radius, 8.0);
            // fragments spawn on the parent and have moved one tick since
            assert!((child.pos() - pos).length() <= child.vel().length() + 1e-4);
        }
        assert_eq!(world.phase, GamePhase::Playing);

        // the spent bullet is culled on the following tick
        tick(&mut world, &TickInput::default(), 1.0);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_bullet_destroys_every_overlapping_asteroid() {
        let pos = Vec2::new(40.0, 40.0);
        let mut world = world_with_asteroid(pos, 6.0);
        push_still_asteroid(&mut world, pos + Vec2::new(2.0, 0.0), 6.0);
        let far = push_still_asteroid(&mut world, Vec2::new(100.0, 100.0), 6.0);
        push_bullet(&mut world, pos + Vec2::new(1.0, 0.0), Vec2::ZERO, 10);

        tick(&mut world, &TickInput::default(), 1.0);

        // radius 6 halves to 3, below the fragment threshold
        assert_eq!(world.asteroids.len(), 1);
        assert_eq!(world.asteroids[0].id, far);
    }

    #[test]
    fn test_clearing_field_ends_game() {
        let pos = Vec2::new(30.0, 30.0);
        let mut world = world_with_asteroid(pos, 4.0);
        push_bullet(&mut world, pos, Vec2::ZERO, 10);

        tick(&mut world, &TickInput::default(), 1.0);
        assert!(world.asteroids.is_empty());
        assert_eq!(world.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_ship_collision_across_wrap() {
        let mut world = world_with_asteroid(Vec2::new(127.0, 64.0), 8.0);
        world.ship.motion = Motion::new(Vec2::new(1.0, 64.0), Vec2::ZERO);

        tick(&mut world, &TickInput::default(), 16.0);
        assert_eq!(world.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut world = world_with_asteroid(Vec2::new(64.0, 64.0), 8.0);
        tick(&mut world, &TickInput::default(), 16.0);
        assert!(world.is_game_over());

        let ship_before = world.ship.motion;
        let asteroid_before = world.asteroids[0].motion;
        let input = TickInput {
            thrust: true,
            fire: true,
            rotate_left: true,
            ..Default::default()
        };
        tick(&mut world, &input, 16.0);

        assert!(world.is_game_over());
        assert_eq!(world.ship.motion, ship_before);
        assert_eq!(world.asteroids[0].motion, asteroid_before);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_restart_resets_world() {
        let mut world = world_with_asteroid(Vec2::new(64.0, 64.0), 8.0);
        world.ship.motion.vel = Vec2::new(0.3, -0.2);
        push_bullet(&mut world, Vec2::new(5.0, 5.0), Vec2::ZERO, 10);
        world.phase = GamePhase::GameOver;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut world, &restart, 16.0);

        assert_eq!(world.phase, GamePhase::Playing);
        assert!(world.bullets.is_empty());
        assert_eq!(world.asteroids.len(), 3);
        assert!(world.asteroids.iter().all(|a| a.radius == 16.0));
        assert_eq!(world.ship.pos(), Ship::spawn_point());
        assert_eq!(world.ship.vel(), Vec2::ZERO);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut world, &restart, 16.0);
        assert_eq!(world.asteroids.len(), 1);
    }

    #[test]
    fn test_asteroids_spin_with_dt() {
        let mut world = world_with_asteroid(Vec2::new(10.0, 10.0), 4.0);
        let before = world.asteroids[0].angle;
        tick(&mut world, &TickInput::default(), 20.0);
        assert!((world.asteroids[0].angle - before - 0.02).abs() < 1e-5);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(Settings::default());
        let mut b = World::new(Settings::default());

        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                thrust: true,
                rotate_right: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut a, input, 16.0);
                tick(&mut b, input, 16.0);
            }
        }

        let snap_a = serde_json::to_string(&a).unwrap();
        let snap_b = serde_json::to_string(&b).unwrap();
        assert_eq!(snap_a, snap_b);
    }
}
