//! Per-tick physics engine
//!
//! Advances every unfinished body through the fixed step order: velocity
//! clamp, integration, friction, magnet pull, body-body collisions,
//! terrain interaction, out-of-bounds recovery, finish check, and
//! pickup proximity. The engine owns a seeded RNG so bounce jitter and
//! escape impulses replay identically for the same seed.
//!
//! Nothing here is fatal: degenerate vectors resolve to canonical
//! fallbacks, and resolution deadlocks break out through a bounded pass
//! count plus a heuristic escape impulse.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, BonusKind, BonusPickup};
use super::collision::{min_penetration_edge, reflect_velocity, resolve_body_pair};
use super::terrain::{Direction, SurfaceKind, Terrain};
use crate::audio::{SoundCue, SoundSink};
use crate::config::EngineConfig;
use crate::vec::{clamp_axes, limit_length, normalize_or_x};

/// A body within pickup range of an available bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupContact {
    pub body: usize,
    pub pickup: usize,
}

/// What happened during one tick, for the engine's collaborators.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Bodies close enough to an available pickup; acquisition is the
    /// bonus manager's call.
    pub pickups_reached: Vec<PickupContact>,
    /// Bodies that reached the goal this tick.
    pub finished: Vec<usize>,
    /// Bodies returned to spawn this tick.
    pub out_of_bounds: Vec<usize>,
}

/// The physics engine for one hole. Single-threaded; one instance owns
/// one hole's bodies for its lifetime.
pub struct Engine {
    cfg: EngineConfig,
    rng: Pcg32,
}

impl Engine {
    /// Build an engine with the given tuning and RNG seed. The same seed
    /// replays the same jitter and escape impulses.
    pub fn new(cfg: EngineConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Apply a shot impulse: magnitude-clamped to the max velocity, then
    /// added to the current velocity. Accumulative, so shots taken before
    /// the body comes to rest stack.
    pub fn resolve_shot(&self, body: &mut Body, impulse: Vec2) {
        body.velocity += limit_length(impulse, self.cfg.max_velocity);
    }

    /// One-shot radial explosion from `source`, pushing every other
    /// unfinished body away with inverse-distance falloff. Triggered by
    /// the bonus manager when an Explosion bonus is consumed.
    pub fn apply_explosion(&self, source: usize, bodies: &mut [Body]) {
        let Some(center) = bodies.get(source).map(|b| b.position) else {
            return;
        };
        let range_sq = self.cfg.explosion_range * self.cfg.explosion_range;

        for (i, target) in bodies.iter_mut().enumerate() {
            if i == source || target.finished {
                continue;
            }
            let diff = center - target.position;
            let dist_sq = diff.length_squared();
            if dist_sq > range_sq {
                continue;
            }
            let distance = dist_sq.sqrt();
            let multiplier = if distance < 0.1 {
                self.cfg.explosion_power_cap
            } else {
                (1.0 / distance).min(self.cfg.explosion_power_cap)
            };
            // Push away from the blast center.
            target.velocity -= normalize_or_x(diff) * multiplier * self.cfg.explosion_force;
        }
    }

    /// Advance all unfinished bodies by one tick. An empty body slice is
    /// a no-op.
    pub fn update(
        &mut self,
        bodies: &mut [Body],
        terrain: &Terrain,
        pickups: &[BonusPickup],
        dt: f32,
        sink: &mut dyn SoundSink,
    ) -> TickReport {
        let mut report = TickReport::default();

        // Clamp, integrate, friction, magnet.
        for body in bodies.iter_mut().filter(|b| !b.finished) {
            self.integrate(body, terrain, dt);
        }

        // Body-body collisions: every unordered pair, ghosts pass through.
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (left, right) = bodies.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);
                if a.finished || b.finished || a.is_ghost() || b.is_ghost() {
                    continue;
                }
                if resolve_body_pair(a, b) {
                    sink.play(SoundCue::BodyHit);
                }
            }
        }

        // Terrain interaction; ghosts bypass everything but friction.
        for body in bodies.iter_mut().filter(|b| !b.finished && !b.is_ghost()) {
            self.resolve_terrain(body, terrain, sink);
        }

        for (i, body) in bodies.iter_mut().enumerate() {
            if body.finished {
                continue;
            }

            // Out of bounds: no supporting tile under the body. Ghosts
            // may occupy void space.
            if !body.is_ghost() && !terrain.supports(body.position) {
                log::debug!("body {:?} out of bounds, back to spawn", body.name);
                body.position = terrain.spawn;
                body.velocity = Vec2::ZERO;
                sink.play(SoundCue::OutOfBounds);
                report.out_of_bounds.push(i);
            }

            // Finish: within the goal's capture radius.
            let capture = body.radius + self.cfg.goal_epsilon;
            if body.position.distance(terrain.goal.position) <= capture {
                body.finished = true;
                body.velocity = Vec2::ZERO;
                sink.play(SoundCue::Holed);
                report.finished.push(i);
            }
        }

        // Pickup proximity; the distance test only.
        for (bi, body) in bodies.iter().enumerate() {
            if body.finished {
                continue;
            }
            for (pi, pickup) in pickups.iter().enumerate() {
                if pickup.available
                    && body.position.distance(pickup.position) < self.cfg.pickup_radius
                {
                    report.pickups_reached.push(PickupContact { body: bi, pickup: pi });
                }
            }
        }

        report
    }

    /// Velocity clamp, position integration, friction, magnet pull.
    fn integrate(&self, body: &mut Body, terrain: &Terrain, dt: f32) {
        let boosted = body.has_active(BonusKind::SpeedBoost);

        body.velocity = clamp_axes(body.velocity, self.cfg.velocity_ceiling(boosted));

        let modifier = if boosted { self.cfg.boost_multiplier } else { 1.0 };
        body.position += body.velocity * dt * modifier;

        // Ghost-phased bodies glide on ice regardless of the tile below.
        let friction = if body.is_ghost() {
            self.cfg.ice_friction
        } else {
            match terrain.surface_at(body.position) {
                Some(SurfaceKind::Sand) => self.cfg.sand_friction,
                Some(SurfaceKind::Ice) => self.cfg.ice_friction,
                // Fairway, interactive tiles, water, or no tile at all.
                _ => self.cfg.fairway_friction,
            }
        };
        body.velocity *= (-(friction / body.mass) * dt).exp();

        if body.has_active(BonusKind::Magnet) {
            let to_goal = terrain.goal.position - body.position;
            let distance = to_goal.length().max(self.cfg.magnet_min_distance);
            body.velocity +=
                normalize_or_x(to_goal) * (self.cfg.magnet_strength / distance) * dt;
        }
    }

    /// Bounded terrain-resolution loop. Accelerators fire once per tick;
    /// solid tiles are re-resolved until clean or the pass cap is hit,
    /// after which a randomized escape impulse breaks the deadlock.
    fn resolve_terrain(&mut self, body: &mut Body, terrain: &Terrain, sink: &mut dyn SoundSink) {
        for pass in 0..self.cfg.terrain_passes {
            let mut collided = false;

            for tile in terrain.tiles() {
                match tile.kind {
                    SurfaceKind::Obstacle => {
                        if self.resolve_obstacle(body, &tile.rect) {
                            sink.play(SoundCue::WallHit);
                            collided = true;
                        }
                    }
                    SurfaceKind::Bounce => {
                        if self.resolve_bounce(body, &tile.rect) {
                            sink.play(SoundCue::Bounce);
                            collided = true;
                        }
                    }
                    SurfaceKind::Accelerator(direction) if pass == 0 => {
                        if tile.rect.overlaps_circle(body.position, body.radius) {
                            self.apply_accelerator(body, direction);
                            sink.play(SoundCue::Boost);
                        }
                    }
                    _ => {}
                }
            }

            if !collided {
                return;
            }
        }

        // All passes used and the last one still moved the body. If it
        // remains wedged between tiles, nudge it in a random direction.
        // Heuristic, not physically exact; good enough to never stall the
        // game.
        let stuck = terrain
            .tiles()
            .iter()
            .any(|t| t.kind.is_solid() && t.rect.overlaps_circle(body.position, body.radius));
        if stuck {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            body.velocity += Vec2::from_angle(angle) * self.cfg.escape_impulse;
            log::debug!("body {:?} wedged in terrain, escape impulse applied", body.name);
        }
    }

    /// Push the body out through the shallowest edge, reflect the normal
    /// velocity component, and keep it moving outward.
    fn resolve_obstacle(&mut self, body: &mut Body, rect: &super::terrain::Rect) -> bool {
        let Some(contact) = min_penetration_edge(body.position, body.radius, rect) else {
            return false;
        };

        body.position += contact.normal * (contact.depth + self.cfg.obstacle_buffer);

        if body.velocity.dot(contact.normal) < 0.0 {
            body.velocity = reflect_velocity(body.velocity, contact.normal);
        }

        // Guarantee a minimum outward speed so the body cannot re-enter
        // on the next tick.
        let outward = body.velocity.dot(contact.normal);
        if outward < self.cfg.min_escape_speed {
            body.velocity += contact.normal * (self.cfg.min_escape_speed - outward);
        }

        // Repeated contacts must not pump energy into the body.
        body.velocity = limit_length(body.velocity, self.cfg.obstacle_speed_limit());

        true
    }

    /// Same edge selection as obstacles, but the reflection amplifies
    /// speed and gets a small random angular jitter so a body cannot
    /// settle into a perfectly periodic bounce loop.
    fn resolve_bounce(&mut self, body: &mut Body, rect: &super::terrain::Rect) -> bool {
        let Some(contact) = min_penetration_edge(body.position, body.radius, rect) else {
            return false;
        };

        body.position += contact.normal * (contact.depth + self.cfg.obstacle_buffer);

        let inward = body.velocity.dot(contact.normal);
        if inward < 0.0 {
            // Replace the normal component with -k·v along the edge axis.
            body.velocity += contact.normal * (-self.cfg.bounce_multiplier * inward - inward);
        }

        let jitter = self
            .rng
            .random_range(-self.cfg.bounce_jitter..=self.cfg.bounce_jitter);
        body.velocity = Vec2::from_angle(jitter).rotate(body.velocity);

        true
    }

    /// Asymmetric directional push: amplify motion already aligned with
    /// the accelerator, dampen and kick motion opposing it, so the push
    /// is consistent regardless of heading.
    fn apply_accelerator(&self, body: &mut Body, direction: Direction) {
        let dir = direction.unit();
        let along = body.velocity.dot(dir);
        if along >= 0.0 {
            body.velocity += dir * along * (self.cfg.accel_multiplier - 1.0);
        } else {
            body.velocity += dir * (along * (self.cfg.accel_damping - 1.0));
            body.velocity += dir * self.cfg.accel_kick;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NullSink, RecordingSink};
    use crate::sim::body::BonusEffect;
    use crate::sim::terrain::{Goal, Rect, Tile};

    const DT: f32 = 0.016;

    fn open_terrain() -> Terrain {
        // One big fairway with the goal tucked into a far corner.
        Terrain::new(
            vec![Tile::new(
                SurfaceKind::Fairway,
                Rect::new(-5000.0, -5000.0, 10_000.0, 10_000.0),
            )],
            Goal {
                position: Vec2::new(4000.0, 4000.0),
            },
            Vec2::new(0.0, 0.0),
        )
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default(), 42)
    }

    fn body_with_velocity(pos: Vec2, vel: Vec2) -> Body {
        let mut b = Body::new("b", pos, &EngineConfig::default());
        b.velocity = vel;
        b
    }

    #[test]
    fn empty_body_list_is_a_no_op() {
        let mut eng = engine();
        let terrain = open_terrain();
        let report = eng.update(&mut [], &terrain, &[], DT, &mut NullSink);
        assert!(report.finished.is_empty());
        assert!(report.out_of_bounds.is_empty());
    }

    #[test]
    fn friction_decays_velocity_monotonically_to_rest() {
        // Fairway friction 0.06, mass 0.05, dt 0.016.
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(100.0, 0.0))];

        let mut last_speed = bodies[0].speed();
        for _ in 0..1000 {
            eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
            let speed = bodies[0].speed();
            assert!(speed <= last_speed + 1e-6, "speed must not grow under friction");
            last_speed = speed;
        }
        assert!(bodies[0].speed() < 0.01);
    }

    #[test]
    fn friction_matches_exponential_model() {
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let terrain = open_terrain();
        let v0 = 500.0;
        let mut bodies = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(v0, 0.0))];

        let ticks = 50;
        for _ in 0..ticks {
            eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
        }
        let t = ticks as f32 * DT;
        let expected = v0 * (-(cfg.fairway_friction / cfg.ball_mass) * t).exp();
        let actual = bodies[0].speed();
        assert!(
            (actual - expected).abs() / expected < 0.05,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn sand_decays_faster_than_fairway() {
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let sandy = Terrain::new(
            vec![Tile::new(
                SurfaceKind::Sand,
                Rect::new(-5000.0, -5000.0, 10_000.0, 10_000.0),
            )],
            Goal {
                position: Vec2::new(4000.0, 4000.0),
            },
            Vec2::new(0.0, 0.0),
        );
        let fairway = open_terrain();
        let v0 = 500.0;

        let mut on_sand = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(v0, 0.0))];
        let mut on_fairway =
            vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(v0, 0.0))];
        let ticks = 30;
        for _ in 0..ticks {
            eng.update(&mut on_sand, &sandy, &[], DT, &mut NullSink);
            eng.update(&mut on_fairway, &fairway, &[], DT, &mut NullSink);
        }

        assert!(on_sand[0].speed() < on_fairway[0].speed());
        let t = ticks as f32 * DT;
        let expected = v0 * (-(cfg.sand_friction / cfg.ball_mass) * t).exp();
        let actual = on_sand[0].speed();
        assert!(
            (actual - expected).abs() / expected < 0.05,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn ghost_glides_at_the_ice_friction_rate() {
        // A ghost on fairway and a plain body on ice decay identically;
        // both outlast a plain body on fairway.
        let mut eng = engine();
        let icy = Terrain::new(
            vec![Tile::new(
                SurfaceKind::Ice,
                Rect::new(-5000.0, -5000.0, 10_000.0, 10_000.0),
            )],
            Goal {
                position: Vec2::new(4000.0, 4000.0),
            },
            Vec2::new(0.0, 0.0),
        );
        let fairway = open_terrain();
        let v0 = Vec2::new(500.0, 0.0);

        let mut ghost = vec![body_with_velocity(Vec2::new(100.0, 100.0), v0)];
        ghost[0].bonus = Some(BonusEffect::active(BonusKind::GhostPhase));
        let mut on_ice = vec![body_with_velocity(Vec2::new(100.0, 100.0), v0)];
        let mut plain = vec![body_with_velocity(Vec2::new(100.0, 100.0), v0)];

        for _ in 0..30 {
            eng.update(&mut ghost, &fairway, &[], DT, &mut NullSink);
            eng.update(&mut on_ice, &icy, &[], DT, &mut NullSink);
            eng.update(&mut plain, &fairway, &[], DT, &mut NullSink);
        }

        assert!((ghost[0].speed() - on_ice[0].speed()).abs() < 1e-2);
        assert!(ghost[0].speed() > plain[0].speed());
    }

    #[test]
    fn wedged_body_gets_an_escape_impulse() {
        // Two obstacle slabs overlap so that leaving either one lands
        // inside the other: the resolution passes ping-pong until the
        // cap, then the anti-deadlock impulse fires.
        let run = |seed: u64| {
            let mut eng = Engine::new(EngineConfig::default(), seed);
            let terrain = Terrain::new(
                vec![
                    Tile::new(SurfaceKind::Fairway, Rect::new(-500.0, 0.0, 2000.0, 400.0)),
                    Tile::new(SurfaceKind::Obstacle, Rect::new(0.0, 0.0, 100.0, 400.0)),
                    Tile::new(SurfaceKind::Obstacle, Rect::new(70.0, 0.0, 100.0, 400.0)),
                ],
                Goal {
                    position: Vec2::new(1400.0, 200.0),
                },
                Vec2::new(-400.0, 200.0),
            );
            let mut bodies = vec![body_with_velocity(Vec2::new(85.0, 200.0), Vec2::ZERO)];
            eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
            bodies[0].velocity
        };

        let vel = run(42);
        assert!(vel.length() > 0.0, "wedged body must not stall at rest");
        // The random nudge has an off-axis component the edge resolution
        // alone could never produce here.
        assert!(vel.y.abs() > 0.0);
        // Replayable under the same seed.
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn obstacle_hit_resolves_through_nearest_edge() {
        // A body moving right at 500 strikes an obstacle to its right,
        // ends up just left of the tile with a leftward bounce.
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let terrain = Terrain::new(
            vec![
                Tile::new(SurfaceKind::Fairway, Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                Tile::new(SurfaceKind::Obstacle, Rect::new(200.0, 0.0, 64.0, 64.0)),
            ],
            Goal {
                position: Vec2::new(900.0, 900.0),
            },
            Vec2::new(50.0, 50.0),
        );
        let mut bodies = vec![body_with_velocity(Vec2::new(190.0, 32.0), Vec2::new(500.0, 0.0))];

        let mut sink = RecordingSink::default();
        eng.update(&mut bodies, &terrain, &[], DT, &mut sink);

        let body = &bodies[0];
        let expected_x = 200.0 - body.radius - cfg.obstacle_buffer;
        assert!(
            (body.position.x - expected_x).abs() <= cfg.obstacle_buffer + 1e-3,
            "body should sit just left of the tile edge, at x={}",
            body.position.x
        );
        assert!(body.velocity.x <= 0.0);
        assert!(body.velocity.x.abs() >= cfg.min_escape_speed);
        assert!(body.speed() <= cfg.obstacle_speed_limit() + 1e-3);
        assert!(sink.cues.contains(&SoundCue::WallHit));
    }

    #[test]
    fn bounce_tile_amplifies_reflection() {
        let mut eng = engine();
        let terrain = Terrain::new(
            vec![
                Tile::new(SurfaceKind::Fairway, Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                Tile::new(SurfaceKind::Bounce, Rect::new(200.0, 0.0, 64.0, 64.0)),
            ],
            Goal {
                position: Vec2::new(900.0, 900.0),
            },
            Vec2::new(50.0, 50.0),
        );
        let mut bodies = vec![body_with_velocity(Vec2::new(190.0, 32.0), Vec2::new(100.0, 0.0))];

        let mut sink = RecordingSink::default();
        eng.update(&mut bodies, &terrain, &[], DT, &mut sink);

        let body = &bodies[0];
        assert!(body.velocity.x < 0.0, "reflected leftward");
        // ~2x the incoming axis speed, within jitter and friction slack.
        assert!(body.velocity.x.abs() > 150.0);
        assert!(sink.cues.contains(&SoundCue::Bounce));
    }

    #[test]
    fn accelerator_pushes_consistently_both_headings() {
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let make_terrain = || {
            Terrain::new(
                vec![
                    Tile::new(SurfaceKind::Fairway, Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                    Tile::new(
                        SurfaceKind::Accelerator(Direction::East),
                        Rect::new(400.0, 0.0, 64.0, 64.0),
                    ),
                ],
                Goal {
                    position: Vec2::new(900.0, 900.0),
                },
                Vec2::new(50.0, 50.0),
            )
        };

        // Moving with the accelerator: amplified.
        let terrain = make_terrain();
        let mut with = vec![body_with_velocity(Vec2::new(420.0, 32.0), Vec2::new(200.0, 0.0))];
        eng.update(&mut with, &terrain, &[], DT, &mut NullSink);
        assert!(with[0].velocity.x > 200.0 * (cfg.accel_multiplier - 0.1));

        // Moving against: opposition damped plus an eastward kick.
        let mut against = vec![body_with_velocity(Vec2::new(420.0, 32.0), Vec2::new(-200.0, 0.0))];
        eng.update(&mut against, &terrain, &[], DT, &mut NullSink);
        assert!(against[0].velocity.x > -200.0 * cfg.accel_damping + cfg.accel_kick - 30.0);
    }

    #[test]
    fn shot_impulse_is_clamped_then_added() {
        // An impulse of magnitude 1500 with max velocity 1000 lands at
        // exactly 1000 before accumulation.
        let eng = engine();
        let mut body = body_with_velocity(Vec2::ZERO, Vec2::ZERO);
        eng.resolve_shot(&mut body, Vec2::new(1500.0, 0.0));
        assert!((body.speed() - 1000.0).abs() < 1e-3);

        // Accumulative: a second shot stacks on the first.
        let mut body = body_with_velocity(Vec2::ZERO, Vec2::new(100.0, 0.0));
        eng.resolve_shot(&mut body, Vec2::new(300.0, 0.0));
        assert!((body.velocity.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn goal_capture_at_radius_plus_epsilon() {
        // A distance of exactly radius + 0.5 still captures.
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let terrain = open_terrain();
        let goal = terrain.goal.position;
        let mut bodies = vec![body_with_velocity(
            goal - Vec2::new(cfg.ball_radius + cfg.goal_epsilon, 0.0),
            Vec2::ZERO,
        )];

        let mut sink = RecordingSink::default();
        let report = eng.update(&mut bodies, &terrain, &[], DT, &mut sink);

        assert!(bodies[0].finished);
        assert_eq!(bodies[0].velocity, Vec2::ZERO);
        assert_eq!(report.finished, vec![0]);
        assert!(sink.cues.contains(&SoundCue::Holed));
    }

    #[test]
    fn finished_bodies_are_skipped_entirely() {
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0))];
        bodies[0].finished = true;

        eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
        assert_eq!(bodies[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(bodies[0].velocity, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn out_of_bounds_body_returns_to_spawn() {
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![body_with_velocity(Vec2::new(20_000.0, 0.0), Vec2::new(100.0, 0.0))];

        let mut sink = RecordingSink::default();
        let report = eng.update(&mut bodies, &terrain, &[], DT, &mut sink);

        assert_eq!(bodies[0].position, terrain.spawn);
        assert_eq!(bodies[0].velocity, Vec2::ZERO);
        assert_eq!(report.out_of_bounds, vec![0]);
        assert!(sink.cues.contains(&SoundCue::OutOfBounds));
    }

    #[test]
    fn out_of_bounds_check_is_idempotent_on_valid_ground() {
        let mut eng = engine();
        let terrain = open_terrain();
        let pos = Vec2::new(123.0, 456.0);
        let mut bodies = vec![body_with_velocity(pos, Vec2::ZERO)];

        let report = eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
        assert!(report.out_of_bounds.is_empty());
        assert_eq!(bodies[0].position, pos);
    }

    #[test]
    fn ghost_ignores_out_of_bounds_and_collisions() {
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![
            body_with_velocity(Vec2::new(20_000.0, 0.0), Vec2::ZERO),
            body_with_velocity(Vec2::new(20_000.0, 5.0), Vec2::ZERO),
        ];
        bodies[0].bonus = Some(BonusEffect::active(BonusKind::GhostPhase));
        bodies[1].bonus = Some(BonusEffect::active(BonusKind::GhostPhase));

        let report = eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
        // Neither teleported nor separated despite overlapping in the void.
        assert!(report.out_of_bounds.is_empty());
        assert_eq!(bodies[0].position.x, 20_000.0);
        assert!((bodies[0].position - bodies[1].position).length() < 30.0);
    }

    #[test]
    fn speed_boost_triples_integration_and_relaxes_clamp() {
        let cfg = EngineConfig::default();
        let mut eng = engine();
        let terrain = open_terrain();

        let mut plain = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(500.0, 0.0))];
        let mut boosted = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(500.0, 0.0))];
        boosted[0].bonus = Some(BonusEffect::active(BonusKind::SpeedBoost));

        eng.update(&mut plain, &terrain, &[], DT, &mut NullSink);
        eng.update(&mut boosted, &terrain, &[], DT, &mut NullSink);

        let plain_dx = plain[0].position.x - 100.0;
        let boosted_dx = boosted[0].position.x - 100.0;
        assert!((boosted_dx - plain_dx * cfg.boost_multiplier).abs() < 1e-3);

        // Boosted clamp admits velocities over the normal ceiling.
        let mut fast = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::new(2000.0, 0.0))];
        fast[0].bonus = Some(BonusEffect::active(BonusKind::SpeedBoost));
        eng.update(&mut fast, &terrain, &[], DT, &mut NullSink);
        assert!(fast[0].velocity.x > cfg.max_velocity);
    }

    #[test]
    fn magnet_accelerates_toward_goal() {
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::ZERO)];
        bodies[0].bonus = Some(BonusEffect::active(BonusKind::Magnet));

        eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);

        let to_goal = (terrain.goal.position - Vec2::new(100.0, 100.0)).normalize();
        let speed_toward = bodies[0].velocity.dot(to_goal);
        assert!(speed_toward > 0.0, "magnet must pull toward the goal");
    }

    #[test]
    fn explosion_pushes_others_away_within_range() {
        let eng = engine();
        let mut bodies = vec![
            body_with_velocity(Vec2::new(0.0, 0.0), Vec2::ZERO),
            body_with_velocity(Vec2::new(100.0, 0.0), Vec2::ZERO),
            body_with_velocity(Vec2::new(1000.0, 0.0), Vec2::ZERO),
        ];
        bodies[2].finished = false;

        eng.apply_explosion(0, &mut bodies);

        assert_eq!(bodies[0].velocity, Vec2::ZERO, "source unaffected");
        assert!(bodies[1].velocity.x > 0.0, "pushed away from the blast");
        assert_eq!(bodies[2].velocity, Vec2::ZERO, "out of range");
    }

    #[test]
    fn explosion_at_zero_distance_uses_canonical_direction() {
        let eng = engine();
        let mut bodies = vec![
            body_with_velocity(Vec2::new(50.0, 50.0), Vec2::ZERO),
            body_with_velocity(Vec2::new(50.0, 50.0), Vec2::ZERO),
        ];
        eng.apply_explosion(0, &mut bodies);
        // diff is zero, direction falls back to (1,0); pushed along -x.
        assert!(bodies[1].velocity.x < 0.0);
        assert_eq!(bodies[1].velocity.y, 0.0);
    }

    #[test]
    fn pickup_proximity_is_reported_not_consumed() {
        let mut eng = engine();
        let terrain = open_terrain();
        let mut bodies = vec![body_with_velocity(Vec2::new(100.0, 100.0), Vec2::ZERO)];
        let pickups = vec![
            BonusPickup {
                position: Vec2::new(110.0, 100.0),
                available: true,
            },
            BonusPickup {
                position: Vec2::new(110.0, 100.0),
                available: false,
            },
            BonusPickup {
                position: Vec2::new(900.0, 900.0),
                available: true,
            },
        ];

        let report = eng.update(&mut bodies, &terrain, &pickups, DT, &mut NullSink);
        assert_eq!(
            report.pickups_reached,
            vec![PickupContact { body: 0, pickup: 0 }]
        );
    }

    #[test]
    fn same_seed_replays_identical_jitter() {
        let run = |seed: u64| {
            let mut eng = Engine::new(EngineConfig::default(), seed);
            let terrain = Terrain::new(
                vec![
                    Tile::new(SurfaceKind::Fairway, Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                    Tile::new(SurfaceKind::Bounce, Rect::new(200.0, 0.0, 64.0, 64.0)),
                ],
                Goal {
                    position: Vec2::new(900.0, 900.0),
                },
                Vec2::new(50.0, 50.0),
            );
            let mut bodies =
                vec![body_with_velocity(Vec2::new(190.0, 32.0), Vec2::new(300.0, 10.0))];
            for _ in 0..60 {
                eng.update(&mut bodies, &terrain, &[], DT, &mut NullSink);
            }
            (bodies[0].position, bodies[0].velocity)
        };

        assert_eq!(run(7), run(7));
    }
}
