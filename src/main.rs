//! Headless demo: one hole, two balls, scripted shots.
//!
//! Builds a small terrain with an obstacle wall and an accelerator lane,
//! simulates a pointer drag away from the goal each turn, and ticks the
//! engine until every ball is holed or the tick budget runs out.

use glam::Vec2;

use putt_sim::audio::NullSink;
use putt_sim::camera::Camera;
use putt_sim::config::EngineConfig;
use putt_sim::sim::{Body, Direction, Engine, Goal, Rect, SurfaceKind, Terrain, Tile};
use putt_sim::turn::TurnController;
use putt_sim::vec::normalize_or_x;

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u32 = 20_000;

fn demo_terrain() -> Terrain {
    // A fairway strip with a sand patch before the goal, an obstacle
    // wall mid-course, and an eastward accelerator lane below it. The
    // sand overlaps the fairway and surface lookup is first-match, so it
    // goes first.
    let tiles = vec![
        Tile::new(SurfaceKind::Sand, Rect::new(896.0, 0.0, 128.0, 384.0)),
        Tile::new(SurfaceKind::Fairway, Rect::new(0.0, 0.0, 1280.0, 384.0)),
        Tile::new(SurfaceKind::Obstacle, Rect::new(576.0, 0.0, 64.0, 192.0)),
        Tile::new(
            SurfaceKind::Accelerator(Direction::East),
            Rect::new(576.0, 256.0, 64.0, 128.0),
        ),
    ];

    Terrain::new(
        tiles,
        Goal {
            position: Vec2::new(1180.0, 192.0),
        },
        Vec2::new(64.0, 192.0),
    )
}

fn main() {
    env_logger::init();

    let cfg = EngineConfig::default();
    let terrain = demo_terrain();
    let camera = Camera::new(1280.0, 720.0);
    let mut engine = Engine::new(cfg.clone(), 7);
    let mut turns = TurnController::new();
    let mut sink = NullSink;

    let mut bodies = vec![
        Body::new("red", terrain.spawn, &cfg),
        Body::new("blue", terrain.spawn + Vec2::new(0.0, 40.0), &cfg),
    ];

    log::info!(
        "hole start: {} balls, goal at {}",
        bodies.len(),
        terrain.goal.position
    );

    for tick in 0..MAX_TICKS {
        if !turns.shot_taken() {
            // Simulate dragging the pointer away from the goal: a 180
            // world-unit pull becomes a 900 unit impulse toward it.
            let idx = turns.current_index();
            let toward_goal = normalize_or_x(terrain.goal.position - bodies[idx].position);
            let grab = camera.world_to_screen(bodies[idx].position);
            let release = camera.world_to_screen(bodies[idx].position - toward_goal * 180.0);

            if turns.begin_drag(&camera, grab, &bodies)
                && let Some(impulse) = turns.end_drag(&camera, release, &engine, &mut bodies)
            {
                log::info!("tick {tick}: {:?} shoots with impulse {impulse}", bodies[idx].name);
            }
        }

        engine.update(&mut bodies, &terrain, &[], DT, &mut sink);
        turns.check_turn_end(&mut bodies, &cfg);

        if turns.hole_complete(&bodies) {
            log::info!("hole complete after {tick} ticks");
            for body in &bodies {
                println!("{}: finished at {}", body.name, body.position);
            }
            return;
        }
    }

    println!("tick budget exhausted");
    for body in &bodies {
        println!(
            "{}: at {} speed {:.1} finished={}",
            body.name,
            body.position,
            body.speed(),
            body.finished
        );
    }
}
