//! Turn controller
//!
//! Round-robin turns over the body list: the active player drags from
//! their ball to aim, the drag becomes a world-space impulse through the
//! camera, and the turn ends once the ball settles under the configured
//! threshold. The settle decision is made here, never inside the engine.

use glam::Vec2;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::sim::body::{Body, BonusKind};
use crate::sim::engine::Engine;
use crate::vec::limit_length;

/// An aim drag in progress, anchored at the active ball's center.
#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Vec2,
}

/// Drives whose turn it is and turns pointer drags into shots.
#[derive(Debug)]
pub struct TurnController {
    current: usize,
    shot_taken: bool,
    drag: Option<Drag>,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    pub fn new() -> Self {
        Self {
            current: 0,
            shot_taken: false,
            drag: None,
        }
    }

    /// Index of the body whose turn it is.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn shot_taken(&self) -> bool {
        self.shot_taken
    }

    /// Start an aim drag if the pointer is on the active ball and the
    /// shot has not been taken yet.
    pub fn begin_drag(&mut self, camera: &Camera, screen_pos: Vec2, bodies: &[Body]) -> bool {
        if self.shot_taken {
            return false;
        }
        let Some(body) = bodies.get(self.current) else {
            return false;
        };
        let world = camera.screen_to_world(screen_pos);
        if world.distance(body.position) <= body.radius {
            self.drag = Some(Drag {
                start: body.position,
            });
            true
        } else {
            false
        }
    }

    /// The impulse the current drag would produce if released at
    /// `screen_pos`: drag vector times the force multiplier, clamped to
    /// the max velocity. Useful for aim previews.
    pub fn preview_impulse(
        &self,
        camera: &Camera,
        screen_pos: Vec2,
        cfg: &EngineConfig,
    ) -> Option<Vec2> {
        let drag = self.drag?;
        let release = camera.screen_to_world(screen_pos);
        Some(limit_length(
            (drag.start - release) * cfg.force_multiplier,
            cfg.max_velocity,
        ))
    }

    /// Release the drag and fire the shot. Returns the applied impulse.
    pub fn end_drag(
        &mut self,
        camera: &Camera,
        screen_pos: Vec2,
        engine: &Engine,
        bodies: &mut [Body],
    ) -> Option<Vec2> {
        let drag = self.drag.take()?;
        let release = camera.screen_to_world(screen_pos);
        let impulse = (drag.start - release) * engine.config().force_multiplier;

        let body = bodies.get_mut(self.current)?;
        engine.resolve_shot(body, impulse);
        self.shot_taken = true;

        Some(limit_length(impulse, engine.config().max_velocity))
    }

    /// Cancel an in-progress drag without shooting.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Call once per frame after `Engine::update`. Ends the turn when the
    /// active ball has settled (or finished), expiring its turn-scoped
    /// bonus and rotating to the next unfinished body. Returns whether
    /// the turn advanced.
    pub fn check_turn_end(&mut self, bodies: &mut [Body], cfg: &EngineConfig) -> bool {
        if !self.shot_taken {
            return false;
        }
        let Some(body) = bodies.get(self.current) else {
            return false;
        };
        if !body.finished && body.speed() >= cfg.settle_threshold {
            return false;
        }
        self.next_turn(bodies);
        true
    }

    /// Rotate to the next unfinished body, clearing turn state. Bonuses
    /// that last "until the end of this turn" expire here.
    pub fn next_turn(&mut self, bodies: &mut [Body]) {
        if let Some(body) = bodies.get_mut(self.current) {
            expire_turn_bonus(body);
        }
        self.shot_taken = false;
        self.drag = None;

        let len = bodies.len();
        if len == 0 {
            return;
        }
        for step in 1..=len {
            let candidate = (self.current + step) % len;
            if !bodies[candidate].finished {
                self.current = candidate;
                log::info!("turn passes to {:?}", bodies[candidate].name);
                return;
            }
        }
        // Everyone is finished; the hole is over.
    }

    /// Has every body reached the goal?
    pub fn hole_complete(&self, bodies: &[Body]) -> bool {
        !bodies.is_empty() && bodies.iter().all(|b| b.finished)
    }
}

/// Turn-scoped bonuses deactivate and clear when the holder's turn ends.
fn expire_turn_bonus(body: &mut Body) {
    if let Some(bonus) = body.bonus
        && bonus.active
        && matches!(
            bonus.kind,
            BonusKind::SpeedBoost | BonusKind::GhostPhase | BonusKind::Magnet
        )
    {
        body.bonus = None;
    }
}
