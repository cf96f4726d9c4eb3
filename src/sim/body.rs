//! Moving bodies and bonus effects
//!
//! A body is one simulated ball. The engine mutates bodies in place every
//! tick; between holes they are reset to defaults. Bonus effects are a
//! closed set of tags the engine branches on; acquisition and expiry
//! belong to the external bonus manager.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Bonus-driven physics modifiers, matched exhaustively in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Faster integration and a relaxed velocity ceiling.
    SpeedBoost,
    /// Suppresses collisions and out-of-bounds recovery, forces ice
    /// friction.
    GhostPhase,
    /// Per-tick attraction toward the goal.
    Magnet,
    /// One-shot radial impulse to other bodies, triggered by the bonus
    /// manager rather than per tick.
    Explosion,
}

/// A bonus held by a body. `active` is flipped by the bonus manager when
/// the player consumes it; the engine only reads the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEffect {
    pub kind: BonusKind,
    pub active: bool,
}

impl BonusEffect {
    pub fn inactive(kind: BonusKind) -> Self {
        Self { kind, active: false }
    }

    pub fn active(kind: BonusKind) -> Self {
        Self { kind, active: true }
    }
}

/// A bonus pickup placed on the terrain. The engine only does the
/// distance test; taking the pickup is the bonus manager's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusPickup {
    pub position: Vec2,
    pub available: bool,
}

/// A simulated ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub name: String,
    /// Set once the body reaches the goal; excluded from simulation after.
    pub finished: bool,
    /// At most one bonus at a time.
    pub bonus: Option<BonusEffect>,
}

impl Body {
    pub fn new(name: impl Into<String>, position: Vec2, cfg: &EngineConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: cfg.ball_radius,
            mass: cfg.ball_mass,
            name: name.into(),
            finished: false,
            bonus: None,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Is the given bonus kind currently active on this body?
    #[inline]
    pub fn has_active(&self, kind: BonusKind) -> bool {
        matches!(self.bonus, Some(b) if b.active && b.kind == kind)
    }

    /// Ghost-phased bodies skip collisions and out-of-bounds recovery.
    #[inline]
    pub fn is_ghost(&self) -> bool {
        self.has_active(BonusKind::GhostPhase)
    }

    /// Reset between holes: zeroed motion, defaults restored, bonus
    /// cleared. The host teleports the body to the new hole's spawn.
    pub fn reset(&mut self, cfg: &EngineConfig) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.radius = cfg.ball_radius;
        self.mass = cfg.ball_mass;
        self.finished = false;
        self.bonus = None;
    }
}
