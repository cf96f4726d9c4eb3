//! Engine tuning values
//!
//! Every constant the physics core depends on lives in one immutable
//! value handed to the engine at construction. Tests can vary tuning
//! without touching process-wide state, and a whole config round-trips
//! through JSON for data-driven balancing.

use serde::{Deserialize, Serialize};

/// Immutable tuning for the physics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // === Bodies ===
    /// Default ball radius in world units.
    pub ball_radius: f32,
    /// Default ball mass.
    pub ball_mass: f32,
    /// Per-axis velocity ceiling.
    pub max_velocity: f32,
    /// Relaxed per-axis ceiling while a speed boost is active.
    pub boost_max_velocity: f32,
    /// Position-integration multiplier under an active speed boost.
    pub boost_multiplier: f32,

    // === Surfaces ===
    /// Friction coefficient on fairway (also the default off-tile value).
    pub fairway_friction: f32,
    /// Friction coefficient on sand.
    pub sand_friction: f32,
    /// Friction coefficient on ice (also forced while ghost-phased).
    pub ice_friction: f32,

    // === Terrain interaction ===
    /// Gap left between a body and the tile edge it was pushed out of.
    pub obstacle_buffer: f32,
    /// Minimum outward speed along the edge normal after an obstacle hit.
    pub min_escape_speed: f32,
    /// Post-obstacle speed cap as a fraction of `max_velocity`.
    pub obstacle_speed_cap: f32,
    /// Speed amplification along the reflected axis on a bounce tile.
    pub bounce_multiplier: f32,
    /// Half-width of the random angular jitter on a bounce, radians.
    pub bounce_jitter: f32,
    /// Amplification of velocity already moving with an accelerator.
    pub accel_multiplier: f32,
    /// Damping applied to the component opposing an accelerator.
    pub accel_damping: f32,
    /// Flat kick added in the accelerator's direction when opposed.
    pub accel_kick: f32,
    /// Terrain-resolution passes per tick before giving up.
    pub terrain_passes: u32,
    /// Magnitude of the randomized anti-deadlock escape impulse.
    pub escape_impulse: f32,

    // === Bonuses ===
    /// Magnet attraction tuning constant.
    pub magnet_strength: f32,
    /// Distance floor for the magnet's inverse-distance scaling.
    pub magnet_min_distance: f32,
    /// Maximum range of an explosion impulse.
    pub explosion_range: f32,
    /// Cap on the explosion's inverse-distance multiplier.
    pub explosion_power_cap: f32,
    /// Explosion impulse scale.
    pub explosion_force: f32,
    /// Distance at which a body reaches a bonus pickup.
    pub pickup_radius: f32,

    // === Goal / turn ===
    /// Slack added to the body radius for goal capture.
    pub goal_epsilon: f32,
    /// Speed under which the turn controller considers a body settled.
    pub settle_threshold: f32,
    /// Drag-distance to impulse scale used when building shots.
    pub force_multiplier: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ball_radius: 15.0,
            ball_mass: 0.05,
            max_velocity: 1000.0,
            boost_max_velocity: 3000.0,
            boost_multiplier: 3.0,

            fairway_friction: 0.06,
            sand_friction: 0.30,
            ice_friction: 0.02,

            obstacle_buffer: 0.5,
            min_escape_speed: 40.0,
            obstacle_speed_cap: 0.8,
            bounce_multiplier: 2.0,
            bounce_jitter: 1.0_f32.to_radians(),
            accel_multiplier: 1.5,
            accel_damping: 0.4,
            accel_kick: 120.0,
            terrain_passes: 3,
            escape_impulse: 80.0,

            magnet_strength: 40_000.0,
            magnet_min_distance: 20.0,
            explosion_range: 500.0,
            explosion_power_cap: 10.0,
            explosion_force: 75_000.0,
            pickup_radius: 40.0,

            goal_epsilon: 0.5,
            settle_threshold: 10.0,
            force_multiplier: 5.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Post-obstacle speed cap in absolute units.
    #[inline]
    pub fn obstacle_speed_limit(&self) -> f32 {
        self.obstacle_speed_cap * self.max_velocity
    }

    /// Per-axis velocity ceiling for a body, boosted or not.
    #[inline]
    pub fn velocity_ceiling(&self, boosted: bool) -> f32 {
        if boosted {
            self.boost_max_velocity
        } else {
            self.max_velocity
        }
    }
}
