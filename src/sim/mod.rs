//! Simulation module
//!
//! Everything that moves lives here: the terrain model, the bodies, the
//! collision primitives, and the per-tick engine. The module is pure and
//! synchronous: one `update` call per frame, seeded RNG only, no
//! rendering or platform dependencies.

pub mod body;
pub mod collision;
pub mod engine;
pub mod terrain;

pub use body::{Body, BonusEffect, BonusKind, BonusPickup};
pub use collision::{EdgeContact, min_penetration_edge, reflect_velocity, resolve_body_pair};
pub use engine::{Engine, PickupContact, TickReport};
pub use terrain::{Direction, Goal, Rect, SurfaceKind, Terrain, Tile};
