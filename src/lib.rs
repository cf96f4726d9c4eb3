//! Putt Sim - tick-based physics core for a turn-based minigolf game
//!
//! Core modules:
//! - `sim`: bodies, terrain, collision resolution, and the per-tick engine
//! - `turn`: turn rotation and drag-to-impulse shot building
//! - `camera`: screen/world coordinate conversion for the turn controller
//! - `audio`: fire-and-forget sound cue seam
//! - `config`: immutable engine tuning, JSON round-trippable
//!
//! The engine is single-threaded and synchronous: the host calls
//! `Engine::update(dt)` once per frame until the turn controller decides
//! the active ball has settled.

pub mod audio;
pub mod camera;
pub mod config;
pub mod sim;
pub mod turn;
pub mod vec;

pub use audio::{NullSink, SoundCue, SoundSink};
pub use camera::Camera;
pub use config::EngineConfig;
pub use sim::{
    Body, BonusEffect, BonusKind, BonusPickup, Direction, Engine, Goal, Rect, SurfaceKind,
    Terrain, TickReport, Tile,
};
pub use turn::TurnController;
