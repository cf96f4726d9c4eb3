//! Terrain model
//!
//! A hole's terrain is an immutable ordered set of axis-aligned tiles,
//! each tagged with a surface kind, plus a goal point and a spawn point.
//! The engine only ever queries it: point-in-rect for surface lookup and
//! circle-overlap for collision candidates.
//!
//! Coordinates are screen-space: +x right, +y down. `Direction::North`
//! therefore points toward -y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point on the rect to `p` (equals `p` when inside).
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Does a circle overlap this rect?
    #[inline]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        (self.clamp_point(center) - center).length_squared() < radius * radius
    }
}

/// Cardinal direction for accelerator tiles, in screen-space axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Unit vector of the push, +y down.
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::North => Vec2::new(0.0, -1.0),
            Direction::South => Vec2::new(0.0, 1.0),
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::West => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Surface / interaction kind of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Fairway,
    Sand,
    Ice,
    Water,
    /// Solid tile bodies collide with.
    Obstacle,
    /// Solid tile that amplifies the reflected velocity.
    Bounce,
    /// Pass-through tile that pushes bodies in a fixed direction.
    Accelerator(Direction),
}

impl SurfaceKind {
    /// Solid tiles reposition bodies out of themselves.
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, SurfaceKind::Obstacle | SurfaceKind::Bounce)
    }

    /// Tiles a body can rest on. Water and solid tiles don't count as
    /// supporting ground for the out-of-bounds check.
    #[inline]
    pub fn is_ground(self) -> bool {
        !matches!(self, SurfaceKind::Water)
    }
}

/// One immutable terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: SurfaceKind,
    pub rect: Rect,
}

impl Tile {
    pub fn new(kind: SurfaceKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// The hole's goal point. Capture radius is the body radius plus the
/// configured epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub position: Vec2,
}

/// Immutable terrain for one hole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    tiles: Vec<Tile>,
    pub goal: Goal,
    /// Where bodies start, and where out-of-bounds bodies return to.
    pub spawn: Vec2,
}

impl Terrain {
    pub fn new(tiles: Vec<Tile>, goal: Goal, spawn: Vec2) -> Self {
        Self { tiles, goal, spawn }
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Surface kind under a point. First matching tile wins, mirroring
    /// the ordered tile set.
    pub fn surface_at(&self, p: Vec2) -> Option<SurfaceKind> {
        self.tiles
            .iter()
            .find(|t| t.rect.contains_point(p))
            .map(|t| t.kind)
    }

    /// Is the point over any tile a body may occupy? A point over no
    /// tile, or only over water, is out of bounds.
    pub fn supports(&self, p: Vec2) -> bool {
        self.tiles
            .iter()
            .any(|t| t.kind.is_ground() && t.rect.contains_point(p))
    }
}
