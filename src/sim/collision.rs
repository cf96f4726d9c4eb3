//! Collision detection and resolution primitives
//!
//! Two shapes matter here: body circles against each other, and body
//! circles against axis-aligned tiles. Tile contact uses the
//! minimum-penetration-edge rule: of the four candidate depths (body
//! edge to each tile edge), the smallest wins and the body exits through
//! that edge. Every normal that could degenerate falls back to the
//! canonical `(1, 0)` axis instead of failing.

use glam::Vec2;

use super::body::Body;
use super::terrain::Rect;
use crate::vec::normalize_or_x;

/// Contact between a circle and a tile edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeContact {
    /// Outward edge normal, axis-aligned.
    pub normal: Vec2,
    /// Overlap depth along the normal.
    pub depth: f32,
}

/// Standard mirror reflection: `v' = v - 2(v·n)n`. With axis-aligned
/// normals this flips exactly the normal component and leaves the
/// tangential one untouched.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Minimum-penetration edge of a circle overlapping a rect.
///
/// Returns `None` when the circle does not overlap. Depths are measured
/// from the body's far edge to each tile edge, so the returned contact
/// pushes the whole circle out, not just its center.
pub fn min_penetration_edge(center: Vec2, radius: f32, rect: &Rect) -> Option<EdgeContact> {
    if !rect.overlaps_circle(center, radius) {
        return None;
    }

    // Candidate depths through each edge, in (normal, depth) pairs.
    let candidates = [
        (Vec2::new(-1.0, 0.0), (center.x + radius) - rect.min.x), // left
        (Vec2::new(1.0, 0.0), rect.max.x - (center.x - radius)),  // right
        (Vec2::new(0.0, -1.0), (center.y + radius) - rect.min.y), // top
        (Vec2::new(0.0, 1.0), rect.max.y - (center.y - radius)),  // bottom
    ];

    candidates
        .into_iter()
        .filter(|&(_, depth)| depth > 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(normal, depth)| EdgeContact { normal, depth })
}

/// Resolve an overlapping pair of equal-mass bodies.
///
/// Separates both along the collision normal by half the overlap each,
/// then exchanges the normal-projected velocity components (elastic,
/// equal masses; tangential components untouched). Returns whether the
/// pair actually collided.
pub fn resolve_body_pair(a: &mut Body, b: &mut Body) -> bool {
    let diff = a.position - b.position;
    let distance = diff.length();
    let min_distance = a.radius + b.radius;

    if distance >= min_distance {
        return false;
    }

    // Coincident centers still separate along the canonical axis.
    let normal = normalize_or_x(diff);

    let overlap = min_distance - distance;
    a.position += normal * (overlap / 2.0);
    b.position -= normal * (overlap / 2.0);

    let v1 = a.velocity.dot(normal);
    let v2 = b.velocity.dot(normal);
    a.velocity += normal * (v2 - v1);
    b.velocity += normal * (v1 - v2);

    true
}
