//! Small vector helpers on top of `glam::Vec2`
//!
//! The engine leans on glam for the usual algebra (add, scale, dot,
//! length). What lives here are the crate-specific conventions, most
//! importantly the safe normalize: collision normals must never be NaN,
//! so a degenerate input resolves to the canonical `(1, 0)` axis.

use glam::Vec2;

/// Length below which a vector is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Normalize, falling back to the canonical `(1, 0)` unit vector when the
/// input is too short to carry a direction.
///
/// Collision resolution relies on this fallback: two bodies at the exact
/// same point still separate along a well-defined axis.
#[inline]
pub fn normalize_or_x(v: Vec2) -> Vec2 {
    if v.length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        Vec2::X
    } else {
        v / v.length()
    }
}

/// Clamp each component independently to `[-max, max]`.
#[inline]
pub fn clamp_axes(v: Vec2, max: f32) -> Vec2 {
    Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
}

/// Clamp the magnitude to `max`, preserving direction.
#[inline]
pub fn limit_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max { v * (max / len) } else { v }
}
