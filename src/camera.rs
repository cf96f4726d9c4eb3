//! Screen/world coordinate conversion
//!
//! The turn controller uses this to translate a pointer drag into a
//! world-space impulse. `screen_to_world` and `world_to_screen` are exact
//! inverses of each other:
//!
//! ```text
//! world  = (screen - screen_center) / zoom + offset
//! screen = (world - offset) * zoom + screen_center
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Zoom bounds.
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point shown at the center of the screen.
    pub offset: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f32,
    /// Center of the screen in screen coordinates.
    pub screen_center: Vec2,
}

impl Camera {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            screen_center: Vec2::new(screen_width / 2.0, screen_height / 2.0),
        }
    }

    /// Convert a screen coordinate to a world coordinate.
    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.screen_center) / self.zoom + self.offset
    }

    /// Convert a world coordinate to a screen coordinate.
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.offset) * self.zoom + self.screen_center
    }

    /// Adjust zoom by `delta`, clamped to the allowed range.
    pub fn add_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Pan by a screen-space delta. Divided by zoom so a drag follows the
    /// pointer regardless of zoom level.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.offset -= screen_delta / self.zoom;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn world_origin_maps_to_screen_center_at_default() {
        let cam = Camera::new(1280.0, 720.0);
        assert_eq!(cam.world_to_screen(Vec2::ZERO), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::new(1280.0, 720.0);
        cam.zoom = MAX_ZOOM;
        cam.add_zoom(0.1);
        assert_eq!(cam.zoom, MAX_ZOOM);
        cam.zoom = MIN_ZOOM;
        cam.add_zoom(-0.1);
        assert_eq!(cam.zoom, MIN_ZOOM);
    }

    #[test]
    fn pan_moves_against_drag() {
        let mut cam = Camera::new(1280.0, 720.0);
        cam.zoom = 2.0;
        cam.pan(Vec2::new(10.0, -4.0));
        assert_eq!(cam.offset, Vec2::new(-5.0, 2.0));
    }

    proptest! {
        #[test]
        fn screen_world_round_trip(
            px in -2000.0f32..2000.0,
            py in -2000.0f32..2000.0,
            ox in -5000.0f32..5000.0,
            oy in -5000.0f32..5000.0,
            zoom in MIN_ZOOM..MAX_ZOOM,
        ) {
            let cam = Camera {
                offset: Vec2::new(ox, oy),
                zoom,
                screen_center: Vec2::new(640.0, 360.0),
            };
            let p = Vec2::new(px, py);
            let back = cam.screen_to_world(cam.world_to_screen(p));
            prop_assert!((back - p).length() < 1e-2);
        }
    }
}
