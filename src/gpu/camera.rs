//! Camera for 3D orbit view.

use glam::{Mat4, Vec3};

const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;

/// Orbit camera looking at the field.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Closest allowed zoom.
    pub min_distance: f32,
    /// Farthest allowed zoom.
    pub max_distance: f32,
}

impl Camera {
    /// Create a new camera with default positioning.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 3.0,
            target: Vec3::ZERO,
            min_distance: 0.5,
            max_distance: 20.0,
        }
    }

    /// Camera framing a box of `size` centered on the origin.
    pub fn framing(size: Vec3) -> Self {
        let extent = size.length().max(1.0);
        Self {
            pitch: 0.6,
            distance: extent * 1.1,
            min_distance: extent * 0.1,
            max_distance: extent * 5.0,
            ..Self::new()
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Projection times view for a viewport of the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let far = (self.max_distance * 2.0).max(100.0);
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.05, far);
        proj * self.view_matrix()
    }

    /// Rotate by a mouse drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Move closer (positive) or farther (negative) by scroll lines.
    pub fn zoom(&mut self, scroll: f32) {
        let step = self.distance * 0.1;
        self.distance = (self.distance - scroll * step).clamp(self.min_distance, self.max_distance);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_distance() {
        let cam = Camera::framing(Vec3::new(5.5, 1.75, 5.5));
        assert!((cam.position().length() - cam.distance).abs() < 1e-4);
        assert!(cam.position().y > 0.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut cam = Camera::new();
        cam.orbit(0.0, 10_000.0);
        assert_eq!(cam.pitch, MAX_PITCH);
        cam.orbit(0.0, -10_000.0);
        assert_eq!(cam.pitch, MIN_PITCH);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut cam = Camera::new();
        for _ in 0..100 {
            cam.zoom(5.0);
        }
        assert_eq!(cam.distance, cam.min_distance);
        for _ in 0..100 {
            cam.zoom(-5.0);
        }
        assert_eq!(cam.distance, cam.max_distance);
    }
}
