//! Placement of an object in the scene.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (radians, XYZ order) and scale of an object.
///
/// Poses are plain values. A neuron's pose is chosen once during placement
/// and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Translation in world units.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Pose {
    /// The identity pose: origin, no rotation, unit scale.
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a pose from its three components.
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Pose at `position`, turned `yaw` radians about the vertical (Y) axis,
    /// scaled uniformly by `scale`.
    pub fn upright(position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::new(0.0, yaw, 0.0),
            scale: Vec3::splat(scale),
        }
    }

    /// Rotation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Pose::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_upright_rotates_about_y() {
        let pose = Pose::upright(Vec3::new(1.0, 2.0, 3.0), FRAC_PI_2, 2.0);
        let m = pose.matrix();

        // +X turns to -Z under a quarter turn about +Y, then scales and translates
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);

        // Vertical axis is untouched by yaw
        let up = m.transform_vector3(Vec3::Y);
        assert!((up - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }
}
