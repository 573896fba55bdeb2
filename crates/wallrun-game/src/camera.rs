//! Camera-relative movement basis
//!
//! The camera itself lives outside the movement core. All the controller needs
//! from it is which way "forward" and "right" point this frame.

use glam::{Quat, Vec2, Vec3};
use wallrun_core::math::flatten_direction;

/// Forward/right directions of the camera the player steers relative to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Camera forward (may be pitched)
    pub forward: Vec3,
    /// Camera right
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

impl CameraBasis {
    /// Basis of an orbit camera with the given yaw in radians (0 looks down -Z)
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            forward: Vec3::new(yaw.sin(), 0.0, -yaw.cos()),
            right: Vec3::new(yaw.cos(), 0.0, yaw.sin()),
        }
    }

    /// Basis from a camera rotation (forward is local -Z)
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * -Vec3::Z,
            right: rotation * Vec3::X,
        }
    }

    /// Basis of a camera at `eye` looking at `target`
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let forward = (target - eye).normalize_or_zero();
        Self {
            forward,
            right: forward.cross(Vec3::Y).normalize_or_zero(),
        }
    }

    /// Forward flattened onto the ground plane as `(x, z)`
    pub fn planar_forward(&self) -> Vec2 {
        flatten_direction(self.forward)
    }

    /// Right flattened onto the ground plane as `(x, z)`
    pub fn planar_right(&self) -> Vec2 {
        flatten_direction(self.right)
    }

    /// World-space `(x, z)` direction for a movement axis (`x` = right, `y` = forward)
    pub fn planar_direction(&self, axis: Vec2) -> Vec2 {
        self.planar_right() * axis.x + self.planar_forward() * axis.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis() {
        let basis = CameraBasis::default();
        assert!((basis.forward - -Vec3::Z).length() < 1e-6);
        assert!((basis.right - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_pitched_forward_is_flattened() {
        let basis = CameraBasis {
            forward: Vec3::new(0.0, -0.8, -0.6),
            right: Vec3::X,
        };
        assert!((basis.planar_forward() - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotation_matches_yaw() {
        let yaw = 0.7;
        let from_yaw = CameraBasis::from_yaw(yaw);
        let from_rotation = CameraBasis::from_rotation(Quat::from_rotation_y(-yaw));
        assert!((from_yaw.forward - from_rotation.forward).length() < 1e-5);
        assert!((from_yaw.right - from_rotation.right).length() < 1e-5);
    }

    #[test]
    fn test_looking_at() {
        let basis = CameraBasis::looking_at(Vec3::new(0.0, 3.0, 6.0), Vec3::new(0.0, 1.0, 0.0));
        assert!((basis.planar_forward() - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!((basis.right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_planar_direction() {
        let basis = CameraBasis::default();
        let dir = basis.planar_direction(Vec2::new(1.0, 1.0));
        // right = +X, forward = -Z
        assert_eq!(dir, Vec2::new(1.0, -1.0));
    }
}
