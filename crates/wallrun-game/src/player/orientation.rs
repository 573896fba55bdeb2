//! Smoothed facing, wall roll and animation flow

use glam::{Quat, Vec3};
use wallrun_core::math::smoothing_factor;

use super::OrientationConfig;

/// Visual orientation state driven by the movement controller.
///
/// Nothing here feeds back into velocity; it only exists for visuals,
/// animation blending and camera framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationBlend {
    /// Yaw-only facing of the character
    pub facing: Quat,
    /// Current roll in degrees (positive = leaning toward a wall on the right)
    pub roll: f32,
    /// Smoothed horizontal speed
    pub flow: f32,
}

impl Default for OrientationBlend {
    fn default() -> Self {
        Self {
            facing: Quat::IDENTITY,
            roll: 0.0,
            flow: 0.0,
        }
    }
}

impl OrientationBlend {
    /// Facing with the given yaw-only rotation and everything else at rest
    pub fn facing(rotation: Quat) -> Self {
        Self {
            facing: rotation,
            ..Default::default()
        }
    }

    /// Forward direction of the facing (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.facing * -Vec3::Z
    }

    /// Backward direction of the facing
    pub fn backward(&self) -> Vec3 {
        self.facing * Vec3::Z
    }

    /// Advance the blend one frame.
    ///
    /// `target_roll` is the wall-side offset in degrees, or 0 when not
    /// wall-running.
    pub fn advance(&mut self, config: &OrientationConfig, velocity: Vec3, target_roll: f32, dt: f32) {
        let planar = Vec3::new(velocity.x, 0.0, velocity.z);
        let speed = planar.length();

        if speed > config.heading_min_speed {
            let target = Quat::from_rotation_y(f32::atan2(-planar.x, -planar.z));
            self.facing = self
                .facing
                .slerp(target, smoothing_factor(config.turn_rate, dt))
                .normalize();
        }

        self.roll += (target_roll - self.roll) * smoothing_factor(config.roll_rate, dt);
        self.flow += (speed - self.flow) * smoothing_factor(config.flow_rate, dt);
    }

    /// Flow normalized against a reference speed, clamped to `[0, 1]`
    pub fn flow_blend(&self, reference_speed: f32) -> f32 {
        if reference_speed > 0.0 {
            (self.flow / reference_speed).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Facing combined with the wall roll around the facing's forward axis
    pub fn visual_rotation(&self) -> Quat {
        Quat::from_axis_angle(self.forward(), self.roll.to_radians()) * self.facing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_facing_turns_toward_velocity() {
        let config = OrientationConfig::default();
        let mut blend = OrientationBlend::default();

        for _ in 0..120 {
            blend.advance(&config, Vec3::new(5.0, 0.0, 0.0), 0.0, DT);
        }
        assert!((blend.forward() - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn test_slow_movement_keeps_facing() {
        let config = OrientationConfig::default();
        let mut blend = OrientationBlend::default();
        blend.advance(&config, Vec3::new(0.05, -3.0, 0.0), 0.0, DT);
        assert_eq!(blend.facing, Quat::IDENTITY);
    }

    #[test]
    fn test_reverse_heading_does_not_produce_nan() {
        let config = OrientationConfig::default();
        let mut blend = OrientationBlend::default();
        for _ in 0..240 {
            blend.advance(&config, Vec3::new(0.0, 0.0, 8.0), 0.0, DT);
            assert!(blend.facing.is_finite());
            assert!(blend.facing.is_normalized());
        }
        // Turned around the vertical axis only
        assert!((blend.forward() - Vec3::Z).length() < 1e-3);
        assert!((blend.facing * Vec3::Y - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn test_roll_settles_on_target() {
        let config = OrientationConfig::default();
        let mut blend = OrientationBlend::default();
        for _ in 0..240 {
            blend.advance(&config, Vec3::ZERO, 90.0, DT);
        }
        assert!((blend.roll - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_flow_blend() {
        let config = OrientationConfig::default();
        let mut blend = OrientationBlend::default();
        for _ in 0..600 {
            blend.advance(&config, Vec3::new(0.0, 0.0, -10.0), 0.0, DT);
        }
        assert!((blend.flow - 10.0).abs() < 0.01);
        assert!((blend.flow_blend(20.0) - 0.5).abs() < 0.01);
        assert_eq!(blend.flow_blend(5.0), 1.0);
        assert_eq!(blend.flow_blend(0.0), 0.0);
    }
}
