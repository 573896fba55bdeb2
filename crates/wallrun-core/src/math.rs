//! Vector helpers for decoupled horizontal/vertical motion
//!
//! Velocities are split into a horizontal part on the XZ plane (as a [`Vec2`]
//! holding `(x, z)`) and a vertical Y component. None of these helpers ever
//! produce NaN from a zero-length input.

use glam::{Vec2, Vec3};

/// Horizontal `(x, z)` part of a 3D vector
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Rebuild a 3D vector from a horizontal `(x, z)` part and a vertical component
pub fn recompose(horizontal: Vec2, vertical: f32) -> Vec3 {
    Vec3::new(horizontal.x, vertical, horizontal.y)
}

/// Shrink a vector's magnitude toward zero by `amount`, keeping its direction.
///
/// The result never points the other way: once the magnitude would drop below
/// zero it is zero.
pub fn decay_toward_zero(v: Vec2, amount: f32) -> Vec2 {
    v.normalize_or_zero() * (v.length() - amount).max(0.0)
}

/// Rescale `v` to exactly `max_length` if it is longer, preserving direction
pub fn clamp_magnitude(v: Vec3, max_length: f32) -> Vec3 {
    if v.length() > max_length {
        v.normalize_or_zero() * max_length
    } else {
        v
    }
}

/// Project a direction onto the horizontal plane and renormalize it.
///
/// Returns `Vec2::ZERO` for directions that are (nearly) vertical.
pub fn flatten_direction(direction: Vec3) -> Vec2 {
    horizontal(direction).normalize_or_zero()
}

/// Exponential smoothing factor for a per-second `rate`, clamped to `[0, 1]`
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_recompose() {
        let v = Vec3::new(3.0, -2.0, 4.0);
        assert_eq!(horizontal(v), Vec2::new(3.0, 4.0));
        assert_eq!(recompose(horizontal(v), v.y), v);
    }

    #[test]
    fn test_decay_preserves_direction() {
        let decayed = decay_toward_zero(Vec2::new(3.0, 4.0), 1.0);
        assert!((decayed.length() - 4.0).abs() < 1e-5);
        assert!((decayed.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_decay_never_overshoots() {
        assert_eq!(decay_toward_zero(Vec2::new(0.5, 0.0), 2.0), Vec2::ZERO);
    }

    #[test]
    fn zero_vectors_stay_zero() {
        assert_eq!(decay_toward_zero(Vec2::ZERO, 1.0), Vec2::ZERO);
        assert_eq!(clamp_magnitude(Vec3::ZERO, 0.0), Vec3::ZERO);
        assert_eq!(flatten_direction(Vec3::Y), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_magnitude() {
        let clamped = clamp_magnitude(Vec3::new(0.0, 30.0, 40.0), 10.0);
        assert!((clamped.length() - 10.0).abs() < 1e-5);
        assert!((clamped.normalize() - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-5);

        let short = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(clamp_magnitude(short, 10.0), short);
    }

    #[test]
    fn test_flatten_direction() {
        let flat = flatten_direction(Vec3::new(1.0, 5.0, 0.0));
        assert_eq!(flat, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_smoothing_factor_is_clamped() {
        assert_eq!(smoothing_factor(10.0, 0.5), 1.0);
        assert_eq!(smoothing_factor(-1.0, 0.5), 0.0);
        assert!((smoothing_factor(6.0, 0.1) - 0.6).abs() < 1e-6);
    }
}
