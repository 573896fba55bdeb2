//! Wall contact selection and wall-run impulses

use glam::Vec3;
use serde::{Deserialize, Serialize};
use wallrun_physics::{CollisionProbe, SurfaceId};

/// The wall surface chosen for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Surface handle
    pub surface: SurfaceId,
    /// Closest point on the surface to the capsule center
    pub point: Vec3,
    /// Horizontal unit vector pointing from the wall toward the capsule
    pub normal: Vec3,
    /// Distance from the capsule center to `point`
    pub distance: f32,
}

/// Which side of the character the wall is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Classify from the character's backward facing and the direction to the wall.
    ///
    /// Positive Y of `backward × to_wall` means the wall is on the right.
    pub fn from_facing(backward: Vec3, to_wall: Vec3) -> Self {
        if backward.cross(to_wall).y >= 0.0 {
            WallSide::Right
        } else {
            WallSide::Left
        }
    }

    /// Signed roll offset in degrees for a wall at this side
    pub fn roll_degrees(self, angle: f32) -> f32 {
        match self {
            WallSide::Right => angle,
            WallSide::Left => -angle,
        }
    }
}

/// Pick the nearest of `surfaces` to `center`.
///
/// Surfaces whose closest point cannot be resolved are skipped; ties keep the
/// earlier surface in probe order.
pub fn nearest_wall<P: CollisionProbe + ?Sized>(
    probe: &P,
    surfaces: &[SurfaceId],
    center: Vec3,
) -> Option<WallContact> {
    let mut best: Option<WallContact> = None;

    for &surface in surfaces {
        let Some(point) = probe.closest_point(surface, center) else {
            continue;
        };
        let offset = center - point;
        let distance = offset.length();
        if best.is_some_and(|b| b.distance <= distance) {
            continue;
        }
        best = Some(WallContact {
            surface,
            point,
            normal: Vec3::new(offset.x, 0.0, offset.z).normalize_or_zero(),
            distance,
        });
    }

    best
}

/// Velocity after jumping off a wall with outward `normal`.
///
/// The part of `velocity` along the wall plane is kept, the outward push
/// replaces whatever was going into or away from the wall, and the vertical
/// component is overwritten.
pub fn wall_jump_velocity(velocity: Vec3, normal: Vec3, jump_height: f32, vertical_speed: f32) -> Vec3 {
    let along_wall = velocity.reject_from_normalized(normal);
    let mut result = normal * jump_height * 2.0 + along_wall;
    result.y = vertical_speed;
    result
}
