//! Collision probe interface consumed by the movement controller
//!
//! The controller never talks to a physics engine directly. Everything it needs
//! to know about the world each frame (ground contact, nearby wall-run
//! surfaces, closest points, raycasts) and the authoritative move/sweep go
//! through [`CollisionProbe`].

use std::ops::BitOr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a collision surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Bitmask selecting which kinds of surfaces a query considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceMask(pub u32);

impl SurfaceMask {
    /// Walkable geometry (floors, platforms)
    pub const GROUND: SurfaceMask = SurfaceMask(1 << 0);
    /// Surfaces the character may run along
    pub const WALL_RUN: SurfaceMask = SurfaceMask(1 << 1);
    /// The character's own capsule
    pub const PLAYER: SurfaceMask = SurfaceMask(1 << 2);
    /// Everything
    pub const ALL: SurfaceMask = SurfaceMask(u32::MAX);

    /// Check if every bit of `other` is set in this mask
    pub fn contains(self, other: SurfaceMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SurfaceMask {
    type Output = SurfaceMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        SurfaceMask(self.0 | rhs.0)
    }
}

/// Vertical capsule used for overlap queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// World-space center
    pub center: Vec3,
    /// Half the length of the inner segment
    pub half_height: f32,
    /// Radius around the segment
    pub radius: f32,
}

impl Capsule {
    /// Build a capsule standing on `feet` with a total `height`
    pub fn standing(feet: Vec3, height: f32, radius: f32) -> Self {
        Self {
            center: feet + Vec3::Y * (height / 2.0),
            half_height: ((height - 2.0 * radius) / 2.0).max(0.01),
            radius,
        }
    }

    /// Same capsule with the radius grown by `margin`
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            radius: self.radius + margin,
            ..*self
        }
    }

    /// Total height including both caps
    pub fn height(&self) -> f32 {
        2.0 * (self.half_height + self.radius)
    }
}

/// Detailed raycast hit information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The surface that was hit
    pub surface: SurfaceId,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
}

/// World queries and the move/sweep the movement controller depends on.
///
/// Implementations must fail safe: a missing body or stale surface handle reads
/// as "not grounded" / "no surfaces" / `None` rather than panicking.
pub trait CollisionProbe {
    /// Whether the last move ended in ground contact
    fn is_grounded(&self) -> bool;

    /// The character's current capsule
    fn capsule(&self) -> Capsule;

    /// Wall-run surfaces overlapping `capsule`, in a stable order
    fn wall_run_surfaces(&self, capsule: &Capsule) -> Vec<SurfaceId>;

    /// Closest point on `surface` to `position`
    fn closest_point(&self, surface: SurfaceId, position: Vec3) -> Option<Vec3>;

    /// Cast a ray against surfaces selected by `mask`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: SurfaceMask)
        -> Option<RayHit>;

    /// Sweep the character by `delta`, resolving contacts.
    ///
    /// Returns the displacement actually applied and updates the grounded flag
    /// for the following frame.
    fn move_by(&mut self, delta: Vec3) -> Vec3;

    /// Place the character's feet at `position` without sweeping
    fn teleport(&mut self, position: Vec3);
}
