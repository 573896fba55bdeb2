//! [`CollisionProbe`] backed by a rapier3d world and kinematic body

use glam::Vec3;
use tracing::debug;

use crate::probe::{Capsule, CollisionProbe, RayHit, SurfaceId, SurfaceMask};
use crate::{CharacterBody, PhysicsWorld};

/// Owns the level geometry and the character body sweeping through it
pub struct PhysicsProbe {
    /// Static level geometry
    pub world: PhysicsWorld,
    /// The character's capsule
    pub body: CharacterBody,
    /// Step length handed to the kinematic controller on each sweep
    timestep: f32,
    /// Sweeps since the last one that ended on the ground; `None` once the
    /// body has risen, been teleported or never touched down
    since_ground: Option<u32>,
}

impl PhysicsProbe {
    /// Create a probe over `world`, spawning `body` at `spawn_position`
    pub fn new(mut world: PhysicsWorld, mut body: CharacterBody, spawn_position: Vec3, timestep: f32) -> Self {
        body.spawn(&mut world, spawn_position);
        debug!("Character body spawned at {:?}", spawn_position);
        Self {
            world,
            body,
            timestep,
            since_ground: None,
        }
    }

    /// Current position of the character's feet
    pub fn position(&self) -> Vec3 {
        self.body.position
    }
}

impl CollisionProbe for PhysicsProbe {
    /// Rapier's ground flag drops out for single sweeps on flat ground, so
    /// contact is held for `ground_grace_steps` sweeps unless the body rose.
    fn is_grounded(&self) -> bool {
        self.body.collider_handle.is_some()
            && (self.body.grounded
                || self
                    .since_ground
                    .is_some_and(|sweeps| sweeps <= self.body.config.ground_grace_steps))
    }

    fn capsule(&self) -> Capsule {
        self.body.capsule()
    }

    fn wall_run_surfaces(&self, capsule: &Capsule) -> Vec<SurfaceId> {
        let Some(own) = self.body.collider_handle else {
            return Vec::new();
        };
        self.world.overlapping(capsule, SurfaceMask::WALL_RUN, Some(own))
    }

    fn closest_point(&self, surface: SurfaceId, position: Vec3) -> Option<Vec3> {
        self.world.closest_point(surface, position)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: SurfaceMask) -> Option<RayHit> {
        self.world
            .raycast(origin, direction, max_distance, mask, self.body.collider_handle)
    }

    fn move_by(&mut self, delta: Vec3) -> Vec3 {
        let applied = self.body.move_character(&mut self.world, delta, self.timestep);
        self.since_ground = if self.body.grounded {
            Some(0)
        } else if delta.y > 0.0 {
            None
        } else {
            self.since_ground.map(|sweeps| sweeps.saturating_add(1))
        };
        applied
    }

    fn teleport(&mut self, position: Vec3) {
        self.body.set_position(&mut self.world, position);
        self.since_ground = None;
    }
}
