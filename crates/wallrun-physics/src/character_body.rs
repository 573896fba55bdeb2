//! Kinematic character body using rapier3d's kinematic character controller

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::probe::{Capsule, SurfaceMask};
use crate::{membership_groups, PhysicsWorld};

/// Character body configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
    /// Whether to snap to ground when walking down slopes
    pub snap_to_ground: bool,
    /// Maximum ground snap distance
    pub ground_snap_distance: f32,
    /// Sweeps after losing ground contact that still count as grounded
    pub ground_grace_steps: u32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
            snap_to_ground: true,
            ground_snap_distance: 0.2,
            ground_grace_steps: 3,
        }
    }
}

/// Capsule body that sweeps through static geometry
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Current position of the feet
    pub position: Vec3,
    /// Whether the last sweep ended on the ground
    pub grounded: bool,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
}

impl CharacterBody {
    /// Create a new character body with default config
    pub fn new() -> Self {
        Self::with_config(CharacterBodyConfig::default())
    }

    /// Create a new character body with custom config
    pub fn with_config(config: CharacterBodyConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: false,
        });
        controller.snap_to_ground = if config.snap_to_ground {
            Some(CharacterLength::Absolute(config.ground_snap_distance))
        } else {
            None
        };
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
        }
    }

    /// Spawn the character's capsule collider in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.grounded = false;

        let capsule = self.capsule();
        let collider = ColliderBuilder::capsule_y(capsule.half_height, capsule.radius)
            .translation(vector![capsule.center.x, capsule.center.y, capsule.center.z])
            .friction(0.0)
            .restitution(0.0)
            .collision_groups(membership_groups(SurfaceMask::PLAYER))
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        handle
    }

    /// The body's capsule at its current position
    pub fn capsule(&self) -> Capsule {
        Capsule::standing(self.position, self.config.height, self.config.radius)
    }

    /// Sweep the character through the world, returning the applied translation.
    ///
    /// An unspawned body does not move and is never grounded.
    pub fn move_character(&mut self, physics: &mut PhysicsWorld, desired_translation: Vec3, dt: f32) -> Vec3 {
        let Some(collider_handle) = self.collider_handle else {
            self.grounded = false;
            return Vec3::ZERO;
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            self.grounded = false;
            return Vec3::ZERO;
        };

        let center = self.capsule().center;
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            physics.query_pipeline(),
            collider.shape(),
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default().exclude_collider(collider_handle),
            |_| {},
        );

        self.grounded = movement.grounded;

        let applied = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += applied;
        self.sync_collider(physics);
        applied
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;
        self.sync_collider(physics);
    }

    fn sync_collider(&self, physics: &mut PhysicsWorld) {
        let Some(handle) = self.collider_handle else {
            return;
        };
        let center = self.capsule().center;
        if let Some(collider) = physics.collider_set.get_mut(handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_body_config() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.4);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_unspawned_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        let mut body = CharacterBody::new();
        body.grounded = true;

        let applied = body.move_character(&mut world, Vec3::new(1.0, 0.0, 0.0), 1.0 / 60.0);
        assert_eq!(applied, Vec3::ZERO);
        assert!(!body.grounded);
    }

    #[test]
    fn test_falls_onto_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut body = CharacterBody::new();
        body.spawn(&mut world, Vec3::new(0.0, 1.0, 0.0));

        let applied = body.move_character(&mut world, Vec3::new(0.0, -5.0, 0.0), 1.0 / 60.0);
        assert!(applied.y < 0.0 && applied.y > -1.1);
        assert!(body.position.y > -0.01 && body.position.y < 0.1);
        assert!(body.grounded);
    }
}
