//! Teleport volumes
//!
//! Trigger boxes that send the player somewhere else, e.g. a kill plane below
//! the course that respawns at the start.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;
use wallrun_core::{Aabb, Transform};
use wallrun_physics::{CollisionProbe, SurfaceMask};

use crate::input::InputSource;
use crate::player::PlayerController;

/// Height above the destination the ground-snap ray starts from
const SNAP_RAY_LIFT: f32 = 1.0;
/// Furthest the ground-snap ray looks below its origin
const SNAP_RAY_DISTANCE: f32 = 100.0;

/// A box that teleports the player when their capsule center enters it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleportVolume {
    /// Trigger region
    pub bounds: Aabb,
    /// Where the player lands and which way they face
    pub destination: Transform,
    /// Drop the destination onto the ground below it
    pub snap_to_ground: bool,
}

impl TeleportVolume {
    pub fn new(bounds: Aabb, destination: Transform) -> Self {
        Self {
            bounds,
            destination,
            snap_to_ground: false,
        }
    }

    pub fn with_ground_snap(mut self) -> Self {
        self.snap_to_ground = true;
        self
    }

    /// Check whether `point` is inside the trigger region
    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds.contains(point)
    }

    /// Final destination, dropped onto ground below it when snapping is on.
    ///
    /// Falls back to the configured destination when no ground is found.
    pub fn resolve_destination<P: CollisionProbe + ?Sized>(&self, probe: &P) -> Transform {
        if !self.snap_to_ground {
            return self.destination;
        }

        let origin = self.destination.position + Vec3::Y * SNAP_RAY_LIFT;
        match probe.raycast(origin, -Vec3::Y, SNAP_RAY_DISTANCE, SurfaceMask::GROUND) {
            Some(hit) => Transform::from_position_rotation(hit.point, self.destination.rotation),
            None => self.destination,
        }
    }

    /// Teleport the player if they are inside the volume.
    ///
    /// Must be called between frames. Returns whether the player was moved.
    pub fn apply<I: InputSource, P: CollisionProbe>(&self, player: &mut PlayerController<I, P>) -> bool {
        if !self.contains(player.center()) {
            return false;
        }

        let destination = self.resolve_destination(player.probe());
        info!("Teleport volume triggered, moving player to {:?}", destination.position);
        player.teleport(&destination);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraBasis;
    use crate::player::testing::{ScriptedInput, ScriptedProbe};
    use crate::player::{MovementConfig, MovementState};

    fn kill_plane() -> TeleportVolume {
        TeleportVolume::new(
            Aabb::new(Vec3::new(-100.0, -60.0, -100.0), Vec3::new(100.0, -20.0, 100.0)),
            Transform::from_position_yaw(Vec3::new(0.0, 5.0, 0.0), std::f32::consts::PI),
        )
    }

    #[test]
    fn test_outside_volume_does_nothing() {
        let mut player = PlayerController::new(MovementConfig::default(), ScriptedInput::default(), ScriptedProbe::default());
        player.update(CameraBasis::default(), 1.0 / 60.0);
        let before = *player.state();
        let position = player.probe().position;

        assert!(!kill_plane().apply(&mut player));
        assert_eq!(*player.state(), before);
        assert_eq!(player.probe().position, position);
    }

    #[test]
    fn test_inside_volume_teleports_and_resets() {
        let mut probe = ScriptedProbe::default();
        probe.position = Vec3::new(4.0, -30.0, 2.0);
        let mut player = PlayerController::new(MovementConfig::default(), ScriptedInput::default(), probe);
        for _ in 0..10 {
            player.update(CameraBasis::default(), 1.0 / 60.0);
        }
        assert_eq!(player.movement_state(), MovementState::Airborne);

        let volume = kill_plane();
        assert!(volume.apply(&mut player));
        assert_eq!(player.probe().position, volume.destination.position);
        assert_eq!(player.velocity(), Vec3::ZERO);
        // Yaw of PI faces +Z
        assert!((player.state().orientation.forward() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_snap_to_ground() {
        let mut probe = ScriptedProbe::default();
        probe.ground_y = Some(2.0);
        let volume = kill_plane().with_ground_snap();

        let destination = volume.resolve_destination(&probe);
        assert!((destination.position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(destination.rotation, volume.destination.rotation);
    }

    #[test]
    fn test_snap_without_ground_keeps_destination() {
        let probe = ScriptedProbe::default();
        let volume = kill_plane().with_ground_snap();
        assert_eq!(volume.resolve_destination(&probe), volume.destination);

        let no_snap = kill_plane();
        let mut grounded = ScriptedProbe::default();
        grounded.ground_y = Some(2.0);
        assert_eq!(no_snap.resolve_destination(&grounded), no_snap.destination);
    }
}
