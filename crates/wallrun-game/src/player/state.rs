//! Movement regime and retained per-frame state

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use wallrun_core::math::horizontal;
use wallrun_physics::SurfaceId;

use super::jump::JumpBuffer;
use super::orientation::OrientationBlend;
use super::wall::WallSide;

/// Which movement regime the character is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Grounded,
    Airborne,
    WallRunning,
}

impl MovementState {
    /// Check if on the ground
    pub fn is_grounded(&self) -> bool {
        matches!(self, MovementState::Grounded)
    }

    /// Check if running along a wall
    pub fn is_wall_running(&self) -> bool {
        matches!(self, MovementState::WallRunning)
    }
}

/// Everything the controller carries from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    /// Current velocity
    pub velocity: Vec3,
    /// Regime reported for the last completed frame
    pub state: MovementState,
    /// Whether a wall run is in progress
    pub wall_running: bool,
    /// Last surface wall-run against; blocks re-attaching until landing
    pub wall_memory: Option<SurfaceId>,
    /// Side of the active wall run
    pub wall_side: Option<WallSide>,
    /// Pending jump request
    pub jump_buffer: JumpBuffer,
    /// Visual facing and animation values
    pub orientation: OrientationBlend,
}

impl ControllerState {
    /// Fresh state: at rest, grounded, facing `facing`
    pub fn new(facing: Quat) -> Self {
        Self {
            orientation: OrientationBlend::facing(facing),
            ..Default::default()
        }
    }

    /// Zero velocity and forget wall and jump state in one step.
    ///
    /// Facing is kept so the character does not visually snap.
    pub fn reset(&mut self) {
        *self = Self::new(self.orientation.facing);
    }

    /// Horizontal speed of the current velocity
    pub fn horizontal_speed(&self) -> f32 {
        horizontal(self.velocity).length()
    }
}

/// Read-only view of one completed frame for downstream consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementSnapshot {
    pub velocity: Vec3,
    pub state: MovementState,
    pub horizontal_speed: f32,
    /// Smoothed horizontal speed
    pub flow: f32,
    /// Flow normalized to `[0, 1]` for animation blending
    pub flow_blend: f32,
    /// Wall-run roll in degrees
    pub wall_roll: f32,
    /// Facing with wall roll applied
    pub rotation: Quat,
}

impl MovementSnapshot {
    /// Capture `state`, normalizing flow against `reference_speed`
    pub fn capture(state: &ControllerState, reference_speed: f32) -> Self {
        Self {
            velocity: state.velocity,
            state: state.state,
            horizontal_speed: state.horizontal_speed(),
            flow: state.orientation.flow,
            flow_blend: state.orientation.flow_blend(reference_speed),
            wall_roll: state.orientation.roll,
            rotation: state.orientation.visual_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_grounded_at_rest() {
        let state = ControllerState::new(Quat::IDENTITY);
        assert_eq!(state.velocity, Vec3::ZERO);
        assert!(state.state.is_grounded());
        assert!(!state.wall_running);
        assert!(state.wall_memory.is_none());
        assert!(!state.jump_buffer.is_available());
    }

    #[test]
    fn test_reset_clears_everything_but_facing() {
        let facing = Quat::from_rotation_y(1.0);
        let mut state = ControllerState::new(facing);
        state.velocity = Vec3::new(3.0, 4.0, 5.0);
        state.state = MovementState::WallRunning;
        state.wall_running = true;
        state.wall_memory = Some(SurfaceId(4));
        state.wall_side = Some(WallSide::Left);
        state.jump_buffer.arm(0.25);
        state.orientation.roll = -40.0;

        state.reset();
        assert_eq!(state, ControllerState::new(facing));
    }

    #[test]
    fn test_snapshot() {
        let mut state = ControllerState::default();
        state.velocity = Vec3::new(3.0, -1.0, 4.0);
        state.orientation.flow = 10.0;
        let snapshot = MovementSnapshot::capture(&state, 20.0);
        assert_eq!(snapshot.horizontal_speed, 5.0);
        assert_eq!(snapshot.flow_blend, 0.5);
        assert_eq!(snapshot.state, MovementState::Grounded);
    }
}
