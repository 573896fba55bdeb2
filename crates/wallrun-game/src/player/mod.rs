//! Player movement module
//!
//! Grounded, airborne and wall-running third-person movement on top of a
//! [`CollisionProbe`](wallrun_physics::CollisionProbe).

mod controller;
mod jump;
mod movement;
mod orientation;
mod state;
mod wall;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{tick, FrameInput, PlayerController};
pub use jump::JumpBuffer;
pub use movement::{MovementConfig, OrientationConfig};
pub use orientation::OrientationBlend;
pub use state::{ControllerState, MovementSnapshot, MovementState};
pub use wall::{nearest_wall, wall_jump_velocity, WallContact, WallSide};
