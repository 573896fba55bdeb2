//! Wallrun Game - Character movement and its inputs
//!
//! Provides the third-person movement controller (grounded, airborne and
//! wall-running), camera-relative input handling and teleport volumes.

pub mod camera;
pub mod error;
pub mod input;
pub mod player;
pub mod teleport;

pub use camera::CameraBasis;
pub use error::ConfigError;
pub use input::{InputAction, InputBindings, InputHandler, InputSource, InputState};
pub use player::{
    ControllerState, FrameInput, JumpBuffer, MovementConfig, MovementSnapshot, MovementState,
    OrientationConfig, PlayerController, WallSide,
};
pub use teleport::TeleportVolume;
