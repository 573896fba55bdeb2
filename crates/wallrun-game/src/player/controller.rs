//! Player movement controller
//!
//! [`tick`] is the whole per-frame update: a pure function from the previous
//! frame's [`ControllerState`] and this frame's input to the next state, with
//! a single call into the collision probe to commit the move. [`PlayerController`]
//! owns the state together with its input source and probe and is what a game
//! loop drives.

use glam::{Quat, Vec2, Vec3};
use tracing::debug;
use wallrun_core::math::{clamp_magnitude, decay_toward_zero, flatten_direction, horizontal, recompose};
use wallrun_core::Transform;
use wallrun_physics::CollisionProbe;

use crate::camera::CameraBasis;
use crate::error::ConfigError;
use crate::input::InputSource;

use super::state::{ControllerState, MovementSnapshot, MovementState};
use super::wall::{nearest_wall, wall_jump_velocity, WallSide};
use super::MovementConfig;

/// Everything sampled from outside the controller for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Movement axis (`x` = right, `y` = forward)
    pub movement_axis: Vec2,
    /// Jump was pressed since the previous frame
    pub jump_pressed: bool,
    /// Crouch/slide is held
    pub crouch_held: bool,
    /// Camera the movement axis is relative to
    pub camera: CameraBasis,
    /// Frame length in seconds
    pub dt: f32,
}

impl FrameInput {
    /// A frame with no input at all
    pub fn idle(dt: f32) -> Self {
        Self {
            movement_axis: Vec2::ZERO,
            jump_pressed: false,
            crouch_held: false,
            camera: CameraBasis::default(),
            dt,
        }
    }
}

/// Advance the movement state by one frame.
///
/// Runs every rule in a fixed order and then sweeps the probe by
/// `velocity * dt`. Frames with a non-positive (or NaN) `dt` leave the state
/// untouched and do not move.
pub fn tick<P: CollisionProbe + ?Sized>(
    config: &MovementConfig,
    mut state: ControllerState,
    input: &FrameInput,
    probe: &mut P,
) -> ControllerState {
    let dt = input.dt;
    if !(dt > 0.0) {
        return state;
    }

    if input.jump_pressed {
        state.jump_buffer.arm(config.jump_buffer_time);
    }

    let grounded = probe.is_grounded();

    let mut planar = horizontal(state.velocity);
    let vertical = state.velocity.y;

    // Passive decay, doubled while sliding
    let decay = config.movement_decel * dt;
    planar = decay_toward_zero(planar, decay);
    if input.crouch_held && grounded {
        planar = decay_toward_zero(planar, decay);
    }

    planar += input.camera.planar_direction(input.movement_axis) * config.input_accel * dt;

    // Pull airborne speed toward the target instead of hard-capping it
    if !grounded && config.airborne_target_velocity != 0.0 && config.jump_decel != 0.0 {
        let multiplier =
            planar.length() / config.airborne_target_velocity * config.input_accel / config.jump_decel;
        planar = decay_toward_zero(planar, config.jump_decel * multiplier * dt);
    }

    let mut velocity = recompose(planar, vertical);

    let capsule = probe.capsule();
    let surfaces = probe.wall_run_surfaces(&capsule.inflated(config.wall_probe_margin));
    let contact = nearest_wall(&*probe, &surfaces, capsule.center);

    if let Some(contact) = contact {
        if !state.wall_running
            && !grounded
            && planar.length() > config.wall_run_min_speed
            && state.wall_memory != Some(contact.surface)
        {
            let to_wall = contact.point - capsule.center;
            let side = WallSide::from_facing(state.orientation.backward(), Vec3::new(to_wall.x, 0.0, to_wall.z));

            state.wall_running = true;
            state.wall_memory = Some(contact.surface);
            state.wall_side = Some(side);
            velocity.y = config.wall_attach_vertical_speed(velocity.y);
            debug!("Wall run started on {:?} ({:?} side)", contact.surface, side);
        }
    }

    if state.wall_running {
        match contact {
            None => {
                state.wall_running = false;
                state.wall_side = None;
                debug!("Wall run ended: lost contact");
            }
            Some(contact) if state.jump_buffer.consume() => {
                velocity = wall_jump_velocity(
                    velocity,
                    contact.normal,
                    config.jump_height,
                    config.wall_jump_vertical_speed(),
                );
                state.wall_running = false;
                state.wall_side = None;
                debug!("Wall jump off {:?}", contact.surface);
            }
            Some(_) => {}
        }
    }

    if grounded {
        state.wall_memory = None;
        if state.wall_running {
            state.wall_running = false;
            state.wall_side = None;
            debug!("Wall run ended: landed");
        }
        if velocity.y < 0.0 {
            velocity.y = 0.0;
        }
        if state.jump_buffer.consume() {
            velocity.y = config.jump_launch_speed();
            debug!("Jump with launch speed {:.3}", velocity.y);
        }
    }

    velocity.y += config.gravity * dt;
    velocity = clamp_magnitude(velocity, config.max_move_speed);

    // Ease toward camera-forward while pushing forward
    if input.movement_axis.y > 0.0 {
        let forward = input.camera.planar_forward();
        if forward != Vec2::ZERO {
            let target = recompose(forward * horizontal(velocity).length(), velocity.y);
            velocity = velocity.lerp(target, dt.min(1.0));
        }
    }

    probe.move_by(velocity * dt);

    state.jump_buffer.tick(dt);

    let next = if grounded {
        MovementState::Grounded
    } else if state.wall_running {
        MovementState::WallRunning
    } else {
        MovementState::Airborne
    };
    if next != state.state && next == MovementState::Grounded {
        debug!("Landed");
    }
    state.state = next;
    state.velocity = velocity;

    let roll = state
        .wall_side
        .map_or(0.0, |side| side.roll_degrees(config.wall_side_angle));
    state.orientation.advance(&config.orientation, velocity, roll, dt);

    state
}

/// Yaw-only part of a rotation
fn yaw_only(rotation: Quat) -> Quat {
    let forward = flatten_direction(rotation * -Vec3::Z);
    if forward == Vec2::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(f32::atan2(-forward.x, -forward.y))
}

/// Movement controller bound to its input source and collision probe
pub struct PlayerController<I, P> {
    /// Movement configuration
    config: MovementConfig,
    /// Where movement input comes from
    input: I,
    /// World queries and the move/sweep
    probe: P,
    /// State carried between frames
    state: ControllerState,
}

impl<I: InputSource, P: CollisionProbe> PlayerController<I, P> {
    /// Create a controller at rest, grounded, facing -Z
    pub fn new(config: MovementConfig, input: I, probe: P) -> Self {
        Self {
            config,
            input,
            probe,
            state: ControllerState::new(Quat::IDENTITY),
        }
    }

    /// Create a controller after checking `config`
    pub fn try_new(config: MovementConfig, input: I, probe: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, input, probe))
    }

    /// Run one simulation frame
    pub fn update(&mut self, camera: CameraBasis, dt: f32) -> MovementSnapshot {
        let frame = FrameInput {
            movement_axis: self.input.movement_axis(),
            jump_pressed: self.input.take_jump_edge(),
            crouch_held: self.input.crouch_held(),
            camera,
            dt,
        };
        self.state = tick(&self.config, self.state, &frame, &mut self.probe);
        self.snapshot()
    }

    /// Downstream view of the last completed frame
    pub fn snapshot(&self) -> MovementSnapshot {
        MovementSnapshot::capture(&self.state, self.config.airborne_target_velocity)
    }

    /// Zero velocity and clear wall memory and any buffered jump
    pub fn reset_movement(&mut self) {
        self.state.reset();
    }

    /// Move to `destination` and reset movement
    pub fn teleport(&mut self, destination: &Transform) {
        self.probe.teleport(destination.position);
        self.state = ControllerState::new(yaw_only(destination.rotation));
        debug!("Teleported to {:?}", destination.position);
    }

    /// Movement configuration
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// State carried between frames
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Current movement regime
    pub fn movement_state(&self) -> MovementState {
        self.state.state
    }

    /// Center of the character's capsule
    pub fn center(&self) -> Vec3 {
        self.probe.capsule().center
    }

    /// Input source
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Input source, for feeding events between frames
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Collision probe
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Collision probe, for editing the world between frames
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }
}
