//! Headless course run
//!
//! Builds a small rapier course (a long runway, two wall-run walls and a kill
//! plane past the end), feeds a scripted key timeline through the input
//! handler and steps the controller on the fixed clock.

use anyhow::Context;
use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};
use wallrun_core::{Aabb, GameTime, Transform};
use wallrun_game::{
    CameraBasis, InputAction, InputHandler, MovementSnapshot, MovementState, PlayerController,
    TeleportVolume, WallSide,
};
use wallrun_physics::{CharacterBody, PhysicsProbe, PhysicsWorld};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::settings::Settings;

/// One scripted key change
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    /// Wall-clock seconds since the run started
    pub at: f32,
    pub key: KeyCode,
    pub state: ElementState,
}

impl KeyEvent {
    fn press(at: f32, key: KeyCode) -> Self {
        Self {
            at,
            key,
            state: ElementState::Pressed,
        }
    }

    fn release(at: f32, key: KeyCode) -> Self {
        Self {
            at,
            key,
            state: ElementState::Released,
        }
    }
}

/// Run forward, jump onto the right wall, kick across to the left wall,
/// slide after landing and pause briefly near the end.
pub fn default_timeline() -> Vec<KeyEvent> {
    vec![
        KeyEvent::press(0.0, KeyCode::KeyW),
        KeyEvent::press(4.0, KeyCode::Space),
        KeyEvent::release(4.1, KeyCode::Space),
        KeyEvent::press(4.7, KeyCode::Space),
        KeyEvent::release(4.8, KeyCode::Space),
        KeyEvent::press(7.5, KeyCode::KeyC),
        KeyEvent::release(8.5, KeyCode::KeyC),
        KeyEvent::release(9.0, KeyCode::KeyW),
        KeyEvent::press(10.0, KeyCode::Escape),
        KeyEvent::release(10.05, KeyCode::Escape),
        KeyEvent::press(10.5, KeyCode::Escape),
        KeyEvent::release(10.55, KeyCode::Escape),
    ]
}

/// Level geometry plus where the player starts and respawns
pub struct Course {
    pub world: PhysicsWorld,
    pub spawn: Transform,
    pub kill_plane: TeleportVolume,
}

/// Runway along -Z with a wall on each side part way down.
///
/// Both walls start 2.5 units up, so a character running on the runway
/// never touches them and only a jump reaches them.
pub fn build_course() -> Course {
    let mut world = PhysicsWorld::new();

    // Runway from z = 10 to z = -190, top face at y = 0
    world.create_static_box(Vec3::new(10.0, 0.5, 100.0), Vec3::new(0.0, -0.5, -90.0));

    // Right wall from z = -30 to -70, inner face at x = 0.45 within reach of the lane
    world.create_wall_run_surface(Vec3::new(0.5, 4.75, 20.0), Vec3::new(0.95, 7.25, -50.0));
    // Left wall from z = -45 to -110, inner face at x = -1.0, reached by kicking off the right one
    world.create_wall_run_surface(Vec3::new(0.5, 4.75, 32.5), Vec3::new(-1.5, 7.25, -77.5));

    let spawn = Transform::from_position(Vec3::new(0.0, 0.1, 0.0));
    let kill_plane = TeleportVolume::new(
        Aabb::from_center_half_extents(Vec3::new(0.0, -35.0, 0.0), Vec3::new(500.0, 25.0, 500.0)),
        spawn,
    )
    .with_ground_snap();

    Course {
        world,
        spawn,
        kill_plane,
    }
}

/// What happened during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DemoSummary {
    /// Fixed simulation steps taken
    pub steps: u64,
    /// Simulated seconds
    pub simulated_time: f32,
    pub seconds_grounded: f32,
    pub seconds_airborne: f32,
    pub seconds_wall_running: f32,
    pub jumps: u32,
    pub wall_runs: u32,
    /// Side of each wall run, in order
    pub wall_sides: Vec<WallSide>,
    pub landings: u32,
    pub teleports: u32,
    pub max_speed: f32,
    pub final_position: Vec3,
    pub final_state: MovementState,
}

impl DemoSummary {
    fn record(
        &mut self,
        previous: MovementState,
        snapshot: &MovementSnapshot,
        wall_side: Option<WallSide>,
        dt: f32,
    ) {
        self.steps += 1;
        self.simulated_time += dt;
        self.max_speed = self.max_speed.max(snapshot.velocity.length());

        match snapshot.state {
            MovementState::Grounded => self.seconds_grounded += dt,
            MovementState::Airborne => self.seconds_airborne += dt,
            MovementState::WallRunning => self.seconds_wall_running += dt,
        }

        if snapshot.state.is_wall_running() && !previous.is_wall_running() {
            self.wall_runs += 1;
            self.wall_sides.extend(wall_side);
        }
        match (previous, snapshot.state) {
            (MovementState::Grounded, MovementState::Airborne) if snapshot.velocity.y > 0.0 => self.jumps += 1,
            (from, MovementState::Grounded) if from != MovementState::Grounded => self.landings += 1,
            _ => {}
        }
        self.final_state = snapshot.state;
    }
}

/// Run `timeline` on the default course for `duration` wall-clock seconds,
/// advancing the clock by `frame_delta` per rendered frame.
pub fn run(settings: &Settings, timeline: &[KeyEvent], duration: f32, frame_delta: f32) -> anyhow::Result<DemoSummary> {
    settings.validate().context("Refusing to run with invalid settings")?;
    if !(frame_delta > 0.0) {
        anyhow::bail!("frame delta must be positive");
    }

    let course = build_course();
    let body = CharacterBody::with_config(settings.body.clone());
    let probe = PhysicsProbe::new(course.world, body, course.spawn.position, settings.time.fixed_timestep);
    let mut player = PlayerController::try_new(settings.movement.clone(), InputHandler::new(), probe)?;
    let mut game_time = GameTime::new(settings.time.clone());
    let camera = CameraBasis::from_rotation(course.spawn.rotation);

    let mut events = timeline.to_vec();
    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut next_event = 0;

    let mut summary = DemoSummary::default();
    let mut elapsed = 0.0;
    let mut next_report = 1.0;
    let mut pose = course.spawn;
    let mut previous_pose = pose;

    info!("Running course for {:.1}s", duration);

    while elapsed < duration {
        while next_event < events.len() && events[next_event].at <= elapsed {
            let event = events[next_event];
            debug!("{:.2}s: {:?} {:?}", elapsed, event.key, event.state);
            player
                .input_mut()
                .handle_keyboard(PhysicalKey::Code(event.key), event.state);
            next_event += 1;
        }

        if player.input().state.is_just_pressed(InputAction::Pause) {
            game_time.toggle_pause();
            info!("{}", if game_time.is_paused() { "Paused" } else { "Resumed" });
        }

        let dt = game_time.step();
        for _ in 0..game_time.advance(frame_delta) {
            let previous = player.movement_state();
            let snapshot = player.update(camera, dt);
            summary.record(previous, &snapshot, player.state().wall_side, dt);

            if course.kill_plane.apply(&mut player) {
                summary.teleports += 1;
            }
            previous_pose = pose;
            pose = Transform::from_position_rotation(player.probe().position(), player.snapshot().rotation);
        }

        if game_time.elapsed() >= next_report {
            // What a renderer would draw this frame
            let drawn = Transform::lerp(&previous_pose, &pose, game_time.alpha());
            let snapshot = serde_json::to_string(&player.snapshot())?;
            info!("t={:.0}s at {:?} {}", next_report, drawn.position, snapshot);
            next_report += 1.0;
        }

        player.input_mut().end_frame();
        elapsed += frame_delta;
    }

    summary.final_position = player.probe().position();
    Ok(summary)
}
