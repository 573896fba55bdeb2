//! Fixed-step simulation clock
//!
//! Render frames arrive at whatever rate they like; the movement controller
//! only ever sees whole steps of `fixed_timestep`. Whatever is left over is
//! exposed as an interpolation factor for drawing between two steps.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for simulation (in seconds)
    pub fixed_timestep: f32,
    /// Longest frame that is fed to the simulation; anything above is dropped
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Accumulates frame time into fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    /// Simulated seconds since start
    elapsed: f64,
    /// Render frames seen, paused ones included
    frames: u64,
    paused: bool,
    /// Scaled time not yet consumed by a step
    carry: f32,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Feed one render frame and return how many fixed steps to run.
    ///
    /// Negative or NaN deltas count as zero. Long frames are cut to
    /// `max_delta_time`.
    pub fn advance(&mut self, raw_delta: f32) -> u32 {
        self.frames += 1;
        if self.paused || !(self.config.fixed_timestep > 0.0) {
            return 0;
        }

        let delta = raw_delta.max(0.0).min(self.config.max_delta_time.max(0.0));
        self.carry += delta * self.config.time_scale.max(0.0);

        let mut steps = 0;
        while self.carry >= self.config.fixed_timestep {
            self.carry -= self.config.fixed_timestep;
            self.elapsed += self.config.fixed_timestep as f64;
            steps += 1;
        }
        steps
    }

    /// Length of one simulation step in seconds
    pub fn step(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// How far the clock is between the last step and the next, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        if self.config.fixed_timestep > 0.0 {
            self.carry / self.config.fixed_timestep
        } else {
            0.0
        }
    }

    /// Simulated seconds, counting whole steps only
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip pause; paused frames produce no steps and keep their carry
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}
