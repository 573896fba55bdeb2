//! Movement configuration and constants

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Movement tunables, fixed for the lifetime of a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal acceleration from full input, in units per second squared
    pub input_accel: f32,
    /// Hard cap on total velocity magnitude
    pub max_move_speed: f32,
    /// Passive horizontal deceleration, always applied
    pub movement_decel: f32,
    /// Extra airborne deceleration scale
    pub jump_decel: f32,
    /// Horizontal speed at which airborne decay cancels full input
    pub airborne_target_velocity: f32,
    /// Apex height of a grounded jump
    pub jump_height: f32,
    /// Vertical acceleration (must be negative)
    pub gravity: f32,
    /// Share of existing upward velocity kept when attaching to a wall
    pub wall_run_jump_coefficient: f32,
    /// Horizontal speed that must be exceeded to start a wall run
    pub wall_run_min_speed: f32,
    /// Visual roll applied while wall-running, in degrees
    pub wall_side_angle: f32,
    /// Extra radius around the capsule when looking for wall-run surfaces
    pub wall_probe_margin: f32,
    /// How long a jump press stays buffered, in seconds
    pub jump_buffer_time: f32,
    /// Visual facing and animation smoothing
    pub orientation: OrientationConfig,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            input_accel: 10.0,
            max_move_speed: 100.0,
            movement_decel: 5.0,
            jump_decel: 15.0,
            airborne_target_velocity: 20.0,
            jump_height: 2.0,
            gravity: -9.81,
            wall_run_jump_coefficient: 0.5,
            wall_run_min_speed: 15.0,
            wall_side_angle: 90.0,
            wall_probe_margin: 0.1,
            jump_buffer_time: 0.25,
            orientation: OrientationConfig::default(),
        }
    }
}

impl MovementConfig {
    /// Launch speed of a grounded jump reaching `jump_height`
    pub fn jump_launch_speed(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }

    /// Vertical speed set by a jump off a wall
    pub fn wall_jump_vertical_speed(&self) -> f32 {
        (-self.jump_height * self.gravity).sqrt()
    }

    /// Vertical speed set when attaching to a wall
    pub fn wall_attach_vertical_speed(&self, current_vertical: f32) -> f32 {
        (-self.gravity).sqrt() * self.jump_height
            + current_vertical.max(0.0) * self.wall_run_jump_coefficient
    }

    /// Check sign conventions and ranges.
    ///
    /// The per-frame update trusts its config; this is meant for values that
    /// come from outside (settings files, tooling).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity < 0.0) {
            return Err(ConfigError::invalid("gravity", "must be negative"));
        }
        if !(self.max_move_speed > 0.0) {
            return Err(ConfigError::invalid("max_move_speed", "must be positive"));
        }

        let non_negative = [
            ("input_accel", self.input_accel),
            ("movement_decel", self.movement_decel),
            ("jump_decel", self.jump_decel),
            ("airborne_target_velocity", self.airborne_target_velocity),
            ("jump_height", self.jump_height),
            ("wall_run_jump_coefficient", self.wall_run_jump_coefficient),
            ("wall_run_min_speed", self.wall_run_min_speed),
            ("wall_probe_margin", self.wall_probe_margin),
            ("jump_buffer_time", self.jump_buffer_time),
            ("orientation.turn_rate", self.orientation.turn_rate),
            ("orientation.roll_rate", self.orientation.roll_rate),
            ("orientation.flow_rate", self.orientation.flow_rate),
            ("orientation.heading_min_speed", self.orientation.heading_min_speed),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, "must be zero or positive"));
            }
        }

        Ok(())
    }
}

/// Smoothing rates for visual facing, wall roll and animation flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// How quickly facing turns toward the direction of travel (per second)
    pub turn_rate: f32,
    /// How quickly the wall-run roll settles (per second)
    pub roll_rate: f32,
    /// How quickly the animation flow value follows horizontal speed (per second)
    pub flow_rate: f32,
    /// Below this horizontal speed the facing is left alone
    pub heading_min_speed: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            turn_rate: 10.0,
            roll_rate: 8.0,
            flow_rate: 5.0,
            heading_min_speed: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MovementConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wall_run_min_speed, 15.0);
        assert_eq!(config.wall_side_angle, 90.0);
    }

    #[test]
    fn test_jump_speeds() {
        let config = MovementConfig {
            jump_height: 2.0,
            gravity: -10.0,
            wall_run_jump_coefficient: 0.5,
            ..Default::default()
        };
        assert!((config.jump_launch_speed() - 40.0_f32.sqrt()).abs() < 1e-5);
        assert!((config.wall_jump_vertical_speed() - 20.0_f32.sqrt()).abs() < 1e-5);

        let base = 10.0_f32.sqrt() * 2.0;
        assert!((config.wall_attach_vertical_speed(-3.0) - base).abs() < 1e-5);
        assert!((config.wall_attach_vertical_speed(4.0) - (base + 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_positive_gravity_is_rejected() {
        let config = MovementConfig {
            gravity: 9.81,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut config = MovementConfig::default();
        config.orientation.flow_rate = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("orientation.flow_rate"));
    }

    #[test]
    fn test_nan_is_rejected() {
        let config = MovementConfig {
            movement_decel: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
