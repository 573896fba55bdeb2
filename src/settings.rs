//! Movement settings with persistence
//!
//! Settings are saved to `~/.config/wallrun/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wallrun_core::TimeConfig;
use wallrun_game::MovementConfig;
use wallrun_physics::CharacterBodyConfig;

/// All tunable settings for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementConfig,
    pub body: CharacterBodyConfig,
    pub time: TimeConfig,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wallrun"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Invalid settings: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse and validate settings from TOML
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every section for values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.movement.validate()?;
        if !(self.time.fixed_timestep > 0.0) {
            anyhow::bail!("fixed_timestep must be positive");
        }
        if !(self.time.max_delta_time > 0.0) {
            anyhow::bail!("max_delta_time must be positive");
        }
        if !(self.time.time_scale >= 0.0) {
            anyhow::bail!("time_scale must be zero or positive");
        }
        if !(self.body.height > 2.0 * self.body.radius && self.body.radius > 0.0) {
            anyhow::bail!("character height must exceed its diameter");
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::run;
    use wallrun_core::GameTime;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let content = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed = Settings::parse(&content).unwrap();
        assert_eq!(parsed.movement, MovementConfig::default());
        assert_eq!(parsed.time.fixed_timestep, TimeConfig::default().fixed_timestep);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed = Settings::parse("[movement]\njump_height = 3.5\n").unwrap();
        assert_eq!(parsed.movement.jump_height, 3.5);
        assert_eq!(parsed.movement.gravity, MovementConfig::default().gravity);
        assert_eq!(parsed.body.height, CharacterBodyConfig::default().height);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Settings::parse("[movement]\ngravity = 9.81\n").is_err());
        assert!(Settings::parse("[time]\nfixed_timestep = 0.0\n").is_err());
        assert!(Settings::parse("[body]\nheight = 0.5\n").is_err());
        assert!(Settings::parse("movement = 3").is_err());
    }

    #[test]
    fn test_bad_clock_values_are_rejected() {
        assert!(Settings::parse("[time]\nmax_delta_time = -1.0\n").is_err());
        assert!(Settings::parse("[time]\nmax_delta_time = 0.0\n").is_err());
        assert!(Settings::parse("[time]\nmax_delta_time = nan\n").is_err());
        assert!(Settings::parse("[time]\ntime_scale = -1.0\n").is_err());
        assert!(Settings::parse("[time]\ntime_scale = nan\n").is_err());

        let frozen = Settings::parse("[time]\ntime_scale = 0.0\n").unwrap();
        assert_eq!(frozen.time.time_scale, 0.0);
    }

    #[test]
    fn test_clock_survives_unvalidated_config() {
        // Settings built in code skip validation; the clock must still not panic
        let mut settings = Settings::default();
        settings.time.max_delta_time = -1.0;
        settings.time.time_scale = f32::NAN;
        assert!(settings.validate().is_err());

        let mut clock = GameTime::new(settings.time.clone());
        assert_eq!(clock.advance(1.0 / 60.0), 0);
        assert!(run(&settings, &[], 1.0, 1.0 / 60.0).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/wallrun/settings.toml"));
        assert_eq!(settings.movement, MovementConfig::default());
    }
}
