//! Game settings and tuning
//!
//! Everything that shapes the feel of a run lives here. Settings are read once
//! at startup and copied into the `World`.

use serde::{Deserialize, Serialize};

/// Errors raised while reading settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Malformed JSON or a field of the wrong type
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that would break the simulation
    #[error("Invalid setting `{name}`: {reason}")]
    Invalid { name: &'static str, reason: &'static str },
}

/// Gameplay tuning plus knobs for the headless driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ship ===
    /// Radians per millisecond while a rotate key is held
    pub rotation_speed: f32,
    /// Velocity gained per millisecond of thrust
    pub acceleration: f32,
    /// Bullet speed in pixels per millisecond
    pub shot_speed: f32,
    /// Ticks a bullet lives before it expires
    pub bullet_lifetime: i32,

    // === Asteroids ===
    /// Upper bound of the per-vertex jitter
    pub asteroid_deformation: f32,
    /// Radians per millisecond every asteroid spins
    pub asteroid_spin: f32,
    /// Vertex count of a generated asteroid
    pub asteroid_sides: usize,
    /// Radius of the asteroids spawned at game start
    pub start_radius: f32,
    /// Smallest radius a fragment may have
    pub min_fragment_radius: f32,

    /// RNG seed for asteroid shapes and headings
    pub seed: u64,

    // === Headless driver ===
    /// Frames the native demo runs before exiting
    pub demo_frames: u32,
    /// Target frame time of the native demo (milliseconds)
    pub frame_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rotation_speed: 0.006,
            acceleration: 0.001,
            shot_speed: 0.08,
            bullet_lifetime: 100,

            asteroid_deformation: 4.0,
            asteroid_spin: 0.001,
            asteroid_sides: 8,
            start_radius: 16.0,
            min_fragment_radius: 4.0,

            seed: 0,

            demo_frames: 600,
            frame_ms: 16,
        }
    }
}

impl Settings {
    /// Environment variable holding inline JSON settings
    pub const ENV_VAR: &'static str = "TORUS_ASTEROIDS_SETTINGS";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.asteroid_sides < 3 {
            return Err(SettingsError::Invalid {
                name: "asteroid_sides",
                reason: "an asteroid needs at least 3 vertices",
            });
        }
        if !(self.start_radius.is_finite() && self.start_radius > 0.0) {
            return Err(SettingsError::Invalid {
                name: "start_radius",
                reason: "must be a positive number",
            });
        }
        if !(self.min_fragment_radius.is_finite() && self.min_fragment_radius > 0.0) {
            return Err(SettingsError::Invalid {
                name: "min_fragment_radius",
                reason: "must be a positive number",
            });
        }
        if self.bullet_lifetime <= 0 {
            return Err(SettingsError::Invalid {
                name: "bullet_lifetime",
                reason: "must be at least one tick",
            });
        }
        Ok(())
    }

    /// Load settings from the environment, falling back to defaults
    pub fn load() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::ENV_VAR);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", Self::ENV_VAR, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
