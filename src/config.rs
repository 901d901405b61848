//! Engine configuration.
//!
//! [`EngineConfig`] holds the tunables of the simulation pass. Build it in code
//! with the `with_*` methods or load it from JSON:
//!
//! ```ignore
//! let config = EngineConfig::default()
//!     .with_initial_capacity(50_000)
//!     .with_open_tile_id(255)
//!     .with_seed(7);
//!
//! let config = EngineConfig::from_json_str(r#"{ "laser_speed": 2.0 }"#)?;
//! ```
//!
//! Missing JSON fields fall back to their defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default pre-allocated particle capacity.
pub const DEFAULT_CAPACITY: usize = 30_000;

/// Default "open" tile sentinel. Particles pass through it like air.
pub const DEFAULT_OPEN_TILE_ID: u32 = 255;

/// Tunables for a [`ParticleEngine`](crate::ParticleEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Particles to reserve room for up front.
    pub initial_capacity: usize,
    /// Tile id treated as non-solid in addition to air (`0`).
    pub open_tile_id: u32,
    /// Horizontal speed of `LaserLine` particles, in pixels per millisecond.
    pub laser_speed: f32,
    /// Horizontal speed of `BallisticCurve` particles, in pixels per millisecond.
    pub ballistic_speed: f32,
    /// Half-width of the per-tick jitter applied to `Chaotic` particles, in pixels.
    pub chaotic_jitter: f32,
    /// Raindrop drift in pixels per millisecond per unit of wind speed.
    pub wind_scale: f32,
    /// RNG seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            open_tile_id: DEFAULT_OPEN_TILE_ID,
            laser_speed: 1.2,
            ballistic_speed: 0.25,
            chaotic_jitter: 1.0,
            wind_scale: 0.05,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::Invalid("initial_capacity must be > 0".into()));
        }
        if self.open_tile_id == 0 {
            return Err(ConfigError::Invalid(
                "open_tile_id must differ from the air tile (0)".into(),
            ));
        }
        for (name, value) in [
            ("laser_speed", self.laser_speed),
            ("ballistic_speed", self.ballistic_speed),
            ("chaotic_jitter", self.chaotic_jitter),
            ("wind_scale", self.wind_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Set the pre-allocated particle capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the non-solid "open" tile id.
    pub fn with_open_tile_id(mut self, id: u32) -> Self {
        self.open_tile_id = id;
        self
    }

    /// Set the `LaserLine` horizontal speed (pixels per millisecond).
    pub fn with_laser_speed(mut self, speed: f32) -> Self {
        self.laser_speed = speed;
        self
    }

    /// Set the `BallisticCurve` horizontal speed (pixels per millisecond).
    pub fn with_ballistic_speed(mut self, speed: f32) -> Self {
        self.ballistic_speed = speed;
        self
    }

    /// Set the `Chaotic` per-tick jitter half-width.
    pub fn with_chaotic_jitter(mut self, jitter: f32) -> Self {
        self.chaotic_jitter = jitter;
        self
    }

    /// Set the raindrop wind drift factor.
    pub fn with_wind_scale(mut self, scale: f32) -> Self {
        self.wind_scale = scale;
        self
    }

    /// Seed the engine RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_capacity, 30_000);
        assert_eq!(config.open_tile_id, DEFAULT_OPEN_TILE_ID);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "laser_speed": 2.5, "seed": 9 }"#).unwrap();
        assert_eq!(config.laser_speed, 2.5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.initial_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = EngineConfig::from_json_str(r#"{ "initial_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = EngineConfig::default().with_laser_speed(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_air_as_open_tile() {
        let config = EngineConfig::default().with_open_tile_id(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_builder_values() {
        let config = EngineConfig::default().with_seed(3).with_wind_scale(0.1);
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_json_file("/nonexistent/tilefx.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
