//! Error types for tilefx.
//!
//! The simulation itself never fails: `tick` and `draw` degrade instead of
//! erroring. The only fallible surface is loading an [`EngineConfig`].
//!
//! [`EngineConfig`]: crate::config::EngineConfig

use std::fmt;

/// Errors that can occur while loading or validating engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse JSON configuration.
    Json(serde_json::Error),
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// A value parsed fine but is outside its accepted range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Failed to parse engine config: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to read engine config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid engine config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid("initial_capacity must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid engine config: initial_capacity must be > 0"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.source().is_some());
    }
}
