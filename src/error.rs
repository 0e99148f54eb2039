//! Error types for wordswarm.
//!
//! The simulation itself cannot fail. Errors only come from loading and
//! validating configuration and from the driver's I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a [`SwarmConfig`](crate::SwarmConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid config JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the `wordswarm` driver binary.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open transcript {path}: {source}")]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::Invalid("damping must be positive".into());
        assert_eq!(err.to_string(), "Invalid config: damping must be positive");

        let err = DriverError::from(err);
        assert_eq!(err.to_string(), "Invalid config: damping must be positive");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse config"));
    }
}
