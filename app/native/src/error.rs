//! Error types for Shade.
//!
//! Errors here only surface at the outer edges (CLI, config loading, the
//! runtime actor). The coordination engine itself never fails: refused
//! transitions are no-ops and collaborator failures are logged and swallowed.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running the Shade binary or library entry points.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ShadeError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// A scripted scenario could not be parsed or replayed.
    #[error("Scenario error: {0}")]
    ScenarioError(String),
    /// The coordinator runtime stopped or did not answer.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for ShadeError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for ShadeError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<crate::config::ConfigError> for ShadeError {
    fn from(err: crate::config::ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<crate::actor::ActorError> for ShadeError {
    fn from(err: crate::actor::ActorError) -> Self { Self::RuntimeError(err.to_string()) }
}

impl From<String> for ShadeError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for ShadeError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let err = ShadeError::InvalidArguments("unknown bar mode".to_string());
        assert_eq!(err.to_string(), "unknown bar mode");
    }

    #[test]
    fn test_config_error_display() {
        let err = ShadeError::ConfigError("Invalid JSON".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("Invalid JSON"));
    }

    #[test]
    fn test_scenario_error_display() {
        let err = ShadeError::ScenarioError("line 3: expected an event".to_string());
        assert!(err.to_string().starts_with("Scenario error"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: ShadeError = io_err.into();
        assert!(matches!(err, ShadeError::IoError(_)));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: ShadeError = json_err.into();
        assert!(matches!(err, ShadeError::CommandError(_)));
    }

    #[test]
    fn test_from_str_and_string() {
        let a: ShadeError = "boom".into();
        let b: ShadeError = String::from("boom").into();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_error_serialization() {
        let err = ShadeError::RuntimeError("actor stopped".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"RuntimeError","message":"actor stopped"}"#);
    }
}
