//! Domain error types
//!
//! This module defines the error hierarchy for the bridge. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main bridge error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific failure classes and provides context for error handling.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or authentication failure while opening the store connection.
    /// Fatal to startup; nothing can proceed without a ready connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An operation was invoked before the store connection was initialized
    #[error("store connection not initialized")]
    NotInitialized,

    /// A store read or write failed during steady-state operation
    #[error("Query error: {0}")]
    Query(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// An entity class name that is none of the five known classes
    #[error("Unknown entity class: {0}")]
    UnknownEntityClass(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Driver errors during steady-state operation are query failures; the
// connection phase maps its own errors explicitly.
impl From<mongodb::error::Error> for BridgeError {
    fn from(err: mongodb::error::Error) -> Self {
        BridgeError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_display() {
        let err = BridgeError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_not_initialized_display() {
        let err = BridgeError::NotInitialized;
        assert_eq!(err.to_string(), "store connection not initialized");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BridgeError = json_err.into();
        assert!(matches!(err, BridgeError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BridgeError = toml_err.into();
        assert!(matches!(err, BridgeError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_bridge_error_implements_std_error() {
        let err = BridgeError::Query("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
