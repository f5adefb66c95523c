//! Configuration schema types
//!
//! This module defines the configuration structure for the bridge.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main bridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// MongoDB connection and collection settings
    pub mongodb: MongoConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.mongodb.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// MongoDB connection and collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,

    /// Replica set name, for replica-aware addressing
    #[serde(default)]
    pub replica_set: Option<String>,

    /// Target database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Availability snapshot collection
    #[serde(default = "default_availability_collection")]
    pub availability_collection: String,

    /// Event log collection
    #[serde(default = "default_logs_collection")]
    pub logs_collection: String,

    /// UI preference collection
    #[serde(default = "default_preferences_collection")]
    pub preferences_collection: String,

    /// Username for authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Row-count ceiling applied to historical queries
    #[serde(default = "default_max_records")]
    pub max_records: i64,
}

impl MongoConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.uri.is_empty() {
            return Err("mongodb.uri cannot be empty".to_string());
        }

        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err("mongodb.uri must start with mongodb:// or mongodb+srv://".to_string());
        }

        if self.database.is_empty() {
            return Err("mongodb.database cannot be empty".to_string());
        }

        for (name, value) in [
            ("mongodb.availability_collection", &self.availability_collection),
            ("mongodb.logs_collection", &self.logs_collection),
            ("mongodb.preferences_collection", &self.preferences_collection),
        ] {
            if value.is_empty() {
                return Err(format!("{name} cannot be empty"));
            }
        }

        // Authentication is attempted only when both halves are present.
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                if username.is_empty() {
                    return Err("mongodb.username cannot be empty when set".to_string());
                }
                if password.expose_secret().is_empty() {
                    return Err("mongodb.password cannot be empty when set".to_string());
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(
                    "mongodb.username and mongodb.password must be supplied together".to_string(),
                );
            }
            (None, None) => {}
        }

        if self.max_records < 1 {
            return Err(format!(
                "mongodb.max_records must be >= 1, got {}",
                self.max_records
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging (console output is always on)
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_database() -> String {
    "shinken".to_string()
}

fn default_availability_collection() -> String {
    "availability".to_string()
}

fn default_logs_collection() -> String {
    "logs".to_string()
}

fn default_preferences_collection() -> String {
    "ui_user_preferences".to_string()
}

fn default_max_records() -> i64 {
    200
}

fn default_local_path() -> String {
    "/var/log/shinken-mongo".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
