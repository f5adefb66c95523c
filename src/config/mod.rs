//! Configuration management for the bridge.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! The bridge uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - `SHINKEN_*` environment variable overrides
//! - Type-safe configuration structs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [mongodb]
//! uri = "mongodb://mongo1.example.com:27017"
//! replica_set = "shinken"
//! database = "shinken"
//! username = "shinken"
//! password = "${SHINKEN_MONGODB_PASSWORD}"
//! max_records = 200
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shinken_mongo::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shinken-mongo.toml")?;
//! println!("database: {}", config.mongodb.database);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, BridgeConfig, LoggingConfig, MongoConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
