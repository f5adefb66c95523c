//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BridgeConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::BridgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BridgeConfig
/// 4. Applies environment variable overrides (SHINKEN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<BridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BridgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        BridgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BridgeConfig = toml::from_str(&contents)
        .map_err(|e| BridgeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        BridgeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(BridgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the SHINKEN_* prefix
///
/// Environment variables follow the pattern: SHINKEN_<SECTION>_<KEY>
/// For example: SHINKEN_MONGODB_URI, SHINKEN_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut BridgeConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("SHINKEN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // MongoDB overrides
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_URI") {
        config.mongodb.uri = val;
    }
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_REPLICA_SET") {
        config.mongodb.replica_set = Some(val);
    }
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_DATABASE") {
        config.mongodb.database = val;
    }
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_USERNAME") {
        config.mongodb.username = Some(val);
    }
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_PASSWORD") {
        config.mongodb.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SHINKEN_MONGODB_MAX_RECORDS") {
        if let Ok(max_records) = val.parse() {
            config.mongodb.max_records = max_records;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SHINKEN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHINKEN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
