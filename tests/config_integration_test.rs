//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with
//! --test-threads=1 to avoid interference between tests.

use shinken_mongo::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("SHINKEN_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SHINKEN_MONGODB_URI");
    std::env::remove_var("SHINKEN_MONGODB_DATABASE");
    std::env::remove_var("SHINKEN_MONGODB_MAX_RECORDS");
    std::env::remove_var("TEST_MONGO_PASSWORD");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[mongodb]
uri = "mongodb://mongo1.example.com:27017,mongo2.example.com:27017"
replica_set = "shinken"
database = "monitoring"
availability_collection = "hav"
logs_collection = "events"
preferences_collection = "ui_prefs"
username = "shinken"
password = "s3cret"
max_records = 500

[logging]
local_enabled = false
local_path = "/tmp/shinken-mongo"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.mongodb.uri,
        "mongodb://mongo1.example.com:27017,mongo2.example.com:27017"
    );
    assert_eq!(config.mongodb.replica_set.as_deref(), Some("shinken"));
    assert_eq!(config.mongodb.database, "monitoring");
    assert_eq!(config.mongodb.availability_collection, "hav");
    assert_eq!(config.mongodb.logs_collection, "events");
    assert_eq!(config.mongodb.preferences_collection, "ui_prefs");
    assert_eq!(config.mongodb.username.as_deref(), Some("shinken"));
    assert_eq!(config.mongodb.max_records, 500);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_gets_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[mongodb]
uri = "mongodb://localhost:27017"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.mongodb.database, "shinken");
    assert_eq!(config.mongodb.availability_collection, "availability");
    assert_eq!(config.mongodb.logs_collection, "logs");
    assert_eq!(config.mongodb.preferences_collection, "ui_user_preferences");
    assert_eq!(config.mongodb.max_records, 200);
    assert!(config.mongodb.replica_set.is_none());
    assert!(config.mongodb.username.is_none());
    assert!(config.mongodb.password.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("TEST_MONGO_PASSWORD", "from-env");

    let temp_file = write_config(
        r#"
[mongodb]
uri = "mongodb://localhost:27017"
username = "shinken"
password = "${TEST_MONGO_PASSWORD}"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    use secrecy::ExposeSecret;
    assert_eq!(
        config.mongodb.password.as_ref().unwrap().expose_secret(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[mongodb]
uri = "mongodb://localhost:27017"
username = "shinken"
password = "${TEST_MONGO_PASSWORD}"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_MONGO_PASSWORD"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("SHINKEN_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("SHINKEN_MONGODB_DATABASE", "staging");
    std::env::set_var("SHINKEN_MONGODB_MAX_RECORDS", "50");

    let temp_file = write_config(
        r#"
[mongodb]
uri = "mongodb://localhost:27017"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.mongodb.database, "staging");
    assert_eq!(config.mongodb.max_records, 50);

    cleanup_env_vars();
}

#[test]
fn test_validation_rejects_bad_uri_scheme() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[mongodb]
uri = "redis://localhost:6379"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
}

#[test]
fn test_validation_rejects_username_without_password() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[mongodb]
uri = "mongodb://localhost:27017"
username = "shinken"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("supplied together"));
}

#[test]
fn test_missing_mongodb_section_is_an_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "info"
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}
