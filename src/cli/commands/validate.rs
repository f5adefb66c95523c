//! Validate-config command implementation

use clap::Args;

use crate::config::load_config;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid");
                println!("   database: {}", config.mongodb.database);
                println!("   max_records: {}", config.mongodb.max_records);
                Ok(0)
            }
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {}", e);
                Ok(2)
            }
        }
    }
}
