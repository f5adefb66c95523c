//! Export command implementation
//!
//! Reads configuration entities from a JSON file (the shape the import
//! command dumps) and exports them into the store.

use clap::Args;
use mongodb::bson::Document;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::bridge::Bridge;
use crate::config::load_config;
use crate::domain::{ConfigObjects, EntityClass};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file of entity records grouped by class
    #[arg(short, long)]
    pub input: PathBuf,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let contents = std::fs::read_to_string(&self.input)?;
        let raw: HashMap<String, Vec<Document>> = serde_json::from_str(&contents)?;

        let mut data = ConfigObjects::new();
        for (class_name, records) in raw {
            match EntityClass::from_str(&class_name) {
                Ok(class) => {
                    data.entry(class).or_default().extend(records);
                }
                Err(e) => {
                    tracing::warn!(class = %class_name, error = %e, "skipping unknown entity class");
                }
            }
        }

        let bridge = Bridge::new(&config);
        if let Err(e) = bridge.init().await {
            println!("Failed to connect to MongoDB");
            println!("   Error: {}", e);
            return Ok(4);
        }

        let total: usize = data.values().map(Vec::len).sum();
        println!("Exporting {} records...", total);

        if bridge.export_all(&data).await {
            println!("Export complete");
            Ok(0)
        } else {
            println!("Export finished with failures, see log");
            Ok(5)
        }
    }
}
