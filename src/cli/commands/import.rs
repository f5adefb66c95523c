//! Import command implementation
//!
//! Runs a full configuration import and prints per-class counts, optionally
//! dumping the imported records as JSON.

use clap::Args;
use std::path::PathBuf;

use crate::bridge::Bridge;
use crate::config::load_config;
use crate::domain::EntityClass;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Write the imported records to this file as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let bridge = Bridge::new(&config);
        if let Err(e) = bridge.init().await {
            println!("Failed to connect to MongoDB");
            println!("   Error: {}", e);
            return Ok(4);
        }

        let objects = bridge.import_all().await;

        println!("{:<14} {:>10}", "class", "imported");
        for class in EntityClass::ALL {
            let count = objects.get(&class).map_or(0, Vec::len);
            println!("{:<14} {:>10}", class.as_str(), count);
        }

        if let Some(output) = &self.output {
            let json = serde_json::to_string_pretty(&objects)?;
            std::fs::write(output, json)?;
            println!();
            println!("Wrote {}", output.display());
        }

        Ok(0)
    }
}
