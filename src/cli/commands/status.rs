//! Status command implementation
//!
//! Connects to the store, pings it, and prints per-entity-class document
//! counts.

use clap::Args;
use mongodb::bson::doc;

use crate::adapters::mongodb::MongoStore;
use crate::config::load_config;
use crate::domain::EntityClass;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let store = MongoStore::new(config.mongodb.clone());
        if let Err(e) = store.init().await {
            println!("Failed to connect to MongoDB");
            println!("   Error: {}", e);
            return Ok(4);
        }

        println!("Connected to {}", store.provenance());
        println!();
        println!("{:<14} {:>10}", "class", "documents");

        for class in EntityClass::ALL {
            let count = match store.collection(class.as_str()) {
                Ok(collection) => collection.count_documents(doc! {}).await.unwrap_or(0),
                Err(_) => 0,
            };
            println!("{:<14} {:>10}", class.as_str(), count);
        }

        Ok(0)
    }
}
