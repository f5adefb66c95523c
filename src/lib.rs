// shinken-mongo - MongoDB bridge for the Shinken monitoring framework
// Licensed under the MIT License

//! # shinken-mongo - MongoDB configuration and UI data bridge
//!
//! A bidirectional bridge between the Shinken monitoring framework's
//! in-memory configuration/event model and a MongoDB document store.
//!
//! ## Overview
//!
//! The bridge serves three functions:
//!
//! - **Importing** configuration entities (hosts, services, contacts,
//!   commands, timeperiods) from the store at startup
//! - **Exporting** the same entity classes back into the store, assigning
//!   each record a stable identifier so re-exports upsert in place
//! - **Serving** on-demand reads/writes of per-user UI preferences and
//!   time-windowed history (availability snapshots, event logs)
//!
//! ## Architecture
//!
//! - [`bridge`] - The facade handed to the host application
//! - [`core`] - Business logic (sync, preferences, history)
//! - [`adapters`] - The MongoDB store connection
//! - [`domain`] - Entity model, identifier derivation, error types
//! - [`config`] - Configuration management
//! - [`cli`] - Command-line operational tools
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shinken_mongo::config::load_config;
//! use shinken_mongo::domain::EntityClass;
//! use shinken_mongo::Bridge;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shinken-mongo.toml")?;
//!
//!     let bridge = Bridge::new(&config);
//!     bridge.init().await?;
//!
//!     let objects = bridge.import_all().await;
//!     println!("imported {} hosts", objects[&EntityClass::Hosts].len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Initialization failures are fatal and propagate to the host's startup
//! sequence. Once running, per-record failures during bulk export and
//! faults during historical queries are isolated: logged, counted, and
//! downgraded to neutral results so one bad record never aborts a bulk
//! operation. See [`domain::BridgeError`] for the taxonomy.
//!
//! ## Logging
//!
//! The bridge uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting configuration import");
//! warn!(class = "hosts", "No records found");
//! ```

pub mod adapters;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

pub use bridge::Bridge;
