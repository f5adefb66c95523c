//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the bridge using
//! clap. The commands are operational tools around the same engines the
//! host application uses: connection checks, bulk import/export, and
//! configuration validation.

pub mod commands;

use clap::{Parser, Subcommand};

/// shinken-mongo - MongoDB bridge for the Shinken monitoring framework
#[derive(Parser, Debug)]
#[command(name = "shinken-mongo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "shinken-mongo.toml",
        env = "SHINKEN_MONGO_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHINKEN_MONGO_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import configuration entities from the store
    Import(commands::import::ImportArgs),

    /// Export configuration entities from a JSON file into the store
    Export(commands::export::ExportArgs),

    /// Check the store connection and show collection counts
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
