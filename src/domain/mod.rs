//! Domain models and types for the bridge.
//!
//! This module contains the entity-class model, identifier derivation, and
//! the error hierarchy shared by every component.
//!
//! # Overview
//!
//! - **Entity model** ([`EntityClass`], [`ConfigObjects`], [`LogEvent`])
//! - **Identifier derivation** ([`ids::assign_uid`])
//! - **Error types** ([`BridgeError`])
//! - **Result type alias** ([`Result`])
//!
//! Entity records themselves are open BSON documents: the monitoring
//! configuration schema is user-extensible, so the bridge never forces
//! records into fixed structs. All fallible operations return
//! [`Result<T, BridgeError>`](Result), and per-record failures during bulk
//! operations are isolated rather than propagated (see [`crate::core`]).

pub mod entity;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use entity::{ConfigObjects, EntityClass, LogEvent};
pub use errors::BridgeError;
pub use result::Result;
