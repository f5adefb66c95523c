//! Result type alias used throughout the crate

use crate::domain::errors::BridgeError;

/// Convenience alias for `std::result::Result<T, BridgeError>`
pub type Result<T> = std::result::Result<T, BridgeError>;
