//! Command implementations
//!
//! Exit code convention: 0 success, 2 configuration error, 4 connection
//! error, 5 operation failure.

pub mod export;
pub mod import;
pub mod status;
pub mod validate;
