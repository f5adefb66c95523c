//! Business logic of the bridge
//!
//! Three engines share the store handle and nothing else:
//!
//! - [`sync`] - bulk import/export of configuration entities
//! - [`prefs`] - per-user and global UI preferences
//! - [`history`] - filtered reads over availability snapshots and event logs

pub mod history;
pub mod prefs;
pub mod sync;

pub use history::HistoryEngine;
pub use prefs::{PreferenceScope, PreferenceStore, GLOBAL_SCOPE};
pub use sync::{ConfigSync, ExportFailure, ExportReport};
