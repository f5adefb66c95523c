//! Bridge facade exposed to the host application
//!
//! The monitoring framework loads this bridge as a module and talks to a
//! single object: configuration import/export for the arbiter, preference
//! and history reads for the web UI. The facade owns the store connection
//! and wires it into the three engines.

use std::sync::Arc;

use mongodb::bson::{Bson, Document};

use crate::adapters::mongodb::MongoStore;
use crate::config::BridgeConfig;
use crate::core::history::HistoryEngine;
use crate::core::prefs::{PreferenceScope, PreferenceStore};
use crate::core::sync::ConfigSync;
use crate::domain::entity::{ConfigObjects, LogEvent};
use crate::domain::Result;

/// Entry point handed to the host application
///
/// [`Bridge::init`] must complete before any other call; every operation
/// checks readiness and degrades per the crate-wide error policy instead of
/// faulting on a missing connection.
pub struct Bridge {
    store: Arc<MongoStore>,
    sync: ConfigSync,
    prefs: PreferenceStore,
    history: HistoryEngine,
}

impl Bridge {
    /// Wire the store handle and engines from a validated configuration
    pub fn new(config: &BridgeConfig) -> Self {
        let store = Arc::new(MongoStore::new(config.mongodb.clone()));
        Self {
            sync: ConfigSync::new(Arc::clone(&store)),
            prefs: PreferenceStore::new(Arc::clone(&store)),
            history: HistoryEngine::new(Arc::clone(&store)),
            store,
        }
    }

    /// One-time startup hook; connection or authentication failures are
    /// fatal and must propagate to the host's startup sequence
    pub async fn init(&self) -> Result<()> {
        self.store.init().await
    }

    /// Whether the store connection is established
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Import all non-disabled configuration entities, grouped by class
    pub async fn import_all(&self) -> ConfigObjects {
        self.sync.import_all().await
    }

    /// Export configuration entities back into the store, best-effort
    pub async fn export_all(&self, data: &ConfigObjects) -> bool {
        self.sync.export_all(data).await
    }

    /// A user's preference value, or the whole record when `key` is `None`
    pub async fn get_preference(&self, user: &str, key: Option<&str>) -> Result<Option<Bson>> {
        let scope = PreferenceScope::for_user(user);
        match key {
            Some(key) => self.prefs.get(&scope, key).await,
            None => Ok(self
                .prefs
                .get_record(&scope)
                .await?
                .map(Bson::Document)),
        }
    }

    /// Store one preference value for a user
    pub async fn set_preference(
        &self,
        user: &str,
        key: &str,
        value: impl Into<Bson>,
    ) -> Result<()> {
        self.prefs
            .set(&PreferenceScope::for_user(user), key, value)
            .await
    }

    /// A value from the shared, cross-user preference record
    pub async fn get_common_preference(&self, key: &str) -> Result<Option<Bson>> {
        self.prefs.get(&PreferenceScope::Global, key).await
    }

    /// Store one value in the shared, cross-user preference record
    pub async fn set_common_preference(&self, key: &str, value: impl Into<Bson>) -> Result<()> {
        self.prefs.set(&PreferenceScope::Global, key, value).await
    }

    /// Availability snapshots, filtered by `host/service` selector and
    /// inclusive day-timestamp range
    pub async fn get_availability(
        &self,
        name: Option<&str>,
        range_start: Option<i64>,
        range_end: Option<i64>,
    ) -> Vec<Document> {
        self.history
            .get_availability(name, range_start, range_end)
            .await
    }

    /// Normalized event-log records, filtered by `host/service` selector
    /// and event-type set
    pub async fn get_logs(&self, name: Option<&str>, types: &[String]) -> Vec<LogEvent> {
        self.history.get_logs(name, types).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;

    fn test_bridge() -> Bridge {
        let config: BridgeConfig = toml::from_str(
            r#"
[mongodb]
uri = "mongodb://localhost:27017"
"#,
        )
        .unwrap();
        Bridge::new(&config)
    }

    #[tokio::test]
    async fn test_unconnected_bridge_degrades() {
        let bridge = test_bridge();
        assert!(!bridge.is_ready());

        assert!(bridge.import_all().await.is_empty());
        assert!(!bridge.export_all(&ConfigObjects::new()).await);
        assert!(bridge.get_preference("admin", Some("theme")).await.unwrap().is_none());
        assert!(bridge.get_common_preference("theme").await.unwrap().is_none());
        assert!(bridge.get_availability(None, None, None).await.is_empty());
        assert!(bridge.get_logs(None, &[]).await.is_empty());
    }
}
