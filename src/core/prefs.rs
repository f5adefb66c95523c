//! Per-user and global UI preference storage
//!
//! Preferences live in a single collection, one record per scope: the
//! record's identity is either a user's name or the fixed global sentinel.
//! Records are created lazily on first write and never deleted here.

use std::sync::Arc;

use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;

use crate::adapters::mongodb::MongoStore;
use crate::domain::{BridgeError, Result};

/// Scope key of the shared, cross-user preference record
pub const GLOBAL_SCOPE: &str = "shinken-global";

/// Identifies which preference record an operation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceScope {
    /// The shared record every user sees
    Global,
    /// A specific user's record, keyed by the user's name
    User(String),
}

impl PreferenceScope {
    /// Scope for a named user
    pub fn for_user(name: impl Into<String>) -> Self {
        PreferenceScope::User(name.into())
    }

    /// Storage key for this scope
    pub fn key(&self) -> &str {
        match self {
            PreferenceScope::Global => GLOBAL_SCOPE,
            PreferenceScope::User(name) => name,
        }
    }
}

/// Preference record access over the shared store handle
pub struct PreferenceStore {
    store: Arc<MongoStore>,
}

impl PreferenceStore {
    /// Create a preference store over the shared store handle
    pub fn new(store: Arc<MongoStore>) -> Self {
        Self { store }
    }

    fn collection(&self) -> Result<Collection<Document>> {
        self.store
            .collection(&self.store.config().preferences_collection)
    }

    /// Fetch the whole preference record for a scope
    ///
    /// Returns `None` when no record exists for the scope, or when the
    /// connection is not ready (logged).
    pub async fn get_record(&self, scope: &PreferenceScope) -> Result<Option<Document>> {
        if !self.store.is_ready() {
            tracing::error!("cannot read preferences, store connection not initialized");
            return Ok(None);
        }

        let record = self
            .collection()?
            .find_one(doc! { "_id": scope.key() })
            .await?;
        Ok(record)
    }

    /// Fetch a single preference value
    ///
    /// Returns `None` when no record exists for the scope or the key is
    /// absent from it.
    pub async fn get(&self, scope: &PreferenceScope, key: &str) -> Result<Option<Bson>> {
        Ok(self
            .get_record(scope)
            .await?
            .and_then(|mut record| record.remove(key)))
    }

    /// Store one preference value, creating the scope's record when absent
    ///
    /// The store's `$set`-with-upsert is atomic at the field level, so
    /// create-if-absent and update-if-present are a single operation here;
    /// other keys in an existing record are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotInitialized`] when the connection is not
    /// ready, or [`BridgeError::Query`] when the write fails.
    pub async fn set(
        &self,
        scope: &PreferenceScope,
        key: &str,
        value: impl Into<Bson>,
    ) -> Result<()> {
        if !self.store.is_ready() {
            tracing::error!("cannot save preference, store connection not initialized");
            return Err(BridgeError::NotInitialized);
        }

        let mut fields = Document::new();
        fields.insert(key, value.into());

        tracing::debug!(scope = scope.key(), key = key, "saving preference");
        self.collection()?
            .update_one(doc! { "_id": scope.key() }, doc! { "$set": fields })
            .upsert(true)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_key_is_sentinel() {
        assert_eq!(PreferenceScope::Global.key(), "shinken-global");
    }

    #[test]
    fn test_user_scope_key_is_user_name() {
        let scope = PreferenceScope::for_user("admin");
        assert_eq!(scope.key(), "admin");
        assert_eq!(scope, PreferenceScope::User("admin".to_string()));
    }

    #[tokio::test]
    async fn test_reads_degrade_and_writes_fail_when_not_ready() {
        let config = toml::from_str(r#"uri = "mongodb://localhost:27017""#).unwrap();
        let prefs = PreferenceStore::new(Arc::new(MongoStore::new(config)));

        let scope = PreferenceScope::Global;
        assert!(prefs.get_record(&scope).await.unwrap().is_none());
        assert!(prefs.get(&scope, "theme").await.unwrap().is_none());
        assert!(matches!(
            prefs.set(&scope, "theme", "dark").await,
            Err(BridgeError::NotInitialized)
        ));
    }
}
