//! MongoDB store connection management
//!
//! One logical connection is established at startup and shared by every
//! component for the life of the process. The driver manages its own
//! connection pooling, so the handle needs no external locking; the only
//! state here is the one-time initialization gate.

use std::sync::OnceLock;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use secrecy::ExposeSecret;

use crate::config::MongoConfig;
use crate::domain::{BridgeError, Result};

/// Shared handle to the MongoDB store
///
/// Construction is cheap and infallible; [`MongoStore::init`] opens the
/// connection and must complete before any other operation. Components
/// receive the store at construction and consult [`MongoStore::is_ready`]
/// (directly or via [`MongoStore::database`]) before every access.
pub struct MongoStore {
    config: MongoConfig,
    state: OnceLock<Connected>,
}

struct Connected {
    db: Database,
}

impl MongoStore {
    /// Create an unconnected store handle
    pub fn new(config: MongoConfig) -> Self {
        Self {
            config,
            state: OnceLock::new(),
        }
    }

    /// Open the connection, authenticate, and verify reachability
    ///
    /// Initialization runs once; a second call is a no-op with a warning.
    /// Authentication is attempted only when both username and password are
    /// configured. There is no automatic reconnect: a connection dropped
    /// later surfaces as failures on subsequent operations.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Connection`] on URI, network, or
    /// authentication failure. Fatal to the host's startup sequence.
    pub async fn init(&self) -> Result<()> {
        if self.is_ready() {
            tracing::warn!("MongoDB connection already initialized, ignoring");
            return Ok(());
        }

        tracing::info!(
            uri = %self.config.uri,
            database = %self.config.database,
            "Opening MongoDB connection"
        );

        let mut options = ClientOptions::parse(&self.config.uri).await.map_err(|e| {
            BridgeError::Connection(format!("Invalid MongoDB URI {}: {e}", self.config.uri))
        })?;

        if let Some(replica_set) = &self.config.replica_set {
            options.repl_set_name = Some(replica_set.clone());
        }

        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.expose_secret().to_string())
                    .build(),
            );
        }

        let client = Client::with_options(options).map_err(|e| {
            BridgeError::Connection(format!("Failed to create MongoDB client: {e}"))
        })?;

        let db = client.database(&self.config.database);

        // First round-trip; network and authentication failures surface here.
        db.run_command(doc! { "ping": 1 }).await.map_err(|e| {
            BridgeError::Connection(format!(
                "MongoDB ping failed for {}: {e}",
                self.config.uri
            ))
        })?;

        if self.state.set(Connected { db }).is_err() {
            tracing::warn!("MongoDB connection initialized concurrently, keeping first");
        } else {
            tracing::info!(database = %self.config.database, "MongoDB connection OK");
        }

        Ok(())
    }

    /// Whether the one-time initialization has completed successfully
    pub fn is_ready(&self) -> bool {
        self.state.get().is_some()
    }

    /// Handle to the target database
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotInitialized`] before [`MongoStore::init`]
    /// has completed.
    pub fn database(&self) -> Result<&Database> {
        self.state
            .get()
            .map(|connected| &connected.db)
            .ok_or(BridgeError::NotInitialized)
    }

    /// Open-document collection handle by name
    pub fn collection(&self, name: &str) -> Result<Collection<Document>> {
        Ok(self.database()?.collection::<Document>(name))
    }

    /// Provenance string stamped on imported entity records
    pub fn provenance(&self) -> String {
        format!("mongodb:{}:{}", self.config.uri, self.config.database)
    }

    /// The configuration this store was built from
    pub fn config(&self) -> &MongoConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MongoConfig {
        toml::from_str(r#"uri = "mongodb://mongo1.example.com:27017""#).unwrap()
    }

    #[test]
    fn test_store_starts_unready() {
        let store = MongoStore::new(test_config());
        assert!(!store.is_ready());
        assert!(matches!(
            store.database(),
            Err(BridgeError::NotInitialized)
        ));
        assert!(matches!(
            store.collection("hosts"),
            Err(BridgeError::NotInitialized)
        ));
    }

    #[test]
    fn test_provenance_format() {
        let store = MongoStore::new(test_config());
        assert_eq!(
            store.provenance(),
            "mongodb:mongodb://mongo1.example.com:27017:shinken"
        );
    }
}
