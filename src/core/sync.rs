//! Configuration sync engine: bulk import and export of entity records
//!
//! Import reads every non-disabled record of each entity class; export
//! pushes records back, deriving a stable identifier per record so repeated
//! exports upsert in place. Both directions are best-effort: one bad record
//! or one failing class never aborts the rest of the bulk operation.

use std::sync::Arc;

use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};

use crate::adapters::mongodb::MongoStore;
use crate::domain::entity::{ConfigObjects, EntityClass};
use crate::domain::ids::assign_uid;
use crate::domain::Result;

/// Field marking disabled records in entity collections
const STATE_FIELD: &str = "_state";
/// Storage identity field managed by this engine
const ID_FIELD: &str = "_id";
/// Provenance field stamped on imported records
const IMPORTED_FROM_FIELD: &str = "imported_from";

/// Bulk import/export of configuration entities
pub struct ConfigSync {
    store: Arc<MongoStore>,
}

/// Outcome of a bulk export, accumulated per record
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Number of records successfully upserted
    pub success_count: usize,

    /// Number of records that failed to upsert
    pub failure_count: usize,

    /// Details of failed records
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// True when every record persisted
    pub fn is_complete(&self) -> bool {
        self.failure_count == 0
    }
}

/// Details of a failed export record
#[derive(Debug, Clone)]
pub struct ExportFailure {
    /// Entity class of the failed record
    pub class: EntityClass,

    /// Identifier the record was assigned
    pub uid: String,

    /// Error message
    pub error: String,
}

impl ConfigSync {
    /// Create a sync engine over the shared store handle
    pub fn new(store: Arc<MongoStore>) -> Self {
        Self { store }
    }

    /// Import every non-disabled record of each entity class
    ///
    /// Each imported record has its storage identity field removed and a
    /// provenance field added. Import is unbounded: no row ceiling applies.
    ///
    /// Returns an empty mapping when the connection is not ready, and an
    /// empty sequence for any class whose query fails; neither aborts the
    /// remaining classes.
    pub async fn import_all(&self) -> ConfigObjects {
        let mut objects = ConfigObjects::new();

        if !self.store.is_ready() {
            tracing::error!("cannot import configuration, store connection not initialized");
            return objects;
        }

        let provenance = self.store.provenance();
        for class in EntityClass::ALL {
            let mut records = Vec::new();
            if let Err(e) = self.import_class(class, &provenance, &mut records).await {
                tracing::error!(class = %class, error = %e, "failed to import entity class");
            }
            tracing::debug!(class = %class, count = records.len(), "imported entity records");
            objects.insert(class, records);
        }

        objects
    }

    async fn import_class(
        &self,
        class: EntityClass,
        provenance: &str,
        records: &mut Vec<Document>,
    ) -> Result<()> {
        let collection = self.store.collection(class.as_str())?;
        let mut cursor = collection
            .find(doc! { STATE_FIELD: { "$ne": "disabled" } })
            .await?;

        while let Some(record) = cursor.try_next().await? {
            records.push(prepare_import(record, provenance));
        }

        Ok(())
    }

    /// Export all records, assigning stable identifiers
    ///
    /// Best-effort: a failing record is logged and counted, and processing
    /// continues with the remaining records and classes. No rollback.
    ///
    /// Returns `true` only when the connection was ready and every record
    /// persisted.
    pub async fn export_all(&self, data: &ConfigObjects) -> bool {
        if !self.store.is_ready() {
            tracing::error!("cannot export configuration, store connection not initialized");
            return false;
        }

        let mut report = ExportReport::default();
        for (class, records) in data {
            tracing::info!(class = %class, count = records.len(), "exporting entity records");
            for record in records {
                let (uid, prepared) = prepare_export(class.as_str(), record);
                match self.upsert_record(*class, &uid, prepared).await {
                    Ok(()) => report.success_count += 1,
                    Err(e) => {
                        tracing::error!(
                            class = %class,
                            uid = %uid,
                            error = %e,
                            "failed to export record"
                        );
                        report.failure_count += 1;
                        report.failures.push(ExportFailure {
                            class: *class,
                            uid,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            "configuration export finished"
        );
        report.is_complete()
    }

    async fn upsert_record(&self, class: EntityClass, uid: &str, record: Document) -> Result<()> {
        let collection = self.store.collection(class.as_str())?;
        collection
            .replace_one(doc! { ID_FIELD: uid }, record)
            .upsert(true)
            .await?;
        Ok(())
    }
}

/// Strip the storage identity field and stamp provenance on an imported record
pub fn prepare_import(mut record: Document, provenance: &str) -> Document {
    record.remove(ID_FIELD);
    record.insert(IMPORTED_FROM_FIELD, provenance);
    record
}

/// Derive the stable identifier and attach it as the storage identity field
pub fn prepare_export(class: &str, record: &Document) -> (String, Document) {
    let uid = assign_uid(class, record);
    let mut prepared = record.clone();
    prepared.insert(ID_FIELD, Bson::String(uid.clone()));
    (uid, prepared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_import_strips_identity_and_stamps_provenance() {
        let record = doc! { "_id": "web1", "host_name": "web1", "address": "10.0.0.1" };
        let imported = prepare_import(record, "mongodb:mongodb://localhost:27017:shinken");

        assert!(!imported.contains_key("_id"));
        assert_eq!(imported.get_str("host_name").unwrap(), "web1");
        assert_eq!(
            imported.get_str("imported_from").unwrap(),
            "mongodb:mongodb://localhost:27017:shinken"
        );
    }

    #[test]
    fn test_prepare_export_attaches_identity() {
        let record = doc! { "host_name": "web1", "address": "10.0.0.1" };
        let (uid, prepared) = prepare_export("hosts", &record);

        assert_eq!(uid, "web1");
        assert_eq!(prepared.get_str("_id").unwrap(), "web1");
        // Original record untouched.
        assert!(!record.contains_key("_id"));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let stored = doc! { "_id": "web1", "host_name": "web1", "address": "10.0.0.1" };
        let imported = prepare_import(stored, "mongodb:uri:shinken");
        let (uid, exported) = prepare_export("hosts", &imported);

        // Same identifier as before the import stripped it.
        assert_eq!(uid, "web1");
        assert_eq!(exported.get_str("_id").unwrap(), "web1");
        assert_eq!(exported.get_str("address").unwrap(), "10.0.0.1");
    }

    #[tokio::test]
    async fn test_bulk_operations_degrade_when_not_ready() {
        let config = toml::from_str(r#"uri = "mongodb://localhost:27017""#).unwrap();
        let sync = ConfigSync::new(Arc::new(MongoStore::new(config)));

        assert!(sync.import_all().await.is_empty());
        assert!(!sync.export_all(&ConfigObjects::new()).await);
    }

    #[test]
    fn test_export_report_aggregate_flag() {
        let mut report = ExportReport::default();
        assert!(report.is_complete());

        report.success_count = 4;
        report.failure_count = 1;
        report.failures.push(ExportFailure {
            class: EntityClass::Hosts,
            uid: "web1".to_string(),
            error: "boom".to_string(),
        });
        assert!(!report.is_complete());
    }
}
