//! Historical query engine over availability snapshots and event logs
//!
//! Both collections share one query shape: a conjunction of optional
//! predicates, a fixed sort, and a row-count ceiling. Query faults never
//! reach the caller; they are logged and whatever rows were already
//! collected are returned. The flip side, documented and kept: a caller
//! cannot tell a failed query from an empty result.

use std::sync::Arc;

use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use regex::Regex;

use crate::adapters::mongodb::MongoStore;
use crate::domain::entity::LogEvent;
use crate::domain::Result;

/// Filtered, sorted, capped reads over the two historical collections
pub struct HistoryEngine {
    store: Arc<MongoStore>,
    message_prefix: Regex,
}

impl HistoryEngine {
    /// Create a history engine over the shared store handle
    pub fn new(store: Arc<MongoStore>) -> Self {
        // Raw log lines may open with a bracketed numeric marker,
        // e.g. "[1234567890] SERVICE ALERT: ...".
        let message_prefix = Regex::new(r"^\[(\d+)\] (.*)$").unwrap();
        Self {
            store,
            message_prefix,
        }
    }

    /// Availability snapshots for an optional `host/service` selector and
    /// inclusive day-timestamp range
    ///
    /// Rows come back day-descending, then hostname/service ascending,
    /// capped at the configured maximum, with the storage identity field
    /// stripped. Never fails: on error the rows collected so far are
    /// returned.
    pub async fn get_availability(
        &self,
        name: Option<&str>,
        range_start: Option<i64>,
        range_end: Option<i64>,
    ) -> Vec<Document> {
        let mut records = Vec::new();

        if !self.store.is_ready() {
            tracing::error!("cannot query availability, store connection not initialized");
            return records;
        }

        let filter = availability_filter(name, range_start, range_end);
        tracing::debug!(name = ?name, filter = ?filter, "fetching availability records");

        if let Err(e) = self.fetch_availability(filter, &mut records).await {
            tracing::error!(error = %e, "availability query failed");
        }

        tracing::debug!(count = records.len(), "availability records fetched");
        records
    }

    async fn fetch_availability(
        &self,
        filter: Option<Document>,
        records: &mut Vec<Document>,
    ) -> Result<()> {
        let collection = self
            .store
            .collection(&self.store.config().availability_collection)?;

        let mut cursor = collection
            .find(filter.unwrap_or_default())
            .sort(doc! { "day": -1, "hostname": 1, "service": 1 })
            .limit(self.store.config().max_records)
            .await?;

        while let Some(mut record) = cursor.try_next().await? {
            record.remove("_id");
            records.push(record);
        }

        Ok(())
    }

    /// Normalized event-log records for an optional `host/service` selector
    /// and event-type inclusion set
    ///
    /// Rows come back event-time descending, capped at the configured
    /// maximum, reshaped to [`LogEvent`]. Same fault-swallowing policy as
    /// availability queries.
    pub async fn get_logs(&self, name: Option<&str>, types: &[String]) -> Vec<LogEvent> {
        let mut records = Vec::new();

        if !self.store.is_ready() {
            tracing::error!("cannot query logs, store connection not initialized");
            return records;
        }

        let filter = logs_filter(name, types);
        tracing::debug!(name = ?name, filter = ?filter, "fetching log records");

        if let Err(e) = self.fetch_logs(filter, &mut records).await {
            tracing::error!(error = %e, "log query failed");
        }

        tracing::debug!(count = records.len(), "log records fetched");
        records
    }

    async fn fetch_logs(
        &self,
        filter: Option<Document>,
        records: &mut Vec<LogEvent>,
    ) -> Result<()> {
        let collection = self.store.collection(&self.store.config().logs_collection)?;

        // Event time is the sort key for the unfiltered path too; the
        // legacy day-field sort there was an accident of the old schema.
        let mut cursor = collection
            .find(filter.unwrap_or_default())
            .sort(doc! { "time": -1 })
            .limit(self.store.config().max_records)
            .await?;

        while let Some(record) = cursor.try_next().await? {
            records.push(self.normalize_log(&record));
        }

        Ok(())
    }

    /// Reshape a stored log row into the stable output schema
    fn normalize_log(&self, record: &Document) -> LogEvent {
        let message = record.get_str("message").unwrap_or_default();

        LogEvent {
            timestamp: coerce_i64(record.get("time")),
            host: record.get_str("host_name").unwrap_or_default().to_string(),
            service: record
                .get_str("service_description")
                .unwrap_or_default()
                .to_string(),
            message: self.strip_message_prefix(message).to_string(),
        }
    }

    /// Drop a leading `[<digits>] ` marker from a raw log line, if present
    /// and followed by a non-empty body
    fn strip_message_prefix<'a>(&self, message: &'a str) -> &'a str {
        match self
            .message_prefix
            .captures(message)
            .and_then(|caps| caps.get(2))
        {
            Some(body) if !body.as_str().is_empty() => body.as_str(),
            _ => message,
        }
    }
}

/// Split a `host/service` selector: the part before the slash selects the
/// host, the part after selects the service
fn split_name(name: Option<&str>) -> (Option<&str>, Option<&str>) {
    match name {
        None => (None, None),
        Some(name) => match name.split_once('/') {
            Some((host, service)) => (Some(host), Some(service)),
            None => (Some(name), None),
        },
    }
}

/// Compose the predicate conjunction for an availability query
///
/// Single-value filters are one-element `$in` sets, same shape as
/// multi-value filters.
fn availability_filter(
    name: Option<&str>,
    range_start: Option<i64>,
    range_end: Option<i64>,
) -> Option<Document> {
    let (hostname, service) = split_name(name);
    let mut clauses = Vec::new();

    if let Some(hostname) = hostname {
        clauses.push(doc! { "hostname": { "$in": [hostname] } });
    }
    if let Some(service) = service {
        clauses.push(doc! { "service": { "$in": [service] } });
    }
    if let Some(start) = range_start {
        clauses.push(doc! { "day_ts": { "$gte": start } });
    }
    if let Some(end) = range_end {
        clauses.push(doc! { "day_ts": { "$lte": end } });
    }

    conjunction(clauses)
}

/// Compose the predicate conjunction for a log query
///
/// An empty type list, or the single-empty-string sentinel the UI sends
/// for "all types", adds no predicate.
fn logs_filter(name: Option<&str>, types: &[String]) -> Option<Document> {
    let (hostname, service) = split_name(name);
    let mut clauses = Vec::new();

    if let Some(hostname) = hostname {
        clauses.push(doc! { "host_name": { "$in": [hostname] } });
    }
    if let Some(service) = service {
        clauses.push(doc! { "service_description": { "$in": [service] } });
    }
    if !types.is_empty() && !(types.len() == 1 && types[0].is_empty()) {
        clauses.push(doc! { "type": { "$in": types.to_vec() } });
    }

    conjunction(clauses)
}

/// `$and` of the clauses, or `None` for an unfiltered query
fn conjunction(clauses: Vec<Document>) -> Option<Document> {
    if clauses.is_empty() {
        None
    } else {
        Some(doc! { "$and": clauses })
    }
}

/// Stored timestamps may be int or double depending on who wrote them
fn coerce_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        Some(Bson::String(s)) => s.parse().unwrap_or_default(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name(None), (None, None));
        assert_eq!(split_name(Some("host1")), (Some("host1"), None));
        assert_eq!(
            split_name(Some("host1/svc1")),
            (Some("host1"), Some("svc1"))
        );
    }

    #[test]
    fn test_availability_filter_full() {
        let filter = availability_filter(Some("host1/svc1"), Some(100), Some(200)).unwrap();
        let clauses = filter.get_array("$and").unwrap();
        assert_eq!(clauses.len(), 4);
        assert_eq!(
            clauses[0].as_document().unwrap(),
            &doc! { "hostname": { "$in": ["host1"] } }
        );
        assert_eq!(
            clauses[1].as_document().unwrap(),
            &doc! { "service": { "$in": ["svc1"] } }
        );
        assert_eq!(
            clauses[2].as_document().unwrap(),
            &doc! { "day_ts": { "$gte": 100i64 } }
        );
        assert_eq!(
            clauses[3].as_document().unwrap(),
            &doc! { "day_ts": { "$lte": 200i64 } }
        );
    }

    #[test]
    fn test_availability_filter_host_only() {
        let filter = availability_filter(Some("host1"), None, None).unwrap();
        let clauses = filter.get_array("$and").unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].as_document().unwrap(),
            &doc! { "hostname": { "$in": ["host1"] } }
        );
    }

    #[test]
    fn test_availability_filter_empty_means_unfiltered() {
        assert!(availability_filter(None, None, None).is_none());
    }

    #[test]
    fn test_logs_filter_uses_log_field_names() {
        let filter = logs_filter(Some("host1/svc1"), &[]).unwrap();
        let clauses = filter.get_array("$and").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(
            clauses[0].as_document().unwrap(),
            &doc! { "host_name": { "$in": ["host1"] } }
        );
        assert_eq!(
            clauses[1].as_document().unwrap(),
            &doc! { "service_description": { "$in": ["svc1"] } }
        );
    }

    #[test]
    fn test_logs_filter_type_sentinel() {
        // Empty list and the single-empty-string sentinel mean "all types".
        assert!(logs_filter(None, &[]).is_none());
        assert!(logs_filter(None, &[String::new()]).is_none());

        let types = vec!["ALERT".to_string(), "NOTIFICATION".to_string()];
        let filter = logs_filter(None, &types).unwrap();
        let clauses = filter.get_array("$and").unwrap();
        assert_eq!(
            clauses[0].as_document().unwrap(),
            &doc! { "type": { "$in": ["ALERT", "NOTIFICATION"] } }
        );
    }

    #[test]
    fn test_coerce_i64() {
        assert_eq!(coerce_i64(Some(&Bson::Int32(42))), 42);
        assert_eq!(coerce_i64(Some(&Bson::Int64(1700000000))), 1700000000);
        assert_eq!(coerce_i64(Some(&Bson::Double(1700000000.7))), 1700000000);
        assert_eq!(coerce_i64(Some(&Bson::String("123".to_string()))), 123);
        assert_eq!(coerce_i64(None), 0);
    }

    fn engine() -> HistoryEngine {
        let config = toml::from_str(r#"uri = "mongodb://localhost:27017""#).unwrap();
        HistoryEngine::new(Arc::new(MongoStore::new(config)))
    }

    #[test]
    fn test_strip_message_prefix() {
        let engine = engine();
        assert_eq!(engine.strip_message_prefix("[123] disk full"), "disk full");
        assert_eq!(engine.strip_message_prefix("disk full"), "disk full");
        // No digits, no strip.
        assert_eq!(engine.strip_message_prefix("[abc] disk full"), "[abc] disk full");
        // Empty body keeps the raw line.
        assert_eq!(engine.strip_message_prefix("[123] "), "[123] ");
    }

    #[test]
    fn test_normalize_log_shape() {
        let engine = engine();
        let record = doc! {
            "time": 1700000000i64,
            "host_name": "host1",
            "service_description": "svc1",
            "message": "[1700000000] SERVICE ALERT: host1;svc1;CRITICAL",
            "type": "SERVICE ALERT",
        };

        let event = engine.normalize_log(&record);
        assert_eq!(
            event,
            LogEvent {
                timestamp: 1700000000,
                host: "host1".to_string(),
                service: "svc1".to_string(),
                message: "SERVICE ALERT: host1;svc1;CRITICAL".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_log_missing_fields() {
        let engine = engine();
        let event = engine.normalize_log(&doc! { "message": "orphan line" });
        assert_eq!(event.timestamp, 0);
        assert_eq!(event.host, "");
        assert_eq!(event.service, "");
        assert_eq!(event.message, "orphan line");
    }

    #[tokio::test]
    async fn test_queries_degrade_when_not_ready() {
        let engine = engine();
        assert!(engine.get_availability(Some("host1"), None, None).await.is_empty());
        assert!(engine.get_logs(None, &[]).await.is_empty());
    }
}
