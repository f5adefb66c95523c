//! Stable entity identifier derivation used during export.
//!
//! Repeated exports of an unchanged named entity must produce the same
//! identifier so that upserts replace instead of duplicating. Identifiers
//! only need to be unique within one entity class: each class lives in its
//! own collection, so a host and a command may share an identifier.

use mongodb::bson::{Bson, Document};
use uuid::Uuid;

use crate::domain::entity::EntityClass;

/// Derive the storage identifier for an entity record of the given class.
///
/// Rules, in order:
/// 1. Template records get `tpl-<name>`, or `tpl-<random>` when unnamed.
/// 2. Classes with a natural key use that field's value when non-empty.
/// 3. Services have no natural key and always get a random identifier.
/// 4. An unrecognized class is logged and falls back to a random identifier
///    rather than aborting the export.
pub fn assign_uid(class: &str, record: &Document) -> String {
    if is_template(record) {
        return match non_empty_str(record, "name") {
            Some(name) => format!("tpl-{name}"),
            None => format!("tpl-{}", random_uid()),
        };
    }

    match class.parse::<EntityClass>() {
        Ok(EntityClass::Services) => random_uid(),
        Ok(class) => class
            .name_field()
            .and_then(|field| non_empty_str(record, field))
            .map(str::to_owned)
            .unwrap_or_else(random_uid),
        Err(_) => {
            tracing::warn!(class = class, "unknown entity class, assigning random identifier");
            random_uid()
        }
    }
}

/// A record is a template when its `register` field is false-like.
///
/// The configuration format stores flags as the strings "0"/"1", but
/// records that already round-tripped through the store may carry native
/// booleans or numbers. A missing field means a concrete instance.
fn is_template(record: &Document) -> bool {
    match record.get("register") {
        Some(Bson::String(s)) => s == "0",
        Some(Bson::Boolean(b)) => !b,
        Some(Bson::Int32(n)) => *n == 0,
        Some(Bson::Int64(n)) => *n == 0,
        Some(Bson::Double(n)) => *n == 0.0,
        _ => false,
    }
}

fn non_empty_str<'a>(record: &'a Document, field: &str) -> Option<&'a str> {
    record.get_str(field).ok().filter(|s| !s.is_empty())
}

/// Decimal rendering of a random 128-bit identifier.
fn random_uid() -> String {
    Uuid::new_v4().as_u128().to_string()
}
