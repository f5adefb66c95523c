//! Configuration entity classes and the record containers exchanged with the
//! host application.
//!
//! Entity records are open documents: the monitoring configuration schema is
//! user-extensible (custom fields, macros), so records stay schema-flexible
//! mappings rather than fixed structs. The entity class tag is the closed
//! part of the model.

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::BridgeError;

/// The five configuration entity classes synchronized with the store.
///
/// The variant's wire name doubles as the store collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClass {
    Hosts,
    Services,
    Contacts,
    Commands,
    Timeperiods,
}

impl EntityClass {
    /// Every entity class, in import order.
    pub const ALL: [EntityClass; 5] = [
        EntityClass::Hosts,
        EntityClass::Services,
        EntityClass::Contacts,
        EntityClass::Commands,
        EntityClass::Timeperiods,
    ];

    /// Wire name, also the store collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityClass::Hosts => "hosts",
            EntityClass::Services => "services",
            EntityClass::Contacts => "contacts",
            EntityClass::Commands => "commands",
            EntityClass::Timeperiods => "timeperiods",
        }
    }

    /// The canonical name field for classes that have a natural key.
    ///
    /// Services have none: their uniqueness depends on the host/description
    /// pair, so exported service records get random identifiers.
    pub fn name_field(&self) -> Option<&'static str> {
        match self {
            EntityClass::Hosts => Some("host_name"),
            EntityClass::Commands => Some("command_name"),
            EntityClass::Timeperiods => Some("timeperiod_name"),
            EntityClass::Contacts => Some("contact_name"),
            EntityClass::Services => None,
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityClass {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hosts" => Ok(EntityClass::Hosts),
            "services" => Ok(EntityClass::Services),
            "contacts" => Ok(EntityClass::Contacts),
            "commands" => Ok(EntityClass::Commands),
            "timeperiods" => Ok(EntityClass::Timeperiods),
            other => Err(BridgeError::UnknownEntityClass(other.to_string())),
        }
    }
}

/// Entity records grouped by class, as exchanged with the host application
/// on bulk import and export.
pub type ConfigObjects = HashMap<EntityClass, Vec<Document>>;

/// Normalized event-log row returned by the historical query engine.
///
/// The stored `message` may carry a `[<digits>] ` marker; it is stripped
/// before the record reaches this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Unix timestamp of the event
    pub timestamp: i64,

    /// Host the event belongs to
    pub host: String,

    /// Service description, empty for host-level events
    pub service: String,

    /// Message body with any bracket prefix removed
    pub message: String,
}
