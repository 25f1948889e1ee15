//! Record types.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a record.
///
/// Record IDs are UUIDv4s that are:
/// - Assigned by the store on insert
/// - Immutable once assigned
/// - Never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record ID from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored record: a named value with a store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Record name, unique across the store.
    pub name: String,
    /// The record's value, stored as given.
    pub value: Value,
}

/// A record as submitted by a caller, before the store assigns an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Record name.
    pub name: String,
    /// Record value.
    pub value: Value,
}

impl NewRecord {
    /// Creates a new record draft.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Promotes the draft to a stored record with a fresh ID.
    #[must_use]
    pub(crate) fn assign_id(self) -> Record {
        Record {
            id: RecordId::new(),
            name: self.name,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_displays_as_uuid() {
        let uuid = Uuid::new_v4();
        let id = RecordId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn assign_id_keeps_fields() {
        let record = NewRecord::new("rent", Value::Numeric(1200.0)).assign_id();
        assert_eq!(record.name, "rent");
        assert_eq!(record.value, Value::Numeric(1200.0));
    }

    #[test]
    fn record_serializes_id_as_string() {
        let record = NewRecord::new("rent", Value::Numeric(1200.0)).assign_id();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], serde_json::json!(record.id.to_string()));
        assert_eq!(json["name"], serde_json::json!("rent"));
    }
}
