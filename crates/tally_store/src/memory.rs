//! In-memory record store.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::record::{NewRecord, Record};
use crate::store::RecordStore;
use parking_lot::RwLock;

/// An in-memory record store.
///
/// Records live only as long as the process. Suitable for:
/// - Unit and integration tests
/// - Running the service without a data file
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use tally_store::{MemoryStore, NewRecord, RecordStore, Value};
///
/// let store = MemoryStore::new();
/// store.insert(NewRecord::new("rent", Value::Numeric(1200.0))).unwrap();
/// assert_eq!(store.list_all().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: StoreConfig,
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new empty in-memory store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Clears all records (for testing).
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl RecordStore for MemoryStore {
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Record>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.name == name)
            .cloned())
    }

    fn insert(&self, record: NewRecord) -> StoreResult<Record> {
        let mut records = self.records.write();

        if self.config.enforce_unique_names
            && records.iter().any(|existing| existing.name == record.name)
        {
            return Err(StoreError::DuplicateName { name: record.name });
        }

        let stored = record.assign_id();
        records.push(stored.clone());
        Ok(stored)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self.records.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn insert_and_find() {
        let store = MemoryStore::new();
        let saved = store
            .insert(NewRecord::new("rent", Value::Numeric(1200.0)))
            .unwrap();

        let found = store.find_by_name("rent").unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn find_is_exact_match() {
        let store = MemoryStore::new();
        store
            .insert(NewRecord::new("Rent", Value::Numeric(1.0)))
            .unwrap();

        assert!(store.find_by_name("rent").unwrap().is_none());
        assert!(store.find_by_name("Rent").unwrap().is_some());
    }

    #[test]
    fn unique_names_enforced_by_default() {
        let store = MemoryStore::new();
        store
            .insert(NewRecord::new("rent", Value::Numeric(1.0)))
            .unwrap();

        let result = store.insert(NewRecord::new("rent", Value::Numeric(2.0)));
        assert!(matches!(result, Err(StoreError::DuplicateName { .. })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unique_names_can_be_disabled() {
        let store =
            MemoryStore::with_config(StoreConfig::new().with_enforce_unique_names(false));
        store
            .insert(NewRecord::new("rent", Value::Numeric(1.0)))
            .unwrap();
        store
            .insert(NewRecord::new("rent", Value::Numeric(2.0)))
            .unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .insert(NewRecord::new(name, Value::Numeric(1.0)))
                .unwrap();
        }

        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|record| record.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn list_returns_clones() {
        let store = MemoryStore::new();
        store
            .insert(NewRecord::new("rent", Value::Numeric(1.0)))
            .unwrap();

        let mut listed = store.list_all().unwrap();
        listed[0].name = "mutated".into();

        assert!(store.find_by_name("rent").unwrap().is_some());
    }
}
