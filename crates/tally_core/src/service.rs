//! Entry service for record creation and retrieval.

use crate::error::EntryError;
use std::sync::Arc;
use tally_store::{NewRecord, Record, RecordStore, StoreError, Value};

/// Business rules around record creation and retrieval.
///
/// The service is constructed with an explicit store handle rather than
/// reaching for ambient connection state; the same service works against
/// any [`RecordStore`] implementation.
///
/// # Duplicate detection
///
/// `save_data` checks for an existing name before inserting. The check and
/// the insert are not one atomic operation: under concurrent saves of the
/// same name both checks can pass, and whether the second insert then fails
/// depends on the store's
/// [`enforce_unique_names`](tally_store::StoreConfig::enforce_unique_names)
/// contract.
pub struct EntryService {
    store: Arc<dyn RecordStore>,
}

impl EntryService {
    /// Creates a new entry service over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates and persists a new record.
    ///
    /// # Errors
    ///
    /// - [`EntryError::MissingField`] if `name` is empty or `value` is
    ///   absent; the store is not touched
    /// - [`EntryError::Duplicate`] if a record with this name exists,
    ///   whether found by the pre-insert check or rejected by the store
    ///   itself under a racing save
    /// - [`EntryError::Store`] if the storage layer faults
    pub fn save_data(&self, name: &str, value: Value) -> Result<Record, EntryError> {
        if name.is_empty() || value.is_missing() {
            return Err(EntryError::MissingField);
        }

        if self.store.find_by_name(name)?.is_some() {
            return Err(EntryError::Duplicate);
        }

        match self.store.insert(NewRecord::new(name, value)) {
            Ok(record) => {
                tracing::debug!(id = %record.id, name = %record.name, "record saved");
                Ok(record)
            }
            Err(StoreError::DuplicateName { .. }) => Err(EntryError::Duplicate),
            Err(err) => Err(EntryError::Store(err)),
        }
    }

    /// Returns all stored records, best-effort.
    ///
    /// A store fault is logged and reported as an empty sequence; callers
    /// cannot distinguish "no records" from "store unavailable" through
    /// this call alone.
    pub fn get_data(&self) -> Vec<Record> {
        match self.store.list_all() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "record listing failed, returning empty set");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for EntryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryService").finish_non_exhaustive()
    }
}
