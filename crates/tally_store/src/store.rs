//! Record store trait definition.

use crate::error::StoreResult;
use crate::record::{NewRecord, Record};

/// Keyed storage of records with name uniqueness.
///
/// This is the seam between the entry service and persistence. Stores hold
/// the only durable copy of the record collection; every method hands back
/// clones, never references into internal state.
///
/// # Invariants
///
/// - `insert` assigns a fresh [`crate::RecordId`] and returns the stored form
/// - `list_all` returns records in store-defined order; callers must not
///   rely on any particular ordering
/// - Stores must be `Send + Sync` for concurrent request handling
///
/// # Name uniqueness
///
/// The entry service performs a check-then-insert which is not atomic under
/// concurrent saves. Whether the store itself rejects a racing duplicate is
/// an explicit configuration contract - see
/// [`StoreConfig::enforce_unique_names`](crate::StoreConfig).
///
/// # Implementors
///
/// - [`crate::MemoryStore`] - For tests and ephemeral operation
/// - [`crate::FileStore`] - For persistent storage
pub trait RecordStore: Send + Sync {
    /// Looks up a record by exact name match.
    ///
    /// Returns `Ok(None)` if no record has this name.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage faults.
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Record>>;

    /// Persists a new record, assigning its ID.
    ///
    /// Returns the stored form of the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying storage faults
    /// - The store enforces name uniqueness and the name already exists
    ///   ([`StoreError::DuplicateName`](crate::StoreError))
    fn insert(&self, record: NewRecord) -> StoreResult<Record>;

    /// Returns all records in store-defined order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage faults.
    fn list_all(&self) -> StoreResult<Vec<Record>>;
}
