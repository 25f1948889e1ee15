//! Error types for entry operations.

use tally_store::StoreError;
use thiserror::Error;

/// Failures the entry service can report for a save.
///
/// The display strings are the caller-facing messages; the HTTP boundary
/// maps the variants to 400 (missing field), 409 (duplicate), and 500
/// (store fault).
#[derive(Debug, Error)]
pub enum EntryError {
    /// Name or value was absent; the store was never touched.
    #[error("Name and value are required fields")]
    MissingField,

    /// A record with this name already exists; nothing was written.
    #[error("Duplicate data found - item with this name already exists")]
    Duplicate,

    /// The storage layer faulted.
    #[error("Error saving data: {0}")]
    Store(#[from] StoreError),
}

impl EntryError {
    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, EntryError::MissingField)
    }

    /// Returns true if this is a duplicate-name rejection.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, EntryError::Duplicate)
    }
}
