//! Store configuration.

/// Configuration for record stores.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether `insert` rejects a name that already exists.
    ///
    /// The entry service's duplicate check and insert are not atomic; with
    /// this enabled the store itself is the last line of defense and a
    /// racing second insert fails with
    /// [`StoreError::DuplicateName`](crate::StoreError). With it disabled
    /// the store accepts same-name records, matching a backend with no
    /// unique index.
    pub enforce_unique_names: bool,
    /// Whether file-backed stores fsync after every insert.
    pub sync_on_insert: bool,
}

impl StoreConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enforce_unique_names: true,
            sync_on_insert: true,
        }
    }

    /// Sets whether the store enforces name uniqueness on insert.
    #[must_use]
    pub fn with_enforce_unique_names(mut self, enforce: bool) -> Self {
        self.enforce_unique_names = enforce;
        self
    }

    /// Sets whether file-backed stores fsync after every insert.
    #[must_use]
    pub fn with_sync_on_insert(mut self, sync: bool) -> Self {
        self.sync_on_insert = sync;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
