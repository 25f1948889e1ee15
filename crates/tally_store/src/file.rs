//! File-based record store for persistent storage.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::record::{NewRecord, Record};
use crate::store::RecordStore;
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Upper bound on a single encoded record; anything larger is corruption.
const MAX_RECORD_LEN: u32 = 16 * 1024 * 1024;

/// A file-based record store.
///
/// Records are held in an append-only file, one length-prefixed CBOR
/// payload per record. The full collection is loaded into memory at open;
/// reads are served from the cache and inserts append to the file before
/// updating it.
///
/// # Durability
///
/// Every insert flushes to the OS; with
/// [`StoreConfig::sync_on_insert`] (the default) it also fsyncs.
///
/// A truncated trailing record - the tail of an insert interrupted by a
/// crash - is dropped at open and the file is cut back to the last complete
/// record.
///
/// # Lifecycle
///
/// The handle is opened at startup and closed explicitly at shutdown.
/// While open it holds an exclusive advisory lock on the file; a second
/// opener fails with [`StoreError::Locked`]. Operations after
/// [`FileStore::close`] fail with [`StoreError::Closed`].
///
/// # Example
///
/// ```no_run
/// use tally_store::{FileStore, NewRecord, RecordStore, StoreConfig, Value};
///
/// let store = FileStore::open("tally.db", StoreConfig::default()).unwrap();
/// store.insert(NewRecord::new("rent", Value::Numeric(1200.0))).unwrap();
/// store.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    config: StoreConfig,
    file: Mutex<Option<File>>,
    records: RwLock<Vec<Record>>,
}

impl FileStore {
    /// Opens or creates a record store at the given path.
    ///
    /// Existing records are loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or created
    /// - Another process holds the store lock ([`StoreError::Locked`])
    /// - An existing record fails to decode
    pub fn open(path: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.try_lock_exclusive().map_err(|_| StoreError::Locked)?;

        let (records, valid_len) = load_records(&mut file)?;
        let actual_len = file.metadata()?.len();
        if valid_len < actual_len {
            tracing::warn!(
                path = %path.display(),
                dropped = actual_len - valid_len,
                "dropping truncated record tail"
            );
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        tracing::info!(path = %path.display(), records = records.len(), "store opened");

        Ok(Self {
            path: path.to_path_buf(),
            config,
            file: Mutex::new(Some(file)),
            records: RwLock::new(records),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
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

    /// Flushes pending writes and releases the store.
    ///
    /// Idempotent: closing an already-closed store is a no-op. Any
    /// operation after close fails with [`StoreError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush or sync fails.
    pub fn close(&self) -> StoreResult<()> {
        let mut guard = self.file.lock();
        if let Some(mut file) = guard.take() {
            file.flush()?;
            file.sync_all()?;
            tracing::info!(path = %self.path.display(), "store closed");
        }
        Ok(())
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.file.lock().is_none() {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Record>> {
        self.ensure_open()?;
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.name == name)
            .cloned())
    }

    fn insert(&self, record: NewRecord) -> StoreResult<Record> {
        let mut guard = self.file.lock();
        let file = guard.as_mut().ok_or(StoreError::Closed)?;
        let mut records = self.records.write();

        if self.config.enforce_unique_names
            && records.iter().any(|existing| existing.name == record.name)
        {
            return Err(StoreError::DuplicateName { name: record.name });
        }

        let stored = record.assign_id();

        let mut payload = Vec::new();
        ciborium::ser::into_writer(&stored, &mut payload)
            .map_err(|e| StoreError::Codec(e.to_string()))?;

        file.seek(SeekFrom::End(0))?;
        file.write_all(&(payload.len() as u32).to_le_bytes())?;
        file.write_all(&payload)?;
        file.flush()?;
        if self.config.sync_on_insert {
            file.sync_all()?;
        }

        records.push(stored.clone());
        Ok(stored)
    }

    fn list_all(&self) -> StoreResult<Vec<Record>> {
        self.ensure_open()?;
        Ok(self.records.read().clone())
    }
}

/// Reads all complete records, returning them with the file length they
/// span. Bytes beyond the returned length are a truncated tail.
fn load_records(file: &mut File) -> StoreResult<(Vec<Record>, u64)> {
    file.seek(SeekFrom::Start(0))?;
    let mut reader = BufReader::new(file);
    let mut records = Vec::new();
    let mut valid_len = 0u64;

    loop {
        let mut len_buf = [0u8; 4];
        let read = fill(&mut reader, &mut len_buf)?;
        if read < len_buf.len() {
            break;
        }

        let len = u32::from_le_bytes(len_buf);
        if len > MAX_RECORD_LEN {
            return Err(StoreError::Codec(format!(
                "record length {len} exceeds limit {MAX_RECORD_LEN}"
            )));
        }

        let mut payload = vec![0u8; len as usize];
        let read = fill(&mut reader, &mut payload)?;
        if read < payload.len() {
            break;
        }

        let record: Record = ciborium::de::from_reader(payload.as_slice())
            .map_err(|e| StoreError::Codec(e.to_string()))?;
        records.push(record);
        valid_len += 4 + u64::from(len);
    }

    Ok((records, valid_len))
}

/// Reads until `buf` is full or the reader is exhausted, returning the
/// number of bytes read.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        let n = reader.read(&mut buf[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    Ok(read)
}
