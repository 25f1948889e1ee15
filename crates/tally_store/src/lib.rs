//! # Tally Store
//!
//! Record data model and persistence backends for tally.
//!
//! This crate provides the lowest-level layer of the service: the persisted
//! [`Record`] type and the [`RecordStore`] trait that the entry service is
//! written against. Stores are **record stores**, not byte stores - they
//! understand exactly one entity shape and nothing else.
//!
//! ## Design Principles
//!
//! - A record is a name/value pair with a store-assigned [`RecordId`]
//! - Records are immutable once inserted; there is no update or delete
//! - Callers always receive clones, never references into store internals
//! - Store handles have an explicit lifecycle: open at startup, close at
//!   shutdown - no ambient global connection state
//!
//! ## Available Backends
//!
//! - [`MemoryStore`] - For tests and ephemeral operation
//! - [`FileStore`] - Append-only file of CBOR-encoded records
//!
//! ## Example
//!
//! ```rust
//! use tally_store::{MemoryStore, NewRecord, RecordStore, Value};
//!
//! let store = MemoryStore::new();
//! let saved = store
//!     .insert(NewRecord::new("rent", Value::Numeric(1200.0)))
//!     .unwrap();
//! assert_eq!(store.find_by_name("rent").unwrap().unwrap().id, saved.id);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod file;
mod memory;
mod record;
mod store;
mod value;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{NewRecord, Record, RecordId};
pub use store::RecordStore;
pub use value::Value;
