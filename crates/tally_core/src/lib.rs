//! # Tally Core
//!
//! Business rules for tally: record creation and retrieval, plus pure
//! aggregation over stored records.
//!
//! This crate provides:
//! - [`EntryService`] - validation, duplicate detection, and best-effort
//!   reads over an injected [`tally_store::RecordStore`]
//! - [`reports`] - sum/count/average summaries and threshold filtering
//!
//! # Error policy
//!
//! Validation and duplicate failures are expected business outcomes and are
//! returned as structured [`EntryError`] values, never panics. Persistence
//! faults on the write path carry detail to the caller; on the read path
//! they are logged and swallowed into an empty result set, so callers must
//! not treat an empty list as proof of absence.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod reports;
mod service;

pub use error::EntryError;
pub use service::EntryService;
