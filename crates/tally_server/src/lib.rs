//! # Tally Server
//!
//! HTTP boundary for tally.
//!
//! This crate provides:
//! - The axum router mapping HTTP requests onto the entry service and the
//!   aggregation engine
//! - [`UploadStore`] - disk persistence for uploaded files with generated
//!   names and media-type restrictions
//! - [`serve`] - the listener loop with graceful shutdown
//!
//! # Endpoints
//!
//! | method | path | outcome |
//! |---|---|---|
//! | POST | `/data` | 201 saved, 400 missing fields, 409 duplicate, 500 store fault |
//! | GET | `/data` | 200 all records (best-effort) |
//! | GET | `/reports/summary` | 200 `{total, count, average}` |
//! | GET | `/reports/generate` | 200 one-line report |
//! | POST | `/upload` | 200 stored, 400 missing file or rejected type |
//! | GET | `/files/:filename` | 200 file bytes, 404 absent |
//!
//! Each request is handled independently; shared state is the store handle
//! behind `Arc`. A failed request never takes the process down.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod routes;
mod server;
mod upload;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use routes::{router, AppState};
pub use server::serve;
pub use upload::{StoredUpload, UploadError, UploadStore};
