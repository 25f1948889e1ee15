//! Error types for the HTTP server.

use crate::upload::UploadError;
use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while running the server.
///
/// Per-request failures are mapped to HTTP statuses in the handlers; these
/// errors are the ones that escape the request cycle (startup, shutdown).
#[derive(Debug, Error)]
pub enum ServerError {
    /// An I/O error occurred (bind, accept, shutdown).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The upload store could not be prepared.
    #[error("upload store error: {0}")]
    Upload(#[from] UploadError),
}
