//! Disk persistence for uploaded files.

use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// File types accepted for upload, matched against both the declared media
/// subtype and the filename extension.
const ALLOWED_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "pdf"];

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The declared media type or the filename extension is not accepted.
    /// Nothing is written to disk.
    #[error("File type not supported")]
    UnsupportedType {
        /// The media type declared by the client.
        declared_type: String,
        /// The original filename.
        filename: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A successfully stored upload.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// The generated filename within the upload directory.
    pub filename: String,
    /// The full path of the stored file.
    pub path: PathBuf,
}

/// Persists uploaded files to a directory under generated names.
///
/// Names follow `"{epoch-millis}-{9-digit-random}.{ext}"`, so stored files
/// never collide with each other or with a client-chosen name. A file is
/// written only when BOTH the declared media type and the filename
/// extension pass the accept list (jpeg, jpg, png, gif, pdf).
#[derive(Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Opens the upload store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the upload directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validates and stores an uploaded file.
    ///
    /// # Errors
    ///
    /// - [`UploadError::UnsupportedType`] if either the declared media type
    ///   or the filename extension fails the accept list; nothing is stored
    /// - [`UploadError::Io`] if the write fails
    pub async fn store(
        &self,
        declared_type: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        let extension = file_extension(original_name);

        if !type_allowed(declared_type) || !extension.as_deref().is_some_and(type_in_list) {
            return Err(UploadError::UnsupportedType {
                declared_type: declared_type.to_string(),
                filename: original_name.to_string(),
            });
        }

        let extension = extension.unwrap_or_default();
        let filename = generated_name(&extension);
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(filename = %filename, bytes = bytes.len(), "upload stored");

        Ok(StoredUpload { filename, path })
    }

    /// Resolves a stored filename to its path, if the file exists.
    ///
    /// Filenames containing path separators or parent references never
    /// resolve; lookups stay inside the upload directory.
    pub async fn find(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return None;
        }

        let path = self.dir.join(filename);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Some(path),
            _ => None,
        }
    }
}

/// Checks the subtype of a declared media type against the accept list.
fn type_allowed(declared_type: &str) -> bool {
    declared_type
        .split('/')
        .nth(1)
        .and_then(|subtype| subtype.split(';').next())
        .map(str::trim)
        .is_some_and(|subtype| type_in_list(&subtype.to_ascii_lowercase()))
}

fn type_in_list(candidate: &str) -> bool {
    ALLOWED_TYPES.contains(&candidate)
}

/// Extracts the lowercased filename extension, if any.
fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Builds a `"{epoch-millis}-{9-digit-random}.{ext}"` name.
fn generated_name(extension: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{millis}-{random:09}.{extension}")
}
