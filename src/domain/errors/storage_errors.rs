use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors surfaced by storage operations.
///
/// Backend failures are always returned to the caller as a value; the
/// gateway never aborts the process on a failed request.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object not found at the given location
    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// Bucket not found
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: BucketName },

    /// Backend rejected the credentials for this operation
    #[error("access denied for '{operation}' on bucket {bucket}")]
    AccessDenied {
        bucket: BucketName,
        operation: String,
    },

    /// Backend could not be reached (connect, timeout, transport)
    #[error("storage backend unavailable: {message}")]
    Unavailable { message: String },

    /// Backend answered with a non-success status
    #[error("storage backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Backend response could not be decoded
    #[error("failed to decode backend response: {message}")]
    Decode { message: String },

    /// Invalid bucket name or object key
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local file could not be read or written
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
