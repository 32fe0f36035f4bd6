//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait that all storage backends
//! must implement. The fetch pipeline works against this trait only, never
//! against a concrete backend.

use async_trait::async_trait;
use bytes::Bytes;
use clipview_core::StorageBackend;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// The collaborator-facing detail of this error, without the variant
    /// prefix. Used when the message is re-wrapped upstream.
    pub fn detail(&self) -> String {
        match self {
            StorageError::DownloadFailed(detail)
            | StorageError::BackendError(detail)
            | StorageError::ConfigError(detail) => detail.clone(),
            StorageError::NotFound(object) => format!("object not found: {}", object),
            StorageError::InvalidKey(key) => format!("invalid storage key: {}", key),
            StorageError::IoError(e) => e.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Payload of a retrieved object, yielded as chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// A backend resolves `(bucket, key)` pairs to byte streams; it performs no
/// caching or retries of its own beyond what its SDK provides.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Retrieve the object at `(bucket, key)` as a stream of chunks.
    ///
    /// The stream ends after the last chunk; an object with no payload
    /// produces a stream that yields nothing.
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<ByteStream>;

    /// Size in bytes of the object, if it exists.
    async fn content_length(&self, bucket: &str, key: &str) -> StorageResult<u64>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
