//! Clipview Storage Library
//!
//! This crate provides the storage abstraction consumed by the video fetch
//! pipeline: the `ObjectStorage` trait, an S3 backend, and a local
//! filesystem backend for development and tests.
//!
//! Objects are addressed by a `(bucket, key)` pair on every call; backends
//! carry no per-bucket state of their own. Keys must not contain `..` or a
//! leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use clipview_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
