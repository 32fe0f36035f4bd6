//! Clipview Core Library
//!
//! This crate provides the shared domain types for clipview: object
//! references, the fetch state machine, the error taxonomy, the playable-URL
//! registry, and storage configuration. It contains no I/O of its own.

pub mod blob;
pub mod config;
pub mod constants;
pub mod error;
pub mod object_ref;
pub mod state;
pub mod storage_types;

// Re-export commonly used types
pub use blob::{Blob, BlobRegistry, MediaUrl};
pub use config::StorageConfig;
pub use error::{FetchError, FetchResult};
pub use object_ref::ObjectRef;
pub use state::{FetchState, VideoHandle};
pub use storage_types::StorageBackend;
