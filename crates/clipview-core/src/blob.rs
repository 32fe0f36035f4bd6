//! Process-local playable URLs.
//!
//! A `BlobRegistry` is a process-local table mapping minted URLs to
//! in-memory payloads. `create_url` hands back a `MediaUrl` that owns its
//! table entry and revokes it exactly once when dropped, so a fetched
//! payload can never outlive the last holder of its URL. Resolving a URL
//! through the registry yields the payload bytes and content type.

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::constants::BLOB_URL_SCHEME;

/// An in-memory payload behind a playable URL.
#[derive(Debug, Clone)]
pub struct Blob {
    pub data: Bytes,
    pub content_type: String,
}

/// Table of live playable URLs.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    blobs: Mutex<HashMap<String, Blob>>,
}

impl BlobRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(BlobRegistry::default())
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mint a playable URL for `data` and register it.
    ///
    /// The returned `MediaUrl` is the sole owner of the entry; the entry is
    /// removed when the handle drops.
    pub fn create_url(self: &Arc<Self>, data: Bytes, content_type: &str) -> MediaUrl {
        let url = format!("{}:{}", BLOB_URL_SCHEME, Uuid::new_v4());
        let size_bytes = data.len() as u64;

        self.blobs().insert(
            url.clone(),
            Blob {
                data,
                content_type: content_type.to_string(),
            },
        );

        tracing::debug!(
            url = %url,
            content_type = %content_type,
            size_bytes,
            "playable url created"
        );

        MediaUrl {
            registry: Arc::clone(self),
            url,
        }
    }

    /// Resolve a URL to its payload, if the URL is still live.
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        self.blobs().get(url).cloned()
    }

    /// Number of currently live URLs.
    pub fn active_urls(&self) -> usize {
        self.blobs().len()
    }

    fn revoke(&self, url: &str) {
        if self.blobs().remove(url).is_some() {
            tracing::debug!(url = %url, "playable url revoked");
        }
    }
}

/// Owning handle for one playable URL.
///
/// Not `Clone`: share it behind an `Arc` instead, so revocation runs once,
/// when the last reference goes away.
pub struct MediaUrl {
    registry: Arc<BlobRegistry>,
    url: String,
}

impl MediaUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl fmt::Debug for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaUrl").field("url", &self.url).finish()
    }
}

impl Drop for MediaUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let registry = BlobRegistry::new();
        let data = Bytes::from_static(&[0x00, 0x01, 0x02]);

        let url = registry.create_url(data.clone(), "video/mp4");
        assert!(url.as_str().starts_with("blob:"));

        let blob = registry.resolve(url.as_str()).unwrap();
        assert_eq!(blob.data, data);
        assert_eq!(blob.content_type, "video/mp4");
        assert_eq!(registry.active_urls(), 1);
    }

    #[test]
    fn test_drop_revokes_exactly_once() {
        let registry = BlobRegistry::new();
        let url = registry.create_url(Bytes::from_static(b"abc"), "video/mp4");
        let url_str = url.as_str().to_string();

        drop(url);

        assert_eq!(registry.active_urls(), 0);
        assert!(registry.resolve(&url_str).is_none());
    }

    #[test]
    fn test_urls_are_unique() {
        let registry = BlobRegistry::new();
        let a = registry.create_url(Bytes::from_static(b"a"), "video/mp4");
        let b = registry.create_url(Bytes::from_static(b"a"), "video/mp4");
        assert_ne!(a.as_str(), b.as_str());
        assert_eq!(registry.active_urls(), 2);
    }
}
