//! Video fetch with request coalescing.
//!
//! `VideoFetcher` is a read-through cache keyed by `ObjectRef`. The first
//! request for an object inserts a shared future into the request map; any
//! caller arriving while that retrieval is in flight awaits the same future
//! and receives the same outcome, so at most one retrieval per object is
//! ever in flight. Completed entries (success or failure) stay cached until
//! explicitly invalidated; a re-request for an unchanged object reference
//! never touches storage again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::BytesMut;
use futures::future::{BoxFuture, FutureExt, Shared};
use futures::StreamExt;

use clipview_core::constants::VIDEO_CONTENT_TYPE;
use clipview_core::{BlobRegistry, FetchError, FetchResult, ObjectRef, VideoHandle};
use clipview_storage::ObjectStorage;

type SharedFetch = Shared<BoxFuture<'static, FetchResult<Arc<VideoHandle>>>>;

/// Read-through, request-coalescing video fetcher.
pub struct VideoFetcher {
    storage: Arc<dyn ObjectStorage>,
    registry: Arc<BlobRegistry>,
    requests: Mutex<HashMap<ObjectRef, SharedFetch>>,
}

impl VideoFetcher {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self::with_registry(storage, BlobRegistry::new())
    }

    /// Use an externally owned registry, e.g. one shared across fetchers.
    pub fn with_registry(storage: Arc<dyn ObjectStorage>, registry: Arc<BlobRegistry>) -> Self {
        VideoFetcher {
            storage,
            registry,
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// The registry holding this fetcher's playable URLs.
    pub fn registry(&self) -> &Arc<BlobRegistry> {
        &self.registry
    }

    // The lock is synchronous and never held across an await; the shared
    // future is cloned out of the map before being polled.
    fn requests(&self) -> MutexGuard<'_, HashMap<ObjectRef, SharedFetch>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the object at `(bucket, key)`, buffer it fully, and return a
    /// handle to its playable URL.
    ///
    /// A blank key fails with `EmptyKey` before any storage call. Concurrent
    /// and repeated calls for the same object share one retrieval.
    pub async fn fetch(&self, bucket: &str, key: &str) -> FetchResult<Arc<VideoHandle>> {
        if key.trim().is_empty() {
            tracing::warn!(bucket = %bucket, "video fetch rejected: empty object key");
            return Err(FetchError::EmptyKey);
        }

        let object = ObjectRef::new(bucket, key);

        let fut = {
            let mut requests = self.requests();
            if let Some(existing) = requests.get(&object) {
                tracing::debug!(object = %object, "video fetch coalesced onto cached request");
                existing.clone()
            } else {
                let storage = Arc::clone(&self.storage);
                let registry = Arc::clone(&self.registry);
                let target = object.clone();
                let fut = retrieve(storage, registry, target).boxed().shared();
                requests.insert(object, fut.clone());
                fut
            }
        };

        fut.await
    }

    /// Drop the cached entry for one object reference.
    ///
    /// The next fetch for it goes back to storage. The playable URL itself
    /// is revoked when the last handle reference is dropped.
    pub fn invalidate(&self, bucket: &str, key: &str) {
        let object = ObjectRef::new(bucket, key);
        if self.requests().remove(&object).is_some() {
            tracing::debug!(object = %object, "video cache entry invalidated");
        }
    }

    /// Whether a cached or in-flight entry exists for `(bucket, key)`.
    pub fn is_cached(&self, bucket: &str, key: &str) -> bool {
        self.requests()
            .contains_key(&ObjectRef::new(bucket, key))
    }
}

async fn retrieve(
    storage: Arc<dyn ObjectStorage>,
    registry: Arc<BlobRegistry>,
    object: ObjectRef,
) -> FetchResult<Arc<VideoHandle>> {
    let start = std::time::Instant::now();

    let mut stream = storage
        .get_object(&object.bucket, &object.key)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, object = %object, "video fetch failed");
            FetchError::transport(e.detail())
        })?;

    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::error!(error = %e, object = %object, "video fetch failed mid-stream");
            FetchError::transport(e.detail())
        })?;
        buf.extend_from_slice(&chunk);
    }

    if buf.is_empty() {
        tracing::error!(object = %object, "video fetch returned an empty body");
        return Err(FetchError::EmptyBody);
    }

    let size_bytes = buf.len() as u64;
    let url = registry.create_url(buf.freeze(), VIDEO_CONTENT_TYPE);

    tracing::info!(
        object = %object,
        size_bytes,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "video fetch successful"
    );

    Ok(Arc::new(VideoHandle::new(
        url,
        VIDEO_CONTENT_TYPE,
        size_bytes,
    )))
}
