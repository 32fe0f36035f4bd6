//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use clipview_core::StorageBackend;
use clipview_storage::{ByteStream, ObjectStorage, StorageError, StorageResult};

#[derive(Clone)]
enum MockReply {
    Payload(Vec<u8>),
    Failure(String),
}

/// In-memory storage double that records how many retrievals it served.
pub struct MockStorage {
    reply: MockReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockStorage {
    pub fn with_payload(data: Vec<u8>) -> Arc<Self> {
        Arc::new(MockStorage {
            reply: MockReply::Payload(data),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Arc::new(MockStorage {
            reply: MockReply::Failure(detail.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Hold each retrieval open long enough for callers to overlap.
    pub fn delayed(self: Arc<Self>, delay: Duration) -> Arc<Self> {
        Arc::new(MockStorage {
            reply: self.reply.clone(),
            delay: Some(delay),
            calls: AtomicUsize::new(self.calls()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn get_object(&self, _bucket: &str, _key: &str) -> StorageResult<ByteStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.reply.clone() {
            MockReply::Failure(detail) => Err(StorageError::DownloadFailed(detail)),
            MockReply::Payload(data) => {
                // Split into several chunks to exercise accumulation; an
                // empty payload produces a stream with no chunks.
                let chunks: Vec<StorageResult<Bytes>> = data
                    .chunks(1.max(data.len() / 4))
                    .map(|c| Ok(Bytes::copy_from_slice(c)))
                    .collect();
                Ok(Box::pin(stream::iter(chunks)))
            }
        }
    }

    async fn content_length(&self, bucket: &str, key: &str) -> StorageResult<u64> {
        match &self.reply {
            MockReply::Payload(data) => Ok(data.len() as u64),
            MockReply::Failure(_) => Err(StorageError::NotFound(format!("{}/{}", bucket, key))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
