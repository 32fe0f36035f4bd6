use crate::traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use clipview_core::StorageBackend;
use futures::stream;
use std::path::PathBuf;
use tokio::fs;

const CHUNK_SIZE: usize = 64 * 1024;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{key}`. Intended for development
/// and tests; the fetch pipeline treats it exactly like S3.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `base_path`.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert `(bucket, key)` to a filesystem path, rejecting path
    /// traversal sequences that could escape the base directory.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        for segment in [bucket, key] {
            if segment.contains("..") || segment.starts_with('/') {
                return Err(StorageError::InvalidKey(format!("{}/{}", bucket, key)));
            }
        }
        Ok(self.base_path.join(bucket).join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<ByteStream> {
        let start = std::time::Instant::now();
        let path = self.object_path(bucket, key)?;

        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(format!("{}/{}", bucket, key))
            } else {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    "local get_object failed"
                );
                StorageError::IoError(e)
            }
        })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "local get_object successful"
        );

        // An empty file yields a stream with no chunks.
        let bytes = Bytes::from(data);
        let chunks: Vec<StorageResult<Bytes>> = (0..bytes.len())
            .step_by(CHUNK_SIZE)
            .map(|at| Ok(bytes.slice(at..bytes.len().min(at + CHUNK_SIZE))))
            .collect();

        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn content_length(&self, bucket: &str, key: &str) -> StorageResult<u64> {
        let path = self.object_path(bucket, key)?;

        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(format!("{}/{}", bucket, key))
            } else {
                StorageError::IoError(e)
            }
        })?;

        Ok(meta.len())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    async fn seed(storage: &LocalStorage, bucket: &str, key: &str, data: &[u8]) {
        let dir = storage.base_path.join(bucket);
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(dir.join(key), data).await.unwrap();
    }

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_get_object_returns_exact_bytes() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        seed(&storage, "media", "clip1", &[0x00, 0x01, 0x02]).await;

        let stream = storage.get_object("media", "clip1").await.unwrap();
        assert_eq!(collect(stream).await, vec![0x00, 0x01, 0x02]);
    }

    #[tokio::test]
    async fn test_empty_object_yields_no_chunks() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        seed(&storage, "media", "empty", b"").await;

        let stream = storage.get_object("media", "empty").await.unwrap();
        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get_object("media", "nope").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get_object("media", "../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.get_object("..", "key").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.content_length("media", "/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_content_length() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        seed(&storage, "media", "clip1", b"12345").await;

        assert_eq!(storage.content_length("media", "clip1").await.unwrap(), 5);
        assert!(matches!(
            storage.content_length("media", "nope").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_large_object_is_chunked() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        let data = vec![0xAB; CHUNK_SIZE * 2 + 17];
        seed(&storage, "media", "big", &data).await;

        let mut stream = storage.get_object("media", "big").await.unwrap();
        let mut chunks = 0;
        let mut total = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            chunks += 1;
            total += chunk.len();
        }
        assert_eq!(chunks, 3);
        assert_eq!(total, data.len());
    }
}
