//! Fetch state machine for one object reference.

use std::sync::Arc;

use crate::blob::MediaUrl;
use crate::error::FetchError;

/// The resolved product of a successful fetch: a playable URL plus the
/// metadata a playback surface needs.
#[derive(Debug)]
pub struct VideoHandle {
    url: MediaUrl,
    content_type: String,
    size_bytes: u64,
}

impl VideoHandle {
    pub fn new(url: MediaUrl, content_type: impl Into<String>, size_bytes: u64) -> Self {
        VideoHandle {
            url,
            content_type: content_type.into(),
            size_bytes,
        }
    }

    /// The playable URL, valid for as long as this handle is alive.
    pub fn src(&self) -> &str {
        self.url.as_str()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Progress of one retrieval.
///
/// Transitions are monotonic within a request generation:
/// `Pending -> Ready | Failed`. A new generation starts only when the object
/// reference changes, which re-enters `Pending`.
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    #[default]
    Pending,
    Ready(Arc<VideoHandle>),
    Failed(FetchError),
}

impl FetchState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }
}
