//! Error types module
//!
//! Errors surfaced by the video fetch pipeline. The taxonomy is closed:
//! anything the storage collaborator reports is coerced into `Transport`
//! with the collaborator's own message embedded, so callers never see an
//! unclassified failure. All variants display with a uniform prefix.

/// A failure of a single video fetch.
///
/// `Clone` is required so a coalesced in-flight request can hand the same
/// outcome to every waiting caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The object key was missing or blank; no storage call was made.
    #[error("Failed to fetch video: object key is missing or empty")]
    EmptyKey,

    /// Storage responded, but the object carried no payload.
    #[error("Failed to fetch video: response body is empty")]
    EmptyBody,

    /// The storage collaborator reported an error.
    #[error("Failed to fetch video: {0}")]
    Transport(String),
}

impl FetchError {
    /// Build a `Transport` error from a collaborator message, substituting a
    /// generic detail when the message is blank.
    pub fn transport(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.trim().is_empty() {
            FetchError::Transport("unknown storage error".to_string())
        } else {
            FetchError::Transport(detail)
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
