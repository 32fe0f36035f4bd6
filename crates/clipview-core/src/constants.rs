//! Shared constants.

/// Content type tagged onto every fetched video payload.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Scheme used for process-local playable URLs.
pub const BLOB_URL_SCHEME: &str = "blob";
