//! Clipview Player Library
//!
//! The consumer-facing crate. `VideoFetcher` retrieves a video object from
//! storage, buffers it, and mints a process-local playable URL, coalescing
//! concurrent requests for the same `(bucket, key)`. `VideoPresenter` drives
//! the loading / error / ready presentation over a fetcher and guarantees
//! the playable URL is released when the source changes or the presenter is
//! torn down.
//!
//! ```no_run
//! # async fn demo(storage: std::sync::Arc<dyn clipview_storage::ObjectStorage>) {
//! use clipview_player::{VideoFetcher, VideoPresenter, View};
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(VideoFetcher::new(storage));
//! let presenter = VideoPresenter::new(fetcher);
//! presenter.set_source("media", "clip1");
//! presenter.load().await;
//! match presenter.view() {
//!     View::Player(surface) => println!("play {}", surface.src),
//!     View::Error { message } => eprintln!("{message}"),
//!     View::Loading | View::Empty => {}
//! }
//! # }
//! ```

pub mod fetch;
pub mod options;
pub mod presenter;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export commonly used types
pub use clipview_core::{BlobRegistry, FetchError, FetchState, ObjectRef, VideoHandle};
pub use fetch::VideoFetcher;
pub use options::PlayerOptions;
pub use presenter::{PlayerSurface, VideoPresenter, View};
