//! Three-state video presentation.
//!
//! `VideoPresenter` observes a `VideoFetcher` and produces a `View` the
//! embedding application renders: a loading indicator, an inline error, or
//! a configured playback surface. It owns the lifetime of the playable URL
//! it displays: changing the source or dropping the presenter releases the
//! previous URL exactly once, before the next state becomes observable.

use std::sync::{Arc, Mutex, MutexGuard};

use clipview_core::{FetchError, FetchState, ObjectRef, VideoHandle};

use crate::fetch::VideoFetcher;
use crate::options::PlayerOptions;

/// Fallback shown when a failure carries no usable message.
const GENERIC_LOAD_ERROR: &str = "Failed to load video";

pub type ErrorCallback = Box<dyn Fn(&FetchError) + Send + Sync>;
pub type ReadyCallback = Box<dyn Fn(&VideoHandle) + Send + Sync>;

/// What the embedding application should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No source has been set.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// The fetch failed; show the message inline.
    Error { message: String },
    /// The video is buffered and playable.
    Player(PlayerSurface),
}

/// A fully configured playback surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSurface {
    /// Playable URL, valid while the presenter holds its handle.
    pub src: String,
    pub content_type: String,
    pub auto_play: bool,
    pub controls: bool,
    pub muted: bool,
    pub looping: bool,
    pub class_name: String,
}

struct PresenterInner {
    source: Option<ObjectRef>,
    state: FetchState,
    generation: u64,
}

/// Drives the `Pending -> Ready | Failed` presentation for one video slot.
///
/// Methods take `&self`; state lives behind a mutex so an application can
/// share the presenter between an input handler and a render loop.
pub struct VideoPresenter {
    fetcher: Arc<VideoFetcher>,
    options: PlayerOptions,
    on_error: Option<ErrorCallback>,
    on_ready: Option<ReadyCallback>,
    inner: Mutex<PresenterInner>,
}

impl VideoPresenter {
    pub fn new(fetcher: Arc<VideoFetcher>) -> Self {
        VideoPresenter {
            fetcher,
            options: PlayerOptions::default(),
            on_error: None,
            on_ready: None,
            inner: Mutex::new(PresenterInner {
                source: None,
                state: FetchState::Pending,
                generation: 0,
            }),
        }
    }

    pub fn with_options(mut self, options: PlayerOptions) -> Self {
        self.options = options;
        self
    }

    /// Called once per distinct failure, after the state transition.
    pub fn on_error(mut self, callback: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Called once when the video is buffered and playback can begin.
    pub fn on_ready(mut self, callback: impl Fn(&VideoHandle) + Send + Sync + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    fn inner(&self) -> MutexGuard<'_, PresenterInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Point the presenter at `(bucket, key)`.
    ///
    /// A no-op when the identity is unchanged. Otherwise the previously held
    /// playable URL is released before the new `Pending` state can be
    /// observed, and the request generation advances so a late result for
    /// the old source can never overwrite the new one.
    pub fn set_source(&self, bucket: &str, key: &str) {
        let next = ObjectRef::new(bucket, key);
        let mut inner = self.inner();

        if inner.source.as_ref() == Some(&next) {
            return;
        }

        if let Some(previous) = inner.source.take() {
            tracing::debug!(from = %previous, to = %next, "video source changed");
            self.fetcher.invalidate(&previous.bucket, &previous.key);
        }

        // Dropping the old state here releases the old handle.
        inner.state = FetchState::Pending;
        inner.source = Some(next);
        inner.generation += 1;
    }

    /// Run the fetch for the current source and apply the outcome.
    ///
    /// A no-op when no source is set or the current generation has already
    /// resolved. The outcome is discarded if the source changed while the
    /// retrieval was in flight, or if an overlapping `load` for the same
    /// generation already applied it — callbacks fire once per transition,
    /// no matter how many callers await the coalesced fetch.
    pub async fn load(&self) {
        let (object, generation) = {
            let inner = self.inner();
            match (&inner.source, &inner.state) {
                (Some(source), FetchState::Pending) => (source.clone(), inner.generation),
                _ => return,
            }
        };

        let result = self.fetcher.fetch(&object.bucket, &object.key).await;

        let mut inner = self.inner();
        if inner.generation != generation || !inner.state.is_pending() {
            tracing::debug!(object = %object, "stale fetch result discarded");
            return;
        }

        match result {
            Ok(handle) => {
                inner.state = FetchState::Ready(Arc::clone(&handle));
                drop(inner);
                if let Some(callback) = &self.on_ready {
                    callback(&handle);
                }
            }
            Err(err) => {
                tracing::error!(object = %object, error = %err, "video presentation failed");
                inner.state = FetchState::Failed(err.clone());
                drop(inner);
                if let Some(callback) = &self.on_error {
                    callback(&err);
                }
            }
        }
    }

    /// Invalidate the cached entry for the current source and re-enter
    /// `Pending`, forcing the next `load` back to storage.
    pub fn reload(&self) {
        let mut inner = self.inner();
        if let Some(source) = inner.source.clone() {
            self.fetcher.invalidate(&source.bucket, &source.key);
            inner.state = FetchState::Pending;
            inner.generation += 1;
        }
    }

    /// Snapshot of the current fetch state.
    pub fn state(&self) -> FetchState {
        self.inner().state.clone()
    }

    /// The view to render for the current state.
    pub fn view(&self) -> View {
        let inner = self.inner();

        if inner.source.is_none() {
            return View::Empty;
        }

        match &inner.state {
            FetchState::Pending => View::Loading,
            FetchState::Failed(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    GENERIC_LOAD_ERROR.to_string()
                } else {
                    message
                };
                View::Error { message }
            }
            FetchState::Ready(handle) => View::Player(PlayerSurface {
                src: handle.src().to_string(),
                content_type: handle.content_type().to_string(),
                auto_play: self.options.auto_play,
                controls: self.options.controls,
                muted: self.options.muted,
                looping: self.options.looping,
                class_name: self.options.class_name.clone(),
            }),
        }
    }
}

impl Drop for VideoPresenter {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(source) = inner.source.take() {
            self.fetcher.invalidate(&source.bucket, &source.key);
        }
        // The held handle drops with the state.
        inner.state = FetchState::Pending;
    }
}
