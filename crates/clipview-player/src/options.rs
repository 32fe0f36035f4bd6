//! Playback surface configuration.

/// Recognized playback options, each independently togglable.
///
/// Defaults match a plain embedded player: controls shown, nothing else on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOptions {
    /// Start playback without an explicit user action.
    pub auto_play: bool,
    /// Expose play/pause/seek UI.
    pub controls: bool,
    /// Silence audio.
    pub muted: bool,
    /// Restart on completion.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Style passthrough for the embedding application.
    pub class_name: String,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        PlayerOptions {
            auto_play: false,
            controls: true,
            muted: false,
            looping: false,
            class_name: String::new(),
        }
    }
}
