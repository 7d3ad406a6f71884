//! Device — what a playback device reports and what we ask it to play.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIME type sent with every call recording.
pub const MP3_MIME_TYPE: &str = "audio/mp3";

/// Player state as reported by a playback device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerState {
    Playing,
    Paused,
    Buffering,
    Idle,
    #[default]
    Unknown,
}

impl PlayerState {
    /// Whether the device needs an explicit play command to get going.
    #[must_use]
    pub fn needs_forced_start(self) -> bool {
        matches!(self, Self::Idle | Self::Unknown)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Playing => "PLAYING",
            Self::Paused => "PAUSED",
            Self::Buffering => "BUFFERING",
            Self::Idle => "IDLE",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// A request to load and play a media URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRequest {
    pub url: String,
    pub mime_type: String,
    pub autoplay: bool,
}

impl MediaRequest {
    /// An autoplaying MP3 request for `url`.
    #[must_use]
    pub fn mp3(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: MP3_MIME_TYPE.to_string(),
            autoplay: true,
        }
    }
}
