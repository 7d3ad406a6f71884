//! Playback — where each recording lives and how a dispatch ended.

use serde::{Deserialize, Serialize};

use crate::call::{AudioResource, CallVariant};
use crate::device::PlayerState;

/// Network-resolvable URLs of the two call recordings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackUrls {
    pub regular: String,
    pub fajr: String,
}

impl PlaybackUrls {
    /// Build both URLs under `base` (e.g. `http://192.168.1.20:5000`).
    #[must_use]
    pub fn under(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            regular: format!("{base}/adhan"),
            fajr: format!("{base}/fajradhan"),
        }
    }

    /// URL of the recording `call` uses.
    #[must_use]
    pub fn url_for(&self, call: CallVariant) -> &str {
        match call.resource() {
            AudioResource::Fajr => &self.fajr,
            AudioResource::Regular => &self.regular,
        }
    }
}

/// How one dispatch ended. Every outcome has already been logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The device reported `PLAYING`.
    Playing,
    /// The device accepted the media but settled in another state.
    NotPlaying { state: PlayerState },
    /// No device has been selected yet.
    NoDeviceSelected,
    /// The selected device is not on the network.
    DeviceNotFound { device: String },
    /// Connecting to or commanding the device failed.
    Failed { device: String, reason: String },
}

impl DispatchOutcome {
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}
