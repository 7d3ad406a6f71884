//! Call — a named playback event and the audio resource it uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The recognised call variants, in the order they occur during a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallVariant {
    Fajr,
    Maghrib,
    Isha,
}

impl CallVariant {
    /// Every recognised variant.
    pub const ALL: [Self; 3] = [Self::Fajr, Self::Maghrib, Self::Isha];

    /// Lowercase key as used in schedule files and URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
        }
    }

    /// Capitalised name for operator-facing log lines.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Audio resource played for this call. Fajr has its own recording.
    #[must_use]
    pub fn resource(self) -> AudioResource {
        match self {
            Self::Fajr => AudioResource::Fajr,
            Self::Maghrib | Self::Isha => AudioResource::Regular,
        }
    }
}

impl fmt::Display for CallVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|call| call.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownCall(s.to_string()))
    }
}

/// The two audio recordings a call can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioResource {
    Regular,
    Fajr,
}

impl AudioResource {
    /// Label used in log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Fajr => "Fajr",
        }
    }
}
