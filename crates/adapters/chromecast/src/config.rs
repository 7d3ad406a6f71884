//! Chromecast adapter configuration.

use std::time::Duration;

use serde::Deserialize;

/// mDNS service type advertised by cast devices.
pub const SERVICE_TYPE: &str = "_googlecast._tcp.local.";

/// Port of the cast control channel when none is advertised.
pub const DEFAULT_PORT: u16 = 8009;

/// Settings for discovering and connecting to cast devices.
#[derive(Debug, Clone, Deserialize)]
pub struct ChromecastConfig {
    /// How long one discovery pass listens for mDNS answers (milliseconds).
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,
}

impl Default for ChromecastConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: default_discovery_timeout_ms(),
        }
    }
}

impl ChromecastConfig {
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }
}

fn default_discovery_timeout_ms() -> u64 {
    3000
}
