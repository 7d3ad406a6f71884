//! # minaret-adapter-chromecast
//!
//! [`DeviceGateway`] for Google Cast devices.
//!
//! Devices are found by browsing mDNS for `_googlecast._tcp.local.`. A
//! resolved handle holds an open TLS control channel with the Default Media
//! Receiver launched, and is dropped at the end of each dispatch.
//!
//! All calls block. They are expected to run on a blocking worker.
//!
//! ## Dependency rule
//!
//! Depends on `minaret-app` (port traits) and `minaret-domain` only.

pub mod config;
mod discovery;
mod error;
mod handle;

use minaret_app::ports::DeviceGateway;
use minaret_domain::error::MinaretError;

pub use config::ChromecastConfig;
pub use discovery::CastService;
pub use error::ChromecastError;
pub use handle::ChromecastHandle;

/// Gateway discovering and connecting to cast devices on the local network.
#[derive(Debug, Clone, Default)]
pub struct ChromecastGateway {
    config: ChromecastConfig,
}

impl ChromecastGateway {
    #[must_use]
    pub fn new(config: ChromecastConfig) -> Self {
        Self { config }
    }

    /// Run one discovery pass.
    ///
    /// # Errors
    ///
    /// Returns [`ChromecastError::Discovery`] if mDNS is unavailable.
    pub fn discover(&self) -> Result<Vec<CastService>, ChromecastError> {
        discovery::discover(self.config.discovery_timeout())
    }
}

impl DeviceGateway for ChromecastGateway {
    type Handle = ChromecastHandle;

    fn list_device_names(&self) -> Vec<String> {
        match self.discover() {
            Ok(services) => services.into_iter().map(|service| service.name).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "device discovery failed");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn resolve(&self, name: &str) -> Result<Option<ChromecastHandle>, MinaretError> {
        let services = self.discover()?;
        let Some(service) = services.into_iter().find(|service| service.name == name) else {
            return Ok(None);
        };
        Ok(Some(ChromecastHandle::connect(&service)?))
    }
}
