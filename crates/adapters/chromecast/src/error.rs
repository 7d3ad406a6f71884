//! Chromecast-specific error type.

use minaret_domain::error::MinaretError;

/// Errors originating from discovery or the cast protocol.
#[derive(Debug, thiserror::Error)]
pub enum ChromecastError {
    /// The mDNS daemon could not be started or queried.
    #[error("mDNS discovery failed")]
    Discovery(#[from] mdns_sd::Error),

    /// The TLS control channel to the device could not be opened.
    #[error("cannot connect to {device}")]
    Connect {
        device: String,
        #[source]
        source: rust_cast::errors::Error,
    },

    /// The device rejected or failed a command.
    #[error("{command} failed")]
    Command {
        command: &'static str,
        #[source]
        source: rust_cast::errors::Error,
    },

    /// The device has no media session to command.
    #[error("no media session on {0}")]
    NoMediaSession(String),
}

impl From<ChromecastError> for MinaretError {
    fn from(err: ChromecastError) -> Self {
        Self::Device(Box::new(err))
    }
}
