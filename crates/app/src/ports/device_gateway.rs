//! Device gateway port — discovery, connection and playback commands.
//!
//! The gateway is blocking: device protocols are driven from a worker on the
//! blocking pool, never from the scheduler's own task. Handles are transient
//! and are re-resolved for every dispatch.

use std::sync::Arc;

use minaret_domain::device::{MediaRequest, PlayerState};
use minaret_domain::error::MinaretError;

/// A connected, ready playback device, scoped to one dispatch.
pub trait DeviceHandle {
    /// Name the device was resolved by.
    fn name(&self) -> &str;

    /// Load `request` on the device.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::Device`] if the device rejects the command or
    /// the connection drops.
    fn play_media(&mut self, request: &MediaRequest) -> Result<(), MinaretError>;

    /// Issue an explicit play command for the loaded media.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::Device`] if the command could not be sent.
    fn force_play(&mut self) -> Result<(), MinaretError>;

    /// Read the device's current player state.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::Device`] if the status could not be read.
    fn player_state(&mut self) -> Result<PlayerState, MinaretError>;
}

/// Capability to find playback devices on the network.
pub trait DeviceGateway: Send + Sync {
    type Handle: DeviceHandle;

    /// Query the network once and return every device name found.
    ///
    /// Discovery failures yield an empty list.
    fn list_device_names(&self) -> Vec<String>;

    /// Connect to the device called exactly `name` and wait until it is ready.
    ///
    /// Returns `Ok(None)` when no device by that name is on the network.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::Device`] if the device was found but the
    /// connection could not be established.
    fn resolve(&self, name: &str) -> Result<Option<Self::Handle>, MinaretError>;
}

impl<T: DeviceGateway> DeviceGateway for Arc<T> {
    type Handle = T::Handle;

    fn list_device_names(&self) -> Vec<String> {
        (**self).list_device_names()
    }

    fn resolve(&self, name: &str) -> Result<Option<Self::Handle>, MinaretError> {
        (**self).resolve(name)
    }
}
