//! Playback dispatcher — sends one call to the selected device and
//! reconciles the state it reports.
//!
//! Dispatch is blocking: it talks to the device synchronously and sleeps
//! through the settle and verify waits. Callers run it on the blocking pool.

use std::thread;
use std::time::Duration;

use minaret_domain::call::CallVariant;
use minaret_domain::device::{MediaRequest, PlayerState};
use minaret_domain::id::DispatchId;
use minaret_domain::playback::{DispatchOutcome, PlaybackUrls};

use crate::ports::{DeviceGateway, DeviceHandle, LogSink};
use crate::selection::SelectedDevice;

/// Waits between loading media and reading back the player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTimings {
    /// Wait after loading the media before the first state read.
    pub settle: Duration,
    /// Wait after a forced play before the final state read.
    pub verify: Duration,
}

impl Default for SettleTimings {
    fn default() -> Self {
        Self {
            settle: Duration::from_secs(5),
            verify: Duration::from_secs(2),
        }
    }
}

/// Plays calls on whichever device is currently selected.
pub struct PlaybackDispatcher<G, L> {
    gateway: G,
    log: L,
    urls: PlaybackUrls,
    timings: SettleTimings,
    selection: SelectedDevice,
}

impl<G, L> PlaybackDispatcher<G, L>
where
    G: DeviceGateway,
    L: LogSink,
{
    pub fn new(
        gateway: G,
        log: L,
        urls: PlaybackUrls,
        timings: SettleTimings,
        selection: SelectedDevice,
    ) -> Self {
        Self {
            gateway,
            log,
            urls,
            timings,
            selection,
        }
    }

    /// The device cell this dispatcher reads on every dispatch.
    #[must_use]
    pub fn selection(&self) -> &SelectedDevice {
        &self.selection
    }

    #[must_use]
    pub fn urls(&self) -> &PlaybackUrls {
        &self.urls
    }

    /// Ask the gateway for every device currently on the network.
    pub fn list_device_names(&self) -> Vec<String> {
        self.gateway.list_device_names()
    }

    /// Play `call` on the selected device.
    ///
    /// Resolves the device afresh, loads the call's recording, waits for it
    /// to settle and forces playback once if the device reports `IDLE` or
    /// `UNKNOWN`. Every outcome is logged; nothing is retried.
    #[tracing::instrument(skip(self), fields(dispatch_id = %DispatchId::new()))]
    pub fn dispatch(&self, call: CallVariant) -> DispatchOutcome {
        let Some(device) = self.selection.get() else {
            self.log
                .error("No device selected. Please select a device first.");
            return DispatchOutcome::NoDeviceSelected;
        };

        let mut handle = match self.gateway.resolve(&device) {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                self.log.error(format!(
                    "Could not find '{device}' on the network. Ensure it is on and connected."
                ));
                return DispatchOutcome::DeviceNotFound { device };
            }
            Err(err) => {
                self.log
                    .error(format!("Could not connect to '{device}': {err}"));
                return DispatchOutcome::Failed {
                    reason: err.to_string(),
                    device,
                };
            }
        };

        let request = MediaRequest::mp3(self.urls.url_for(call));
        self.log.info(format!(
            "Sending {} call to {}...",
            call.resource().label(),
            handle.name()
        ));
        tracing::debug!(url = %request.url, "loading media");

        if let Err(err) = handle.play_media(&request) {
            self.log
                .error(format!("Error playing {} call: {err}", call.title()));
            return DispatchOutcome::Failed {
                reason: err.to_string(),
                device,
            };
        }

        self.log.info("Waiting for the device to start playing...");
        thread::sleep(self.timings.settle);
        let mut state = self.read_state(&mut handle);
        self.log.info(format!("Device status: {state}"));

        if state.needs_forced_start() {
            self.log.warn("Device is idle. Forcing playback...");
            if let Err(err) = handle.force_play() {
                self.log.warn(format!("Forced play failed: {err}"));
            }
            thread::sleep(self.timings.verify);
            state = self.read_state(&mut handle);
        }

        self.log.info(format!("Final status: {state}"));
        if state == PlayerState::Playing {
            self.log
                .info(format!("{} call is now playing on {device}.", call.title()));
            DispatchOutcome::Playing
        } else {
            self.log.warn(format!(
                "Device did not start playing. Final status: {state}"
            ));
            DispatchOutcome::NotPlaying { state }
        }
    }

    fn read_state(&self, handle: &mut G::Handle) -> PlayerState {
        handle.player_state().unwrap_or_else(|err| {
            self.log.warn(format!("Could not read player status: {err}"));
            PlayerState::Unknown
        })
    }
}
