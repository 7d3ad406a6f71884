//! A connected cast device running the Default Media Receiver.

use std::sync::Once;

use rust_cast::CastDevice;
use rust_cast::channels::media::{Media, PlayerState as CastPlayerState, StatusEntry, StreamType};
use rust_cast::channels::receiver::CastDeviceApp;

use minaret_app::ports::DeviceHandle;
use minaret_domain::device::{MediaRequest, PlayerState};
use minaret_domain::error::MinaretError;

use crate::discovery::CastService;
use crate::error::ChromecastError;

const RECEIVER_DESTINATION: &str = "receiver-0";

static CRYPTO_PROVIDER: Once = Once::new();

fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Fails only when another provider is already installed.
        let _ = rustls::crypto::CryptoProvider::install_default(
            rustls::crypto::aws_lc_rs::default_provider(),
        );
    });
}

/// Connection to one cast device, scoped to a single dispatch.
pub struct ChromecastHandle {
    name: String,
    device: CastDevice<'static>,
    transport_id: String,
    session_id: String,
    media_session_id: Option<i32>,
}

impl ChromecastHandle {
    /// Open the control channel and launch the Default Media Receiver.
    pub(crate) fn connect(service: &CastService) -> Result<Self, ChromecastError> {
        install_crypto_provider();
        let connect_err = |source| ChromecastError::Connect {
            device: service.name.clone(),
            source,
        };

        tracing::debug!(device = %service.name, address = %service.address, port = service.port, "connecting");
        let device =
            CastDevice::connect_without_host_verification(service.address.to_string(), service.port)
                .map_err(connect_err)?;
        device
            .connection
            .connect(RECEIVER_DESTINATION)
            .map_err(connect_err)?;
        let app = device
            .receiver
            .launch_app(&CastDeviceApp::DefaultMediaReceiver)
            .map_err(connect_err)?;
        device
            .connection
            .connect(app.transport_id.clone())
            .map_err(connect_err)?;

        Ok(Self {
            name: service.name.clone(),
            device,
            transport_id: app.transport_id,
            session_id: app.session_id,
            media_session_id: None,
        })
    }

    fn media_status(&mut self) -> Result<Option<StatusEntry>, ChromecastError> {
        let status = self
            .device
            .media
            .get_status(self.transport_id.clone(), self.media_session_id)
            .map_err(|source| ChromecastError::Command {
                command: "get status",
                source,
            })?;
        let entry = status.entries.into_iter().next();
        if let Some(entry) = &entry {
            self.media_session_id = Some(entry.media_session_id);
        }
        Ok(entry)
    }
}

fn player_state(state: &CastPlayerState) -> PlayerState {
    match state {
        CastPlayerState::Playing => PlayerState::Playing,
        CastPlayerState::Paused => PlayerState::Paused,
        CastPlayerState::Buffering => PlayerState::Buffering,
        CastPlayerState::Idle => PlayerState::Idle,
    }
}

impl DeviceHandle for ChromecastHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn play_media(&mut self, request: &MediaRequest) -> Result<(), MinaretError> {
        let media = Media {
            content_id: request.url.clone(),
            content_type: request.mime_type.clone(),
            stream_type: StreamType::Buffered,
            duration: None,
            metadata: None,
        };
        let status = self
            .device
            .media
            .load(self.transport_id.clone(), self.session_id.clone(), &media)
            .map_err(|source| ChromecastError::Command {
                command: "load media",
                source,
            })?;
        self.media_session_id = status.entries.first().map(|entry| entry.media_session_id);
        if !request.autoplay {
            tracing::debug!("receiver autoplays loaded media regardless");
        }
        Ok(())
    }

    fn force_play(&mut self) -> Result<(), MinaretError> {
        if self.media_session_id.is_none() {
            self.media_status()?;
        }
        let media_session_id = self
            .media_session_id
            .ok_or_else(|| ChromecastError::NoMediaSession(self.name.clone()))?;
        self.device
            .media
            .play(self.transport_id.clone(), media_session_id)
            .map_err(|source| ChromecastError::Command {
                command: "play",
                source,
            })?;
        Ok(())
    }

    fn player_state(&mut self) -> Result<PlayerState, MinaretError> {
        let entry = self.media_status()?;
        Ok(entry.map_or(PlayerState::Unknown, |entry| {
            player_state(&entry.player_state)
        }))
    }
}
