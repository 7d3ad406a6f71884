//! # minaret-adapter-virtual
//!
//! Virtual/demo device gateway that provides simulated speakers for testing
//! and demonstration purposes.
//!
//! ## Provided speakers
//!
//! | Speaker | Behaviour |
//! |---------|-----------|
//! | `Living Room Speaker` | Plays as soon as media is loaded |
//! | `Kitchen Display` | Stays idle until an explicit play command |
//! | `Garage Speaker` | Never starts playing |
//!
//! ## Dependency rule
//!
//! Depends on `minaret-app` (port traits) and `minaret-domain` only.

mod speaker;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use minaret_app::ports::{DeviceGateway, DeviceHandle};
use minaret_domain::device::{MediaRequest, PlayerState};
use minaret_domain::error::{MinaretError, NotFoundError};

pub use speaker::{SpeakerBehaviour, VirtualSpeaker};

type Speakers = Arc<Mutex<Vec<VirtualSpeaker>>>;

fn lock(speakers: &Speakers) -> MutexGuard<'_, Vec<VirtualSpeaker>> {
    speakers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Gateway over a set of simulated speakers.
///
/// Cloning shares the same speakers, so a test can keep a clone to inspect
/// what was played.
#[derive(Debug, Clone)]
pub struct VirtualGateway {
    speakers: Speakers,
}

impl Default for VirtualGateway {
    fn default() -> Self {
        Self::empty()
            .with_speaker("Living Room Speaker", SpeakerBehaviour::Responsive)
            .with_speaker("Kitchen Display", SpeakerBehaviour::NeedsNudge)
            .with_speaker("Garage Speaker", SpeakerBehaviour::Unresponsive)
    }
}

impl VirtualGateway {
    /// A gateway with no speakers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            speakers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a speaker, replacing any existing one with the same name.
    #[must_use]
    pub fn with_speaker(self, name: impl Into<String>, behaviour: SpeakerBehaviour) -> Self {
        let speaker = VirtualSpeaker::new(name, behaviour);
        {
            let mut speakers = lock(&self.speakers);
            speakers.retain(|existing| existing.name != speaker.name);
            speakers.push(speaker);
        }
        self
    }

    /// Take a speaker on or off the network.
    ///
    /// # Errors
    ///
    /// Returns [`MinaretError::NotFound`] if no speaker has that name.
    pub fn set_online(&self, name: &str, online: bool) -> Result<(), MinaretError> {
        let mut speakers = lock(&self.speakers);
        let speaker = speakers
            .iter_mut()
            .find(|speaker| speaker.name == name)
            .ok_or_else(|| not_found(name))?;
        speaker.online = online;
        tracing::debug!(speaker = name, online, "virtual speaker availability changed");
        Ok(())
    }

    /// Every media request the named speaker has received.
    #[must_use]
    pub fn played(&self, name: &str) -> Vec<MediaRequest> {
        lock(&self.speakers)
            .iter()
            .find(|speaker| speaker.name == name)
            .map(|speaker| speaker.played().to_vec())
            .unwrap_or_default()
    }

    /// How many explicit play commands the named speaker has received.
    #[must_use]
    pub fn force_play_count(&self, name: &str) -> usize {
        lock(&self.speakers)
            .iter()
            .find(|speaker| speaker.name == name)
            .map_or(0, VirtualSpeaker::force_plays)
    }
}

fn not_found(name: &str) -> MinaretError {
    NotFoundError {
        entity: "Speaker",
        id: name.to_string(),
    }
    .into()
}

impl DeviceGateway for VirtualGateway {
    type Handle = VirtualHandle;

    fn list_device_names(&self) -> Vec<String> {
        lock(&self.speakers)
            .iter()
            .filter(|speaker| speaker.online)
            .map(|speaker| speaker.name.clone())
            .collect()
    }

    fn resolve(&self, name: &str) -> Result<Option<VirtualHandle>, MinaretError> {
        let found = lock(&self.speakers)
            .iter()
            .any(|speaker| speaker.online && speaker.name == name);
        Ok(found.then(|| VirtualHandle {
            name: name.to_string(),
            speakers: Arc::clone(&self.speakers),
        }))
    }
}

/// Connection to one virtual speaker.
pub struct VirtualHandle {
    name: String,
    speakers: Speakers,
}

impl VirtualHandle {
    fn on_speaker<T>(&self, f: impl FnOnce(&mut VirtualSpeaker) -> T) -> Result<T, MinaretError> {
        let mut speakers = lock(&self.speakers);
        let speaker = speakers
            .iter_mut()
            .find(|speaker| speaker.name == self.name && speaker.online)
            .ok_or_else(|| MinaretError::Device(format!("{} went offline", self.name).into()))?;
        Ok(f(speaker))
    }
}

impl DeviceHandle for VirtualHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn play_media(&mut self, request: &MediaRequest) -> Result<(), MinaretError> {
        self.on_speaker(|speaker| speaker.load(request))
    }

    fn force_play(&mut self) -> Result<(), MinaretError> {
        self.on_speaker(VirtualSpeaker::force_play)
    }

    fn player_state(&mut self) -> Result<PlayerState, MinaretError> {
        self.on_speaker(|speaker| speaker.state())
    }
}
