//! Virtual speaker — a simulated playback device with scripted behaviour.

use minaret_domain::device::{MediaRequest, PlayerState};

/// How a virtual speaker reacts to playback commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerBehaviour {
    /// Starts playing as soon as media is loaded.
    Responsive,
    /// Stays idle after loading until an explicit play command.
    NeedsNudge,
    /// Never leaves idle.
    Unresponsive,
}

/// A simulated speaker.
#[derive(Debug, Clone)]
pub struct VirtualSpeaker {
    pub(crate) name: String,
    pub(crate) behaviour: SpeakerBehaviour,
    pub(crate) online: bool,
    state: PlayerState,
    played: Vec<MediaRequest>,
    force_plays: usize,
}

impl VirtualSpeaker {
    pub fn new(name: impl Into<String>, behaviour: SpeakerBehaviour) -> Self {
        Self {
            name: name.into(),
            behaviour,
            online: true,
            state: PlayerState::Unknown,
            played: Vec::new(),
            force_plays: 0,
        }
    }

    pub(crate) fn load(&mut self, request: &MediaRequest) {
        self.played.push(request.clone());
        self.state = match self.behaviour {
            SpeakerBehaviour::Responsive if request.autoplay => PlayerState::Playing,
            SpeakerBehaviour::Responsive => PlayerState::Paused,
            SpeakerBehaviour::NeedsNudge | SpeakerBehaviour::Unresponsive => PlayerState::Idle,
        };
    }

    pub(crate) fn force_play(&mut self) {
        self.force_plays += 1;
        if self.behaviour != SpeakerBehaviour::Unresponsive && !self.played.is_empty() {
            self.state = PlayerState::Playing;
        }
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[must_use]
    pub fn played(&self) -> &[MediaRequest] {
        &self.played
    }

    #[must_use]
    pub fn force_plays(&self) -> usize {
        self.force_plays
    }
}
