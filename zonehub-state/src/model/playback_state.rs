//! Playback state enumeration

use serde::{Deserialize, Serialize};

/// Current playback state of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Playback is stopped
    Stopped,
    /// Currently playing audio
    Playing,
    /// Playback is paused
    Paused,
}

impl PlaybackState {
    /// Parse a wire token into a playback state
    ///
    /// Accepts the plain-text transport tokens used on the message bus
    /// (`"play"`/`"playing"`, `"pause"`/`"paused"`, `"stop"`/`"stopped"`),
    /// case-insensitively. Anything else is `None`.
    pub fn from_wire(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "play" | "playing" => Some(PlaybackState::Playing),
            "pause" | "paused" => Some(PlaybackState::Paused),
            "stop" | "stopped" => Some(PlaybackState::Stopped),
            _ => None,
        }
    }

    /// Wire token for outbound payloads
    pub fn as_wire(&self) -> &'static str {
        match self {
            PlaybackState::Playing => "play",
            PlaybackState::Paused => "pause",
            PlaybackState::Stopped => "stop",
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Stopped
    }
}
