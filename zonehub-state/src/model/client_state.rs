//! Client state value type

use serde::{Deserialize, Serialize};

use super::{ClientIndex, ZoneIndex, MAX_VOLUME};

/// Highest accepted client latency in milliseconds
pub const MAX_LATENCY_MS: u32 = 10_000;

/// Complete state of one playback endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Stable client index
    pub index: ClientIndex,
    /// Display name
    pub name: String,
    /// Volume percentage, 0-100
    pub volume: u8,
    /// Mute flag
    pub muted: bool,
    /// Playback latency compensation in milliseconds
    pub latency_ms: u32,
    /// Whether the endpoint is currently connected
    pub connected: bool,
    /// Zone this client is assigned to, if any
    pub zone: Option<ZoneIndex>,
}

impl ClientState {
    /// Create a fresh, disconnected client with sensible defaults
    pub fn new(index: ClientIndex, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            volume: 50,
            muted: false,
            latency_ms: 0,
            connected: false,
            zone: None,
        }
    }

    /// Set volume, clamped to 0-100
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Set latency, clamped to 0-10000 ms
    pub fn set_latency(&mut self, latency_ms: u32) {
        self.latency_ms = latency_ms.min(MAX_LATENCY_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let client = ClientState::new(ClientIndex::new(1), "Kitchen Speaker");
        assert!(!client.connected);
        assert!(client.zone.is_none());
        assert_eq!(client.latency_ms, 0);
    }

    #[test]
    fn test_clamping() {
        let mut client = ClientState::new(ClientIndex::new(1), "Test");
        client.set_volume(180);
        client.set_latency(60_000);
        assert_eq!(client.volume, 100);
        assert_eq!(client.latency_ms, MAX_LATENCY_MS);
    }
}
