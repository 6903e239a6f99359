//! The typed command model
//!
//! Every inbound wire message that the translator understands becomes
//! exactly one [`Command`]: a closed variant set with the target index and a
//! validated payload baked in, plus a provenance tag naming the protocol it
//! arrived from. Commands are immutable once constructed; all payload
//! clamping happens at parse time, so downstream code never re-validates.

use serde::{Deserialize, Serialize};

use zonehub_state::{ClientIndex, ZoneIndex};

/// Protocol a command originated from
///
/// Retained for logging and loop prevention, so a state change triggered by
/// one protocol does not re-trigger itself through its own outbound path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandSource {
    /// Generated inside the hub itself
    Internal,
    /// Pub/sub message bus
    MessageBus,
    /// Building-automation bus
    AutomationBus,
    /// HTTP API
    Api,
}

impl CommandSource {
    /// Stable lowercase name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandSource::Internal => "internal",
            CommandSource::MessageBus => "message-bus",
            CommandSource::AutomationBus => "automation-bus",
            CommandSource::Api => "api",
        }
    }
}

/// A parsed, validated command with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Protocol that originated this command
    pub source: CommandSource,
    /// What to do
    pub body: CommandBody,
}

impl Command {
    /// Construct a command
    pub fn new(source: CommandSource, body: CommandBody) -> Self {
        Self { source, body }
    }

    /// Zone this command targets, if any
    pub fn zone(&self) -> Option<ZoneIndex> {
        self.body.zone()
    }

    /// Client this command targets, if any
    pub fn client(&self) -> Option<ClientIndex> {
        self.body.client()
    }
}

/// The closed set of operations the hub understands
///
/// Toggle variants carry no value: the translator is stateless, so
/// resolving a toggle against current state is deferred to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandBody {
    // ===== Zone transport =====
    /// Start or resume playback
    Play { zone: ZoneIndex },
    /// Play a media URL directly
    PlayUrl { zone: ZoneIndex, url: String },
    /// Pause playback
    Pause { zone: ZoneIndex },
    /// Stop playback
    Stop { zone: ZoneIndex },

    // ===== Zone volume / mute =====
    /// Set absolute zone volume (already clamped to 0-100)
    SetZoneVolume { zone: ZoneIndex, volume: u8 },
    /// Raise zone volume by a step (1-50)
    ZoneVolumeUp { zone: ZoneIndex, step: u8 },
    /// Lower zone volume by a step (1-50)
    ZoneVolumeDown { zone: ZoneIndex, step: u8 },
    /// Set zone mute
    SetZoneMute { zone: ZoneIndex, muted: bool },
    /// Toggle zone mute
    ToggleZoneMute { zone: ZoneIndex },

    // ===== Zone track =====
    /// Jump to a 1-based track index
    SetTrack { zone: ZoneIndex, track: u32 },
    /// Advance to the next track
    NextTrack { zone: ZoneIndex },
    /// Return to the previous track
    PreviousTrack { zone: ZoneIndex },
    /// Set track repeat
    SetTrackRepeat { zone: ZoneIndex, enabled: bool },
    /// Toggle track repeat
    ToggleTrackRepeat { zone: ZoneIndex },

    // ===== Zone playlist =====
    /// Jump to a 1-based playlist index
    SetPlaylist { zone: ZoneIndex, playlist: u32 },
    /// Advance to the next playlist
    NextPlaylist { zone: ZoneIndex },
    /// Return to the previous playlist
    PreviousPlaylist { zone: ZoneIndex },
    /// Set playlist repeat
    SetPlaylistRepeat { zone: ZoneIndex, enabled: bool },
    /// Toggle playlist repeat
    TogglePlaylistRepeat { zone: ZoneIndex },

    // ===== Zone shuffle / position =====
    /// Set shuffle
    SetShuffle { zone: ZoneIndex, enabled: bool },
    /// Toggle shuffle
    ToggleShuffle { zone: ZoneIndex },
    /// Seek to an absolute position in milliseconds
    SeekPosition { zone: ZoneIndex, position_ms: u64 },
    /// Seek to a progress fraction (already clamped to 0.0-1.0)
    SeekProgress { zone: ZoneIndex, progress: f64 },

    // ===== Client =====
    /// Set absolute client volume (already clamped to 0-100)
    SetClientVolume { client: ClientIndex, volume: u8 },
    /// Raise client volume by a step (1-50)
    ClientVolumeUp { client: ClientIndex, step: u8 },
    /// Lower client volume by a step (1-50)
    ClientVolumeDown { client: ClientIndex, step: u8 },
    /// Set client mute
    SetClientMute { client: ClientIndex, muted: bool },
    /// Toggle client mute
    ToggleClientMute { client: ClientIndex },
    /// Set client latency in milliseconds (already clamped to 0-10000)
    SetClientLatency { client: ClientIndex, latency_ms: u32 },
    /// Move a client into a zone
    AssignClientZone { client: ClientIndex, zone: ZoneIndex },
}

impl CommandBody {
    /// Zone this operation targets, if any
    pub fn zone(&self) -> Option<ZoneIndex> {
        use CommandBody::*;
        match self {
            Play { zone }
            | PlayUrl { zone, .. }
            | Pause { zone }
            | Stop { zone }
            | SetZoneVolume { zone, .. }
            | ZoneVolumeUp { zone, .. }
            | ZoneVolumeDown { zone, .. }
            | SetZoneMute { zone, .. }
            | ToggleZoneMute { zone }
            | SetTrack { zone, .. }
            | NextTrack { zone }
            | PreviousTrack { zone }
            | SetTrackRepeat { zone, .. }
            | ToggleTrackRepeat { zone }
            | SetPlaylist { zone, .. }
            | NextPlaylist { zone }
            | PreviousPlaylist { zone }
            | SetPlaylistRepeat { zone, .. }
            | TogglePlaylistRepeat { zone }
            | SetShuffle { zone, .. }
            | ToggleShuffle { zone }
            | SeekPosition { zone, .. }
            | SeekProgress { zone, .. }
            | AssignClientZone { zone, .. } => Some(*zone),
            _ => None,
        }
    }

    /// Client this operation targets, if any
    pub fn client(&self) -> Option<ClientIndex> {
        use CommandBody::*;
        match self {
            SetClientVolume { client, .. }
            | ClientVolumeUp { client, .. }
            | ClientVolumeDown { client, .. }
            | SetClientMute { client, .. }
            | ToggleClientMute { client }
            | SetClientLatency { client, .. }
            | AssignClientZone { client, .. } => Some(*client),
            _ => None,
        }
    }
}
