//! State change events and fan-out
//!
//! Every committed mutation produces one typed [`StateChange`]. Each change
//! carries a [`StatusKind`] tag, a plain enum with a stable wire id that
//! protocol adapters use to route events through lookup tables instead of
//! reflection.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::{
    ClientIndex, ClientState, PlaybackState, PlaylistInfo, TrackInfo, ZoneIndex, ZoneState,
};
use crate::snapshot::HubSnapshot;

// ============================================================================
// StatusKind
// ============================================================================

/// Routing tag identifying the field group a [`StateChange`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Zone volume
    ZoneVolume,
    /// Zone mute flag
    ZoneMute,
    /// Zone transport state
    Playback,
    /// Zone current track
    Track,
    /// Zone current playlist
    Playlist,
    /// Zone playback position/progress
    Position,
    /// Zone repeat flags
    Repeat,
    /// Zone shuffle flag
    Shuffle,
    /// Zone client assignments
    ZoneClients,
    /// Catch-all: full zone state
    ZoneState,
    /// Client volume
    ClientVolume,
    /// Client mute flag
    ClientMute,
    /// Client latency
    ClientLatency,
    /// Client connection flag
    ClientConnected,
    /// Client zone assignment
    ClientZone,
    /// Catch-all: full client state
    ClientState,
    /// A whole-store update was rejected by validation
    ValidationFailed,
}

impl StatusKind {
    /// All kinds, for eagerly wiring one channel per kind
    pub const ALL: &'static [StatusKind] = &[
        StatusKind::ZoneVolume,
        StatusKind::ZoneMute,
        StatusKind::Playback,
        StatusKind::Track,
        StatusKind::Playlist,
        StatusKind::Position,
        StatusKind::Repeat,
        StatusKind::Shuffle,
        StatusKind::ZoneClients,
        StatusKind::ZoneState,
        StatusKind::ClientVolume,
        StatusKind::ClientMute,
        StatusKind::ClientLatency,
        StatusKind::ClientConnected,
        StatusKind::ClientZone,
        StatusKind::ClientState,
        StatusKind::ValidationFailed,
    ];

    /// Stable wire id used by adapters for routing
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::ZoneVolume => "VOLUME_STATUS",
            StatusKind::ZoneMute => "MUTE_STATUS",
            StatusKind::Playback => "PLAYBACK_STATUS",
            StatusKind::Track => "TRACK_STATUS",
            StatusKind::Playlist => "PLAYLIST_STATUS",
            StatusKind::Position => "POSITION_STATUS",
            StatusKind::Repeat => "REPEAT_STATUS",
            StatusKind::Shuffle => "SHUFFLE_STATUS",
            StatusKind::ZoneClients => "ZONE_CLIENTS_STATUS",
            StatusKind::ZoneState => "ZONE_STATE_STATUS",
            StatusKind::ClientVolume => "CLIENT_VOLUME_STATUS",
            StatusKind::ClientMute => "CLIENT_MUTE_STATUS",
            StatusKind::ClientLatency => "CLIENT_LATENCY_STATUS",
            StatusKind::ClientConnected => "CLIENT_CONNECTED_STATUS",
            StatusKind::ClientZone => "CLIENT_ZONE_STATUS",
            StatusKind::ClientState => "CLIENT_STATE_STATUS",
            StatusKind::ValidationFailed => "VALIDATION_FAILED",
        }
    }
}

// ============================================================================
// StateChange
// ============================================================================

/// A state change event emitted after a mutation commits
///
/// Subscribers receive the target index and the new value, never a diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// Zone volume changed
    ZoneVolumeChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New volume percentage
        volume: u8,
    },

    /// Zone mute flag changed
    ZoneMuteChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New mute state
        muted: bool,
    },

    /// Zone transport state changed
    PlaybackChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New playback state
        playback: PlaybackState,
    },

    /// Zone current track changed
    TrackChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New track, if any
        track: Option<TrackInfo>,
    },

    /// Zone current playlist changed
    PlaylistChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New playlist, if any
        playlist: Option<PlaylistInfo>,
    },

    /// Zone playback position changed (debounced per zone)
    PositionChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New position in milliseconds
        position_ms: u64,
        /// New progress, 0.0-1.0
        progress: f64,
    },

    /// Zone repeat flags changed
    RepeatChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New track-repeat flag
        track_repeat: bool,
        /// New playlist-repeat flag
        playlist_repeat: bool,
    },

    /// Zone shuffle flag changed
    ShuffleChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New shuffle flag
        shuffle: bool,
    },

    /// Zone client assignments changed
    ZoneClientsChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// New set of assigned clients
        clients: BTreeSet<ClientIndex>,
    },

    /// Catch-all: a zone's state changed in some way
    ZoneStateChanged {
        /// Zone that changed
        zone: ZoneIndex,
        /// Full post-commit state
        state: ZoneState,
    },

    /// Client volume changed
    ClientVolumeChanged {
        /// Client that changed
        client: ClientIndex,
        /// New volume percentage
        volume: u8,
    },

    /// Client mute flag changed
    ClientMuteChanged {
        /// Client that changed
        client: ClientIndex,
        /// New mute state
        muted: bool,
    },

    /// Client latency changed
    ClientLatencyChanged {
        /// Client that changed
        client: ClientIndex,
        /// New latency in milliseconds
        latency_ms: u32,
    },

    /// Client connection flag changed
    ClientConnectedChanged {
        /// Client that changed
        client: ClientIndex,
        /// New connection state
        connected: bool,
    },

    /// Client zone assignment changed
    ClientZoneChanged {
        /// Client that changed
        client: ClientIndex,
        /// New zone assignment, if any
        zone: Option<ZoneIndex>,
    },

    /// Catch-all: a client's state changed in some way
    ClientStateChanged {
        /// Client that changed
        client: ClientIndex,
        /// Full post-commit state
        state: ClientState,
    },

    /// A whole-store update produced an invalid snapshot and was rejected
    ValidationFailed {
        /// The snapshot that failed validation
        rejected: HubSnapshot,
        /// Human-readable reason
        reason: String,
    },
}

impl StateChange {
    /// Routing tag for this change
    pub fn status(&self) -> StatusKind {
        match self {
            StateChange::ZoneVolumeChanged { .. } => StatusKind::ZoneVolume,
            StateChange::ZoneMuteChanged { .. } => StatusKind::ZoneMute,
            StateChange::PlaybackChanged { .. } => StatusKind::Playback,
            StateChange::TrackChanged { .. } => StatusKind::Track,
            StateChange::PlaylistChanged { .. } => StatusKind::Playlist,
            StateChange::PositionChanged { .. } => StatusKind::Position,
            StateChange::RepeatChanged { .. } => StatusKind::Repeat,
            StateChange::ShuffleChanged { .. } => StatusKind::Shuffle,
            StateChange::ZoneClientsChanged { .. } => StatusKind::ZoneClients,
            StateChange::ZoneStateChanged { .. } => StatusKind::ZoneState,
            StateChange::ClientVolumeChanged { .. } => StatusKind::ClientVolume,
            StateChange::ClientMuteChanged { .. } => StatusKind::ClientMute,
            StateChange::ClientLatencyChanged { .. } => StatusKind::ClientLatency,
            StateChange::ClientConnectedChanged { .. } => StatusKind::ClientConnected,
            StateChange::ClientZoneChanged { .. } => StatusKind::ClientZone,
            StateChange::ClientStateChanged { .. } => StatusKind::ClientState,
            StateChange::ValidationFailed { .. } => StatusKind::ValidationFailed,
        }
    }

    /// Zone this change concerns, if any
    pub fn zone(&self) -> Option<ZoneIndex> {
        match self {
            StateChange::ZoneVolumeChanged { zone, .. }
            | StateChange::ZoneMuteChanged { zone, .. }
            | StateChange::PlaybackChanged { zone, .. }
            | StateChange::TrackChanged { zone, .. }
            | StateChange::PlaylistChanged { zone, .. }
            | StateChange::PositionChanged { zone, .. }
            | StateChange::RepeatChanged { zone, .. }
            | StateChange::ShuffleChanged { zone, .. }
            | StateChange::ZoneClientsChanged { zone, .. }
            | StateChange::ZoneStateChanged { zone, .. } => Some(*zone),
            _ => None,
        }
    }

    /// Client this change concerns, if any
    pub fn client(&self) -> Option<ClientIndex> {
        match self {
            StateChange::ClientVolumeChanged { client, .. }
            | StateChange::ClientMuteChanged { client, .. }
            | StateChange::ClientLatencyChanged { client, .. }
            | StateChange::ClientConnectedChanged { client, .. }
            | StateChange::ClientZoneChanged { client, .. }
            | StateChange::ClientStateChanged { client, .. } => Some(*client),
            _ => None,
        }
    }
}

// ============================================================================
// EventBus
// ============================================================================

/// Per-field-group event fan-out
///
/// One broadcast channel per [`StatusKind`] plus a catch-all firehose.
/// Emission is synchronous: by the time the mutating call returns, every
/// currently subscribed receiver holds the event in its queue.
pub struct EventBus {
    by_kind: HashMap<StatusKind, broadcast::Sender<StateChange>>,
    all: broadcast::Sender<StateChange>,
}

const CHANNEL_CAPACITY: usize = 256;

impl EventBus {
    /// Create a bus with one channel per status kind
    pub fn new() -> Self {
        let by_kind = StatusKind::ALL
            .iter()
            .map(|kind| (*kind, broadcast::channel(CHANNEL_CAPACITY).0))
            .collect();
        let (all, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { by_kind, all }
    }

    /// Subscribe to one field group
    pub fn subscribe(&self, kind: StatusKind) -> broadcast::Receiver<StateChange> {
        // Every kind is wired in new(), so the lookup cannot miss
        self.by_kind[&kind].subscribe()
    }

    /// Subscribe to every change
    pub fn subscribe_all(&self) -> broadcast::Receiver<StateChange> {
        self.all.subscribe()
    }

    /// Emit a change to its field-group channel and the firehose
    ///
    /// Send failures mean no receiver is currently subscribed, which is
    /// fine; the store does not require listeners.
    pub fn emit(&self, change: StateChange) {
        let _ = self.by_kind[&change.status()].send(change.clone());
        let _ = self.all.send(change);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tags() {
        let change = StateChange::ZoneVolumeChanged {
            zone: ZoneIndex::new(1),
            volume: 30,
        };
        assert_eq!(change.status(), StatusKind::ZoneVolume);
        assert_eq!(change.status().as_str(), "VOLUME_STATUS");
        assert_eq!(change.zone(), Some(ZoneIndex::new(1)));
        assert_eq!(change.client(), None);
    }

    #[test]
    fn test_every_kind_has_distinct_wire_id() {
        let mut seen = std::collections::HashSet::new();
        for kind in StatusKind::ALL {
            assert!(seen.insert(kind.as_str()), "duplicate id {}", kind.as_str());
        }
    }

    #[test]
    fn test_bus_routes_by_kind() {
        let bus = EventBus::new();
        let mut volume_rx = bus.subscribe(StatusKind::ZoneVolume);
        let mut mute_rx = bus.subscribe(StatusKind::ZoneMute);
        let mut all_rx = bus.subscribe_all();

        bus.emit(StateChange::ZoneVolumeChanged {
            zone: ZoneIndex::new(1),
            volume: 42,
        });

        assert!(volume_rx.try_recv().is_ok());
        assert!(mute_rx.try_recv().is_err());
        assert!(all_rx.try_recv().is_ok());
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.emit(StateChange::ShuffleChanged {
            zone: ZoneIndex::new(2),
            shuffle: true,
        });
    }
}
