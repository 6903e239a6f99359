//! Zone state value type

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ClientIndex, PlaybackState, PlaylistInfo, TrackInfo, ZoneIndex};

/// Highest valid volume percentage
pub const MAX_VOLUME: u8 = 100;

/// Complete state of one audio zone
///
/// A plain value type: mutations happen on a copy which then replaces the
/// previous snapshot in the store. Volume and progress are clamped to their
/// domains by every setter path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Stable zone index
    pub index: ZoneIndex,
    /// Display name
    pub name: String,
    /// Transport state
    pub playback: PlaybackState,
    /// Volume percentage, 0-100
    pub volume: u8,
    /// Mute flag
    pub muted: bool,
    /// Repeat the current track
    pub track_repeat: bool,
    /// Repeat the current playlist
    pub playlist_repeat: bool,
    /// Shuffle flag
    pub shuffle: bool,
    /// Currently loaded playlist, if any
    pub playlist: Option<PlaylistInfo>,
    /// Currently loaded track, if any
    pub track: Option<TrackInfo>,
    /// Playback position in milliseconds
    pub position_ms: u64,
    /// Playback progress, 0.0-1.0
    pub progress: f64,
    /// Indices of clients assigned to this zone
    pub clients: BTreeSet<ClientIndex>,
}

impl ZoneState {
    /// Create a fresh, stopped zone with sensible defaults
    pub fn new(index: ZoneIndex, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            playback: PlaybackState::default(),
            volume: 50,
            muted: false,
            track_repeat: false,
            playlist_repeat: false,
            shuffle: false,
            playlist: None,
            track: None,
            position_ms: 0,
            progress: 0.0,
            clients: BTreeSet::new(),
        }
    }

    /// Set volume, clamped to 0-100
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
    }

    /// Set position and progress together, clamping progress to 0.0-1.0
    ///
    /// Position and progress come from the same playback clock; callers pass
    /// both so they stay mutually consistent.
    pub fn set_position(&mut self, position_ms: u64, progress: f64) {
        self.position_ms = position_ms;
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Derive position from progress and the current track duration
    ///
    /// Returns `None` when no track duration is known.
    pub fn position_for_progress(&self, progress: f64) -> Option<u64> {
        let duration = self.track.as_ref()?.duration_ms?;
        let progress = progress.clamp(0.0, 1.0);
        Some((duration as f64 * progress).round() as u64)
    }
}
