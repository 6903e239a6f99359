//! Command dispatch
//!
//! One match over the command set, each arm exactly one store mutation, so
//! a command can never leave the store partially applied. Toggles and
//! relative steps resolve against current state inside the store's atomic
//! read-modify-write, not here; the translator stays stateless and the
//! dispatcher stays race-free.

use tracing::debug;

use zonehub_state::{HubStore, PlaybackState, PlaylistInfo, StateError, TrackInfo, ZoneIndex};

use crate::command::{Command, CommandBody};

/// Routes typed commands to store mutations
#[derive(Clone)]
pub struct Dispatcher {
    store: HubStore,
}

impl Dispatcher {
    /// Create a dispatcher over a shared store handle
    pub fn new(store: HubStore) -> Self {
        Self { store }
    }

    /// The store this dispatcher mutates
    pub fn store(&self) -> &HubStore {
        &self.store
    }

    /// Execute one command
    ///
    /// `SeekPosition` and `SeekProgress` go through the debounced position
    /// path and therefore need a Tokio runtime.
    pub fn dispatch(&self, command: &Command) -> Result<(), StateError> {
        debug!(source = command.source.as_str(), body = ?command.body, "dispatching");

        use CommandBody::*;
        match &command.body {
            // ===== Zone transport =====
            Play { zone } => self.store.update_playback(*zone, PlaybackState::Playing),
            PlayUrl { zone, url } => {
                // The stream URL itself is the audio backend's concern; the
                // store only reflects the transport state
                debug!(%zone, url, "direct URL playback requested");
                self.store.update_playback(*zone, PlaybackState::Playing)
            }
            Pause { zone } => self.store.update_playback(*zone, PlaybackState::Paused),
            Stop { zone } => self.store.update_playback(*zone, PlaybackState::Stopped),

            // ===== Zone volume / mute =====
            SetZoneVolume { zone, volume } => self.store.update_zone_volume(*zone, *volume),
            ZoneVolumeUp { zone, step } => self.store.adjust_zone_volume(*zone, *step as i16),
            ZoneVolumeDown { zone, step } => {
                self.store.adjust_zone_volume(*zone, -(*step as i16))
            }
            SetZoneMute { zone, muted } => self.store.update_zone_mute(*zone, *muted),
            ToggleZoneMute { zone } => self.store.toggle_zone_mute(*zone),

            // ===== Zone track =====
            SetTrack { zone, track } => self
                .store
                .update_track(*zone, Some(TrackInfo::at_index(*track))),
            NextTrack { zone } => self.store.advance_track(*zone, 1),
            PreviousTrack { zone } => self.store.advance_track(*zone, -1),
            SetTrackRepeat { zone, enabled } => self.store.update_track_repeat(*zone, *enabled),
            ToggleTrackRepeat { zone } => self.store.toggle_track_repeat(*zone),

            // ===== Zone playlist =====
            SetPlaylist { zone, playlist } => self
                .store
                .update_playlist(*zone, Some(PlaylistInfo::at_index(*playlist))),
            NextPlaylist { zone } => self.store.advance_playlist(*zone, 1),
            PreviousPlaylist { zone } => self.store.advance_playlist(*zone, -1),
            SetPlaylistRepeat { zone, enabled } => {
                self.store.update_playlist_repeat(*zone, *enabled)
            }
            TogglePlaylistRepeat { zone } => self.store.toggle_playlist_repeat(*zone),

            // ===== Zone shuffle / position =====
            SetShuffle { zone, enabled } => self.store.update_shuffle(*zone, *enabled),
            ToggleShuffle { zone } => self.store.toggle_shuffle(*zone),
            SeekPosition { zone, position_ms } => {
                let progress = self.progress_for(*zone, *position_ms);
                self.store.update_position(*zone, *position_ms, progress)
            }
            SeekProgress { zone, progress } => {
                let position_ms = self.position_for(*zone, *progress);
                self.store.update_position(*zone, position_ms, *progress)
            }

            // ===== Client =====
            SetClientVolume { client, volume } => {
                self.store.update_client_volume(*client, *volume)
            }
            ClientVolumeUp { client, step } => {
                self.store.adjust_client_volume(*client, *step as i16)
            }
            ClientVolumeDown { client, step } => {
                self.store.adjust_client_volume(*client, -(*step as i16))
            }
            SetClientMute { client, muted } => self.store.update_client_mute(*client, *muted),
            ToggleClientMute { client } => self.store.toggle_client_mute(*client),
            SetClientLatency { client, latency_ms } => {
                self.store.update_client_latency(*client, *latency_ms)
            }
            AssignClientZone { client, zone } => self.store.assign_client(*client, *zone),
        }
    }

    /// Derive progress from a position using the current track duration
    fn progress_for(&self, zone: ZoneIndex, position_ms: u64) -> f64 {
        self.track_duration(zone)
            .map(|d| (position_ms as f64 / d as f64).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    /// Derive a position from a progress fraction
    fn position_for(&self, zone: ZoneIndex, progress: f64) -> u64 {
        self.track_duration(zone)
            .map(|d| (progress * d as f64).round() as u64)
            .unwrap_or(0)
    }

    fn track_duration(&self, zone: ZoneIndex) -> Option<u64> {
        self.store
            .zone_state(zone)?
            .track
            .as_ref()?
            .duration_ms
            .filter(|d| *d > 0)
    }
}
