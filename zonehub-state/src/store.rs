//! The hub state store
//!
//! [`HubStore`] is the single source of truth for zone and client state.
//! It layers domain semantics over [`versioned_store::VersionedStore`]:
//!
//! - granular per-field mutators, each an atomic read-modify-write against
//!   the whole-store snapshot with change detection and exactly one typed
//!   event (plus the catch-all) after commit
//! - optimistic whole-store transforms for multi-entity operations, with
//!   cross-entity validation before commit
//! - per-zone debounced position events
//!
//! Granular and whole-store mutations commit through the same version
//! counter, so a concurrent granular update always makes a whole-store
//! transform retry rather than silently losing either write.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tracing::{debug, trace, warn};

use versioned_store::VersionedStore;

use crate::config::HubConfig;
use crate::debounce::{PositionDebouncer, POSITION_WINDOW};
use crate::error::{Result, StateError};
use crate::events::{EventBus, StateChange, StatusKind};
use crate::model::{
    ClientIndex, ClientState, PlaybackState, PlaylistInfo, TrackInfo, ZoneIndex, ZoneState,
    MAX_LATENCY_MS, MAX_VOLUME,
};
use crate::snapshot::HubSnapshot;

/// Thread-safe, versioned store for all zone and client state
///
/// Cloning shares the underlying state; hand clones to every component that
/// needs the store instead of reaching for globals.
pub struct HubStore {
    store: VersionedStore<HubSnapshot>,
    events: Arc<EventBus>,
    positions: PositionDebouncer,
}

impl HubStore {
    /// Create an empty store with the default 500 ms position window
    pub fn new() -> Self {
        Self::with_position_window(POSITION_WINDOW)
    }

    /// Create an empty store with a custom position coalescing window
    pub fn with_position_window(window: Duration) -> Self {
        let store = VersionedStore::new(HubSnapshot::new());
        let events = Arc::new(EventBus::new());

        let positions = PositionDebouncer::new(window, {
            let events = Arc::clone(&events);
            let store = store.clone();
            Arc::new(move |zone, position_ms, progress| {
                events.emit(StateChange::PositionChanged {
                    zone,
                    position_ms,
                    progress,
                });
                if let Some(state) = store.load().zone(zone).cloned() {
                    events.emit(StateChange::ZoneStateChanged { zone, state });
                }
            })
        });

        Self {
            store,
            events,
            positions,
        }
    }

    /// Create a store seeded from configuration
    ///
    /// Fails with `StateError::Validation` if the configured client→zone
    /// assignments are inconsistent.
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        let snapshot = config.initial_snapshot();
        snapshot.validate().map_err(StateError::Validation)?;
        let hub = Self::new();
        hub.store.replace(snapshot);
        Ok(hub)
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Point-in-time snapshot of the whole store
    pub fn snapshot(&self) -> Arc<HubSnapshot> {
        self.store.load()
    }

    /// Current state of a zone
    pub fn zone_state(&self, zone: ZoneIndex) -> Option<ZoneState> {
        self.store.load().zone(zone).cloned()
    }

    /// Current state of a client
    pub fn client_state(&self, client: ClientIndex) -> Option<ClientState> {
        self.store.load().client(client).cloned()
    }

    /// Store-wide version counter
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    /// Wall-clock time of the last committed mutation
    pub fn updated_at(&self) -> SystemTime {
        self.store.updated_at()
    }

    /// Check cross-entity invariants on the live snapshot
    pub fn validate_current_state(&self) -> bool {
        self.store.load().validate().is_ok()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribe to one field group
    pub fn subscribe(&self, kind: StatusKind) -> tokio::sync::broadcast::Receiver<StateChange> {
        self.events.subscribe(kind)
    }

    /// Subscribe to every change
    pub fn subscribe_all(&self) -> tokio::sync::broadcast::Receiver<StateChange> {
        self.events.subscribe_all()
    }

    // ========================================================================
    // Initialization / full replacement
    // ========================================================================

    /// Establish a zone's initial state without firing events
    ///
    /// Called once per configured index at startup, before protocol traffic.
    pub fn initialize_zone(&self, zone: ZoneIndex, mut state: ZoneState) {
        state.index = zone;
        self.store.modify(|s| {
            s.zones.insert(zone, state.clone());
        });
    }

    /// Establish a client's initial state without firing events
    pub fn initialize_client(&self, client: ClientIndex, mut state: ClientState) {
        state.index = client;
        self.store.modify(|s| {
            s.clients.insert(client, state.clone());
        });
    }

    /// Replace a zone's state wholesale (reset), firing the catch-all event
    pub fn set_zone_state(&self, zone: ZoneIndex, mut state: ZoneState) {
        state.index = zone;
        self.store.modify(|s| {
            s.zones.insert(zone, state.clone());
        });
        self.events.emit(StateChange::ZoneStateChanged { zone, state });
    }

    /// Replace a client's state wholesale (reset), firing the catch-all event
    pub fn set_client_state(&self, client: ClientIndex, mut state: ClientState) {
        state.index = client;
        self.store.modify(|s| {
            s.clients.insert(client, state.clone());
        });
        self.events.emit(StateChange::ClientStateChanged { client, state });
    }

    // ========================================================================
    // Granular zone mutators
    // ========================================================================

    /// Set zone volume (clamped to 0-100)
    pub fn update_zone_volume(&self, zone: ZoneIndex, volume: u8) -> Result<()> {
        let volume = volume.min(MAX_VOLUME);
        self.zone_field(zone, StatusKind::ZoneVolume, |z| {
            if z.volume == volume {
                return false;
            }
            z.volume = volume;
            true
        })
    }

    /// Adjust zone volume by a signed delta, clamped to 0-100
    pub fn adjust_zone_volume(&self, zone: ZoneIndex, delta: i16) -> Result<()> {
        self.zone_field(zone, StatusKind::ZoneVolume, |z| {
            let next = (z.volume as i16 + delta).clamp(0, MAX_VOLUME as i16) as u8;
            if z.volume == next {
                return false;
            }
            z.volume = next;
            true
        })
    }

    /// Set zone mute flag
    pub fn update_zone_mute(&self, zone: ZoneIndex, muted: bool) -> Result<()> {
        self.zone_field(zone, StatusKind::ZoneMute, |z| {
            if z.muted == muted {
                return false;
            }
            z.muted = muted;
            true
        })
    }

    /// Toggle zone mute flag atomically
    pub fn toggle_zone_mute(&self, zone: ZoneIndex) -> Result<()> {
        self.zone_field(zone, StatusKind::ZoneMute, |z| {
            z.muted = !z.muted;
            true
        })
    }

    /// Set transport state
    pub fn update_playback(&self, zone: ZoneIndex, playback: PlaybackState) -> Result<()> {
        self.zone_field(zone, StatusKind::Playback, |z| {
            if z.playback == playback {
                return false;
            }
            z.playback = playback;
            true
        })
    }

    /// Set the current track descriptor
    pub fn update_track(&self, zone: ZoneIndex, track: Option<TrackInfo>) -> Result<()> {
        self.zone_field(zone, StatusKind::Track, |z| {
            if z.track == track {
                return false;
            }
            z.track = track.clone();
            true
        })
    }

    /// Step the current track index forward or backward atomically
    ///
    /// A zone without a track starts from index 0, so the first forward
    /// step lands on track 1.
    pub fn advance_track(&self, zone: ZoneIndex, step: i32) -> Result<()> {
        self.zone_field(zone, StatusKind::Track, |z| {
            let current = z.track.as_ref().map(|t| t.index).unwrap_or(0);
            let next = (current as i64 + step as i64).max(1) as u32;
            if current == next {
                return false;
            }
            z.track = Some(TrackInfo::at_index(next));
            true
        })
    }

    /// Set the current playlist descriptor
    pub fn update_playlist(&self, zone: ZoneIndex, playlist: Option<PlaylistInfo>) -> Result<()> {
        self.zone_field(zone, StatusKind::Playlist, |z| {
            if z.playlist == playlist {
                return false;
            }
            z.playlist = playlist.clone();
            true
        })
    }

    /// Step the current playlist index forward or backward atomically
    pub fn advance_playlist(&self, zone: ZoneIndex, step: i32) -> Result<()> {
        self.zone_field(zone, StatusKind::Playlist, |z| {
            let current = z.playlist.as_ref().map(|p| p.index).unwrap_or(0);
            let next = (current as i64 + step as i64).max(1) as u32;
            if current == next {
                return false;
            }
            z.playlist = Some(PlaylistInfo::at_index(next));
            true
        })
    }

    /// Set both repeat flags
    pub fn update_repeat(
        &self,
        zone: ZoneIndex,
        track_repeat: bool,
        playlist_repeat: bool,
    ) -> Result<()> {
        self.zone_field(zone, StatusKind::Repeat, |z| {
            if z.track_repeat == track_repeat && z.playlist_repeat == playlist_repeat {
                return false;
            }
            z.track_repeat = track_repeat;
            z.playlist_repeat = playlist_repeat;
            true
        })
    }

    /// Set the track-repeat flag, leaving playlist repeat untouched
    pub fn update_track_repeat(&self, zone: ZoneIndex, enabled: bool) -> Result<()> {
        self.zone_field(zone, StatusKind::Repeat, |z| {
            if z.track_repeat == enabled {
                return false;
            }
            z.track_repeat = enabled;
            true
        })
    }

    /// Toggle the track-repeat flag atomically
    pub fn toggle_track_repeat(&self, zone: ZoneIndex) -> Result<()> {
        self.zone_field(zone, StatusKind::Repeat, |z| {
            z.track_repeat = !z.track_repeat;
            true
        })
    }

    /// Set the playlist-repeat flag, leaving track repeat untouched
    pub fn update_playlist_repeat(&self, zone: ZoneIndex, enabled: bool) -> Result<()> {
        self.zone_field(zone, StatusKind::Repeat, |z| {
            if z.playlist_repeat == enabled {
                return false;
            }
            z.playlist_repeat = enabled;
            true
        })
    }

    /// Toggle the playlist-repeat flag atomically
    pub fn toggle_playlist_repeat(&self, zone: ZoneIndex) -> Result<()> {
        self.zone_field(zone, StatusKind::Repeat, |z| {
            z.playlist_repeat = !z.playlist_repeat;
            true
        })
    }

    /// Set the shuffle flag
    pub fn update_shuffle(&self, zone: ZoneIndex, shuffle: bool) -> Result<()> {
        self.zone_field(zone, StatusKind::Shuffle, |z| {
            if z.shuffle == shuffle {
                return false;
            }
            z.shuffle = shuffle;
            true
        })
    }

    /// Toggle the shuffle flag atomically
    pub fn toggle_shuffle(&self, zone: ZoneIndex) -> Result<()> {
        self.zone_field(zone, StatusKind::Shuffle, |z| {
            z.shuffle = !z.shuffle;
            true
        })
    }

    /// Replace a zone's client set
    ///
    /// Only the zone side is touched; callers needing consistent client
    /// back-references should use [`HubStore::assign_client`].
    pub fn update_zone_clients(
        &self,
        zone: ZoneIndex,
        clients: BTreeSet<ClientIndex>,
    ) -> Result<()> {
        self.zone_field(zone, StatusKind::ZoneClients, |z| {
            if z.clients == clients {
                return false;
            }
            z.clients = clients.clone();
            true
        })
    }

    /// Record the latest playback position for a zone
    ///
    /// The snapshot is updated immediately; the position event is coalesced
    /// per zone, delivering the most recent value at most once per window.
    /// Must be called from within a Tokio runtime.
    pub fn update_position(&self, zone: ZoneIndex, position_ms: u64, progress: f64) -> Result<()> {
        let progress = progress.clamp(0.0, 1.0);
        let changed = self.modify_zone(zone, |z| {
            if z.position_ms == position_ms && z.progress == progress {
                return false;
            }
            z.set_position(position_ms, progress);
            true
        })?;

        if changed.is_some() {
            trace!(%zone, position_ms, "position committed, event deferred");
            self.positions.offer(zone, position_ms, progress);
        }
        Ok(())
    }

    // ========================================================================
    // Granular client mutators
    // ========================================================================

    /// Set client volume (clamped to 0-100)
    pub fn update_client_volume(&self, client: ClientIndex, volume: u8) -> Result<()> {
        let volume = volume.min(MAX_VOLUME);
        self.client_field(client, StatusKind::ClientVolume, |c| {
            if c.volume == volume {
                return false;
            }
            c.volume = volume;
            true
        })
    }

    /// Adjust client volume by a signed delta, clamped to 0-100
    pub fn adjust_client_volume(&self, client: ClientIndex, delta: i16) -> Result<()> {
        self.client_field(client, StatusKind::ClientVolume, |c| {
            let next = (c.volume as i16 + delta).clamp(0, MAX_VOLUME as i16) as u8;
            if c.volume == next {
                return false;
            }
            c.volume = next;
            true
        })
    }

    /// Set client mute flag
    pub fn update_client_mute(&self, client: ClientIndex, muted: bool) -> Result<()> {
        self.client_field(client, StatusKind::ClientMute, |c| {
            if c.muted == muted {
                return false;
            }
            c.muted = muted;
            true
        })
    }

    /// Toggle client mute flag atomically
    pub fn toggle_client_mute(&self, client: ClientIndex) -> Result<()> {
        self.client_field(client, StatusKind::ClientMute, |c| {
            c.muted = !c.muted;
            true
        })
    }

    /// Set client latency (clamped to 0-10000 ms)
    pub fn update_client_latency(&self, client: ClientIndex, latency_ms: u32) -> Result<()> {
        let latency_ms = latency_ms.min(MAX_LATENCY_MS);
        self.client_field(client, StatusKind::ClientLatency, |c| {
            if c.latency_ms == latency_ms {
                return false;
            }
            c.latency_ms = latency_ms;
            true
        })
    }

    /// Set client connection flag
    pub fn update_client_connected(&self, client: ClientIndex, connected: bool) -> Result<()> {
        self.client_field(client, StatusKind::ClientConnected, |c| {
            if c.connected == connected {
                return false;
            }
            c.connected = connected;
            true
        })
    }

    /// Set the client-side zone reference only
    ///
    /// Does not maintain the zone's client set; see
    /// [`HubStore::assign_client`] for the consistent multi-entity move.
    pub fn update_client_zone(&self, client: ClientIndex, zone: Option<ZoneIndex>) -> Result<()> {
        self.client_field(client, StatusKind::ClientZone, |c| {
            if c.zone == zone {
                return false;
            }
            c.zone = zone;
            true
        })
    }

    // ========================================================================
    // Whole-store operations
    // ========================================================================

    /// Apply a pure transform to the whole snapshot, single attempt
    pub fn update_state<F>(&self, transform: F) -> Result<Arc<HubSnapshot>>
    where
        F: Fn(&HubSnapshot) -> HubSnapshot,
    {
        self.update_state_with_retry(transform, 0)
    }

    /// Apply a pure transform with bounded retries on version conflicts
    ///
    /// The transform result is validated before commit: an invalid snapshot
    /// leaves the store untouched, fires a `ValidationFailed` event with the
    /// rejected snapshot, and returns `StateError::Validation`. Retry
    /// exhaustion returns `StateError::Conflict`, a distinct condition that
    /// signals contention rather than bad data.
    pub fn update_state_with_retry<F>(
        &self,
        transform: F,
        max_retries: u32,
    ) -> Result<Arc<HubSnapshot>>
    where
        F: Fn(&HubSnapshot) -> HubSnapshot,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let (snapshot, version) = self.store.versioned();
            let next = transform(&snapshot);

            if let Err(reason) = next.validate() {
                warn!(%reason, "whole-store transform rejected by validation");
                self.events.emit(StateChange::ValidationFailed {
                    rejected: next,
                    reason: reason.clone(),
                });
                return Err(StateError::Validation(reason));
            }

            match self.store.try_commit(version, next) {
                Ok(new_version) => {
                    debug!(version = new_version, attempts, "whole-store transform committed");
                    return Ok(self.store.load());
                }
                Err(_) if attempts <= max_retries => continue,
                Err(_) => {
                    warn!(attempts, "whole-store transform exhausted retries");
                    return Err(StateError::Conflict { attempts });
                }
            }
        }
    }

    /// Atomically move a client into a zone
    ///
    /// Removes the client from any zone currently listing it, adds it to the
    /// target zone's set, and updates the client's back-reference, all in a
    /// single whole-store commit. Fires `ClientZoneChanged` plus a
    /// `ZoneClientsChanged` for each affected zone. Reassigning a client to
    /// the zone it already consistently belongs to is a no-op: no commit, no
    /// events, same as an unchanged granular write.
    pub fn assign_client(&self, client: ClientIndex, zone: ZoneIndex) -> Result<()> {
        let before = self.store.load();
        if !before.clients.contains_key(&client) {
            return Err(StateError::ClientNotFound(client));
        }
        if !before.zones.contains_key(&zone) {
            return Err(StateError::ZoneNotFound(zone));
        }
        let previous_zone = before.client(client).and_then(|c| c.zone);
        let already_listed = before
            .zone(zone)
            .map(|z| z.clients.contains(&client))
            .unwrap_or(false);
        if previous_zone == Some(zone) && already_listed {
            trace!(%client, %zone, "client already assigned, nothing to do");
            return Ok(());
        }

        let after = self.update_state_with_retry(
            |s| {
                let mut next = s.clone();
                for z in next.zones.values_mut() {
                    z.clients.remove(&client);
                }
                if let Some(target) = next.zones.get_mut(&zone) {
                    target.clients.insert(client);
                }
                if let Some(c) = next.clients.get_mut(&client) {
                    c.zone = Some(zone);
                }
                next
            },
            10,
        )?;

        self.events.emit(StateChange::ClientZoneChanged {
            client,
            zone: Some(zone),
        });
        if let Some(state) = after.client(client).cloned() {
            self.events.emit(StateChange::ClientStateChanged { client, state });
        }
        let affected: BTreeSet<ZoneIndex> =
            [previous_zone, Some(zone)].into_iter().flatten().collect();
        for affected_zone in affected {
            if let Some(z) = after.zone(affected_zone) {
                self.events.emit(StateChange::ZoneClientsChanged {
                    zone: affected_zone,
                    clients: z.clients.clone(),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Resynchronization
    // ========================================================================

    /// Re-fire the full per-field event set for a zone from the current
    /// snapshot, without mutating anything
    ///
    /// Position is emitted directly, bypassing the debounce, since this is a
    /// deliberate resync for late subscribers.
    pub fn publish_zone_state(&self, zone: ZoneIndex) -> Result<()> {
        let snapshot = self.store.load();
        let state = snapshot
            .zone(zone)
            .cloned()
            .ok_or(StateError::ZoneNotFound(zone))?;

        self.events.emit(StateChange::ZoneVolumeChanged {
            zone,
            volume: state.volume,
        });
        self.events.emit(StateChange::ZoneMuteChanged {
            zone,
            muted: state.muted,
        });
        self.events.emit(StateChange::PlaybackChanged {
            zone,
            playback: state.playback,
        });
        self.events.emit(StateChange::TrackChanged {
            zone,
            track: state.track.clone(),
        });
        self.events.emit(StateChange::PlaylistChanged {
            zone,
            playlist: state.playlist.clone(),
        });
        self.events.emit(StateChange::RepeatChanged {
            zone,
            track_repeat: state.track_repeat,
            playlist_repeat: state.playlist_repeat,
        });
        self.events.emit(StateChange::ShuffleChanged {
            zone,
            shuffle: state.shuffle,
        });
        self.events.emit(StateChange::ZoneClientsChanged {
            zone,
            clients: state.clients.clone(),
        });
        self.events.emit(StateChange::PositionChanged {
            zone,
            position_ms: state.position_ms,
            progress: state.progress,
        });
        self.events.emit(StateChange::ZoneStateChanged { zone, state });
        Ok(())
    }

    /// Re-fire the full per-field event set for a client
    pub fn publish_client_state(&self, client: ClientIndex) -> Result<()> {
        let snapshot = self.store.load();
        let state = snapshot
            .client(client)
            .cloned()
            .ok_or(StateError::ClientNotFound(client))?;

        self.events.emit(StateChange::ClientVolumeChanged {
            client,
            volume: state.volume,
        });
        self.events.emit(StateChange::ClientMuteChanged {
            client,
            muted: state.muted,
        });
        self.events.emit(StateChange::ClientLatencyChanged {
            client,
            latency_ms: state.latency_ms,
        });
        self.events.emit(StateChange::ClientConnectedChanged {
            client,
            connected: state.connected,
        });
        self.events.emit(StateChange::ClientZoneChanged {
            client,
            zone: state.zone,
        });
        self.events.emit(StateChange::ClientStateChanged { client, state });
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Atomic read-modify-write of one zone
    ///
    /// The edit returns whether it logically changed anything; an unchanged
    /// edit commits nothing and bumps no version. Retries internally on
    /// version conflicts from concurrent writers. Returns the committed
    /// state, or `None` when nothing changed.
    fn modify_zone<F>(&self, zone: ZoneIndex, edit: F) -> Result<Option<ZoneState>>
    where
        F: Fn(&mut ZoneState) -> bool,
    {
        loop {
            let (snapshot, version) = self.store.versioned();
            let Some(current) = snapshot.zone(zone) else {
                return Err(StateError::ZoneNotFound(zone));
            };
            let mut updated = current.clone();
            if !edit(&mut updated) {
                return Ok(None);
            }
            let mut next = (*snapshot).clone();
            next.zones.insert(zone, updated.clone());
            if self.store.try_commit(version, next).is_ok() {
                return Ok(Some(updated));
            }
            // Lost the race, retry against the fresh snapshot
        }
    }

    /// Atomic read-modify-write of one client
    fn modify_client<F>(&self, client: ClientIndex, edit: F) -> Result<Option<ClientState>>
    where
        F: Fn(&mut ClientState) -> bool,
    {
        loop {
            let (snapshot, version) = self.store.versioned();
            let Some(current) = snapshot.client(client) else {
                return Err(StateError::ClientNotFound(client));
            };
            let mut updated = current.clone();
            if !edit(&mut updated) {
                return Ok(None);
            }
            let mut next = (*snapshot).clone();
            next.clients.insert(client, updated.clone());
            if self.store.try_commit(version, next).is_ok() {
                return Ok(Some(updated));
            }
        }
    }

    /// Apply a zone edit and fire the field-group event plus the catch-all
    fn zone_field<F>(&self, zone: ZoneIndex, kind: StatusKind, edit: F) -> Result<()>
    where
        F: Fn(&mut ZoneState) -> bool,
    {
        match self.modify_zone(zone, edit)? {
            Some(state) => {
                debug!(%zone, status = kind.as_str(), "zone field updated");
                self.emit_zone_field(kind, &state);
                self.events.emit(StateChange::ZoneStateChanged { zone, state });
                Ok(())
            }
            None => {
                trace!(%zone, status = kind.as_str(), "zone field unchanged");
                Ok(())
            }
        }
    }

    /// Apply a client edit and fire the field-group event plus the catch-all
    fn client_field<F>(&self, client: ClientIndex, kind: StatusKind, edit: F) -> Result<()>
    where
        F: Fn(&mut ClientState) -> bool,
    {
        match self.modify_client(client, edit)? {
            Some(state) => {
                debug!(%client, status = kind.as_str(), "client field updated");
                self.emit_client_field(kind, &state);
                self.events
                    .emit(StateChange::ClientStateChanged { client, state });
                Ok(())
            }
            None => {
                trace!(%client, status = kind.as_str(), "client field unchanged");
                Ok(())
            }
        }
    }

    fn emit_zone_field(&self, kind: StatusKind, state: &ZoneState) {
        let zone = state.index;
        let change = match kind {
            StatusKind::ZoneVolume => StateChange::ZoneVolumeChanged {
                zone,
                volume: state.volume,
            },
            StatusKind::ZoneMute => StateChange::ZoneMuteChanged {
                zone,
                muted: state.muted,
            },
            StatusKind::Playback => StateChange::PlaybackChanged {
                zone,
                playback: state.playback,
            },
            StatusKind::Track => StateChange::TrackChanged {
                zone,
                track: state.track.clone(),
            },
            StatusKind::Playlist => StateChange::PlaylistChanged {
                zone,
                playlist: state.playlist.clone(),
            },
            StatusKind::Repeat => StateChange::RepeatChanged {
                zone,
                track_repeat: state.track_repeat,
                playlist_repeat: state.playlist_repeat,
            },
            StatusKind::Shuffle => StateChange::ShuffleChanged {
                zone,
                shuffle: state.shuffle,
            },
            StatusKind::ZoneClients => StateChange::ZoneClientsChanged {
                zone,
                clients: state.clients.clone(),
            },
            _ => return,
        };
        self.events.emit(change);
    }

    fn emit_client_field(&self, kind: StatusKind, state: &ClientState) {
        let client = state.index;
        let change = match kind {
            StatusKind::ClientVolume => StateChange::ClientVolumeChanged {
                client,
                volume: state.volume,
            },
            StatusKind::ClientMute => StateChange::ClientMuteChanged {
                client,
                muted: state.muted,
            },
            StatusKind::ClientLatency => StateChange::ClientLatencyChanged {
                client,
                latency_ms: state.latency_ms,
            },
            StatusKind::ClientConnected => StateChange::ClientConnectedChanged {
                client,
                connected: state.connected,
            },
            StatusKind::ClientZone => StateChange::ClientZoneChanged {
                client,
                zone: state.zone,
            },
            _ => return,
        };
        self.events.emit(change);
    }
}

impl Default for HubStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HubStore {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            events: Arc::clone(&self.events),
            positions: self.positions.clone(),
        }
    }
}

impl std::fmt::Debug for HubStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.store.load();
        f.debug_struct("HubStore")
            .field("version", &self.store.version())
            .field("zones", &snapshot.zone_count())
            .field("clients", &snapshot.client_count())
            .finish()
    }
}
