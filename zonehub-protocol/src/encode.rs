//! Outbound status encoding for string-topic protocols
//!
//! The message bus gets full descriptors: scalars as plain text, structured
//! state (track/playlist, whole entities) as JSON. Topics here are relative;
//! the adapter prepends its configured root.

use serde_json::json;

use zonehub_state::{StateChange, StatusKind};

/// One outbound status message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFrame {
    /// Routing tag, for adapters that map kinds to address tables
    pub kind: StatusKind,
    /// Relative topic, `<zone|client>/<index>/<suffix>`
    pub topic: String,
    /// Plain-text or JSON payload
    pub payload: String,
}

/// Encode a state change as an outbound frame
///
/// `ValidationFailed` is internal and never leaves the hub; it encodes to
/// `None`.
pub fn encode_status(change: &StateChange) -> Option<StatusFrame> {
    let kind = change.status();
    let (topic, payload) = match change {
        StateChange::ZoneVolumeChanged { zone, volume } => {
            (zone_topic(zone.get(), "volume"), volume.to_string())
        }
        StateChange::ZoneMuteChanged { zone, muted } => {
            (zone_topic(zone.get(), "mute"), muted.to_string())
        }
        StateChange::PlaybackChanged { zone, playback } => (
            zone_topic(zone.get(), "playback"),
            playback.as_wire().to_string(),
        ),
        StateChange::TrackChanged { zone, track } => (
            zone_topic(zone.get(), "track"),
            serde_json::to_string(track).ok()?,
        ),
        StateChange::PlaylistChanged { zone, playlist } => (
            zone_topic(zone.get(), "playlist"),
            serde_json::to_string(playlist).ok()?,
        ),
        StateChange::PositionChanged {
            zone,
            position_ms,
            progress,
        } => (
            zone_topic(zone.get(), "position"),
            serde_json::to_string(&json!({
                "position_ms": position_ms,
                "progress": progress,
            }))
            .ok()?,
        ),
        StateChange::RepeatChanged {
            zone,
            track_repeat,
            playlist_repeat,
        } => (
            zone_topic(zone.get(), "repeat"),
            serde_json::to_string(&json!({
                "track": track_repeat,
                "playlist": playlist_repeat,
            }))
            .ok()?,
        ),
        StateChange::ShuffleChanged { zone, shuffle } => {
            (zone_topic(zone.get(), "shuffle"), shuffle.to_string())
        }
        StateChange::ZoneClientsChanged { zone, clients } => {
            let indices: Vec<u16> = clients.iter().map(|c| c.get()).collect();
            (
                zone_topic(zone.get(), "clients"),
                serde_json::to_string(&indices).ok()?,
            )
        }
        StateChange::ZoneStateChanged { zone, state } => (
            zone_topic(zone.get(), "state"),
            serde_json::to_string(state).ok()?,
        ),
        StateChange::ClientVolumeChanged { client, volume } => {
            (client_topic(client.get(), "volume"), volume.to_string())
        }
        StateChange::ClientMuteChanged { client, muted } => {
            (client_topic(client.get(), "mute"), muted.to_string())
        }
        StateChange::ClientLatencyChanged { client, latency_ms } => {
            (client_topic(client.get(), "latency"), latency_ms.to_string())
        }
        StateChange::ClientConnectedChanged { client, connected } => (
            client_topic(client.get(), "connected"),
            connected.to_string(),
        ),
        StateChange::ClientZoneChanged { client, zone } => (
            client_topic(client.get(), "zone"),
            serde_json::to_string(&zone.map(|z| z.get())).ok()?,
        ),
        StateChange::ClientStateChanged { client, state } => (
            client_topic(client.get(), "state"),
            serde_json::to_string(state).ok()?,
        ),
        StateChange::ValidationFailed { .. } => return None,
    };
    Some(StatusFrame {
        kind,
        topic,
        payload,
    })
}

fn zone_topic(index: u16, suffix: &str) -> String {
    format!("zone/{index}/{suffix}")
}

fn client_topic(index: u16, suffix: &str) -> String {
    format!("client/{index}/{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonehub_state::{ClientIndex, PlaybackState, TrackInfo, ZoneIndex};

    #[test]
    fn test_scalar_payloads_are_plain_text() {
        let frame = encode_status(&StateChange::ZoneVolumeChanged {
            zone: ZoneIndex::new(1),
            volume: 42,
        })
        .unwrap();
        assert_eq!(frame.kind, StatusKind::ZoneVolume);
        assert_eq!(frame.topic, "zone/1/volume");
        assert_eq!(frame.payload, "42");

        let frame = encode_status(&StateChange::ClientMuteChanged {
            client: ClientIndex::new(3),
            muted: true,
        })
        .unwrap();
        assert_eq!(frame.topic, "client/3/mute");
        assert_eq!(frame.payload, "true");
    }

    #[test]
    fn test_playback_uses_wire_names() {
        let frame = encode_status(&StateChange::PlaybackChanged {
            zone: ZoneIndex::new(2),
            playback: PlaybackState::Playing,
        })
        .unwrap();
        assert_eq!(frame.payload, "play");
    }

    #[test]
    fn test_track_descriptor_is_json() {
        let track = TrackInfo::at_index(3)
            .with_title("Blue in Green")
            .with_artist("Miles Davis");
        let frame = encode_status(&StateChange::TrackChanged {
            zone: ZoneIndex::new(1),
            track: Some(track),
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame.payload).unwrap();
        assert_eq!(value["title"], "Blue in Green");
        assert_eq!(value["artist"], "Miles Davis");
        assert_eq!(value["index"], 3);
    }

    #[test]
    fn test_position_payload_carries_both_fields() {
        let frame = encode_status(&StateChange::PositionChanged {
            zone: ZoneIndex::new(1),
            position_ms: 93_000,
            progress: 0.5,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame.payload).unwrap();
        assert_eq!(value["position_ms"], 93_000);
        assert_eq!(value["progress"], 0.5);
    }

    #[test]
    fn test_validation_failures_stay_internal() {
        let change = StateChange::ValidationFailed {
            rejected: Default::default(),
            reason: "broken".into(),
        };
        assert!(encode_status(&change).is_none());
    }
}
