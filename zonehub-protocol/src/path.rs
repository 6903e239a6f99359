//! Message-bus path parsing
//!
//! Adapters hand over the already-split pieces of a topic like
//! `<root>/<zone|client>/<index>/<command-path>`: the target kind, the raw
//! index, the remaining command path, and the payload text. This module
//! turns that into exactly one [`Command`] or `None`.
//!
//! Precedence per payload, after the exact path table has matched:
//! 1. strict invariant numeric (so `-3` on a volume path is absolute),
//! 2. boolean tokens, including `toggle` on set-paths that have a toggle,
//! 3. relative `+` / `-` / `+<n>` / `-<n>`.
//!
//! An out-of-domain index (≤ 0 or beyond `u16`) fails before the payload is
//! even looked at. Trigger paths (`play`, `track/next`, ...) ignore their
//! payload entirely.

use tracing::trace;

use zonehub_state::{ClientIndex, ZoneIndex};

use crate::command::{Command, CommandBody, CommandSource};
use crate::payload::{
    clamp_latency, clamp_volume, parse_bool, parse_decimal, parse_index, parse_int,
    parse_relative, Direction,
};

/// Whether a path addresses a zone or a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Zone,
    Client,
}

/// Parse one message-bus message into a command
///
/// Returns `None` for unrecognized paths, malformed payloads, and
/// out-of-domain indices. The caller decides whether that is worth logging.
pub fn parse_message_path(
    kind: TargetKind,
    index: i64,
    path: &str,
    payload: &str,
    source: CommandSource,
) -> Option<Command> {
    if index < 1 || index > u16::MAX as i64 {
        trace!(index, path, "target index out of domain");
        return None;
    }
    let index = index as u16;

    let path = path.trim_matches('/').to_ascii_lowercase();
    let body = match kind {
        TargetKind::Zone => parse_zone_path(ZoneIndex::new(index), &path, payload)?,
        TargetKind::Client => parse_client_path(ClientIndex::new(index), &path, payload)?,
    };
    Some(Command::new(source, body))
}

fn parse_zone_path(zone: ZoneIndex, path: &str, payload: &str) -> Option<CommandBody> {
    match path {
        // ===== Transport (trigger paths, payload ignored) =====
        "play" => Some(CommandBody::Play { zone }),
        "pause" => Some(CommandBody::Pause { zone }),
        "stop" => Some(CommandBody::Stop { zone }),
        "play/url" => {
            let url = payload.trim();
            if url.is_empty() {
                return None;
            }
            Some(CommandBody::PlayUrl {
                zone,
                url: url.to_string(),
            })
        }

        // ===== Volume =====
        "volume" | "volume/set" => parse_zone_volume_payload(zone, payload),
        "volume/up" => Some(CommandBody::ZoneVolumeUp {
            zone,
            step: step_payload(payload)?,
        }),
        "volume/down" => Some(CommandBody::ZoneVolumeDown {
            zone,
            step: step_payload(payload)?,
        }),

        // ===== Mute =====
        "mute" | "mute/set" => match toggle_or_bool(payload)? {
            None => Some(CommandBody::ToggleZoneMute { zone }),
            Some(muted) => Some(CommandBody::SetZoneMute { zone, muted }),
        },
        "mute/toggle" => Some(CommandBody::ToggleZoneMute { zone }),

        // ===== Track =====
        "track" | "track/set" => match parse_index(payload) {
            Some(track) => Some(CommandBody::SetTrack { zone, track }),
            None => match payload.trim() {
                "+" => Some(CommandBody::NextTrack { zone }),
                "-" => Some(CommandBody::PreviousTrack { zone }),
                _ => None,
            },
        },
        "track/next" => Some(CommandBody::NextTrack { zone }),
        "track/previous" => Some(CommandBody::PreviousTrack { zone }),
        "track/repeat" | "track/repeat/set" | "repeat/track" | "repeat/track/set" => {
            match toggle_or_bool(payload)? {
                None => Some(CommandBody::ToggleTrackRepeat { zone }),
                Some(enabled) => Some(CommandBody::SetTrackRepeat { zone, enabled }),
            }
        }
        "track/repeat/toggle" | "repeat/track/toggle" => {
            Some(CommandBody::ToggleTrackRepeat { zone })
        }

        // ===== Playlist =====
        "playlist" | "playlist/set" => match parse_index(payload) {
            Some(playlist) => Some(CommandBody::SetPlaylist { zone, playlist }),
            None => match payload.trim() {
                "+" => Some(CommandBody::NextPlaylist { zone }),
                "-" => Some(CommandBody::PreviousPlaylist { zone }),
                _ => None,
            },
        },
        "playlist/next" => Some(CommandBody::NextPlaylist { zone }),
        "playlist/previous" => Some(CommandBody::PreviousPlaylist { zone }),
        "playlist/repeat" | "playlist/repeat/set" | "repeat/playlist" | "repeat/playlist/set" => {
            match toggle_or_bool(payload)? {
                None => Some(CommandBody::TogglePlaylistRepeat { zone }),
                Some(enabled) => Some(CommandBody::SetPlaylistRepeat { zone, enabled }),
            }
        }
        "playlist/repeat/toggle" | "repeat/playlist/toggle" => {
            Some(CommandBody::TogglePlaylistRepeat { zone })
        }

        // ===== Shuffle =====
        "shuffle" | "shuffle/set" => match toggle_or_bool(payload)? {
            None => Some(CommandBody::ToggleShuffle { zone }),
            Some(enabled) => Some(CommandBody::SetShuffle { zone, enabled }),
        },
        "shuffle/toggle" => Some(CommandBody::ToggleShuffle { zone }),

        // ===== Position =====
        "position" | "position/set" => {
            let value = parse_int(payload)?;
            Some(CommandBody::SeekPosition {
                zone,
                position_ms: value.max(0) as u64,
            })
        }
        "progress" | "progress/set" => {
            let value = parse_decimal(payload)?;
            Some(CommandBody::SeekProgress {
                zone,
                progress: value.clamp(0.0, 1.0),
            })
        }

        _ => None,
    }
}

fn parse_client_path(client: ClientIndex, path: &str, payload: &str) -> Option<CommandBody> {
    match path {
        "volume" | "volume/set" => parse_client_volume_payload(client, payload),
        "volume/up" => Some(CommandBody::ClientVolumeUp {
            client,
            step: step_payload(payload)?,
        }),
        "volume/down" => Some(CommandBody::ClientVolumeDown {
            client,
            step: step_payload(payload)?,
        }),
        "mute" | "mute/set" => match toggle_or_bool(payload)? {
            None => Some(CommandBody::ToggleClientMute { client }),
            Some(muted) => Some(CommandBody::SetClientMute { client, muted }),
        },
        "mute/toggle" => Some(CommandBody::ToggleClientMute { client }),
        "latency" | "latency/set" => {
            let value = parse_int(payload)?;
            Some(CommandBody::SetClientLatency {
                client,
                latency_ms: clamp_latency(value),
            })
        }
        "zone" | "zone/set" => {
            let zone = parse_index(payload)?;
            if zone > u16::MAX as u32 {
                return None;
            }
            Some(CommandBody::AssignClientZone {
                client,
                zone: ZoneIndex::new(zone as u16),
            })
        }
        _ => None,
    }
}

/// Volume payload: absolute numeric wins over relative `+`/`-` forms
fn parse_zone_volume_payload(zone: ZoneIndex, payload: &str) -> Option<CommandBody> {
    if let Some(value) = parse_int(payload) {
        return Some(CommandBody::SetZoneVolume {
            zone,
            volume: clamp_volume(value),
        });
    }
    match parse_relative(payload)? {
        (Direction::Up, step) => Some(CommandBody::ZoneVolumeUp { zone, step }),
        (Direction::Down, step) => Some(CommandBody::ZoneVolumeDown { zone, step }),
    }
}

fn parse_client_volume_payload(client: ClientIndex, payload: &str) -> Option<CommandBody> {
    if let Some(value) = parse_int(payload) {
        return Some(CommandBody::SetClientVolume {
            client,
            volume: clamp_volume(value),
        });
    }
    match parse_relative(payload)? {
        (Direction::Up, step) => Some(CommandBody::ClientVolumeUp { client, step }),
        (Direction::Down, step) => Some(CommandBody::ClientVolumeDown { client, step }),
    }
}

/// Step magnitude for `volume/up` and `volume/down` paths
///
/// An empty payload uses the default step; a plain number is the magnitude.
fn step_payload(payload: &str) -> Option<u8> {
    let token = payload.trim();
    if token.is_empty() {
        return Some(crate::payload::DEFAULT_STEP);
    }
    parse_int(token).map(crate::payload::clamp_step)
}

/// Boolean payload that also admits the `toggle` token
///
/// `Some(None)` means toggle, `Some(Some(b))` a plain boolean, `None` a
/// parse failure.
#[allow(clippy::option_option)]
fn toggle_or_bool(payload: &str) -> Option<Option<bool>> {
    if payload.trim().eq_ignore_ascii_case("toggle") {
        return Some(None);
    }
    parse_bool(payload).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_cmd(path: &str, payload: &str) -> Option<CommandBody> {
        parse_message_path(TargetKind::Zone, 1, path, payload, CommandSource::MessageBus)
            .map(|c| c.body)
    }

    fn client_cmd(path: &str, payload: &str) -> Option<CommandBody> {
        parse_message_path(
            TargetKind::Client,
            2,
            path,
            payload,
            CommandSource::MessageBus,
        )
        .map(|c| c.body)
    }

    const ZONE: ZoneIndex = ZoneIndex(1);
    const CLIENT: ClientIndex = ClientIndex(2);

    #[test]
    fn test_index_checked_before_payload() {
        assert!(parse_message_path(
            TargetKind::Zone,
            0,
            "volume",
            "50",
            CommandSource::MessageBus
        )
        .is_none());
        assert!(parse_message_path(
            TargetKind::Zone,
            -4,
            "play",
            "",
            CommandSource::MessageBus
        )
        .is_none());
        assert!(parse_message_path(
            TargetKind::Zone,
            70_000,
            "volume",
            "50",
            CommandSource::MessageBus
        )
        .is_none());
    }

    #[test]
    fn test_transport_triggers_ignore_payload() {
        assert_eq!(zone_cmd("play", "garbage"), Some(CommandBody::Play { zone: ZONE }));
        assert_eq!(zone_cmd("pause", ""), Some(CommandBody::Pause { zone: ZONE }));
        assert_eq!(zone_cmd("stop", "1"), Some(CommandBody::Stop { zone: ZONE }));
    }

    #[test]
    fn test_play_url() {
        assert_eq!(
            zone_cmd("play/url", "http://radio.example/stream"),
            Some(CommandBody::PlayUrl {
                zone: ZONE,
                url: "http://radio.example/stream".into()
            })
        );
        assert_eq!(zone_cmd("play/url", "   "), None);
    }

    #[test]
    fn test_volume_absolute_clamps() {
        assert_eq!(
            zone_cmd("volume", "42"),
            Some(CommandBody::SetZoneVolume { zone: ZONE, volume: 42 })
        );
        assert_eq!(
            zone_cmd("volume/set", "150"),
            Some(CommandBody::SetZoneVolume { zone: ZONE, volume: 100 })
        );
        // Numeric rule wins for '-'-signed integers: absolute, clamped to 0
        assert_eq!(
            zone_cmd("volume/set", "-3"),
            Some(CommandBody::SetZoneVolume { zone: ZONE, volume: 0 })
        );
    }

    #[test]
    fn test_volume_relative() {
        assert_eq!(
            zone_cmd("volume", "+"),
            Some(CommandBody::ZoneVolumeUp { zone: ZONE, step: 5 })
        );
        assert_eq!(
            zone_cmd("volume/set", "+5"),
            Some(CommandBody::ZoneVolumeUp { zone: ZONE, step: 5 })
        );
        assert_eq!(
            zone_cmd("volume/up", ""),
            Some(CommandBody::ZoneVolumeUp { zone: ZONE, step: 5 })
        );
        assert_eq!(
            zone_cmd("volume/down", "10"),
            Some(CommandBody::ZoneVolumeDown { zone: ZONE, step: 10 })
        );
        assert_eq!(
            zone_cmd("volume/up", "99"),
            Some(CommandBody::ZoneVolumeUp { zone: ZONE, step: 50 })
        );
    }

    #[test]
    fn test_empty_payload_on_value_path_fails() {
        assert_eq!(zone_cmd("volume", ""), None);
        assert_eq!(zone_cmd("volume", "   "), None);
        assert_eq!(zone_cmd("position/set", " "), None);
        assert_eq!(zone_cmd("mute/set", ""), None);
    }

    #[test]
    fn test_mute_bool_and_toggle() {
        assert_eq!(
            zone_cmd("mute/set", "on"),
            Some(CommandBody::SetZoneMute { zone: ZONE, muted: true })
        );
        assert_eq!(
            zone_cmd("mute", "0"),
            Some(CommandBody::SetZoneMute { zone: ZONE, muted: false })
        );
        assert_eq!(
            zone_cmd("mute/set", "toggle"),
            Some(CommandBody::ToggleZoneMute { zone: ZONE })
        );
        assert_eq!(
            zone_cmd("mute/toggle", ""),
            Some(CommandBody::ToggleZoneMute { zone: ZONE })
        );
        assert_eq!(zone_cmd("mute/set", "maybe"), None);
    }

    #[test]
    fn test_track_paths() {
        assert_eq!(
            zone_cmd("track/set", "7"),
            Some(CommandBody::SetTrack { zone: ZONE, track: 7 })
        );
        assert_eq!(zone_cmd("track", "+"), Some(CommandBody::NextTrack { zone: ZONE }));
        assert_eq!(
            zone_cmd("track", "-"),
            Some(CommandBody::PreviousTrack { zone: ZONE })
        );
        assert_eq!(
            zone_cmd("track/next", ""),
            Some(CommandBody::NextTrack { zone: ZONE })
        );
        assert_eq!(zone_cmd("track/set", "0"), None);
        assert_eq!(zone_cmd("track/set", "+3"), None);
    }

    #[test]
    fn test_repeat_paths_and_aliases() {
        assert_eq!(
            zone_cmd("track/repeat/set", "true"),
            Some(CommandBody::SetTrackRepeat { zone: ZONE, enabled: true })
        );
        // Stateless toggle: resolution is deferred to the dispatcher
        assert_eq!(
            zone_cmd("repeat/track/set", "toggle"),
            Some(CommandBody::ToggleTrackRepeat { zone: ZONE })
        );
        assert_eq!(
            zone_cmd("playlist/repeat/toggle", ""),
            Some(CommandBody::TogglePlaylistRepeat { zone: ZONE })
        );
    }

    #[test]
    fn test_position_and_progress() {
        assert_eq!(
            zone_cmd("position/set", "93000"),
            Some(CommandBody::SeekPosition { zone: ZONE, position_ms: 93_000 })
        );
        // Negative position clamps to 0 rather than failing
        assert_eq!(
            zone_cmd("position", "-10"),
            Some(CommandBody::SeekPosition { zone: ZONE, position_ms: 0 })
        );
        match zone_cmd("progress/set", "0.75") {
            Some(CommandBody::SeekProgress { progress, .. }) => assert_eq!(progress, 0.75),
            other => panic!("unexpected {other:?}"),
        }
        match zone_cmd("progress", "1.5") {
            Some(CommandBody::SeekProgress { progress, .. }) => assert_eq!(progress, 1.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_client_paths() {
        assert_eq!(
            client_cmd("volume/set", "80"),
            Some(CommandBody::SetClientVolume { client: CLIENT, volume: 80 })
        );
        assert_eq!(
            client_cmd("latency", "20000"),
            Some(CommandBody::SetClientLatency { client: CLIENT, latency_ms: 10_000 })
        );
        assert_eq!(
            client_cmd("zone/set", "3"),
            Some(CommandBody::AssignClientZone {
                client: CLIENT,
                zone: ZoneIndex::new(3)
            })
        );
        assert_eq!(client_cmd("zone/set", "0"), None);
        assert_eq!(
            client_cmd("mute/set", "toggle"),
            Some(CommandBody::ToggleClientMute { client: CLIENT })
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(zone_cmd("bass/set", "5"), None);
        assert_eq!(zone_cmd("", "5"), None);
        assert_eq!(client_cmd("track/set", "1"), None); // zone-only path
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(
            zone_cmd("/Volume/Set/", "30"),
            Some(CommandBody::SetZoneVolume { zone: ZONE, volume: 30 })
        );
    }

    #[test]
    fn test_provenance_is_carried() {
        let cmd = parse_message_path(
            TargetKind::Zone,
            1,
            "play",
            "",
            CommandSource::AutomationBus,
        )
        .unwrap();
        assert_eq!(cmd.source, CommandSource::AutomationBus);
    }
}
