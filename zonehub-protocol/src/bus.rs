//! Building-automation bus value codec
//!
//! The bus delivers raw fixed-width scalars at per-role addresses; address
//! resolution is the bus driver's job, so by the time a value reaches this
//! module it already carries its semantic role and target. Percentages
//! travel as 8-bit scaling values: 0-255 maps linearly onto 0-100 %, so a
//! round trip may be off by one at the 255-step boundary but never more.

use serde::{Deserialize, Serialize};

use zonehub_state::{ClientIndex, PlaybackState, StateChange, ZoneIndex, MAX_VOLUME};

use crate::command::{Command, CommandBody, CommandSource};
use crate::payload::clamp_latency;

/// Semantic role of a bus address, with the target baked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusRole {
    ZoneVolume(ZoneIndex),
    ZoneMute(ZoneIndex),
    ZonePlay(ZoneIndex),
    ZonePause(ZoneIndex),
    ZoneStop(ZoneIndex),
    ZoneNextTrack(ZoneIndex),
    ZonePreviousTrack(ZoneIndex),
    ZoneTrackIndex(ZoneIndex),
    ZonePlaylistIndex(ZoneIndex),
    ZoneShuffle(ZoneIndex),
    ClientVolume(ClientIndex),
    ClientMute(ClientIndex),
    ClientLatency(ClientIndex),
}

/// A raw scalar as delivered by the bus driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusValue {
    /// Single bit
    Bit(bool),
    /// 8-bit value; scaling roles interpret it as 0-255 → 0-100 %
    Byte(u8),
    /// Unsigned 16-bit value
    UInt(u16),
}

/// Percentage 0-100 → scaling byte 0-255, rounded
pub fn percent_to_byte(pct: u8) -> u8 {
    let pct = pct.min(MAX_VOLUME) as u16;
    ((pct * 255 + 50) / 100) as u8
}

/// Scaling byte 0-255 → percentage 0-100, rounded
pub fn byte_to_percent(byte: u8) -> u8 {
    ((byte as u16 * 100 + 127) / 255) as u8
}

/// Decode one bus value into a command
///
/// Unknown role/value-type combinations yield `None`. Transport bit roles
/// are edge-triggered: only `true` produces a command.
pub fn decode_bus_value(role: BusRole, value: BusValue, source: CommandSource) -> Option<Command> {
    let body = match (role, value) {
        (BusRole::ZoneVolume(zone), BusValue::Byte(b)) => CommandBody::SetZoneVolume {
            zone,
            volume: byte_to_percent(b),
        },
        (BusRole::ZoneMute(zone), BusValue::Bit(muted)) => {
            CommandBody::SetZoneMute { zone, muted }
        }
        (BusRole::ZonePlay(zone), BusValue::Bit(true)) => CommandBody::Play { zone },
        (BusRole::ZonePause(zone), BusValue::Bit(true)) => CommandBody::Pause { zone },
        (BusRole::ZoneStop(zone), BusValue::Bit(true)) => CommandBody::Stop { zone },
        (BusRole::ZoneNextTrack(zone), BusValue::Bit(true)) => CommandBody::NextTrack { zone },
        (BusRole::ZonePreviousTrack(zone), BusValue::Bit(true)) => {
            CommandBody::PreviousTrack { zone }
        }
        (BusRole::ZoneTrackIndex(zone), value) => CommandBody::SetTrack {
            zone,
            track: small_index(value)?,
        },
        (BusRole::ZonePlaylistIndex(zone), value) => CommandBody::SetPlaylist {
            zone,
            playlist: small_index(value)?,
        },
        (BusRole::ZoneShuffle(zone), BusValue::Bit(enabled)) => {
            CommandBody::SetShuffle { zone, enabled }
        }
        (BusRole::ClientVolume(client), BusValue::Byte(b)) => CommandBody::SetClientVolume {
            client,
            volume: byte_to_percent(b),
        },
        (BusRole::ClientMute(client), BusValue::Bit(muted)) => {
            CommandBody::SetClientMute { client, muted }
        }
        (BusRole::ClientLatency(client), BusValue::UInt(ms)) => CommandBody::SetClientLatency {
            client,
            latency_ms: clamp_latency(ms as i64),
        },
        _ => return None,
    };
    Some(Command::new(source, body))
}

/// Flatten a state change to the scalar fields the bus has addresses for
///
/// Changes with no bus representation (track metadata beyond the index,
/// client sets, validation failures) produce nothing.
pub fn encode_bus_status(change: &StateChange) -> Vec<(BusRole, BusValue)> {
    match change {
        StateChange::ZoneVolumeChanged { zone, volume } => vec![(
            BusRole::ZoneVolume(*zone),
            BusValue::Byte(percent_to_byte(*volume)),
        )],
        StateChange::ZoneMuteChanged { zone, muted } => {
            vec![(BusRole::ZoneMute(*zone), BusValue::Bit(*muted))]
        }
        StateChange::PlaybackChanged { zone, playback } => {
            let role = match playback {
                PlaybackState::Playing => BusRole::ZonePlay(*zone),
                PlaybackState::Paused => BusRole::ZonePause(*zone),
                PlaybackState::Stopped => BusRole::ZoneStop(*zone),
            };
            vec![(role, BusValue::Bit(true))]
        }
        StateChange::TrackChanged { zone, track } => match track {
            Some(track) if track.index <= u16::MAX as u32 => vec![(
                BusRole::ZoneTrackIndex(*zone),
                BusValue::UInt(track.index as u16),
            )],
            _ => vec![],
        },
        StateChange::PlaylistChanged { zone, playlist } => match playlist {
            Some(playlist) if playlist.index <= u16::MAX as u32 => vec![(
                BusRole::ZonePlaylistIndex(*zone),
                BusValue::UInt(playlist.index as u16),
            )],
            _ => vec![],
        },
        StateChange::ShuffleChanged { zone, shuffle } => {
            vec![(BusRole::ZoneShuffle(*zone), BusValue::Bit(*shuffle))]
        }
        StateChange::ClientVolumeChanged { client, volume } => vec![(
            BusRole::ClientVolume(*client),
            BusValue::Byte(percent_to_byte(*volume)),
        )],
        StateChange::ClientMuteChanged { client, muted } => {
            vec![(BusRole::ClientMute(*client), BusValue::Bit(*muted))]
        }
        StateChange::ClientLatencyChanged { client, latency_ms } => vec![(
            BusRole::ClientLatency(*client),
            BusValue::UInt((*latency_ms).min(u16::MAX as u32) as u16),
        )],
        _ => vec![],
    }
}

/// 1-based small index from a byte or 16-bit value; 0 is rejected
fn small_index(value: BusValue) -> Option<u32> {
    let raw = match value {
        BusValue::Byte(b) => b as u32,
        BusValue::UInt(n) => n as u32,
        BusValue::Bit(_) => return None,
    };
    if raw >= 1 {
        Some(raw)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: ZoneIndex = ZoneIndex(1);
    const CLIENT: ClientIndex = ClientIndex(2);

    #[test]
    fn test_scaling_anchor_points() {
        assert_eq!(byte_to_percent(0), 0);
        assert_eq!(byte_to_percent(128), 50);
        assert_eq!(byte_to_percent(255), 100);
        assert_eq!(percent_to_byte(0), 0);
        assert_eq!(percent_to_byte(100), 255);
        assert_eq!(percent_to_byte(50), 128);
    }

    #[test]
    fn test_round_trip_within_one_percent() {
        for pct in 0..=100u8 {
            let back = byte_to_percent(percent_to_byte(pct));
            assert!(
                back.abs_diff(pct) <= 1,
                "pct {pct} came back as {back}"
            );
        }
    }

    #[test]
    fn test_decode_volume_byte() {
        let cmd = decode_bus_value(
            BusRole::ZoneVolume(ZONE),
            BusValue::Byte(191),
            CommandSource::AutomationBus,
        )
        .unwrap();
        assert_eq!(
            cmd.body,
            CommandBody::SetZoneVolume { zone: ZONE, volume: 75 }
        );
    }

    #[test]
    fn test_transport_bits_trigger_on_true_only() {
        assert!(decode_bus_value(
            BusRole::ZonePlay(ZONE),
            BusValue::Bit(true),
            CommandSource::AutomationBus
        )
        .is_some());
        assert!(decode_bus_value(
            BusRole::ZonePlay(ZONE),
            BusValue::Bit(false),
            CommandSource::AutomationBus
        )
        .is_none());
    }

    #[test]
    fn test_index_roles_reject_zero_and_bits() {
        assert!(decode_bus_value(
            BusRole::ZoneTrackIndex(ZONE),
            BusValue::UInt(0),
            CommandSource::AutomationBus
        )
        .is_none());
        assert!(decode_bus_value(
            BusRole::ZoneTrackIndex(ZONE),
            BusValue::Bit(true),
            CommandSource::AutomationBus
        )
        .is_none());
        let cmd = decode_bus_value(
            BusRole::ZonePlaylistIndex(ZONE),
            BusValue::Byte(4),
            CommandSource::AutomationBus,
        )
        .unwrap();
        assert_eq!(
            cmd.body,
            CommandBody::SetPlaylist { zone: ZONE, playlist: 4 }
        );
    }

    #[test]
    fn test_mismatched_role_and_width() {
        // A bit where a scaling byte belongs is not a command
        assert!(decode_bus_value(
            BusRole::ZoneVolume(ZONE),
            BusValue::Bit(true),
            CommandSource::AutomationBus
        )
        .is_none());
    }

    #[test]
    fn test_latency_decode_clamps() {
        let cmd = decode_bus_value(
            BusRole::ClientLatency(CLIENT),
            BusValue::UInt(60_000),
            CommandSource::AutomationBus,
        )
        .unwrap();
        assert_eq!(
            cmd.body,
            CommandBody::SetClientLatency { client: CLIENT, latency_ms: 10_000 }
        );
    }

    #[test]
    fn test_encode_full_volume_is_255() {
        let frames = encode_bus_status(&StateChange::ZoneVolumeChanged {
            zone: ZONE,
            volume: 100,
        });
        assert_eq!(
            frames,
            vec![(BusRole::ZoneVolume(ZONE), BusValue::Byte(255))]
        );
    }

    #[test]
    fn test_encode_playback_sets_matching_bit() {
        let frames = encode_bus_status(&StateChange::PlaybackChanged {
            zone: ZONE,
            playback: PlaybackState::Paused,
        });
        assert_eq!(frames, vec![(BusRole::ZonePause(ZONE), BusValue::Bit(true))]);
    }

    #[test]
    fn test_changes_without_bus_addresses_encode_to_nothing() {
        let frames = encode_bus_status(&StateChange::PositionChanged {
            zone: ZONE,
            position_ms: 1000,
            progress: 0.5,
        });
        assert!(frames.is_empty());
        let frames = encode_bus_status(&StateChange::TrackChanged {
            zone: ZONE,
            track: None,
        });
        assert!(frames.is_empty());
    }
}
