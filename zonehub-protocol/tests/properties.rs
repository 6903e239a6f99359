//! Property tests for payload clamping and the scaling-byte codec.

use proptest::prelude::*;

use zonehub_protocol::bus::{byte_to_percent, percent_to_byte};
use zonehub_protocol::{parse_message_path, CommandBody, CommandSource, TargetKind};
use zonehub_state::ZoneIndex;

proptest! {
    #[test]
    fn volume_payloads_clamp_to_domain(value in -1000i64..1000) {
        let cmd = parse_message_path(
            TargetKind::Zone,
            1,
            "volume/set",
            &value.to_string(),
            CommandSource::MessageBus,
        );
        let expected = value.clamp(0, 100) as u8;
        prop_assert_eq!(
            cmd.map(|c| c.body),
            Some(CommandBody::SetZoneVolume {
                zone: ZoneIndex::new(1),
                volume: expected
            })
        );
    }

    #[test]
    fn relative_steps_clamp_to_domain(magnitude in 0i64..500) {
        let cmd = parse_message_path(
            TargetKind::Zone,
            1,
            "volume/set",
            &format!("+{magnitude}"),
            CommandSource::MessageBus,
        );
        let expected = magnitude.clamp(1, 50) as u8;
        prop_assert_eq!(
            cmd.map(|c| c.body),
            Some(CommandBody::ZoneVolumeUp {
                zone: ZoneIndex::new(1),
                step: expected
            })
        );
    }

    #[test]
    fn alphabetic_payloads_never_parse_on_volume(payload in "[a-zA-Z]{1,12}") {
        let cmd = parse_message_path(
            TargetKind::Zone,
            1,
            "volume/set",
            &payload,
            CommandSource::MessageBus,
        );
        prop_assert!(cmd.is_none());
    }

    #[test]
    fn nonpositive_indices_never_parse(index in -1000i64..=0, volume in 0u8..=100) {
        let cmd = parse_message_path(
            TargetKind::Zone,
            index,
            "volume/set",
            &volume.to_string(),
            CommandSource::MessageBus,
        );
        prop_assert!(cmd.is_none());
    }

    #[test]
    fn percent_round_trip_is_exact(pct in 0u8..=100) {
        // 255 steps over 100 values: proper rounding makes the round trip
        // lossless in this direction
        prop_assert_eq!(byte_to_percent(percent_to_byte(pct)), pct);
    }

    #[test]
    fn byte_round_trip_within_one_step(byte in 0u8..=255) {
        let back = percent_to_byte(byte_to_percent(byte));
        prop_assert!(back.abs_diff(byte) <= 2, "byte {} came back as {}", byte, back);
    }

    #[test]
    fn byte_decode_stays_in_domain(byte in 0u8..=255) {
        prop_assert!(byte_to_percent(byte) <= 100);
    }
}
