//! Property-based round-trip tests for the command codec
//!
//! For every command type and every valid argument tuple within the declared
//! bounds, parsing a built frame yields the arguments back, in both the
//! request and the response/notification form.

use proptest::prelude::*;

use hlx_codec::{equalizer, front_panel, group, source, zone};

/// Strategy for dense entity identifiers
fn identifier_strategy() -> impl Strategy<Value = u8> {
    1u8..=24
}

/// Strategy for volume levels in scaled dB
fn volume_strategy() -> impl Strategy<Value = i8> {
    -80i8..=0
}

/// Strategy for tone and band levels
fn level_strategy() -> impl Strategy<Value = i8> {
    -10i8..=10
}

/// Strategy for printable names within the 16-character bound
fn name_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,16}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_zone_volume_round_trip(zone in identifier_strategy(), level in volume_strategy()) {
        let command = zone::Volume { zone, level };

        let request = command.encode_request();
        let body = &request[..request.len() - 2];
        prop_assert_eq!(zone::Volume::parse_request(body).unwrap().unwrap(), command.clone());

        let response = command.encode_response();
        let body = &response[..response.len() - 2];
        prop_assert_eq!(zone::Volume::parse_response(body).unwrap().unwrap(), command);
    }

    #[test]
    fn prop_zone_name_round_trip(zone in identifier_strategy(), name in name_strategy()) {
        let command = zone::Name { zone, name };
        let request = command.encode_request();
        let body = &request[..request.len() - 2];
        prop_assert_eq!(zone::Name::parse_request(body).unwrap().unwrap(), command);
    }

    #[test]
    fn prop_mute_round_trip(zone in identifier_strategy(), muted in any::<bool>()) {
        let command = zone::Mute { zone, muted };
        let response = command.encode_response();
        let body = &response[..response.len() - 2];
        prop_assert_eq!(zone::Mute::parse_response(body).unwrap().unwrap(), command);
    }

    #[test]
    fn prop_balance_round_trip(zone in identifier_strategy(), balance in -10i8..=10) {
        if balance == 0 {
            let command = zone::BalanceCenter { zone };
            let request = command.encode_request();
            let body = &request[..request.len() - 2];
            prop_assert_eq!(
                zone::BalanceCenter::parse_request(body).unwrap().unwrap(),
                command
            );
        } else {
            let command = zone::Balance { zone, balance };
            let request = command.encode_request();
            let body = &request[..request.len() - 2];
            prop_assert_eq!(zone::Balance::parse_request(body).unwrap().unwrap(), command);
        }
    }

    #[test]
    fn prop_tone_round_trip(zone in identifier_strategy(), level in level_strategy()) {
        let bass = zone::Bass { zone, level };
        let request = bass.encode_request();
        prop_assert_eq!(
            zone::Bass::parse_request(&request[..request.len() - 2]).unwrap().unwrap(),
            bass
        );

        let treble = zone::Treble { zone, level };
        let request = treble.encode_request();
        prop_assert_eq!(
            zone::Treble::parse_request(&request[..request.len() - 2]).unwrap().unwrap(),
            treble
        );
    }

    #[test]
    fn prop_zone_band_round_trip(
        zone in identifier_strategy(),
        band in 1u8..=10,
        level in level_strategy(),
    ) {
        let command = zone::BandLevel { zone, band, level };
        let response = command.encode_response();
        prop_assert_eq!(
            zone::BandLevel::parse_response(&response[..response.len() - 2]).unwrap().unwrap(),
            command
        );
    }

    #[test]
    fn prop_preset_band_round_trip(
        preset in identifier_strategy(),
        band in 1u8..=10,
        level in level_strategy(),
    ) {
        let command = equalizer::BandLevel { preset, band, level };
        let request = command.encode_request();
        prop_assert_eq!(
            equalizer::BandLevel::parse_request(&request[..request.len() - 2]).unwrap().unwrap(),
            command
        );
    }

    #[test]
    fn prop_group_membership_round_trip(
        group_id in identifier_strategy(),
        zone_id in identifier_strategy(),
    ) {
        let add = group::AddZone { group: group_id, zone: zone_id };
        let request = add.encode_request();
        prop_assert_eq!(
            group::AddZone::parse_request(&request[..request.len() - 2]).unwrap().unwrap(),
            add
        );

        let remove = group::RemoveZone { group: group_id, zone: zone_id };
        let response = remove.encode_response();
        prop_assert_eq!(
            group::RemoveZone::parse_response(&response[..response.len() - 2]).unwrap().unwrap(),
            remove
        );
    }

    #[test]
    fn prop_source_name_round_trip(id in identifier_strategy(), name in name_strategy()) {
        let command = source::Name { source: id, name };
        let response = command.encode_response();
        prop_assert_eq!(
            source::Name::parse_response(&response[..response.len() - 2]).unwrap().unwrap(),
            command
        );
    }

    #[test]
    fn prop_brightness_round_trip(brightness in 0u8..=3) {
        let command = front_panel::Brightness { brightness };
        let request = command.encode_request();
        prop_assert_eq!(
            front_panel::Brightness::parse_request(&request[..request.len() - 2])
                .unwrap()
                .unwrap(),
            command
        );
    }

    /// A frame is never parsed by both the absolute and the relative form.
    #[test]
    fn prop_absolute_and_relative_volume_disjoint(zone in identifier_strategy()) {
        let step = zone::IncreaseVolume { zone };
        let request = step.encode_request();
        let body = &request[..request.len() - 2];
        prop_assert!(zone::Volume::parse_request(body).is_none());
        prop_assert!(zone::IncreaseVolume::parse_request(body).is_some());
    }
}
