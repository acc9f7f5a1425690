//! Zone commands (object letter `O`)
//!
//! A zone is one amplified output channel. Zone commands cover observation
//! (`QO…`), naming, volume and mute, source selection, tone, balance, sound
//! mode, crossover frequencies, and the zone's own equalizer bands.
//!
//! Mutation commands double as their own response/notification form: the
//! request `VO1,-30` is answered `(VO1,-30)`, and other connected peers see
//! the same `(VO1,-30)` as an unsolicited notification. Relative commands
//! (`…,U` / `…,D`) are answered with the absolute form carrying the new
//! value.

use crate::command::{
    mute_letter, parse_bool_digit, parse_frequency, parse_identifier, parse_level,
    parse_mute_flag, parse_small,
};
use crate::error::CodecError;

hlx_command! {
    /// Query the full state of a zone; the response sequence ends with the
    /// parenthesized echo of this frame.
    pub struct QueryZone { pub zone: u8 }
    pattern = (r"QO(\d+)", 1);
    build = |cmd| format!("QO{}", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Query a zone's volume; answered with the absolute volume form.
    pub struct QueryVolume { pub zone: u8 }
    pattern = (r"QVO(\d+)", 1);
    build = |cmd| format!("QVO{}", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Query a zone's mute state; answered with the mute form.
    pub struct QueryMute { pub zone: u8 }
    pattern = (r"QVMO(\d+)", 1);
    build = |cmd| format!("QVMO{}", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a zone's name
    pub struct Name { pub zone: u8, pub name: String }
    pattern = (r"NO(\d+),([[:print:]]{1,16})", 2);
    build = |cmd| format!("NO{},{}", cmd.zone, cmd.name);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        name: captures[1].clone(),
    });
}

hlx_command! {
    /// Set (or report) a zone's volume in scaled dB
    pub struct Volume { pub zone: u8, pub level: i8 }
    pattern = (r"VO(\d+),(-?\d+)", 2);
    build = |cmd| format!("VO{},{}", cmd.zone, cmd.level);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        level: parse_level(&captures[1])?,
    });
}

hlx_command! {
    /// Raise a zone's volume one step
    pub struct IncreaseVolume { pub zone: u8 }
    pattern = (r"VO(\d+),U", 1);
    build = |cmd| format!("VO{},U", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Lower a zone's volume one step
    pub struct DecreaseVolume { pub zone: u8 }
    pattern = (r"VO(\d+),D", 1);
    build = |cmd| format!("VO{},D", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a zone's mute state (`M` muted, `U` unmuted)
    pub struct Mute { pub zone: u8, pub muted: bool }
    pattern = (r"VMO(\d+),([MU])", 2);
    build = |cmd| format!("VMO{},{}", cmd.zone, mute_letter(cmd.muted));
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        muted: parse_mute_flag(&captures[1])?,
    });
}

hlx_command! {
    /// Toggle a zone's mute state; answered with the absolute mute form
    pub struct ToggleMute { pub zone: u8 }
    pattern = (r"VMTO(\d+)", 1);
    build = |cmd| format!("VMTO{}", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Lock (or unlock) a zone's volume at its current level
    pub struct VolumeFixed { pub zone: u8, pub fixed: bool }
    pattern = (r"VFO(\d+),([01])", 2);
    build = |cmd| format!("VFO{},{}", cmd.zone, cmd.fixed as u8);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        fixed: parse_bool_digit(&captures[1])?,
    });
}

hlx_command! {
    /// Set every zone's volume at once
    pub struct VolumeAll { pub level: i8 }
    pattern = (r"VOA,(-?\d+)", 1);
    build = |cmd| format!("VOA,{}", cmd.level);
    parse = |captures| Ok(Self { level: parse_level(&captures[0])? });
}

hlx_command! {
    /// Set every zone's mute state at once
    pub struct MuteAll { pub muted: bool }
    pattern = (r"VMOA,([MU])", 1);
    build = |cmd| format!("VMOA,{}", mute_letter(cmd.muted));
    parse = |captures| Ok(Self { muted: parse_mute_flag(&captures[0])? });
}

hlx_command! {
    /// Set (or report) the source a zone plays
    pub struct Source { pub zone: u8, pub source: u8 }
    pattern = (r"CO(\d+),(\d+)", 2);
    build = |cmd| format!("CO{},{}", cmd.zone, cmd.source);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        source: parse_identifier(&captures[1])?,
    });
}

hlx_command! {
    /// Set every zone's source at once
    pub struct SourceAll { pub source: u8 }
    pattern = (r"COA,(\d+)", 1);
    build = |cmd| format!("COA,{}", cmd.source);
    parse = |captures| Ok(Self { source: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a zone's bass level
    pub struct Bass { pub zone: u8, pub level: i8 }
    pattern = (r"TBO(\d+),(-?\d+)", 2);
    build = |cmd| format!("TBO{},{}", cmd.zone, cmd.level);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        level: parse_level(&captures[1])?,
    });
}

hlx_command! {
    /// Raise a zone's bass one step
    pub struct IncreaseBass { pub zone: u8 }
    pattern = (r"TBO(\d+),U", 1);
    build = |cmd| format!("TBO{},U", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Lower a zone's bass one step
    pub struct DecreaseBass { pub zone: u8 }
    pattern = (r"TBO(\d+),D", 1);
    build = |cmd| format!("TBO{},D", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a zone's treble level
    pub struct Treble { pub zone: u8, pub level: i8 }
    pattern = (r"TTO(\d+),(-?\d+)", 2);
    build = |cmd| format!("TTO{},{}", cmd.zone, cmd.level);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        level: parse_level(&captures[1])?,
    });
}

hlx_command! {
    /// Raise a zone's treble one step
    pub struct IncreaseTreble { pub zone: u8 }
    pattern = (r"TTO(\d+),U", 1);
    build = |cmd| format!("TTO{},U", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Lower a zone's treble one step
    pub struct DecreaseTreble { pub zone: u8 }
    pattern = (r"TTO(\d+),D", 1);
    build = |cmd| format!("TTO{},D", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a non-centered balance (`L<n>` left bias, `R<n>`
    /// right bias). A centered balance is the separate [`BalanceCenter`]
    /// form.
    pub struct Balance { pub zone: u8, pub balance: i8 }
    pattern = (r"BO(\d+),([LR])(\d+)", 3);
    build = |cmd| format!(
        "BO{},{}{}",
        cmd.zone,
        if cmd.balance < 0 { 'L' } else { 'R' },
        cmd.balance.unsigned_abs()
    );
    parse = |captures| {
        let magnitude = parse_small(&captures[2])? as i8;
        let balance = match captures[1].as_str() {
            "L" => -magnitude,
            "R" => magnitude,
            other => return Err(CodecError::BadCommand(format!("balance side '{other}'"))),
        };
        Ok(Self { zone: parse_identifier(&captures[0])?, balance })
    };
}

hlx_command! {
    /// Center a zone's balance (or report a centered balance)
    pub struct BalanceCenter { pub zone: u8 }
    pattern = (r"BO(\d+),C", 1);
    build = |cmd| format!("BO{},C", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Step a zone's balance one unit toward the left channel
    pub struct IncreaseBalanceLeft { pub zone: u8 }
    pattern = (r"BO(\d+),L", 1);
    build = |cmd| format!("BO{},L", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Step a zone's balance one unit toward the right channel
    pub struct IncreaseBalanceRight { pub zone: u8 }
    pattern = (r"BO(\d+),R", 1);
    build = |cmd| format!("BO{},R", cmd.zone);
    parse = |captures| Ok(Self { zone: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a zone's sound mode
    pub struct SoundMode { pub zone: u8, pub mode: u8 }
    pattern = (r"SMO(\d+),(\d)", 2);
    build = |cmd| format!("SMO{},{}", cmd.zone, cmd.mode);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        mode: parse_small(&captures[1])?,
    });
}

hlx_command! {
    /// Set (or report) a zone's highpass crossover frequency in Hz
    pub struct HighpassCrossover { pub zone: u8, pub frequency: u16 }
    pattern = (r"HPO(\d+),(\d+)", 2);
    build = |cmd| format!("HPO{},{}", cmd.zone, cmd.frequency);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        frequency: parse_frequency(&captures[1])?,
    });
}

hlx_command! {
    /// Set (or report) a zone's lowpass crossover frequency in Hz
    pub struct LowpassCrossover { pub zone: u8, pub frequency: u16 }
    pattern = (r"LPO(\d+),(\d+)", 2);
    build = |cmd| format!("LPO{},{}", cmd.zone, cmd.frequency);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        frequency: parse_frequency(&captures[1])?,
    });
}

hlx_command! {
    /// Set (or report) one equalizer band level of a zone
    pub struct BandLevel { pub zone: u8, pub band: u8, pub level: i8 }
    pattern = (r"EBO(\d+),(\d+),(-?\d+)", 3);
    build = |cmd| format!("EBO{},{},{}", cmd.zone, cmd.band, cmd.level);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
        level: parse_level(&captures[2])?,
    });
}

hlx_command! {
    /// Raise one equalizer band of a zone one step
    pub struct IncreaseBandLevel { pub zone: u8, pub band: u8 }
    pattern = (r"EBO(\d+),(\d+),U", 2);
    build = |cmd| format!("EBO{},{},U", cmd.zone, cmd.band);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
    });
}

hlx_command! {
    /// Lower one equalizer band of a zone one step
    pub struct DecreaseBandLevel { pub zone: u8, pub band: u8 }
    pattern = (r"EBO(\d+),(\d+),D", 2);
    build = |cmd| format!("EBO{},{},D", cmd.zone, cmd.band);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
    });
}

hlx_command! {
    /// Assign (or report) the equalizer preset a zone uses
    pub struct EqualizerPreset { pub zone: u8, pub preset: u8 }
    pattern = (r"EPO(\d+),(\d+)", 2);
    build = |cmd| format!("EPO{},{}", cmd.zone, cmd.preset);
    parse = |captures| Ok(Self {
        zone: parse_identifier(&captures[0])?,
        preset: parse_identifier(&captures[1])?,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_round_trip() {
        let volume = Volume { zone: 1, level: -42 };
        assert_eq!(&volume.encode_request()[..], b"VO1,-42\r\n");
        assert_eq!(&volume.encode_response()[..], b"(VO1,-42)\r\n");

        assert_eq!(Volume::parse_request(b"VO1,-42").unwrap().unwrap(), volume);
        assert_eq!(
            Volume::parse_response(b"(VO1,-42)").unwrap().unwrap(),
            volume
        );
    }

    #[test]
    fn test_query_volume_example() {
        // Spec example: query zone 1 volume
        let query = QueryVolume { zone: 1 };
        assert_eq!(&query.encode_request()[..], b"QVO1\r\n");
        assert_eq!(
            Volume::parse_response(b"(VO1,-42)").unwrap().unwrap(),
            Volume { zone: 1, level: -42 }
        );
    }

    #[test]
    fn test_relative_volume_does_not_match_absolute() {
        assert!(Volume::parse_request(b"VO3,U").is_none());
        assert_eq!(
            IncreaseVolume::parse_request(b"VO3,U").unwrap().unwrap(),
            IncreaseVolume { zone: 3 }
        );
        assert_eq!(
            DecreaseVolume::parse_request(b"VO3,D").unwrap().unwrap(),
            DecreaseVolume { zone: 3 }
        );
    }

    #[test]
    fn test_mute_letter_codes() {
        let muted = Mute { zone: 2, muted: true };
        assert_eq!(&muted.encode_request()[..], b"VMO2,M\r\n");

        let unmuted = Mute::parse_response(b"(VMO2,U)").unwrap().unwrap();
        assert!(!unmuted.muted);
    }

    #[test]
    fn test_toggle_mute_is_more_specific_than_mute() {
        // VMTO1 must parse as toggle, never as a malformed Mute.
        assert!(Mute::parse_request(b"VMTO1").is_none());
        assert_eq!(
            ToggleMute::parse_request(b"VMTO1").unwrap().unwrap(),
            ToggleMute { zone: 1 }
        );
    }

    #[test]
    fn test_balance_encoding() {
        let left = Balance { zone: 1, balance: -5 };
        assert_eq!(&left.encode_request()[..], b"BO1,L5\r\n");

        let right = Balance::parse_request(b"BO1,R7").unwrap().unwrap();
        assert_eq!(right.balance, 7);

        let center = BalanceCenter { zone: 1 };
        assert_eq!(&center.encode_response()[..], b"(BO1,C)\r\n");

        // Bare L/R (no digits) is the step form, not a set.
        assert!(Balance::parse_request(b"BO1,L").is_none());
        assert_eq!(
            IncreaseBalanceLeft::parse_request(b"BO1,L").unwrap().unwrap(),
            IncreaseBalanceLeft { zone: 1 }
        );
    }

    #[test]
    fn test_name_bounds() {
        let name = Name { zone: 4, name: "Living Room".to_string() };
        assert_eq!(&name.encode_request()[..], b"NO4,Living Room\r\n");
        assert_eq!(Name::parse_request(b"NO4,Living Room").unwrap().unwrap(), name);

        // 17 printable characters exceed the name bound.
        assert!(Name::parse_request(b"NO4,aaaaaaaaaaaaaaaaa").is_none());
        // Empty names never match.
        assert!(Name::parse_request(b"NO4,").is_none());
    }

    #[test]
    fn test_band_level_forms() {
        let set = BandLevel { zone: 1, band: 4, level: -3 };
        assert_eq!(&set.encode_request()[..], b"EBO1,4,-3\r\n");

        assert_eq!(
            IncreaseBandLevel::parse_request(b"EBO1,4,U").unwrap().unwrap(),
            IncreaseBandLevel { zone: 1, band: 4 }
        );
        assert!(BandLevel::parse_request(b"EBO1,4,U").is_none());
    }

    #[test]
    fn test_all_zone_forms() {
        assert_eq!(
            VolumeAll::parse_request(b"VOA,-30").unwrap().unwrap(),
            VolumeAll { level: -30 }
        );
        assert_eq!(
            MuteAll::parse_request(b"VMOA,M").unwrap().unwrap(),
            MuteAll { muted: true }
        );
        assert_eq!(
            SourceAll::parse_request(b"COA,2").unwrap().unwrap(),
            SourceAll { source: 2 }
        );
    }

    #[test]
    fn test_identifier_zero_rejected() {
        assert!(matches!(
            Volume::parse_request(b"VO0,-10"),
            Some(Err(crate::error::CodecError::BadCommand(_)))
        ));
    }
}
