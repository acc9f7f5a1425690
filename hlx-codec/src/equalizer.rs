//! Equalizer preset commands (object letter `E`)
//!
//! Presets are named band-level tables that zones can reference. The band
//! verbs mirror the zone band verbs with `E` in the object position.

use crate::command::{parse_identifier, parse_level, parse_small};

hlx_command! {
    /// Query a preset; responses are its name and band frames, then the echo
    pub struct QueryPreset { pub preset: u8 }
    pattern = (r"QE(\d+)", 1);
    build = |cmd| format!("QE{}", cmd.preset);
    parse = |captures| Ok(Self { preset: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a preset's name
    pub struct Name { pub preset: u8, pub name: String }
    pattern = (r"NE(\d+),([[:print:]]{1,16})", 2);
    build = |cmd| format!("NE{},{}", cmd.preset, cmd.name);
    parse = |captures| Ok(Self {
        preset: parse_identifier(&captures[0])?,
        name: captures[1].clone(),
    });
}

hlx_command! {
    /// Set (or report) one band level of a preset
    pub struct BandLevel { pub preset: u8, pub band: u8, pub level: i8 }
    pattern = (r"EBE(\d+),(\d+),(-?\d+)", 3);
    build = |cmd| format!("EBE{},{},{}", cmd.preset, cmd.band, cmd.level);
    parse = |captures| Ok(Self {
        preset: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
        level: parse_level(&captures[2])?,
    });
}

hlx_command! {
    /// Raise one band of a preset one step
    pub struct IncreaseBandLevel { pub preset: u8, pub band: u8 }
    pattern = (r"EBE(\d+),(\d+),U", 2);
    build = |cmd| format!("EBE{},{},U", cmd.preset, cmd.band);
    parse = |captures| Ok(Self {
        preset: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
    });
}

hlx_command! {
    /// Lower one band of a preset one step
    pub struct DecreaseBandLevel { pub preset: u8, pub band: u8 }
    pattern = (r"EBE(\d+),(\d+),D", 2);
    build = |cmd| format!("EBE{},{},D", cmd.preset, cmd.band);
    parse = |captures| Ok(Self {
        preset: parse_identifier(&captures[0])?,
        band: parse_small(&captures[1])?,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_band_round_trip() {
        let band = BandLevel { preset: 2, band: 7, level: 5 };
        assert_eq!(&band.encode_request()[..], b"EBE2,7,5\r\n");
        assert_eq!(BandLevel::parse_response(b"(EBE2,7,5)").unwrap().unwrap(), band);
    }

    #[test]
    fn test_preset_bands_are_not_zone_bands() {
        assert!(BandLevel::parse_request(b"EBO2,7,5").is_none());
        assert!(crate::zone::BandLevel::parse_request(b"EBE2,7,5").is_none());
    }

    #[test]
    fn test_step_forms() {
        assert_eq!(
            IncreaseBandLevel::parse_request(b"EBE1,0,U").unwrap().unwrap(),
            IncreaseBandLevel { preset: 1, band: 0 }
        );
        assert_eq!(
            DecreaseBandLevel::parse_request(b"EBE1,0,D").unwrap().unwrap(),
            DecreaseBandLevel { preset: 1, band: 0 }
        );
    }
}
