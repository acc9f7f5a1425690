//! Group commands (object letter `G`)
//!
//! A group is a named set of zones commanded as one. Membership is edited
//! with the add/remove forms; the group-scoped analogs of the zone verbs
//! substitute `G` for `O` and fan out on the server to every member in
//! member-id order, each member emitting its own zone notification after the
//! group echo.

use crate::command::{mute_letter, parse_identifier, parse_level, parse_mute_flag};

hlx_command! {
    /// Query a group's name and membership; ends with the echo of this frame
    pub struct QueryGroup { pub group: u8 }
    pattern = (r"QG(\d+)", 1);
    build = |cmd| format!("QG{}", cmd.group);
    parse = |captures| Ok(Self { group: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a group's name
    pub struct Name { pub group: u8, pub name: String }
    pattern = (r"NG(\d+),([[:print:]]{1,16})", 2);
    build = |cmd| format!("NG{},{}", cmd.group, cmd.name);
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        name: captures[1].clone(),
    });
}

hlx_command! {
    /// Add a zone to a group
    pub struct AddZone { pub group: u8, pub zone: u8 }
    pattern = (r"AG(\d+)O(\d+)", 2);
    build = |cmd| format!("AG{}O{}", cmd.group, cmd.zone);
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        zone: parse_identifier(&captures[1])?,
    });
}

hlx_command! {
    /// Remove a zone from a group
    pub struct RemoveZone { pub group: u8, pub zone: u8 }
    pattern = (r"RG(\d+)O(\d+)", 2);
    build = |cmd| format!("RG{}O{}", cmd.group, cmd.zone);
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        zone: parse_identifier(&captures[1])?,
    });
}

hlx_command! {
    /// Set the volume of every member of a group
    pub struct Volume { pub group: u8, pub level: i8 }
    pattern = (r"VG(\d+),(-?\d+)", 2);
    build = |cmd| format!("VG{},{}", cmd.group, cmd.level);
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        level: parse_level(&captures[1])?,
    });
}

hlx_command! {
    /// Raise every member's volume one step
    pub struct IncreaseVolume { pub group: u8 }
    pattern = (r"VG(\d+),U", 1);
    build = |cmd| format!("VG{},U", cmd.group);
    parse = |captures| Ok(Self { group: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Lower every member's volume one step
    pub struct DecreaseVolume { pub group: u8 }
    pattern = (r"VG(\d+),D", 1);
    build = |cmd| format!("VG{},D", cmd.group);
    parse = |captures| Ok(Self { group: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set the mute state of every member of a group
    pub struct Mute { pub group: u8, pub muted: bool }
    pattern = (r"VMG(\d+),([MU])", 2);
    build = |cmd| format!("VMG{},{}", cmd.group, mute_letter(cmd.muted));
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        muted: parse_mute_flag(&captures[1])?,
    });
}

hlx_command! {
    /// Toggle the mute state of every member of a group
    pub struct ToggleMute { pub group: u8 }
    pattern = (r"VMTG(\d+)", 1);
    build = |cmd| format!("VMTG{}", cmd.group);
    parse = |captures| Ok(Self { group: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set the source of every member of a group
    pub struct Source { pub group: u8, pub source: u8 }
    pattern = (r"CG(\d+),(\d+)", 2);
    build = |cmd| format!("CG{},{}", cmd.group, cmd.source);
    parse = |captures| Ok(Self {
        group: parse_identifier(&captures[0])?,
        source: parse_identifier(&captures[1])?,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_zone_example() {
        // Spec example: add zone 5 to group 2.
        let add = AddZone { group: 2, zone: 5 };
        assert_eq!(&add.encode_request()[..], b"AG2O5\r\n");
        assert_eq!(&add.encode_response()[..], b"(AG2O5)\r\n");
        assert_eq!(AddZone::parse_request(b"AG2O5").unwrap().unwrap(), add);
    }

    #[test]
    fn test_group_volume_example() {
        let volume = Volume { group: 2, level: -20 };
        assert_eq!(&volume.encode_request()[..], b"VG2,-20\r\n");
        assert_eq!(Volume::parse_request(b"VG2,-20").unwrap().unwrap(), volume);
    }

    #[test]
    fn test_group_and_zone_verbs_are_distinct() {
        assert!(Volume::parse_request(b"VO2,-20").is_none());
        assert!(crate::zone::Volume::parse_request(b"VG2,-20").is_none());
    }

    #[test]
    fn test_remove_zone() {
        let remove = RemoveZone::parse_request(b"RG1O3").unwrap().unwrap();
        assert_eq!(remove, RemoveZone { group: 1, zone: 3 });
    }

    #[test]
    fn test_group_toggle_mute() {
        assert!(Mute::parse_request(b"VMTG2").is_none());
        assert_eq!(
            ToggleMute::parse_request(b"VMTG2").unwrap().unwrap(),
            ToggleMute { group: 2 }
        );
    }
}
