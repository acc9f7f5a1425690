//! Source commands (object letter `I`)
//!
//! Sources are the selectable inputs; their only mutable attribute is the
//! name. Which source a zone plays is a zone command (`CO…`).

use crate::command::parse_identifier;

hlx_command! {
    /// Query a source; the response is its name frame followed by the echo
    pub struct QuerySource { pub source: u8 }
    pattern = (r"QI(\d+)", 1);
    build = |cmd| format!("QI{}", cmd.source);
    parse = |captures| Ok(Self { source: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a source's name
    pub struct Name { pub source: u8, pub name: String }
    pattern = (r"NI(\d+),([[:print:]]{1,16})", 2);
    build = |cmd| format!("NI{},{}", cmd.source, cmd.name);
    parse = |captures| Ok(Self {
        source: parse_identifier(&captures[0])?,
        name: captures[1].clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let name = Name { source: 3, name: "Turntable".to_string() };
        assert_eq!(&name.encode_response()[..], b"(NI3,Turntable)\r\n");
        assert_eq!(Name::parse_response(b"(NI3,Turntable)").unwrap().unwrap(), name);
    }

    #[test]
    fn test_source_names_do_not_match_zone_names() {
        assert!(Name::parse_request(b"NO3,Turntable").is_none());
    }
}
