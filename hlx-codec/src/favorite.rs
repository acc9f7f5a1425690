//! Favorite commands (object letter `F`)

use crate::command::parse_identifier;

hlx_command! {
    /// Query a favorite; the response is its name frame followed by the echo
    pub struct QueryFavorite { pub favorite: u8 }
    pattern = (r"QF(\d+)", 1);
    build = |cmd| format!("QF{}", cmd.favorite);
    parse = |captures| Ok(Self { favorite: parse_identifier(&captures[0])? });
}

hlx_command! {
    /// Set (or report) a favorite's name
    pub struct Name { pub favorite: u8, pub name: String }
    pattern = (r"NF(\d+),([[:print:]]{1,16})", 2);
    build = |cmd| format!("NF{},{}", cmd.favorite, cmd.name);
    parse = |captures| Ok(Self {
        favorite: parse_identifier(&captures[0])?,
        name: captures[1].clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_favorite_is_not_front_panel() {
        // QFPL is a front panel query, not favorite "PL".
        assert!(QueryFavorite::parse_request(b"QFPL").is_none());
        assert_eq!(
            QueryFavorite::parse_request(b"QF1").unwrap().unwrap(),
            QueryFavorite { favorite: 1 }
        );
    }

    #[test]
    fn test_name_round_trip() {
        let name = Name { favorite: 2, name: "Morning Jazz".to_string() };
        assert_eq!(&name.encode_request()[..], b"NF2,Morning Jazz\r\n");
        assert_eq!(Name::parse_response(b"(NF2,Morning Jazz)").unwrap().unwrap(), name);
    }
}
