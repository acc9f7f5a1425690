//! Front panel commands (object code `FP`)
//!
//! The physical panel of the head: display brightness and the key lock.
//! Front panel frames carry no identifier; there is exactly one panel.

use crate::command::{parse_bool_digit, parse_small};

hlx_command! {
    /// Query the panel brightness; answered with the brightness form
    pub struct QueryBrightness {}
    pattern = (r"QFPB", 0);
    build = |_cmd| "QFPB".to_string();
    parse = |_captures| Ok(Self {});
}

hlx_command! {
    /// Query the panel lock; answered with the locked form
    pub struct QueryLocked {}
    pattern = (r"QFPL", 0);
    build = |_cmd| "QFPL".to_string();
    parse = |_captures| Ok(Self {});
}

hlx_command! {
    /// Set (or report) the panel brightness
    pub struct Brightness { pub brightness: u8 }
    pattern = (r"FPB(\d)", 1);
    build = |cmd| format!("FPB{}", cmd.brightness);
    parse = |captures| Ok(Self { brightness: parse_small(&captures[0])? });
}

hlx_command! {
    /// Lock (or unlock) the panel keys
    pub struct Locked { pub locked: bool }
    pattern = (r"FPL([01])", 1);
    build = |cmd| format!("FPL{}", cmd.locked as u8);
    parse = |captures| Ok(Self { locked: parse_bool_digit(&captures[0])? });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_example() {
        // Spec example: set front-panel brightness to 3.
        let brightness = Brightness { brightness: 3 };
        assert_eq!(&brightness.encode_request()[..], b"FPB3\r\n");
        assert_eq!(&brightness.encode_response()[..], b"(FPB3)\r\n");
        assert_eq!(
            Brightness::parse_response(b"(FPB3)").unwrap().unwrap(),
            brightness
        );
    }

    #[test]
    fn test_locked_round_trip() {
        let locked = Locked { locked: true };
        assert_eq!(&locked.encode_request()[..], b"FPL1\r\n");
        assert_eq!(Locked::parse_request(b"FPL0").unwrap().unwrap(), Locked { locked: false });
    }

    #[test]
    fn test_queries() {
        assert!(QueryLocked::parse_request(b"QFPL").is_some());
        assert!(QueryBrightness::parse_request(b"QFPB").is_some());
        assert!(QueryLocked::parse_request(b"QFPB").is_none());
    }
}
