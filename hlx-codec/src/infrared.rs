//! Infrared remote commands (object code `IR`)

use crate::command::parse_bool_digit;

hlx_command! {
    /// Query whether the infrared receiver is disabled
    pub struct QueryDisabled {}
    pattern = (r"QIRD", 0);
    build = |_cmd| "QIRD".to_string();
    parse = |_captures| Ok(Self {});
}

hlx_command! {
    /// Disable (or enable) the infrared receiver
    pub struct Disabled { pub disabled: bool }
    pattern = (r"IRD([01])", 1);
    build = |cmd| format!("IRD{}", cmd.disabled as u8);
    parse = |captures| Ok(Self { disabled: parse_bool_digit(&captures[0])? });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_round_trip() {
        let disabled = Disabled { disabled: true };
        assert_eq!(&disabled.encode_request()[..], b"IRD1\r\n");
        assert_eq!(
            Disabled::parse_response(b"(IRD0)").unwrap().unwrap(),
            Disabled { disabled: false }
        );
    }
}
