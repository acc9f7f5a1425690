//! Configuration commands (object letter `X`)
//!
//! `QX` replays the entire head state as notifications, terminated by the
//! `(QX)` echo. The backup verbs are fixed frames: the server answers `SAVE`
//! with the `SAVING...` status followed by `SAVE` on completion, and `LOAD` /
//! `RESET` with the matching completion frame once the model has been
//! reinstalled.

hlx_command! {
    /// Query the current configuration (full state dump, then the echo)
    pub struct QueryConfiguration {}
    pattern = (r"QX", 0);
    build = |_cmd| "QX".to_string();
    parse = |_captures| Ok(Self {});
}

hlx_fixed_frame! {
    /// Load the configuration from the backup blob
    pub struct LoadFromBackup = "LOAD";
}

hlx_fixed_frame! {
    /// Save the configuration to the backup blob
    pub struct SaveToBackup = "SAVE";
}

hlx_fixed_frame! {
    /// Reinstall the vendor default configuration
    pub struct ResetToDefaults = "RESET";
}

hlx_fixed_frame! {
    /// Status frame announcing a save in progress
    pub struct Saving = "SAVING...";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_frames() {
        assert_eq!(&SaveToBackup.encode()[..], b"SAVE\r\n");
        assert_eq!(&Saving.encode()[..], b"SAVING...\r\n");
        assert!(SaveToBackup::matches(b"SAVE"));
        assert!(!SaveToBackup::matches(b"SAVED"));
    }

    #[test]
    fn test_saving_dots_are_literal() {
        // The pattern must not treat the dots as wildcards.
        assert!(Saving::pattern().is_match(b"SAVING..."));
        assert!(!Saving::pattern().is_match(b"SAVINGxxx"));
    }

    #[test]
    fn test_query_configuration() {
        let query = QueryConfiguration {};
        assert_eq!(&query.encode_request()[..], b"QX\r\n");
        assert_eq!(&query.encode_response()[..], b"(QX)\r\n");
        assert!(QueryConfiguration::parse_response(b"(QX)").is_some());
    }
}
