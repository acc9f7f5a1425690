//! Command pattern matching
//!
//! Every protocol verb is recognized by an anchored regular expression with a
//! declared number of capture groups. Patterns are compiled exactly once, at
//! startup, when the grammar tables are built; a pattern that fails to
//! compile, is unanchored, or whose actual capture count disagrees with the
//! declared arity fails [`WireError::InitializationFailed`] there and then.

use regex::bytes::Regex;

use crate::error::{Result, WireError};

/// A compiled protocol pattern with its declared capture arity
#[derive(Debug, Clone)]
pub struct CommandPattern {
    regex: Regex,
    expected_captures: usize,
}

impl CommandPattern {
    /// Compile a pattern, validating anchoring and capture arity
    ///
    /// The pattern must be fully anchored (`^…$`): protocol frames are
    /// matched whole, never as substrings.
    pub fn compile(pattern: &str, expected_captures: usize) -> Result<Self> {
        if !pattern.starts_with('^') || !pattern.ends_with('$') {
            return Err(WireError::InitializationFailed(format!(
                "pattern '{pattern}' must be anchored with ^…$"
            )));
        }

        let regex = Regex::new(pattern)
            .map_err(|e| WireError::InitializationFailed(format!("pattern '{pattern}': {e}")))?;

        let actual = regex.captures_len() - 1;
        if actual != expected_captures {
            return Err(WireError::InitializationFailed(format!(
                "pattern '{pattern}' has {actual} captures, declared {expected_captures}"
            )));
        }

        Ok(Self {
            regex,
            expected_captures,
        })
    }

    /// The declared capture arity
    pub fn expected_captures(&self) -> usize {
        self.expected_captures
    }

    /// The pattern source text
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True if the frame matches this pattern
    pub fn is_match(&self, frame: &[u8]) -> bool {
        self.regex.is_match(frame)
    }

    /// Match a frame, returning the capture texts in group order
    ///
    /// Frames are ASCII; captures come back as owned strings. Returns `None`
    /// when the frame does not match.
    pub fn captures(&self, frame: &[u8]) -> Option<Vec<String>> {
        let captures = self.regex.captures(frame)?;
        Some(
            (1..captures.len())
                .map(|i| {
                    captures
                        .get(i)
                        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
                        .unwrap_or_default()
                })
                .collect(),
        )
    }

    /// Match a frame, returning (start, end) byte spans per capture group
    pub fn capture_spans(&self, frame: &[u8]) -> Option<Vec<(usize, usize)>> {
        let captures = self.regex.captures(frame)?;
        Some(
            (1..captures.len())
                .filter_map(|i| captures.get(i))
                .map(|m| (m.start(), m.end()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_match() {
        let pattern = CommandPattern::compile(r"^VO(\d+),(-?\d+)$", 2).unwrap();

        assert!(pattern.is_match(b"VO1,-42"));
        assert_eq!(
            pattern.captures(b"VO1,-42"),
            Some(vec!["1".to_string(), "-42".to_string()])
        );
        assert!(!pattern.is_match(b"VO1,-42X"));
    }

    #[test]
    fn test_arity_mismatch_fails_initialization() {
        let result = CommandPattern::compile(r"^VO(\d+),(-?\d+)$", 1);
        assert!(matches!(result, Err(WireError::InitializationFailed(_))));
    }

    #[test]
    fn test_unanchored_pattern_rejected() {
        assert!(matches!(
            CommandPattern::compile(r"VO(\d+)$", 1),
            Err(WireError::InitializationFailed(_))
        ));
        assert!(matches!(
            CommandPattern::compile(r"^VO(\d+)", 1),
            Err(WireError::InitializationFailed(_))
        ));
    }

    #[test]
    fn test_bad_pattern_fails_initialization() {
        let result = CommandPattern::compile(r"^VO(\d+$", 1);
        assert!(matches!(result, Err(WireError::InitializationFailed(_))));
    }

    #[test]
    fn test_capture_spans() {
        let pattern = CommandPattern::compile(r"^AG(\d+)O(\d+)$", 2).unwrap();
        let spans = pattern.capture_spans(b"AG2O5").unwrap();
        assert_eq!(spans, vec![(2, 3), (4, 5)]);
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = CommandPattern::compile(r"^ERROR$", 0).unwrap();
        assert!(pattern.is_match(b"ERROR"));
        assert!(!pattern.is_match(b"error"));
    }
}
