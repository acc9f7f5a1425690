//! Command definition macro and capture conversion helpers
//!
//! Every HLX command is declared with [`hlx_command!`]: a struct of typed
//! fields, the frame-body pattern with its capture arity, a builder closure
//! producing the frame body, and a parser closure converting the capture
//! vector back into the struct. The macro derives everything else - the
//! anchored request pattern, the parenthesized response/notification pattern,
//! and the encode/parse entry points.
//!
//! The generated patterns live in `LazyLock` statics; they are literals and
//! compile exactly once. [`crate::registry::verify_grammar`] compiles the
//! same sources independently at startup, so a malformed entry fails
//! initialization with an error instead of a panic at first use deep inside
//! a session.

use crate::error::{CodecError, Result};

/// Declare an HLX command type.
///
/// `pattern` is the frame *body* (no anchors, no parentheses); the macro
/// anchors it for requests and wraps it in `\(…\)` for responses. A
/// notification is encoded identically to a response.
macro_rules! hlx_command {
    (
        $(#[$meta:meta])*
        pub struct $name:ident { $(pub $field:ident: $fty:ty),* $(,)? }
        pattern = ($body:literal, $arity:literal);
        build = |$s:ident| $build:expr;
        parse = |$c:ident| $parse:expr;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: $fty,)*
        }

        impl $name {
            /// Frame-body pattern source and declared capture arity
            pub const GRAMMAR: (&'static str, usize) = ($body, $arity);

            /// Frame body shared by the request and response forms
            pub fn line(&self) -> String {
                let $s = self;
                $build
            }

            /// Compiled request pattern (`^body$`)
            pub fn request_pattern() -> &'static hlx_wire::CommandPattern {
                static PATTERN: std::sync::LazyLock<hlx_wire::CommandPattern> =
                    std::sync::LazyLock::new(|| {
                        hlx_wire::CommandPattern::compile(concat!("^", $body, "$"), $arity)
                            .expect("grammar table entry")
                    });
                &PATTERN
            }

            /// Compiled response/notification pattern (`^\(body\)$`)
            pub fn response_pattern() -> &'static hlx_wire::CommandPattern {
                static PATTERN: std::sync::LazyLock<hlx_wire::CommandPattern> =
                    std::sync::LazyLock::new(|| {
                        hlx_wire::CommandPattern::compile(
                            concat!(r"^\(", $body, r"\)$"),
                            $arity,
                        )
                        .expect("grammar table entry")
                    });
                &PATTERN
            }

            /// Rebuild the command from a capture vector
            pub fn from_captures($c: &[String]) -> crate::error::Result<Self> {
                $parse
            }

            /// Encode as a request frame, `\r\n` terminated
            pub fn encode_request(&self) -> bytes::Bytes {
                hlx_wire::LineFramer::frame(self.line().as_bytes())
            }

            /// Encode as a response or notification frame, `\r\n` terminated
            pub fn encode_response(&self) -> bytes::Bytes {
                hlx_wire::LineFramer::frame(format!("({})", self.line()).as_bytes())
            }

            /// Parse a received request frame
            ///
            /// `None` means the frame is some other command; `Some(Err(_))`
            /// means it matched this grammar but carried an unusable value.
            pub fn parse_request(frame: &[u8]) -> Option<crate::error::Result<Self>> {
                Self::request_pattern()
                    .captures(frame)
                    .map(|captures| Self::from_captures(&captures))
            }

            /// Parse a received response or notification frame
            pub fn parse_response(frame: &[u8]) -> Option<crate::error::Result<Self>> {
                Self::response_pattern()
                    .captures(frame)
                    .map(|captures| Self::from_captures(&captures))
            }
        }
    };
}

/// Declare a fixed-text frame with no captures and no parenthesized form.
///
/// Configuration status frames (`SAVING...`, `SAVE`, `LOAD`, `RESET`) and the
/// `ERROR` response are transmitted bare, identical in every role.
macro_rules! hlx_fixed_frame {
    (
        $(#[$meta:meta])*
        pub struct $name:ident = $text:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            /// The frame text without its terminator
            pub const TEXT: &'static str = $text;

            /// Compiled frame pattern
            pub fn pattern() -> &'static hlx_wire::CommandPattern {
                static PATTERN: std::sync::LazyLock<hlx_wire::CommandPattern> =
                    std::sync::LazyLock::new(|| {
                        let escaped = crate::command::regex_escape($text);
                        hlx_wire::CommandPattern::compile(&format!("^{escaped}$"), 0)
                            .expect("grammar table entry")
                    });
                &PATTERN
            }

            /// Encode the frame, `\r\n` terminated
            pub fn encode(&self) -> bytes::Bytes {
                hlx_wire::LineFramer::frame(Self::TEXT.as_bytes())
            }

            /// True if the frame is exactly this text
            pub fn matches(frame: &[u8]) -> bool {
                frame == Self::TEXT.as_bytes()
            }
        }
    };
}

/// Escape regex metacharacters in a fixed frame text
pub(crate) fn regex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if "\\.+*?()|[]{}^$#&-~".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Parse a dense entity identifier capture
pub(crate) fn parse_identifier(capture: &str) -> Result<u8> {
    capture
        .parse::<u8>()
        .ok()
        .filter(|&id| id >= 1)
        .ok_or_else(|| CodecError::BadCommand(format!("identifier '{capture}' out of range")))
}

/// Parse a signed level capture (volume, tone, equalizer band)
pub(crate) fn parse_level(capture: &str) -> Result<i8> {
    capture
        .parse::<i8>()
        .map_err(|_| CodecError::BadCommand(format!("level '{capture}' out of range")))
}

/// Parse a small unsigned capture (band index, sound mode, brightness)
pub(crate) fn parse_small(capture: &str) -> Result<u8> {
    capture
        .parse::<u8>()
        .map_err(|_| CodecError::BadCommand(format!("value '{capture}' out of range")))
}

/// Parse a crossover frequency capture
pub(crate) fn parse_frequency(capture: &str) -> Result<u16> {
    capture
        .parse::<u16>()
        .map_err(|_| CodecError::BadCommand(format!("frequency '{capture}' out of range")))
}

/// Parse a `M`/`U` mute flag capture
pub(crate) fn parse_mute_flag(capture: &str) -> Result<bool> {
    match capture {
        "M" => Ok(true),
        "U" => Ok(false),
        other => Err(CodecError::BadCommand(format!("mute flag '{other}'"))),
    }
}

/// Parse a `0`/`1` boolean capture
pub(crate) fn parse_bool_digit(capture: &str) -> Result<bool> {
    match capture {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(CodecError::BadCommand(format!("boolean '{other}'"))),
    }
}

/// Encode a mute state as its wire letter
pub(crate) fn mute_letter(muted: bool) -> char {
    if muted {
        'M'
    } else {
        'U'
    }
}
