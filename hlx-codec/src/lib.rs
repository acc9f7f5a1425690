//! # hlx-codec - Command codec for the HLX control protocol
//!
//! HLX commands are single ASCII lines of the form
//! `[VERB][OBJECT][ID][,ARG]*`. A server's synchronous reply wraps the same
//! body in parentheses, and an unsolicited notification is byte-identical to
//! the reply. This crate defines one typed struct per command, each pairing a
//! buffer-basis builder (`encode_request` / `encode_response`) with a
//! regex-basis parser (`parse_request` / `parse_response`) against patterns
//! compiled once at startup.
//!
//! ```rust
//! use hlx_codec::zone::Volume;
//!
//! let volume = Volume { zone: 1, level: -42 };
//! assert_eq!(&volume.encode_request()[..], b"VO1,-42\r\n");
//! assert_eq!(&volume.encode_response()[..], b"(VO1,-42)\r\n");
//!
//! let parsed = Volume::parse_response(b"(VO1,-42)").unwrap().unwrap();
//! assert_eq!(parsed, volume);
//! ```
//!
//! The grammar is a data table, not a type hierarchy: every pattern is an
//! anchored regular expression with a declared capture count, validated when
//! the table is built (see [`registry::verify_grammar`]).

#[macro_use]
mod command;

pub mod configuration;
pub mod equalizer;
pub mod error;
pub mod favorite;
pub mod front_panel;
pub mod group;
pub mod infrared;
pub mod network;
pub mod registry;
pub mod source;
pub mod zone;

pub use error::{CodecError, Result};
