//! # hlx-wire - Wire primitives for the HLX control protocol
//!
//! This crate holds the pure, I/O-free building blocks shared by the HLX
//! client, server, and codec:
//!
//! - [`ConnectionBuffer`]: a growable, shared byte buffer with an exclusive
//!   mutation window
//! - [`LineFramer`]: CR/LF frame accumulation and emission
//! - [`CommandPattern`]: an anchored regular expression with a declared
//!   capture count, compiled once at startup
//!
//! Everything here operates on 7-bit ASCII frames; transport and protocol
//! interpretation live in the `hlx-net` and `hlx-codec` crates.

mod buffer;
mod error;
mod framer;
mod matcher;

pub use buffer::ConnectionBuffer;
pub use error::{Result, WireError};
pub use framer::{LineFramer, FRAME_TERMINATOR};
pub use matcher::CommandPattern;
