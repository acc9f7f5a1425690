//! # hlx-net - Telnet transport for the HLX control protocol
//!
//! A [`ConnectionManager`] owns one endpoint's transport: a listener plus its
//! accepted peers on the server, or a single outbound connection on the
//! client. Frames are delimited per the wire contract (`\r\n` out, `\r?\n`
//! tolerated in) and delivered whole over a lifecycle event stream; the
//! manager never interprets protocol bytes.
//!
//! URL schemes resolve through a factory table ([`scheme`]): `telnet://` maps
//! to plain TCP on port 23. A future scheme is one new table entry.

mod connection;
mod error;
mod events;
mod listener;
mod manager;
pub mod scheme;

pub use connection::Connection;
pub use error::{NetworkError, Result};
pub use events::ConnectionEvent;
pub use listener::Listener;
pub use manager::ConnectionManager;
