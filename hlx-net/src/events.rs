//! Connection lifecycle events
//!
//! Delegates are realized as an event broadcast: every observer subscribes to
//! the manager's channel and sees the same strictly-ordered stream. Events
//! carry owned data (strings for errors) so they stay `Clone` across the
//! broadcast.

use std::net::SocketAddr;

use bytes::Bytes;

/// Lifecycle and data events emitted by a [`crate::ConnectionManager`]
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// A listen was requested
    WillListen { url: String },
    /// The listener socket is being bound
    IsListening,
    /// The listener is accepting on this address
    DidListen { local: SocketAddr },
    /// The listen failed
    DidNotListen { error: String },

    /// A connect was requested
    WillConnect { url: String },
    /// A connect attempt is in progress
    IsConnecting,
    /// The connection is established
    DidConnect { peer: SocketAddr },
    /// The connect failed (after retries, if any)
    DidNotConnect { error: String },

    /// A server listener accepted a new peer
    DidAccept { peer: SocketAddr },

    /// A complete application frame arrived (terminator stripped)
    FrameReceived { peer: SocketAddr, frame: Bytes },

    /// A disconnect was requested
    WillDisconnect { peer: SocketAddr },
    /// The connection is gone; `error` is `None` for a clean shutdown
    DidDisconnect { peer: SocketAddr, error: Option<String> },
}
