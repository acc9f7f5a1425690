//! Connection manager
//!
//! One manager per endpoint. On a server it owns the listener and every
//! accepted peer; on a client it owns the single outbound connection. All
//! lifecycle transitions are announced on the event stream in order
//! (`WillListen → IsListening → DidListen` and the connect/disconnect
//! analogs), and received frames are fanned out as
//! [`ConnectionEvent::FrameReceived`]. The manager frames bytes; it never
//! interprets them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::error::{NetworkError, Result};
use crate::events::ConnectionEvent;
use crate::listener::Listener;
use crate::scheme;

/// Delay between connect retries while the deadline allows
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Capacity of the lifecycle event broadcast
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Transport lifecycle owner for one endpoint
pub struct ConnectionManager {
    events_tx: broadcast::Sender<ConnectionEvent>,
    connections: Arc<Mutex<HashMap<SocketAddr, Connection>>>,
    listener: Mutex<Option<Listener>>,
}

impl ConnectionManager {
    /// Create a manager with no transport yet
    pub fn new() -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let connections: Arc<Mutex<HashMap<SocketAddr, Connection>>> =
            Arc::new(Mutex::new(HashMap::new()));

        // Reap connections whose reader reported a disconnect.
        let reaper_connections = Arc::clone(&connections);
        let mut reaper_rx = events_tx.subscribe();
        tokio::spawn(async move {
            loop {
                match reaper_rx.recv().await {
                    Ok(ConnectionEvent::DidDisconnect { peer, .. }) => {
                        reaper_connections.lock().unwrap().remove(&peer);
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self {
            events_tx,
            connections,
            listener: Mutex::new(None),
        }
    }

    /// Subscribe to lifecycle and frame events
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.events_tx.subscribe()
    }

    /// True only for schemes the transport factory recognizes
    pub fn supports_scheme(scheme_name: &str) -> bool {
        scheme::supports_scheme(scheme_name)
    }

    // ========================================================================
    // Server side
    // ========================================================================

    /// Resolve the URL, bind, and begin accepting peers
    ///
    /// Returns the bound address (meaningful when the URL requested port 0).
    pub async fn listen(&self, url: &str) -> Result<SocketAddr> {
        self.emit(ConnectionEvent::WillListen { url: to_owned(url) });

        let target = match scheme::resolve(url) {
            Ok(target) => target,
            Err(e) => {
                self.emit(ConnectionEvent::DidNotListen { error: e.to_string() });
                return Err(e);
            }
        };

        self.emit(ConnectionEvent::IsListening);

        let (accepted_tx, mut accepted_rx) = mpsc::unbounded_channel();
        let listener = match Listener::spawn(&target, self.events_tx.clone(), accepted_tx).await {
            Ok(listener) => listener,
            Err(e) => {
                self.emit(ConnectionEvent::DidNotListen { error: e.to_string() });
                return Err(e);
            }
        };
        let local = listener.local_addr();
        *self.listener.lock().unwrap() = Some(listener);

        // Register accepted peers as they arrive. The read gate opens and
        // DidAccept goes out only after the connection is addressable
        // through send_to.
        let connections = Arc::clone(&self.connections);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            while let Some((connection, release)) = accepted_rx.recv().await {
                let peer = connection.peer();
                connections.lock().unwrap().insert(peer, connection);
                let _ = release.send(());
                let _ = events_tx.send(ConnectionEvent::DidAccept { peer });
            }
        });

        info!(%local, "listening");
        self.emit(ConnectionEvent::DidListen { local });
        Ok(local)
    }

    // ========================================================================
    // Client side
    // ========================================================================

    /// Resolve the URL and connect, retrying transient failures until the
    /// deadline
    pub async fn connect(&self, url: &str, timeout: Duration) -> Result<SocketAddr> {
        self.emit(ConnectionEvent::WillConnect { url: to_owned(url) });

        let target = match scheme::resolve(url) {
            Ok(target) => target,
            Err(e) => {
                self.emit(ConnectionEvent::DidNotConnect { error: e.to_string() });
                return Err(e);
            }
        };

        let deadline = Instant::now() + timeout;
        let mut last_error = NetworkError::Timeout;

        loop {
            self.emit(ConnectionEvent::IsConnecting);

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            match tokio::time::timeout(remaining, TcpStream::connect(target.authority())).await {
                Ok(Ok(stream)) => {
                    let _ = stream.set_nodelay(true);
                    let peer = stream.peer_addr()?;
                    let connection = Connection::spawn(stream, peer, self.events_tx.clone(), None);
                    self.connections.lock().unwrap().insert(peer, connection);
                    info!(%peer, "connected");
                    self.emit(ConnectionEvent::DidConnect { peer });
                    return Ok(peer);
                }
                Ok(Err(e)) => {
                    warn!(error = %e, authority = %target.authority(), "connect attempt failed");
                    last_error = classify_connect_error(e, &target.host);
                }
                Err(_) => {
                    last_error = NetworkError::Timeout;
                    break;
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(CONNECT_RETRY_DELAY.min(remaining)).await;
        }

        self.emit(ConnectionEvent::DidNotConnect { error: last_error.to_string() });
        Err(last_error)
    }

    // ========================================================================
    // Data path
    // ========================================================================

    /// Queue framed bytes on the sole connection (client side)
    ///
    /// Fails [`NetworkError::NotInitialized`] before `DidConnect`.
    pub fn send(&self, frame: Bytes) -> Result<()> {
        let connections = self.connections.lock().unwrap();
        let connection = connections.values().next().ok_or(NetworkError::NotInitialized)?;
        connection.send(frame)
    }

    /// Queue framed bytes on one peer's connection (server side)
    pub fn send_to(&self, peer: SocketAddr, frame: Bytes) -> Result<()> {
        let connections = self.connections.lock().unwrap();
        let connection = connections.get(&peer).ok_or(NetworkError::NotInitialized)?;
        connection.send(frame)
    }

    /// Queue framed bytes on every connection except one (peer notification)
    pub fn broadcast_except(&self, except: SocketAddr, frame: &Bytes) {
        let connections = self.connections.lock().unwrap();
        for (peer, connection) in connections.iter() {
            if *peer != except {
                if let Err(e) = connection.send(frame.clone()) {
                    debug!(%peer, error = %e, "notification send failed");
                }
            }
        }
    }

    /// Currently connected peers
    pub fn peers(&self) -> Vec<SocketAddr> {
        self.connections.lock().unwrap().keys().copied().collect()
    }

    /// Graceful shutdown of every connection and the listener
    pub fn disconnect(&self) {
        if let Some(listener) = self.listener.lock().unwrap().take() {
            listener.shutdown();
        }

        let drained: Vec<(SocketAddr, Connection)> =
            self.connections.lock().unwrap().drain().collect();
        for (peer, connection) in drained {
            self.emit(ConnectionEvent::WillDisconnect { peer });
            connection.shutdown();
            self.emit(ConnectionEvent::DidDisconnect { peer, error: None });
        }
    }

    fn emit(&self, event: ConnectionEvent) {
        // Nobody subscribed is fine; events are advisory.
        let _ = self.events_tx.send(event);
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_connect_error(error: std::io::Error, host: &str) -> NetworkError {
    // getaddrinfo failures surface as "uncategorized" I/O errors.
    if error.kind() == std::io::ErrorKind::Other
        || error.to_string().contains("failed to lookup address")
    {
        NetworkError::HostNameResolution(host.to_string())
    } else {
        NetworkError::Io(error)
    }
}

fn to_owned(url: &str) -> String {
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_listen_accept_and_frame_delivery() {
        let manager = ConnectionManager::new();
        let mut events = manager.subscribe();

        let local = manager.listen("telnet://127.0.0.1:0").await.unwrap();

        // WillListen, IsListening, DidListen
        assert!(matches!(events.recv().await.unwrap(), ConnectionEvent::WillListen { .. }));
        assert!(matches!(events.recv().await.unwrap(), ConnectionEvent::IsListening));
        assert!(matches!(events.recv().await.unwrap(), ConnectionEvent::DidListen { .. }));

        let mut client = TcpStream::connect(local).await.unwrap();
        assert!(matches!(events.recv().await.unwrap(), ConnectionEvent::DidAccept { .. }));

        client.write_all(b"QO1\r\nQO2\r\n").await.unwrap();

        match events.recv().await.unwrap() {
            ConnectionEvent::FrameReceived { frame, .. } => assert_eq!(&frame[..], b"QO1"),
            other => panic!("unexpected event {other:?}"),
        }
        match events.recv().await.unwrap() {
            ConnectionEvent::FrameReceived { frame, .. } => assert_eq!(&frame[..], b"QO2"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_before_connect_is_not_initialized() {
        let manager = ConnectionManager::new();
        assert!(matches!(
            manager.send(Bytes::from_static(b"QO1\r\n")),
            Err(NetworkError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        let manager = ConnectionManager::new();
        // RFC 5737 TEST-NET-1 address; nothing is listening there.
        let result = manager
            .connect("telnet://192.0.2.1:23", Duration::from_millis(200))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let manager = ConnectionManager::new();
        assert!(matches!(
            manager.listen("ssh://127.0.0.1:0").await,
            Err(NetworkError::UnsupportedScheme(_))
        ));
    }
}
