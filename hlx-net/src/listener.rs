//! TCP listener with an accept loop

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::{NetworkError, Result};
use crate::events::ConnectionEvent;
use crate::scheme::SocketTarget;

/// Server-side listener
///
/// Binds the target address and accepts peers until shut down. Each accepted
/// peer becomes a gated [`Connection`] handed to the manager over a channel;
/// the manager registers it, opens the read gate, and announces
/// [`ConnectionEvent::DidAccept`].
#[derive(Debug)]
pub struct Listener {
    local: SocketAddr,
    accept_task: JoinHandle<()>,
}

impl Listener {
    /// Bind and start accepting
    pub(crate) async fn spawn(
        target: &SocketTarget,
        events: broadcast::Sender<ConnectionEvent>,
        accepted_tx: mpsc::UnboundedSender<(Connection, oneshot::Sender<()>)>,
    ) -> Result<Self> {
        let listener = TcpListener::bind(target.authority()).await.map_err(|e| {
            NetworkError::InitializationFailed(format!("bind {}: {e}", target.authority()))
        })?;
        let local = listener.local_addr()?;
        debug!(%local, "listener bound");

        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        debug!(%peer, "accepted connection");
                        let _ = stream.set_nodelay(true);
                        let (release_tx, gate_rx) = oneshot::channel();
                        let connection =
                            Connection::spawn(stream, peer, events.clone(), Some(gate_rx));
                        if accepted_tx.send((connection, release_tx)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                    }
                }
            }
        });

        Ok(Self { local, accept_task })
    }

    /// The bound local address (useful when the port was 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }

    pub(crate) fn shutdown(&self) {
        self.accept_task.abort();
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.shutdown();
    }
}
