//! A single framed TCP connection
//!
//! Each connection owns two tasks: a reader that feeds raw chunks through a
//! [`LineFramer`] and emits one [`ConnectionEvent::FrameReceived`] per
//! complete frame, and a writer that drains an outbound queue. Send order is
//! queue order; the writer never interleaves partial frames. Queued frames
//! are coalesced through a [`ConnectionBuffer`] so a multi-frame reply (a
//! full state dump runs to dozens of lines) goes out in one write.

use std::net::SocketAddr;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use hlx_wire::{ConnectionBuffer, LineFramer};

use crate::error::{NetworkError, Result};
use crate::events::ConnectionEvent;

/// A live framed connection to one peer
#[derive(Debug)]
pub struct Connection {
    peer: SocketAddr,
    outbound_tx: mpsc::UnboundedSender<Bytes>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Connection {
    /// Take ownership of a connected stream and start its reader/writer
    ///
    /// When `gate` is given, the reader holds its first read until the gate
    /// fires. The manager uses this to keep a peer's frames from surfacing
    /// before the peer is registered and addressable.
    pub(crate) fn spawn(
        stream: TcpStream,
        peer: SocketAddr,
        events: broadcast::Sender<ConnectionEvent>,
        gate: Option<oneshot::Receiver<()>>,
    ) -> Self {
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Bytes>();
        let (read_half, mut write_half) = stream.into_split();

        let reader_events = events.clone();
        let reader = tokio::spawn(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            let mut read_half = read_half;
            let mut framer = LineFramer::new();
            let mut chunk = [0u8; 4096];
            let error = loop {
                match read_half.read(&mut chunk).await {
                    Ok(0) => break None,
                    Ok(n) => {
                        framer.extend(&chunk[..n]);
                        while let Some(frame) = framer.next_frame() {
                            trace!(%peer, frame = %String::from_utf8_lossy(&frame), "rx");
                            let _ = reader_events
                                .send(ConnectionEvent::FrameReceived { peer, frame });
                        }
                    }
                    Err(e) => break Some(e.to_string()),
                }
            };
            debug!(%peer, ?error, "connection reader finished");
            let _ = reader_events.send(ConnectionEvent::DidDisconnect { peer, error });
        });

        let writer = tokio::spawn(async move {
            let outbound = ConnectionBuffer::new();
            'writer: while let Some(frame) = outbound_rx.recv().await {
                trace!(%peer, frame = %String::from_utf8_lossy(&frame), "tx");
                if outbound.append(&frame).is_err() {
                    break;
                }
                // Coalesce whatever else is already queued into one write.
                while let Ok(frame) = outbound_rx.try_recv() {
                    trace!(%peer, frame = %String::from_utf8_lossy(&frame), "tx");
                    if outbound.append(&frame).is_err() {
                        break 'writer;
                    }
                }
                let batch = match outbound.flush() {
                    Ok(batch) => batch,
                    Err(_) => break,
                };
                if write_half.write_all(&batch).await.is_err() {
                    // The reader observes the failure and reports it.
                    break;
                }
            }
        });

        Self {
            peer,
            outbound_tx,
            reader,
            writer,
        }
    }

    /// The remote address
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Queue bytes for transmission
    ///
    /// The bytes must already be framed (`\r\n` terminated).
    pub fn send(&self, frame: Bytes) -> Result<()> {
        self.outbound_tx
            .send(frame)
            .map_err(|_| NetworkError::ConnectionClosed(self.peer.to_string()))
    }

    /// Stop both tasks; any queued outbound data is dropped
    pub(crate) fn shutdown(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.shutdown();
    }
}
