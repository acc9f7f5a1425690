//! The simulator: one model, one dispatch table, one listener
//!
//! Impersonates a physical HLX head closely enough for client development:
//! requests mutate the shared model, responses echo to the origin, and
//! state-bearing notifications fan out to every other connected peer.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use hlx_codec::registry::ErrorFrame;
use hlx_model::HlxModel;
use hlx_net::{ConnectionEvent, ConnectionManager};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::controllers;
use crate::dispatcher::CommandDispatcher;
use crate::error::{Result, ServerError};

pub struct Simulator {
    model: Arc<Mutex<HlxModel>>,
    dispatcher: Arc<CommandDispatcher>,
    net: Arc<ConnectionManager>,
    service: Mutex<Option<JoinHandle<()>>>,
}

impl Simulator {
    /// Build the simulator, restoring the backup blob when one exists
    ///
    /// A `backup_path` that names a missing file is not an error; the model
    /// starts from vendor defaults and `SAVE` creates the file. A file that
    /// exists but does not parse is fatal.
    pub fn new(backup_path: Option<PathBuf>) -> Result<Self> {
        hlx_codec::registry::verify_grammar()?;

        let model = match &backup_path {
            Some(path) if path.exists() => {
                let blob = std::fs::read(path)?;
                let model = HlxModel::from_backup(&blob)?;
                info!(path = %path.display(), "restored configuration from backup");
                model
            }
            _ => HlxModel::with_defaults(),
        };
        let model = Arc::new(Mutex::new(model));

        let mut dispatcher = CommandDispatcher::new();
        controllers::register_all(&mut dispatcher, &model, backup_path);
        if dispatcher.is_empty() {
            return Err(ServerError::InitializationFailed("empty dispatch table".into()));
        }
        debug!(entries = dispatcher.len(), "dispatch table built");

        Ok(Self {
            model,
            dispatcher: Arc::new(dispatcher),
            net: Arc::new(ConnectionManager::new()),
            service: Mutex::new(None),
        })
    }

    /// Bind the URL and start serving; returns the bound address
    pub async fn start(&self, url: &str) -> Result<SocketAddr> {
        let events = self.net.subscribe();
        let local = self.net.listen(url).await?;

        let dispatcher = Arc::clone(&self.dispatcher);
        let net = Arc::clone(&self.net);
        let service = tokio::spawn(async move {
            serve(dispatcher, net, events).await;
        });
        *self.service.lock() = Some(service);

        info!(%local, "simulator serving");
        Ok(local)
    }

    /// Serve until interrupted
    pub async fn run(&self, url: &str) -> Result<()> {
        self.start(url).await?;
        tokio::signal::ctrl_c().await?;
        info!("shutting down");
        self.shutdown();
        Ok(())
    }

    pub fn shutdown(&self) {
        if let Some(service) = self.service.lock().take() {
            service.abort();
        }
        self.net.disconnect();
    }

    /// Read-side access to the live model, for embedders and tests
    pub fn with_model<R>(&self, f: impl FnOnce(&HlxModel) -> R) -> R {
        f(&self.model.lock())
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Receive loop: every frame is a request; anything unrecognized or failing
/// gets a single `ERROR`, and the session continues
async fn serve(
    dispatcher: Arc<CommandDispatcher>,
    net: Arc<ConnectionManager>,
    mut events: broadcast::Receiver<ConnectionEvent>,
) {
    loop {
        match events.recv().await {
            Ok(ConnectionEvent::FrameReceived { peer, frame }) => {
                // Handlers may touch the backup file, so dispatch runs on
                // the blocking pool rather than stalling the event loop.
                let table = Arc::clone(&dispatcher);
                let request = frame.clone();
                let dispatched =
                    tokio::task::spawn_blocking(move || table.dispatch(&request)).await;
                let Ok(dispatched) = dispatched else {
                    warn!(%peer, "dispatch task failed");
                    let _ = net.send_to(peer, ErrorFrame.encode());
                    continue;
                };
                match dispatched {
                    Some(Ok(outcome)) => {
                        for reply in outcome.reply {
                            if let Err(e) = net.send_to(peer, reply) {
                                debug!(%peer, error = %e, "reply send failed");
                            }
                        }
                        for notification in outcome.broadcast {
                            net.broadcast_except(peer, &notification);
                        }
                    }
                    Some(Err(e)) => {
                        warn!(%peer, frame = %String::from_utf8_lossy(&frame), error = %e, "request failed");
                        let _ = net.send_to(peer, ErrorFrame.encode());
                    }
                    None => {
                        warn!(%peer, frame = %String::from_utf8_lossy(&frame), "unrecognized request");
                        let _ = net.send_to(peer, ErrorFrame.encode());
                    }
                }
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "service loop lagged the event stream");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
