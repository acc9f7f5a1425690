//! Client application facade
//!
//! Owns the transport, the command manager, the mirrored model, and one
//! controller per entity kind. Construct inside a tokio runtime; the
//! receive driver is spawned immediately.

use std::sync::Arc;
use std::time::Duration;

use hlx_model::HlxModel;
use hlx_net::ConnectionManager;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::info;

use crate::command_manager::CommandManager;
use crate::controllers::{
    ConfigurationController, ControllerContext, EqualizerPresetsController, FavoritesController,
    FrontPanelController, GroupsController, InfraredController, NetworkController,
    SourcesController, ZonesController,
};
use crate::error::Result;
use crate::events::ClientEvent;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct Application {
    net: Arc<ConnectionManager>,
    events_tx: broadcast::Sender<ClientEvent>,
    zones: ZonesController,
    groups: GroupsController,
    sources: SourcesController,
    equalizer_presets: EqualizerPresetsController,
    favorites: FavoritesController,
    front_panel: FrontPanelController,
    infrared: InfraredController,
    network: NetworkController,
    configuration: ConfigurationController,
}

impl Application {
    /// Build the controller set over a fresh mirror
    ///
    /// Fails when the command grammar table does not compile.
    pub fn new() -> Result<Self> {
        hlx_codec::registry::verify_grammar()?;

        let net = Arc::new(ConnectionManager::new());
        let commands = Arc::new(CommandManager::new(Arc::clone(&net)));
        let model = Arc::new(Mutex::new(HlxModel::with_defaults()));
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let context = ControllerContext::new(model, commands, events_tx.clone());

        Ok(Self {
            net,
            events_tx,
            zones: ZonesController::new(context.clone()),
            groups: GroupsController::new(context.clone()),
            sources: SourcesController::new(context.clone()),
            equalizer_presets: EqualizerPresetsController::new(context.clone()),
            favorites: FavoritesController::new(context.clone()),
            front_panel: FrontPanelController::new(context.clone()),
            infrared: InfraredController::new(context.clone()),
            network: NetworkController::new(context.clone()),
            configuration: ConfigurationController::new(context),
        })
    }

    /// Connect to a controller, e.g. `telnet://192.168.1.48`
    pub async fn connect(&self, url: &str, timeout: Duration) -> Result<()> {
        self.net.connect(url, timeout).await?;
        Ok(())
    }

    pub fn disconnect(&self) {
        self.net.disconnect();
    }

    /// Subscribe to state changes, refresh progress, and controller faults
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events_tx.subscribe()
    }

    /// Sweep every controller's queries, reporting weighted progress
    ///
    /// `timeout` bounds each individual request, not the whole sweep.
    /// Progress is monotone: one `IsRefreshing` per controller completed,
    /// then a single `DidRefresh` once the sweep is done.
    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let total = 9u32;
        let mut done = 0u32;

        macro_rules! step {
            ($controller:expr) => {
                $controller.refresh(timeout).await?;
                done += 1;
                let _ = self.events_tx.send(ClientEvent::IsRefreshing {
                    percent: (done * 100 / total) as u8,
                });
            };
        }

        step!(self.zones);
        step!(self.groups);
        step!(self.sources);
        step!(self.equalizer_presets);
        step!(self.favorites);
        step!(self.front_panel);
        step!(self.infrared);
        step!(self.network);
        step!(self.configuration);

        let _ = self.events_tx.send(ClientEvent::DidRefresh);
        info!("refresh complete");
        Ok(())
    }

    pub fn zones(&self) -> &ZonesController {
        &self.zones
    }

    pub fn groups(&self) -> &GroupsController {
        &self.groups
    }

    pub fn sources(&self) -> &SourcesController {
        &self.sources
    }

    pub fn equalizer_presets(&self) -> &EqualizerPresetsController {
        &self.equalizer_presets
    }

    pub fn favorites(&self) -> &FavoritesController {
        &self.favorites
    }

    pub fn front_panel(&self) -> &FrontPanelController {
        &self.front_panel
    }

    pub fn infrared(&self) -> &InfraredController {
        &self.infrared
    }

    pub fn network(&self) -> &NetworkController {
        &self.network
    }

    pub fn configuration(&self) -> &ConfigurationController {
        &self.configuration
    }
}
