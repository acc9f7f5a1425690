//! Typed controllers over the mirrored state
//!
//! One controller per entity kind. Each registers the notification routes
//! that keep the mirror current, exposes typed operations that issue
//! requests through the command manager, and implements `refresh` as the
//! kind's query sweep.

use std::sync::Arc;

use hlx_model::HlxModel;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::warn;

use crate::command_manager::CommandManager;
use crate::events::{ClientEvent, StateChange};

mod configuration;
mod equalizer_presets;
mod favorites;
mod front_panel;
mod groups;
mod infrared;
mod network;
mod sources;
mod zones;

pub use configuration::ConfigurationController;
pub use equalizer_presets::EqualizerPresetsController;
pub use favorites::FavoritesController;
pub use front_panel::FrontPanelController;
pub use groups::GroupsController;
pub use infrared::InfraredController;
pub use network::NetworkController;
pub use sources::SourcesController;
pub use zones::ZonesController;

/// Shared plumbing every controller holds
#[derive(Clone)]
pub struct ControllerContext {
    pub(crate) model: Arc<Mutex<HlxModel>>,
    pub(crate) commands: Arc<CommandManager>,
    pub(crate) events: broadcast::Sender<ClientEvent>,
}

impl ControllerContext {
    pub(crate) fn new(
        model: Arc<Mutex<HlxModel>>,
        commands: Arc<CommandManager>,
        events: broadcast::Sender<ClientEvent>,
    ) -> Self {
        Self { model, commands, events }
    }

    pub(crate) fn emit(&self, change: StateChange) {
        let _ = self.events.send(ClientEvent::State(change));
    }

    pub(crate) fn fault(&self, controller: &'static str, error: impl std::fmt::Display) {
        let error = error.to_string();
        warn!(controller, %error, "controller fault");
        let _ = self
            .events
            .send(ClientEvent::ControllerError { controller, error });
    }

    /// Register a typed notification route
    ///
    /// Parses the capture vector with the command's own parser, hands the
    /// command to `apply`, and reports parse failures as controller faults.
    pub(crate) fn route<C: 'static>(
        &self,
        controller: &'static str,
        pattern: &'static hlx_wire::CommandPattern,
        parse: fn(&[String]) -> hlx_codec::Result<C>,
        apply: impl Fn(&ControllerContext, C) + Send + Sync + 'static,
    ) {
        let ctx = self.clone();
        self.commands.add_route(
            pattern,
            Box::new(move |captures| match parse(captures) {
                Ok(command) => apply(&ctx, command),
                Err(e) => ctx.fault(controller, e),
            }),
        );
    }
}
