//! Request handlers, one module per entity kind
//!
//! Each module registers its handlers into the shared dispatch table and
//! exposes the dump helper the configuration controller stitches into the
//! full `QX` state dump. Handlers mutate the model under one lock and gate
//! their broadcast on the mutation outcome, so a redundant set never
//! reaches the other peers.

use std::sync::Arc;

use hlx_model::HlxModel;
use parking_lot::Mutex;

use crate::dispatcher::CommandDispatcher;

pub(crate) mod configuration;
pub(crate) mod equalizer_presets;
pub(crate) mod favorites;
pub(crate) mod front_panel;
pub(crate) mod groups;
pub(crate) mod infrared;
pub(crate) mod network;
pub(crate) mod sources;
pub(crate) mod zones;

/// Register a typed handler: parse the captures, run the body under the
/// model lock, return the outcome
macro_rules! handle {
    ($dispatcher:expr, $model:expr, $ty:ty, |$m:ident, $cmd:ident| $body:expr) => {{
        let model = std::sync::Arc::clone($model);
        $dispatcher.register(
            <$ty>::request_pattern(),
            Box::new(move |captures| {
                let $cmd = <$ty>::from_captures(captures)?;
                let mut guard = model.lock();
                let $m = &mut *guard;
                $body
            }),
        );
    }};
}

pub(crate) use handle;

/// Build the complete dispatch table over one model
///
/// Registration order puts longer verb prefixes before their shorter
/// lookalikes within each module.
pub(crate) fn register_all(
    dispatcher: &mut CommandDispatcher,
    model: &Arc<Mutex<HlxModel>>,
    backup_path: Option<std::path::PathBuf>,
) {
    zones::register(dispatcher, model);
    groups::register(dispatcher, model);
    sources::register(dispatcher, model);
    equalizer_presets::register(dispatcher, model);
    favorites::register(dispatcher, model);
    front_panel::register(dispatcher, model);
    infrared::register(dispatcher, model);
    network::register(dispatcher, model);
    configuration::register(dispatcher, model, backup_path);
}
