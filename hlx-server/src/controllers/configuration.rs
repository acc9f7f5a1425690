//! Configuration request handlers
//!
//! `QX` stitches every entity's dump into one sweep. Load, save, and reset
//! operate on the whole model; their status frames are bare and go to the
//! origin and, when state moved, to every other peer.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::configuration;
use hlx_model::{HlxModel, ModelError};
use parking_lot::Mutex;
use tracing::info;

use crate::controllers::{
    equalizer_presets, favorites, front_panel, handle, infrared, network, sources, zones,
};
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::{Result, ServerError};

/// Every entity's property frames, in object order
pub(crate) fn dump_all(model: &HlxModel) -> Result<Vec<Bytes>> {
    let mut frames = Vec::new();
    for id in model.zone_ids() {
        frames.extend(zones::dump(model, id)?);
    }
    for id in model.group_ids() {
        frames.extend(crate::controllers::groups::dump(model, id)?);
    }
    for id in model.source_ids() {
        frames.extend(sources::dump(model, id)?);
    }
    for id in model.equalizer_preset_ids() {
        frames.extend(equalizer_presets::dump(model, id)?);
    }
    for id in model.favorite_ids() {
        frames.extend(favorites::dump(model, id)?);
    }
    frames.extend(front_panel::dump(model)?);
    frames.extend(infrared::dump(model)?);
    frames.extend(network::dump(model)?);
    Ok(frames)
}

pub(crate) fn register(
    dispatcher: &mut CommandDispatcher,
    model: &Arc<Mutex<HlxModel>>,
    backup_path: Option<PathBuf>,
) {
    handle!(dispatcher, model, configuration::QueryConfiguration, |m, cmd| {
        let mut frames = dump_all(m)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });

    let load_model = Arc::clone(model);
    let load_path = backup_path.clone();
    dispatcher.register(
        configuration::LoadFromBackup::pattern(),
        Box::new(move |_captures| {
            let path = load_path
                .as_ref()
                .ok_or_else(|| ModelError::MissingConfiguration("no backup path".into()))?;
            let blob = std::fs::read(path).map_err(|e| {
                ServerError::from(ModelError::MissingConfiguration(format!(
                    "backup {}: {e}",
                    path.display()
                )))
            })?;
            let restored = HlxModel::from_backup(&blob)?;
            *load_model.lock() = restored;
            info!(path = %path.display(), "configuration loaded");
            let frame = configuration::LoadFromBackup.encode();
            Ok(Outcome { reply: vec![frame.clone()], broadcast: vec![frame] })
        }),
    );

    let save_model = Arc::clone(model);
    let save_path = backup_path;
    dispatcher.register(
        configuration::SaveToBackup::pattern(),
        Box::new(move |_captures| {
            let path = save_path
                .as_ref()
                .ok_or_else(|| ModelError::MissingConfiguration("no backup path".into()))?;
            let blob = save_model.lock().to_backup()?;
            std::fs::write(path, blob)?;
            info!(path = %path.display(), "configuration saved");
            let frames = vec![
                configuration::Saving.encode(),
                configuration::SaveToBackup.encode(),
            ];
            Ok(Outcome { reply: frames.clone(), broadcast: frames })
        }),
    );

    let reset_model = Arc::clone(model);
    dispatcher.register(
        configuration::ResetToDefaults::pattern(),
        Box::new(move |_captures| {
            *reset_model.lock() = HlxModel::with_defaults();
            info!("configuration reset to defaults");
            let frame = configuration::ResetToDefaults.encode();
            Ok(Outcome { reply: vec![frame.clone()], broadcast: vec![frame] })
        }),
    );
}
