//! Front panel request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::front_panel;
use hlx_model::HlxModel;
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel) -> Result<Vec<Bytes>> {
    let panel = model.front_panel();
    Ok(vec![
        front_panel::Brightness { brightness: panel.brightness() }.encode_response(),
        front_panel::Locked { locked: panel.locked() }.encode_response(),
    ])
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    // Property queries answer with the property frame alone.
    handle!(dispatcher, model, front_panel::QueryBrightness, |m, _cmd| {
        let brightness = m.front_panel().brightness();
        Ok(Outcome::reply(vec![
            front_panel::Brightness { brightness }.encode_response(),
        ]))
    });
    handle!(dispatcher, model, front_panel::QueryLocked, |m, _cmd| {
        let locked = m.front_panel().locked();
        Ok(Outcome::reply(vec![front_panel::Locked { locked }.encode_response()]))
    });

    handle!(dispatcher, model, front_panel::Brightness, |m, cmd| {
        let outcome = m.front_panel_mut().set_brightness(cmd.brightness)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, front_panel::Locked, |m, cmd| {
        let outcome = m.front_panel_mut().set_locked(cmd.locked);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
