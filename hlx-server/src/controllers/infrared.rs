//! Infrared request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::infrared;
use hlx_model::HlxModel;
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel) -> Result<Vec<Bytes>> {
    Ok(vec![
        infrared::Disabled { disabled: model.infrared().disabled() }.encode_response(),
    ])
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, infrared::QueryDisabled, |m, _cmd| {
        let disabled = m.infrared().disabled();
        Ok(Outcome::reply(vec![infrared::Disabled { disabled }.encode_response()]))
    });

    handle!(dispatcher, model, infrared::Disabled, |m, cmd| {
        let outcome = m.infrared_mut().set_disabled(cmd.disabled);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
