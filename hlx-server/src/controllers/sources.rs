//! Source request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::source;
use hlx_model::{HlxModel, Identifier};
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel, id: Identifier) -> Result<Vec<Bytes>> {
    let name = model.source(id)?.name().to_string();
    Ok(vec![source::Name { source: id, name }.encode_response()])
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, source::QuerySource, |m, cmd| {
        let mut frames = dump(m, cmd.source)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });

    handle!(dispatcher, model, source::Name, |m, cmd| {
        let outcome = m.source_mut(cmd.source)?.set_name(&cmd.name)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
