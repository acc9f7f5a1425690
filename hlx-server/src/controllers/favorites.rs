//! Favorite request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::favorite;
use hlx_model::{HlxModel, Identifier};
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel, id: Identifier) -> Result<Vec<Bytes>> {
    let name = model.favorite(id)?.name().to_string();
    Ok(vec![favorite::Name { favorite: id, name }.encode_response()])
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, favorite::QueryFavorite, |m, cmd| {
        let mut frames = dump(m, cmd.favorite)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });

    handle!(dispatcher, model, favorite::Name, |m, cmd| {
        let outcome = m.favorite_mut(cmd.favorite)?.set_name(&cmd.name)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
