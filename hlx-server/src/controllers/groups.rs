//! Group request handlers
//!
//! Group-scoped zone verbs fan out to every member in identifier order.
//! The origin gets the group echo; the other peers get one per-zone
//! notification per member whose state actually changed.

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::{group, zone};
use hlx_model::{HlxModel, Identifier};
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

/// Property frames for one group: the name, then one membership frame per
/// member zone
pub(crate) fn dump(model: &HlxModel, id: Identifier) -> Result<Vec<Bytes>> {
    let g = model.group(id)?;
    let mut frames = vec![group::Name { group: id, name: g.name().to_string() }.encode_response()];
    for zone in g.members() {
        frames.push(group::AddZone { group: id, zone }.encode_response());
    }
    Ok(frames)
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, group::QueryGroup, |m, cmd| {
        let mut frames = dump(m, cmd.group)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });

    handle!(dispatcher, model, group::Name, |m, cmd| {
        let outcome = m.group_mut(cmd.group)?.set_name(&cmd.name)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    handle!(dispatcher, model, group::AddZone, |m, cmd| {
        let outcome = m.add_zone_to_group(cmd.group, cmd.zone)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    handle!(dispatcher, model, group::RemoveZone, |m, cmd| {
        let outcome = m.remove_zone_from_group(cmd.group, cmd.zone)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Scoped zone verbs. Members come back in identifier order, so the
    // notification order is deterministic.
    handle!(dispatcher, model, group::IncreaseVolume, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            let z = m.zone_mut(id)?;
            if z.step_volume(1).changed() {
                broadcast.push(zone::Volume { zone: id, level: z.volume() }.encode_response());
            }
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });
    handle!(dispatcher, model, group::DecreaseVolume, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            let z = m.zone_mut(id)?;
            if z.step_volume(-1).changed() {
                broadcast.push(zone::Volume { zone: id, level: z.volume() }.encode_response());
            }
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });
    handle!(dispatcher, model, group::Volume, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            if m.zone_mut(id)?.set_volume(cmd.level)?.changed() {
                broadcast.push(zone::Volume { zone: id, level: cmd.level }.encode_response());
            }
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });

    handle!(dispatcher, model, group::ToggleMute, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            let muted = m.zone_mut(id)?.toggle_muted();
            broadcast.push(zone::Mute { zone: id, muted }.encode_response());
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });
    handle!(dispatcher, model, group::Mute, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            if m.zone_mut(id)?.set_muted(cmd.muted).changed() {
                broadcast.push(zone::Mute { zone: id, muted: cmd.muted }.encode_response());
            }
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });

    handle!(dispatcher, model, group::Source, |m, cmd| {
        let mut broadcast = Vec::new();
        for id in m.group_members(cmd.group)? {
            if m.set_zone_source(id, cmd.source)?.changed() {
                broadcast.push(zone::Source { zone: id, source: cmd.source }.encode_response());
            }
        }
        Ok(Outcome { reply: vec![cmd.encode_response()], broadcast })
    });
}
