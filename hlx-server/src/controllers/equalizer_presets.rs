//! Equalizer preset request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::equalizer;
use hlx_model::{HlxModel, Identifier};
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

pub(crate) fn dump(model: &HlxModel, id: Identifier) -> Result<Vec<Bytes>> {
    let p = model.equalizer_preset(id)?;
    let mut frames =
        vec![equalizer::Name { preset: id, name: p.name().to_string() }.encode_response()];
    for (band, level) in p.band_levels().iter().enumerate() {
        frames.push(
            equalizer::BandLevel { preset: id, band: band as u8 + 1, level: *level }
                .encode_response(),
        );
    }
    Ok(frames)
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    handle!(dispatcher, model, equalizer::QueryPreset, |m, cmd| {
        let mut frames = dump(m, cmd.preset)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });

    handle!(dispatcher, model, equalizer::Name, |m, cmd| {
        let outcome = m.equalizer_preset_mut(cmd.preset)?.set_name(&cmd.name)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    handle!(dispatcher, model, equalizer::IncreaseBandLevel, |m, cmd| {
        let p = m.equalizer_preset_mut(cmd.preset)?;
        let outcome = p.step_band_level(cmd.band, 1)?;
        let echo = equalizer::BandLevel {
            preset: cmd.preset,
            band: cmd.band,
            level: p.band_level(cmd.band)?,
        }
        .encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, equalizer::DecreaseBandLevel, |m, cmd| {
        let p = m.equalizer_preset_mut(cmd.preset)?;
        let outcome = p.step_band_level(cmd.band, -1)?;
        let echo = equalizer::BandLevel {
            preset: cmd.preset,
            band: cmd.band,
            level: p.band_level(cmd.band)?,
        }
        .encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, equalizer::BandLevel, |m, cmd| {
        let outcome = m.equalizer_preset_mut(cmd.preset)?.set_band_level(cmd.band, cmd.level)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
