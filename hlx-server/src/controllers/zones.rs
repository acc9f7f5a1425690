//! Zone request handlers

use std::sync::Arc;

use bytes::Bytes;
use hlx_codec::zone;
use hlx_model::{CrossoverFrequency, HlxModel, Identifier, SoundMode};
use parking_lot::Mutex;

use crate::controllers::handle;
use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::error::Result;

/// Encode the absolute balance form: `C` at center, `L`/`R` with a
/// magnitude otherwise
pub(crate) fn balance_response(zone: Identifier, balance: i8) -> Bytes {
    if balance == 0 {
        zone::BalanceCenter { zone }.encode_response()
    } else {
        zone::Balance { zone, balance }.encode_response()
    }
}

/// Property frames for one zone, in dump order
pub(crate) fn dump(model: &HlxModel, id: Identifier) -> Result<Vec<Bytes>> {
    let z = model.zone(id)?;
    let mut frames = vec![
        zone::Name { zone: id, name: z.name().to_string() }.encode_response(),
        zone::Source { zone: id, source: z.source() }.encode_response(),
        zone::Volume { zone: id, level: z.volume() }.encode_response(),
        zone::Mute { zone: id, muted: z.muted() }.encode_response(),
        zone::VolumeFixed { zone: id, fixed: z.volume_fixed() }.encode_response(),
        balance_response(id, z.balance()),
        zone::Bass { zone: id, level: z.bass() }.encode_response(),
        zone::Treble { zone: id, level: z.treble() }.encode_response(),
        zone::SoundMode { zone: id, mode: z.sound_mode().to_wire() }.encode_response(),
        zone::HighpassCrossover { zone: id, frequency: z.highpass().hz() }.encode_response(),
        zone::LowpassCrossover { zone: id, frequency: z.lowpass().hz() }.encode_response(),
    ];
    for (band, level) in z.band_levels().iter().enumerate() {
        frames.push(
            zone::BandLevel { zone: id, band: band as u8 + 1, level: *level }.encode_response(),
        );
    }
    if let Some(preset) = z.equalizer_preset() {
        frames.push(zone::EqualizerPreset { zone: id, preset }.encode_response());
    }
    Ok(frames)
}

pub(crate) fn register(dispatcher: &mut CommandDispatcher, model: &Arc<Mutex<HlxModel>>) {
    // Queries
    handle!(dispatcher, model, zone::QueryZone, |m, cmd| {
        let mut frames = dump(m, cmd.zone)?;
        frames.push(cmd.encode_response());
        Ok(Outcome::reply(frames))
    });
    handle!(dispatcher, model, zone::QueryVolume, |m, cmd| {
        let level = m.zone(cmd.zone)?.volume();
        Ok(Outcome::reply(vec![
            zone::Volume { zone: cmd.zone, level }.encode_response(),
        ]))
    });
    handle!(dispatcher, model, zone::QueryMute, |m, cmd| {
        let muted = m.zone(cmd.zone)?.muted();
        Ok(Outcome::reply(vec![
            zone::Mute { zone: cmd.zone, muted }.encode_response(),
        ]))
    });

    // Name
    handle!(dispatcher, model, zone::Name, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_name(&cmd.name)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Volume: relative and all-zones forms register before the plain
    // absolute form.
    handle!(dispatcher, model, zone::IncreaseVolume, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_volume(1);
        let echo = zone::Volume { zone: cmd.zone, level: z.volume() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::DecreaseVolume, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_volume(-1);
        let echo = zone::Volume { zone: cmd.zone, level: z.volume() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::Volume, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_volume(cmd.level)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::VolumeAll, |m, cmd| {
        let mut broadcast = Vec::new();
        let mut changed = false;
        for id in m.zone_ids() {
            if m.zone_mut(id)?.set_volume(cmd.level)?.changed() {
                changed = true;
                broadcast.push(zone::Volume { zone: id, level: cmd.level }.encode_response());
            }
        }
        let echo = cmd.encode_response();
        if changed {
            broadcast.insert(0, echo.clone());
        }
        Ok(Outcome { reply: vec![echo], broadcast })
    });

    // Mute
    handle!(dispatcher, model, zone::ToggleMute, |m, cmd| {
        let muted = m.zone_mut(cmd.zone)?.toggle_muted();
        let echo = zone::Mute { zone: cmd.zone, muted }.encode_response();
        Ok(Outcome::echo(echo, true))
    });
    handle!(dispatcher, model, zone::MuteAll, |m, cmd| {
        let mut broadcast = Vec::new();
        let mut changed = false;
        for id in m.zone_ids() {
            if m.zone_mut(id)?.set_muted(cmd.muted).changed() {
                changed = true;
                broadcast.push(zone::Mute { zone: id, muted: cmd.muted }.encode_response());
            }
        }
        let echo = cmd.encode_response();
        if changed {
            broadcast.insert(0, echo.clone());
        }
        Ok(Outcome { reply: vec![echo], broadcast })
    });
    handle!(dispatcher, model, zone::Mute, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_muted(cmd.muted);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::VolumeFixed, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_volume_fixed(cmd.fixed);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Source
    handle!(dispatcher, model, zone::SourceAll, |m, cmd| {
        let mut broadcast = Vec::new();
        let mut changed = false;
        for id in m.zone_ids() {
            if m.set_zone_source(id, cmd.source)?.changed() {
                changed = true;
                broadcast.push(zone::Source { zone: id, source: cmd.source }.encode_response());
            }
        }
        let echo = cmd.encode_response();
        if changed {
            broadcast.insert(0, echo.clone());
        }
        Ok(Outcome { reply: vec![echo], broadcast })
    });
    handle!(dispatcher, model, zone::Source, |m, cmd| {
        let outcome = m.set_zone_source(cmd.zone, cmd.source)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Tone
    handle!(dispatcher, model, zone::IncreaseBass, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_bass(1);
        let echo = zone::Bass { zone: cmd.zone, level: z.bass() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::DecreaseBass, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_bass(-1);
        let echo = zone::Bass { zone: cmd.zone, level: z.bass() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::Bass, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_bass(cmd.level)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::IncreaseTreble, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_treble(1);
        let echo = zone::Treble { zone: cmd.zone, level: z.treble() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::DecreaseTreble, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_treble(-1);
        let echo = zone::Treble { zone: cmd.zone, level: z.treble() }.encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::Treble, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_treble(cmd.level)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Balance: absolute with magnitude, then center, then the bare steps
    handle!(dispatcher, model, zone::Balance, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_balance(cmd.balance)?;
        Ok(Outcome::echo(balance_response(cmd.zone, cmd.balance), outcome.changed()))
    });
    handle!(dispatcher, model, zone::BalanceCenter, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_balance(0)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::IncreaseBalanceLeft, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_balance(-1);
        Ok(Outcome::echo(balance_response(cmd.zone, z.balance()), outcome.changed()))
    });
    handle!(dispatcher, model, zone::IncreaseBalanceRight, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_balance(1);
        Ok(Outcome::echo(balance_response(cmd.zone, z.balance()), outcome.changed()))
    });

    // Sound mode and crossovers
    handle!(dispatcher, model, zone::SoundMode, |m, cmd| {
        let mode = SoundMode::from_wire(cmd.mode)?;
        let outcome = m.zone_mut(cmd.zone)?.set_sound_mode(mode);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::HighpassCrossover, |m, cmd| {
        let frequency = CrossoverFrequency::from_hz(cmd.frequency)?;
        let outcome = m.zone_mut(cmd.zone)?.set_highpass(frequency);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::LowpassCrossover, |m, cmd| {
        let frequency = CrossoverFrequency::from_hz(cmd.frequency)?;
        let outcome = m.zone_mut(cmd.zone)?.set_lowpass(frequency);
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });

    // Per-zone equalizer
    handle!(dispatcher, model, zone::IncreaseBandLevel, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_band_level(cmd.band, 1)?;
        let echo = zone::BandLevel { zone: cmd.zone, band: cmd.band, level: z.band_level(cmd.band)? }
            .encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::DecreaseBandLevel, |m, cmd| {
        let z = m.zone_mut(cmd.zone)?;
        let outcome = z.step_band_level(cmd.band, -1)?;
        let echo = zone::BandLevel { zone: cmd.zone, band: cmd.band, level: z.band_level(cmd.band)? }
            .encode_response();
        Ok(Outcome::echo(echo, outcome.changed()))
    });
    handle!(dispatcher, model, zone::BandLevel, |m, cmd| {
        let outcome = m.zone_mut(cmd.zone)?.set_band_level(cmd.band, cmd.level)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
    handle!(dispatcher, model, zone::EqualizerPreset, |m, cmd| {
        let outcome = m.set_zone_equalizer_preset(cmd.zone, cmd.preset)?;
        Ok(Outcome::echo(cmd.encode_response(), outcome.changed()))
    });
}
