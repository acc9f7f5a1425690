//! Zone controller
//!
//! The widest surface in the protocol: name, volume, mute, source, balance,
//! tone, sound mode, crossovers, and the per-zone equalizer all live here.
//! Relative operations (`U`/`D`, bare `L`/`R`) are answered with the
//! absolute form, so every route below parses an absolute frame.

use std::time::Duration;

use hlx_codec::zone;
use hlx_model::{CrossoverFrequency, Identifier, SoundMode, Zone};

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "zones";

pub struct ZonesController {
    context: ControllerContext,
}

impl ZonesController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    /// Query every zone; completes when each sweep's terminating echo lands
    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let ids = self.context.model.lock().zone_ids();
        for id in ids {
            self.query(id, timeout).await?;
        }
        Ok(())
    }

    /// Query one zone's full state
    pub async fn query(&self, zone: Identifier, timeout: Duration) -> Result<()> {
        self.context
            .commands
            .invoke(
                zone::QueryZone { zone }.encode_request(),
                zone::QueryZone::response_pattern(),
                timeout,
            )
            .await?;
        Ok(())
    }

    /// Snapshot of one mirrored zone
    pub fn zone(&self, zone: Identifier) -> Result<Zone> {
        Ok(self.context.model.lock().zone(zone)?.clone())
    }

    pub fn zone_ids(&self) -> Vec<Identifier> {
        self.context.model.lock().zone_ids()
    }

    // ========================================================================
    // Name
    // ========================================================================

    pub async fn set_name(
        &self,
        zone: Identifier,
        name: &str,
        timeout: Duration,
    ) -> Result<String> {
        let request = zone::Name { zone, name: name.to_string() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Name::response_pattern(), timeout)
            .await?;
        Ok(zone::Name::from_captures(&captures)?.name)
    }

    // ========================================================================
    // Volume and mute
    // ========================================================================

    pub async fn set_volume(
        &self,
        zone: Identifier,
        level: i8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = zone::Volume { zone, level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Volume::response_pattern(), timeout)
            .await?;
        Ok(zone::Volume::from_captures(&captures)?.level)
    }

    pub async fn increase_volume(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::IncreaseVolume { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Volume::response_pattern(), timeout)
            .await?;
        Ok(zone::Volume::from_captures(&captures)?.level)
    }

    pub async fn decrease_volume(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::DecreaseVolume { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Volume::response_pattern(), timeout)
            .await?;
        Ok(zone::Volume::from_captures(&captures)?.level)
    }

    pub async fn set_muted(
        &self,
        zone: Identifier,
        muted: bool,
        timeout: Duration,
    ) -> Result<bool> {
        let request = zone::Mute { zone, muted };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Mute::response_pattern(), timeout)
            .await?;
        Ok(zone::Mute::from_captures(&captures)?.muted)
    }

    /// Toggle mute; the controller answers with the resulting absolute state
    pub async fn toggle_muted(&self, zone: Identifier, timeout: Duration) -> Result<bool> {
        let request = zone::ToggleMute { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Mute::response_pattern(), timeout)
            .await?;
        Ok(zone::Mute::from_captures(&captures)?.muted)
    }

    pub async fn set_volume_fixed(
        &self,
        zone: Identifier,
        fixed: bool,
        timeout: Duration,
    ) -> Result<bool> {
        let request = zone::VolumeFixed { zone, fixed };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::VolumeFixed::response_pattern(), timeout)
            .await?;
        Ok(zone::VolumeFixed::from_captures(&captures)?.fixed)
    }

    pub async fn set_volume_all(&self, level: i8, timeout: Duration) -> Result<i8> {
        let request = zone::VolumeAll { level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::VolumeAll::response_pattern(), timeout)
            .await?;
        Ok(zone::VolumeAll::from_captures(&captures)?.level)
    }

    pub async fn set_muted_all(&self, muted: bool, timeout: Duration) -> Result<bool> {
        let request = zone::MuteAll { muted };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::MuteAll::response_pattern(), timeout)
            .await?;
        Ok(zone::MuteAll::from_captures(&captures)?.muted)
    }

    // ========================================================================
    // Source
    // ========================================================================

    pub async fn set_source(
        &self,
        zone: Identifier,
        source: Identifier,
        timeout: Duration,
    ) -> Result<Identifier> {
        let request = zone::Source { zone, source };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Source::response_pattern(), timeout)
            .await?;
        Ok(zone::Source::from_captures(&captures)?.source)
    }

    pub async fn set_source_all(
        &self,
        source: Identifier,
        timeout: Duration,
    ) -> Result<Identifier> {
        let request = zone::SourceAll { source };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::SourceAll::response_pattern(), timeout)
            .await?;
        Ok(zone::SourceAll::from_captures(&captures)?.source)
    }

    // ========================================================================
    // Balance and tone
    // ========================================================================

    /// Set absolute balance; negative is toward the left channel
    pub async fn set_balance(
        &self,
        zone: Identifier,
        balance: i8,
        timeout: Duration,
    ) -> Result<i8> {
        let captures = if balance == 0 {
            self.context
                .commands
                .invoke(
                    zone::BalanceCenter { zone }.encode_request(),
                    zone::BalanceCenter::response_pattern(),
                    timeout,
                )
                .await?;
            return Ok(0);
        } else {
            self.context
                .commands
                .invoke(
                    zone::Balance { zone, balance }.encode_request(),
                    zone::Balance::response_pattern(),
                    timeout,
                )
                .await?
        };
        Ok(zone::Balance::from_captures(&captures)?.balance)
    }

    pub async fn step_balance_left(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        self.step_balance(zone::IncreaseBalanceLeft { zone }.encode_request(), timeout)
            .await
    }

    pub async fn step_balance_right(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        self.step_balance(zone::IncreaseBalanceRight { zone }.encode_request(), timeout)
            .await
    }

    async fn step_balance(&self, request: bytes::Bytes, timeout: Duration) -> Result<i8> {
        // A step landing on dead center is answered in the `C` form.
        let (index, captures) = self
            .context
            .commands
            .invoke_any(
                request,
                vec![
                    zone::Balance::response_pattern(),
                    zone::BalanceCenter::response_pattern(),
                ],
                timeout,
            )
            .await?;
        if index == 1 {
            return Ok(0);
        }
        Ok(zone::Balance::from_captures(&captures)?.balance)
    }

    pub async fn set_bass(&self, zone: Identifier, level: i8, timeout: Duration) -> Result<i8> {
        let request = zone::Bass { zone, level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Bass::response_pattern(), timeout)
            .await?;
        Ok(zone::Bass::from_captures(&captures)?.level)
    }

    pub async fn increase_bass(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::IncreaseBass { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Bass::response_pattern(), timeout)
            .await?;
        Ok(zone::Bass::from_captures(&captures)?.level)
    }

    pub async fn decrease_bass(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::DecreaseBass { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Bass::response_pattern(), timeout)
            .await?;
        Ok(zone::Bass::from_captures(&captures)?.level)
    }

    pub async fn set_treble(&self, zone: Identifier, level: i8, timeout: Duration) -> Result<i8> {
        let request = zone::Treble { zone, level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Treble::response_pattern(), timeout)
            .await?;
        Ok(zone::Treble::from_captures(&captures)?.level)
    }

    pub async fn increase_treble(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::IncreaseTreble { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Treble::response_pattern(), timeout)
            .await?;
        Ok(zone::Treble::from_captures(&captures)?.level)
    }

    pub async fn decrease_treble(&self, zone: Identifier, timeout: Duration) -> Result<i8> {
        let request = zone::DecreaseTreble { zone };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::Treble::response_pattern(), timeout)
            .await?;
        Ok(zone::Treble::from_captures(&captures)?.level)
    }

    // ========================================================================
    // Sound mode, crossovers, equalizer
    // ========================================================================

    pub async fn set_sound_mode(
        &self,
        zone: Identifier,
        mode: SoundMode,
        timeout: Duration,
    ) -> Result<SoundMode> {
        let request = zone::SoundMode { zone, mode: mode.to_wire() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::SoundMode::response_pattern(), timeout)
            .await?;
        let response = zone::SoundMode::from_captures(&captures)?;
        Ok(SoundMode::from_wire(response.mode)?)
    }

    pub async fn set_highpass(
        &self,
        zone: Identifier,
        frequency: CrossoverFrequency,
        timeout: Duration,
    ) -> Result<CrossoverFrequency> {
        let request = zone::HighpassCrossover { zone, frequency: frequency.hz() };
        let captures = self
            .context
            .commands
            .invoke(
                request.encode_request(),
                zone::HighpassCrossover::response_pattern(),
                timeout,
            )
            .await?;
        let response = zone::HighpassCrossover::from_captures(&captures)?;
        Ok(CrossoverFrequency::from_hz(response.frequency)?)
    }

    pub async fn set_lowpass(
        &self,
        zone: Identifier,
        frequency: CrossoverFrequency,
        timeout: Duration,
    ) -> Result<CrossoverFrequency> {
        let request = zone::LowpassCrossover { zone, frequency: frequency.hz() };
        let captures = self
            .context
            .commands
            .invoke(
                request.encode_request(),
                zone::LowpassCrossover::response_pattern(),
                timeout,
            )
            .await?;
        let response = zone::LowpassCrossover::from_captures(&captures)?;
        Ok(CrossoverFrequency::from_hz(response.frequency)?)
    }

    pub async fn set_band_level(
        &self,
        zone: Identifier,
        band: u8,
        level: i8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = zone::BandLevel { zone, band, level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(zone::BandLevel::from_captures(&captures)?.level)
    }

    pub async fn increase_band_level(
        &self,
        zone: Identifier,
        band: u8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = zone::IncreaseBandLevel { zone, band };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(zone::BandLevel::from_captures(&captures)?.level)
    }

    pub async fn decrease_band_level(
        &self,
        zone: Identifier,
        band: u8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = zone::DecreaseBandLevel { zone, band };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), zone::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(zone::BandLevel::from_captures(&captures)?.level)
    }

    pub async fn set_equalizer_preset(
        &self,
        zone: Identifier,
        preset: Identifier,
        timeout: Duration,
    ) -> Result<Identifier> {
        let request = zone::EqualizerPreset { zone, preset };
        let captures = self
            .context
            .commands
            .invoke(
                request.encode_request(),
                zone::EqualizerPreset::response_pattern(),
                timeout,
            )
            .await?;
        Ok(zone::EqualizerPreset::from_captures(&captures)?.preset)
    }

    // ========================================================================
    // Notification routes
    // ========================================================================

    fn register_routes(&self) {
        let ctx = &self.context;

        ctx.route(NAME, zone::Name::response_pattern(), zone::Name::from_captures, |ctx, cmd| {
            match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_name(&cmd.name)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneName { zone: cmd.zone, name: cmd.name });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(NAME, zone::Volume::response_pattern(), zone::Volume::from_captures, |ctx, cmd| {
            match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_volume(cmd.level)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneVolume { zone: cmd.zone, volume: cmd.level });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(NAME, zone::Mute::response_pattern(), zone::Mute::from_captures, |ctx, cmd| {
            match ctx.model.lock().zone_mut(cmd.zone).map(|z| z.set_muted(cmd.muted)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneMuted { zone: cmd.zone, muted: cmd.muted });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(
            NAME,
            zone::VolumeFixed::response_pattern(),
            zone::VolumeFixed::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().zone_mut(cmd.zone).map(|z| z.set_volume_fixed(cmd.fixed)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneVolumeFixed { zone: cmd.zone, fixed: cmd.fixed });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::VolumeAll::response_pattern(),
            zone::VolumeAll::from_captures,
            |ctx, cmd| {
                let ids = ctx.model.lock().zone_ids();
                for zone in ids {
                    match ctx.model.lock().zone_mut(zone).and_then(|z| z.set_volume(cmd.level)) {
                        Ok(outcome) if outcome.changed() => {
                            ctx.emit(StateChange::ZoneVolume { zone, volume: cmd.level });
                        }
                        Ok(_) => {}
                        Err(e) => ctx.fault(NAME, e),
                    }
                }
            },
        );

        ctx.route(
            NAME,
            zone::MuteAll::response_pattern(),
            zone::MuteAll::from_captures,
            |ctx, cmd| {
                let ids = ctx.model.lock().zone_ids();
                for zone in ids {
                    match ctx.model.lock().zone_mut(zone).map(|z| z.set_muted(cmd.muted)) {
                        Ok(outcome) if outcome.changed() => {
                            ctx.emit(StateChange::ZoneMuted { zone, muted: cmd.muted });
                        }
                        Ok(_) => {}
                        Err(e) => ctx.fault(NAME, e),
                    }
                }
            },
        );

        ctx.route(NAME, zone::Source::response_pattern(), zone::Source::from_captures, |ctx, cmd| {
            match ctx.model.lock().set_zone_source(cmd.zone, cmd.source) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneSource { zone: cmd.zone, source: cmd.source });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(
            NAME,
            zone::SourceAll::response_pattern(),
            zone::SourceAll::from_captures,
            |ctx, cmd| {
                let ids = ctx.model.lock().zone_ids();
                for zone in ids {
                    match ctx.model.lock().set_zone_source(zone, cmd.source) {
                        Ok(outcome) if outcome.changed() => {
                            ctx.emit(StateChange::ZoneSource { zone, source: cmd.source });
                        }
                        Ok(_) => {}
                        Err(e) => ctx.fault(NAME, e),
                    }
                }
            },
        );

        ctx.route(
            NAME,
            zone::Balance::response_pattern(),
            zone::Balance::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_balance(cmd.balance)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneBalance { zone: cmd.zone, balance: cmd.balance });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::BalanceCenter::response_pattern(),
            zone::BalanceCenter::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_balance(0)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneBalance { zone: cmd.zone, balance: 0 });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(NAME, zone::Bass::response_pattern(), zone::Bass::from_captures, |ctx, cmd| {
            match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_bass(cmd.level)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneBass { zone: cmd.zone, level: cmd.level });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(NAME, zone::Treble::response_pattern(), zone::Treble::from_captures, |ctx, cmd| {
            match ctx.model.lock().zone_mut(cmd.zone).and_then(|z| z.set_treble(cmd.level)) {
                Ok(outcome) if outcome.changed() => {
                    ctx.emit(StateChange::ZoneTreble { zone: cmd.zone, level: cmd.level });
                }
                Ok(_) => {}
                Err(e) => ctx.fault(NAME, e),
            }
        });

        ctx.route(
            NAME,
            zone::SoundMode::response_pattern(),
            zone::SoundMode::from_captures,
            |ctx, cmd| {
                let mode = match SoundMode::from_wire(cmd.mode) {
                    Ok(mode) => mode,
                    Err(e) => return ctx.fault(NAME, e),
                };
                match ctx.model.lock().zone_mut(cmd.zone).map(|z| z.set_sound_mode(mode)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneSoundMode { zone: cmd.zone, mode });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::HighpassCrossover::response_pattern(),
            zone::HighpassCrossover::from_captures,
            |ctx, cmd| {
                let frequency = match CrossoverFrequency::from_hz(cmd.frequency) {
                    Ok(frequency) => frequency,
                    Err(e) => return ctx.fault(NAME, e),
                };
                match ctx.model.lock().zone_mut(cmd.zone).map(|z| z.set_highpass(frequency)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneHighpass { zone: cmd.zone, frequency });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::LowpassCrossover::response_pattern(),
            zone::LowpassCrossover::from_captures,
            |ctx, cmd| {
                let frequency = match CrossoverFrequency::from_hz(cmd.frequency) {
                    Ok(frequency) => frequency,
                    Err(e) => return ctx.fault(NAME, e),
                };
                match ctx.model.lock().zone_mut(cmd.zone).map(|z| z.set_lowpass(frequency)) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneLowpass { zone: cmd.zone, frequency });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::BandLevel::response_pattern(),
            zone::BandLevel::from_captures,
            |ctx, cmd| {
                match ctx
                    .model
                    .lock()
                    .zone_mut(cmd.zone)
                    .and_then(|z| z.set_band_level(cmd.band, cmd.level))
                {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneBandLevel {
                            zone: cmd.zone,
                            band: cmd.band,
                            level: cmd.level,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            zone::EqualizerPreset::response_pattern(),
            zone::EqualizerPreset::from_captures,
            |ctx, cmd| {
                match ctx.model.lock().set_zone_equalizer_preset(cmd.zone, cmd.preset) {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::ZoneEqualizerPreset {
                            zone: cmd.zone,
                            preset: cmd.preset,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );
    }
}
