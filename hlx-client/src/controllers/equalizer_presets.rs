//! Equalizer preset controller

use std::time::Duration;

use hlx_codec::equalizer;
use hlx_model::{EqualizerPreset, Identifier};

use crate::controllers::ControllerContext;
use crate::error::Result;
use crate::events::StateChange;

const NAME: &str = "equalizer-presets";

pub struct EqualizerPresetsController {
    context: ControllerContext,
}

impl EqualizerPresetsController {
    pub(crate) fn new(context: ControllerContext) -> Self {
        let controller = Self { context };
        controller.register_routes();
        controller
    }

    pub async fn refresh(&self, timeout: Duration) -> Result<()> {
        let ids = self.context.model.lock().equalizer_preset_ids();
        for preset in ids {
            self.context
                .commands
                .invoke(
                    equalizer::QueryPreset { preset }.encode_request(),
                    equalizer::QueryPreset::response_pattern(),
                    timeout,
                )
                .await?;
        }
        Ok(())
    }

    /// Snapshot of one mirrored preset
    pub fn preset(&self, preset: Identifier) -> Result<EqualizerPreset> {
        Ok(self.context.model.lock().equalizer_preset(preset)?.clone())
    }

    pub fn preset_ids(&self) -> Vec<Identifier> {
        self.context.model.lock().equalizer_preset_ids()
    }

    pub async fn set_name(
        &self,
        preset: Identifier,
        name: &str,
        timeout: Duration,
    ) -> Result<String> {
        let request = equalizer::Name { preset, name: name.to_string() };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), equalizer::Name::response_pattern(), timeout)
            .await?;
        Ok(equalizer::Name::from_captures(&captures)?.name)
    }

    pub async fn set_band_level(
        &self,
        preset: Identifier,
        band: u8,
        level: i8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = equalizer::BandLevel { preset, band, level };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), equalizer::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(equalizer::BandLevel::from_captures(&captures)?.level)
    }

    pub async fn increase_band_level(
        &self,
        preset: Identifier,
        band: u8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = equalizer::IncreaseBandLevel { preset, band };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), equalizer::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(equalizer::BandLevel::from_captures(&captures)?.level)
    }

    pub async fn decrease_band_level(
        &self,
        preset: Identifier,
        band: u8,
        timeout: Duration,
    ) -> Result<i8> {
        let request = equalizer::DecreaseBandLevel { preset, band };
        let captures = self
            .context
            .commands
            .invoke(request.encode_request(), equalizer::BandLevel::response_pattern(), timeout)
            .await?;
        Ok(equalizer::BandLevel::from_captures(&captures)?.level)
    }

    fn register_routes(&self) {
        let ctx = &self.context;

        ctx.route(
            NAME,
            equalizer::Name::response_pattern(),
            equalizer::Name::from_captures,
            |ctx, cmd| {
                match ctx
                    .model
                    .lock()
                    .equalizer_preset_mut(cmd.preset)
                    .and_then(|p| p.set_name(&cmd.name))
                {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::EqualizerPresetName {
                            preset: cmd.preset,
                            name: cmd.name,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );

        ctx.route(
            NAME,
            equalizer::BandLevel::response_pattern(),
            equalizer::BandLevel::from_captures,
            |ctx, cmd| {
                match ctx
                    .model
                    .lock()
                    .equalizer_preset_mut(cmd.preset)
                    .and_then(|p| p.set_band_level(cmd.band, cmd.level))
                {
                    Ok(outcome) if outcome.changed() => {
                        ctx.emit(StateChange::EqualizerPresetBandLevel {
                            preset: cmd.preset,
                            band: cmd.band,
                            level: cmd.level,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => ctx.fault(NAME, e),
                }
            },
        );
    }
}
