//! Zone entity

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{
    bounds, set_bounded, step_bounded, validate_name, CrossoverFrequency, Identifier, SetOutcome,
    SoundMode,
};

/// One amplified output channel
///
/// All setters are check-then-apply and report whether the value actually
/// changed. Cross-entity invariants (the source reference) are enforced at the
/// model level, which is the only place that can see both tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    name: String,
    volume: i8,
    muted: bool,
    volume_fixed: bool,
    source: Identifier,
    balance: i8,
    bass: i8,
    treble: i8,
    sound_mode: SoundMode,
    highpass: CrossoverFrequency,
    lowpass: CrossoverFrequency,
    bands: [i8; bounds::BAND_COUNT],
    equalizer_preset: Option<Identifier>,
}

impl Zone {
    pub(crate) fn new(name: String, volume: i8, source: Identifier) -> Self {
        Self {
            name,
            volume,
            muted: false,
            volume_fixed: false,
            source,
            balance: 0,
            bass: 0,
            treble: 0,
            sound_mode: SoundMode::Stereo,
            highpass: CrossoverFrequency::Hz80,
            lowpass: CrossoverFrequency::Hz80,
            bands: [0; bounds::BAND_COUNT],
            equalizer_preset: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> i8 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn volume_fixed(&self) -> bool {
        self.volume_fixed
    }

    pub fn source(&self) -> Identifier {
        self.source
    }

    pub fn balance(&self) -> i8 {
        self.balance
    }

    pub fn bass(&self) -> i8 {
        self.bass
    }

    pub fn treble(&self) -> i8 {
        self.treble
    }

    pub fn sound_mode(&self) -> SoundMode {
        self.sound_mode
    }

    pub fn highpass(&self) -> CrossoverFrequency {
        self.highpass
    }

    pub fn lowpass(&self) -> CrossoverFrequency {
        self.lowpass
    }

    pub fn band_level(&self, band: u8) -> Result<i8> {
        Ok(self.bands[self.band_index(band)?])
    }

    pub fn band_levels(&self) -> &[i8; bounds::BAND_COUNT] {
        &self.bands
    }

    pub fn equalizer_preset(&self) -> Option<Identifier> {
        self.equalizer_preset
    }

    pub fn set_name(&mut self, name: &str) -> Result<SetOutcome> {
        validate_name(name)?;
        let outcome = SetOutcome::from_values(&self.name.as_str(), &name);
        self.name = name.to_string();
        Ok(outcome)
    }

    pub fn set_volume(&mut self, volume: i8) -> Result<SetOutcome> {
        set_bounded(
            &mut self.volume,
            volume,
            bounds::VOLUME_MIN,
            bounds::VOLUME_MAX,
            "volume",
        )
    }

    /// Step the volume, saturating at the bounds. When the volume is fixed
    /// the step is suppressed as unchanged.
    pub fn step_volume(&mut self, delta: i8) -> SetOutcome {
        if self.volume_fixed {
            return SetOutcome::Unchanged;
        }
        step_bounded(&mut self.volume, delta, bounds::VOLUME_MIN, bounds::VOLUME_MAX)
    }

    pub fn set_muted(&mut self, muted: bool) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.muted, &muted);
        self.muted = muted;
        outcome
    }

    /// Toggle mute; always a change
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn set_volume_fixed(&mut self, fixed: bool) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.volume_fixed, &fixed);
        self.volume_fixed = fixed;
        outcome
    }

    /// Only the model may retarget the source; it validates the reference.
    pub(crate) fn set_source_unchecked(&mut self, source: Identifier) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.source, &source);
        self.source = source;
        outcome
    }

    pub fn set_balance(&mut self, balance: i8) -> Result<SetOutcome> {
        set_bounded(
            &mut self.balance,
            balance,
            -bounds::BALANCE_MAX,
            bounds::BALANCE_MAX,
            "balance",
        )
    }

    /// Step the balance toward the left (negative delta) or right channel
    pub fn step_balance(&mut self, delta: i8) -> SetOutcome {
        step_bounded(
            &mut self.balance,
            delta,
            -bounds::BALANCE_MAX,
            bounds::BALANCE_MAX,
        )
    }

    pub fn set_bass(&mut self, level: i8) -> Result<SetOutcome> {
        set_bounded(&mut self.bass, level, bounds::TONE_MIN, bounds::TONE_MAX, "bass")
    }

    pub fn step_bass(&mut self, delta: i8) -> SetOutcome {
        step_bounded(&mut self.bass, delta, bounds::TONE_MIN, bounds::TONE_MAX)
    }

    pub fn set_treble(&mut self, level: i8) -> Result<SetOutcome> {
        set_bounded(
            &mut self.treble,
            level,
            bounds::TONE_MIN,
            bounds::TONE_MAX,
            "treble",
        )
    }

    pub fn step_treble(&mut self, delta: i8) -> SetOutcome {
        step_bounded(&mut self.treble, delta, bounds::TONE_MIN, bounds::TONE_MAX)
    }

    pub fn set_sound_mode(&mut self, mode: SoundMode) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.sound_mode, &mode);
        self.sound_mode = mode;
        outcome
    }

    pub fn set_highpass(&mut self, frequency: CrossoverFrequency) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.highpass, &frequency);
        self.highpass = frequency;
        outcome
    }

    pub fn set_lowpass(&mut self, frequency: CrossoverFrequency) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.lowpass, &frequency);
        self.lowpass = frequency;
        outcome
    }

    pub fn set_band_level(&mut self, band: u8, level: i8) -> Result<SetOutcome> {
        let index = self.band_index(band)?;
        set_bounded(
            &mut self.bands[index],
            level,
            bounds::BAND_LEVEL_MIN,
            bounds::BAND_LEVEL_MAX,
            "band level",
        )
    }

    pub fn step_band_level(&mut self, band: u8, delta: i8) -> Result<SetOutcome> {
        let index = self.band_index(band)?;
        Ok(step_bounded(
            &mut self.bands[index],
            delta,
            bounds::BAND_LEVEL_MIN,
            bounds::BAND_LEVEL_MAX,
        ))
    }

    pub(crate) fn set_equalizer_preset_unchecked(&mut self, preset: Identifier) -> SetOutcome {
        let new = Some(preset);
        let outcome = SetOutcome::from_values(&self.equalizer_preset, &new);
        self.equalizer_preset = new;
        outcome
    }

    // Bands are numbered 1..=BAND_COUNT on the wire.
    fn band_index(&self, band: u8) -> Result<usize> {
        if (1..=bounds::BAND_COUNT as u8).contains(&band) {
            Ok(band as usize - 1)
        } else {
            Err(crate::ModelError::InvalidConfiguration(format!(
                "band {band} outside 1..={}",
                bounds::BAND_COUNT
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> Zone {
        Zone::new("Zone 1".to_string(), -40, 1)
    }

    #[test]
    fn test_volume_bounds() {
        let mut z = zone();
        assert!(z.set_volume(1).is_err());
        assert!(z.set_volume(-81).is_err());
        assert_eq!(z.volume(), -40);

        assert_eq!(z.set_volume(-30).unwrap(), SetOutcome::Changed);
        assert_eq!(z.set_volume(-30).unwrap(), SetOutcome::Unchanged);
    }

    #[test]
    fn test_fixed_volume_suppresses_steps() {
        let mut z = zone();
        z.set_volume_fixed(true);
        assert_eq!(z.step_volume(1), SetOutcome::Unchanged);
        assert_eq!(z.volume(), -40);
    }

    #[test]
    fn test_toggle_mute() {
        let mut z = zone();
        assert!(z.toggle_muted());
        assert!(!z.toggle_muted());
        assert_eq!(z.set_muted(false), SetOutcome::Unchanged);
    }

    #[test]
    fn test_band_index_checked() {
        let mut z = zone();
        assert!(z.set_band_level(0, 0).is_err());
        assert!(z.set_band_level(11, 0).is_err());
        assert_eq!(z.set_band_level(10, 5).unwrap(), SetOutcome::Changed);
        assert_eq!(z.band_level(10).unwrap(), 5);
    }

    #[test]
    fn test_balance_steps_saturate() {
        let mut z = zone();
        for _ in 0..12 {
            z.step_balance(-1);
        }
        assert_eq!(z.balance(), -10);
        assert_eq!(z.step_balance(-1), SetOutcome::Unchanged);
    }
}
