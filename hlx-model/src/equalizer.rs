//! Equalizer preset entity

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{bounds, set_bounded, step_bounded, validate_name, SetOutcome};

/// A named band-level table zones can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualizerPreset {
    name: String,
    bands: [i8; bounds::BAND_COUNT],
}

impl EqualizerPreset {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            bands: [0; bounds::BAND_COUNT],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn band_level(&self, band: u8) -> Result<i8> {
        Ok(self.bands[self.band_index(band)?])
    }

    pub fn band_levels(&self) -> &[i8; bounds::BAND_COUNT] {
        &self.bands
    }

    pub fn set_name(&mut self, name: &str) -> Result<SetOutcome> {
        validate_name(name)?;
        let outcome = SetOutcome::from_values(&self.name.as_str(), &name);
        self.name = name.to_string();
        Ok(outcome)
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

    #[test]
    fn test_band_levels_bounded() {
        let mut preset = EqualizerPreset::new("Flat".to_string());
        assert!(preset.set_band_level(1, 11).is_err());
        assert_eq!(preset.set_band_level(1, 10).unwrap(), SetOutcome::Changed);
        assert_eq!(preset.step_band_level(1, 1).unwrap(), SetOutcome::Unchanged);
    }

    #[test]
    fn test_band_numbering_is_one_based() {
        let mut preset = EqualizerPreset::new("Flat".to_string());
        assert!(preset.set_band_level(0, 1).is_err());
        assert!(preset.set_band_level(11, 1).is_err());
        preset.set_band_level(10, 3).unwrap();
        assert_eq!(preset.band_levels()[9], 3);
    }
}
