//! Shared value types and bounds
//!
//! All entity identifiers are small positive integers, dense within their
//! kind and stable for the life of a session.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Dense positive entity identifier
pub type Identifier = u8;

/// Names are 1..=16 printable ASCII characters
pub const MAX_NAME_LEN: usize = 16;

/// Declared value bounds, shared by setters and tests
pub mod bounds {
    /// Volume in scaled dB
    pub const VOLUME_MIN: i8 = -80;
    pub const VOLUME_MAX: i8 = 0;

    /// Bass/treble tone scale
    pub const TONE_MIN: i8 = -10;
    pub const TONE_MAX: i8 = 10;

    /// Balance bias magnitude per side (negative = left)
    pub const BALANCE_MAX: i8 = 10;

    /// Equalizer band level scale
    pub const BAND_LEVEL_MIN: i8 = -10;
    pub const BAND_LEVEL_MAX: i8 = 10;

    /// Equalizer bands per zone and per preset
    pub const BAND_COUNT: usize = 10;

    /// Front panel brightness steps
    pub const BRIGHTNESS_MAX: u8 = 3;
}

/// Result of a successful mutation
///
/// `Unchanged` is the "value already set" case: not an error, but callers
/// suppress peer notifications and state-change delegations for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The entity changed; notify peers and observers
    Changed,
    /// The value was already set; suppress notifications
    Unchanged,
}

impl SetOutcome {
    /// True if the mutation changed the entity
    pub fn changed(self) -> bool {
        matches!(self, SetOutcome::Changed)
    }

    /// Derive the outcome from an old/new value pair
    pub fn from_values<T: PartialEq>(old: &T, new: &T) -> Self {
        if old == new {
            SetOutcome::Unchanged
        } else {
            SetOutcome::Changed
        }
    }
}

/// Zone sound mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundMode {
    Disabled,
    Stereo,
    Mono,
    Left,
    Right,
    Surround,
}

impl SoundMode {
    /// Decode the wire digit
    pub fn from_wire(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SoundMode::Disabled),
            1 => Ok(SoundMode::Stereo),
            2 => Ok(SoundMode::Mono),
            3 => Ok(SoundMode::Left),
            4 => Ok(SoundMode::Right),
            5 => Ok(SoundMode::Surround),
            other => Err(ModelError::InvalidConfiguration(format!(
                "sound mode {other} out of range"
            ))),
        }
    }

    /// The wire digit for this mode
    pub fn to_wire(self) -> u8 {
        match self {
            SoundMode::Disabled => 0,
            SoundMode::Stereo => 1,
            SoundMode::Mono => 2,
            SoundMode::Left => 3,
            SoundMode::Right => 4,
            SoundMode::Surround => 5,
        }
    }
}

/// Crossover frequency steps supported by the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverFrequency {
    Hz40,
    Hz60,
    Hz80,
    Hz100,
    Hz120,
    Hz160,
}

impl CrossoverFrequency {
    /// Decode a wire frequency in Hz
    pub fn from_hz(hz: u16) -> Result<Self> {
        match hz {
            40 => Ok(CrossoverFrequency::Hz40),
            60 => Ok(CrossoverFrequency::Hz60),
            80 => Ok(CrossoverFrequency::Hz80),
            100 => Ok(CrossoverFrequency::Hz100),
            120 => Ok(CrossoverFrequency::Hz120),
            160 => Ok(CrossoverFrequency::Hz160),
            other => Err(ModelError::InvalidConfiguration(format!(
                "crossover frequency {other} Hz unsupported"
            ))),
        }
    }

    /// The frequency in Hz
    pub fn hz(self) -> u16 {
        match self {
            CrossoverFrequency::Hz40 => 40,
            CrossoverFrequency::Hz60 => 60,
            CrossoverFrequency::Hz80 => 80,
            CrossoverFrequency::Hz100 => 100,
            CrossoverFrequency::Hz120 => 120,
            CrossoverFrequency::Hz160 => 160,
        }
    }
}

/// Validate a name against the shared naming invariant
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(ModelError::InvalidConfiguration(format!(
            "name '{name}' must be 1..={MAX_NAME_LEN} characters"
        )));
    }
    if !name.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return Err(ModelError::InvalidConfiguration(format!(
            "name '{name}' contains non-printable characters"
        )));
    }
    Ok(())
}

/// Check-then-apply a bounded signed value
pub(crate) fn set_bounded(
    current: &mut i8,
    new: i8,
    min: i8,
    max: i8,
    what: &str,
) -> Result<SetOutcome> {
    if !(min..=max).contains(&new) {
        return Err(ModelError::InvalidConfiguration(format!(
            "{what} {new} outside {min}..={max}"
        )));
    }
    let outcome = SetOutcome::from_values(current, &new);
    *current = new;
    Ok(outcome)
}

/// Step a bounded signed value, saturating at the bound
///
/// Stepping at the bound is the "already set" case.
pub(crate) fn step_bounded(current: &mut i8, delta: i8, min: i8, max: i8) -> SetOutcome {
    let stepped = current.saturating_add(delta).clamp(min, max);
    let outcome = SetOutcome::from_values(current, &stepped);
    *current = stepped;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_mode_wire_codes() {
        for value in 0..=5 {
            assert_eq!(SoundMode::from_wire(value).unwrap().to_wire(), value);
        }
        assert!(SoundMode::from_wire(6).is_err());
    }

    #[test]
    fn test_crossover_frequencies() {
        assert_eq!(CrossoverFrequency::from_hz(80).unwrap(), CrossoverFrequency::Hz80);
        assert!(CrossoverFrequency::from_hz(90).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Living Room").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("seventeen chars !!").is_err());
        assert!(validate_name("tab\there").is_err());
    }

    #[test]
    fn test_set_bounded_rejects_then_preserves() {
        let mut volume = -40i8;
        assert!(set_bounded(&mut volume, 10, -80, 0, "volume").is_err());
        assert_eq!(volume, -40);

        assert_eq!(
            set_bounded(&mut volume, -30, -80, 0, "volume").unwrap(),
            SetOutcome::Changed
        );
        assert_eq!(
            set_bounded(&mut volume, -30, -80, 0, "volume").unwrap(),
            SetOutcome::Unchanged
        );
    }

    #[test]
    fn test_step_saturates() {
        let mut level = 0i8;
        assert_eq!(step_bounded(&mut level, 1, -80, 0), SetOutcome::Unchanged);
        assert_eq!(step_bounded(&mut level, -1, -80, 0), SetOutcome::Changed);
        assert_eq!(level, -1);
    }
}
