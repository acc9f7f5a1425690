//! Front panel state

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::types::{bounds, SetOutcome};

/// Display brightness and key lock of the physical panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontPanel {
    brightness: u8,
    locked: bool,
}

impl FrontPanel {
    pub(crate) fn new(brightness: u8, locked: bool) -> Self {
        Self { brightness, locked }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_brightness(&mut self, brightness: u8) -> Result<SetOutcome> {
        if brightness > bounds::BRIGHTNESS_MAX {
            return Err(ModelError::InvalidConfiguration(format!(
                "brightness {brightness} outside 0..={}",
                bounds::BRIGHTNESS_MAX
            )));
        }
        let outcome = SetOutcome::from_values(&self.brightness, &brightness);
        self.brightness = brightness;
        Ok(outcome)
    }

    pub fn set_locked(&mut self, locked: bool) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.locked, &locked);
        self.locked = locked;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_bound() {
        let mut panel = FrontPanel::new(2, false);
        assert!(panel.set_brightness(4).is_err());
        assert_eq!(panel.set_brightness(3).unwrap(), SetOutcome::Changed);
        assert_eq!(panel.set_brightness(3).unwrap(), SetOutcome::Unchanged);
    }
}
