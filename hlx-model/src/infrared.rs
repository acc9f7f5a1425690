//! Infrared receiver state

use serde::{Deserialize, Serialize};

use crate::types::SetOutcome;

/// Whether the head's infrared receiver is disabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrared {
    disabled: bool,
}

impl Infrared {
    pub(crate) fn new(disabled: bool) -> Self {
        Self { disabled }
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) -> SetOutcome {
        let outcome = SetOutcome::from_values(&self.disabled, &disabled);
        self.disabled = disabled;
        outcome
    }
}
