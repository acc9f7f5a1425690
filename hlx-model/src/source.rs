//! Source entity

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{validate_name, SetOutcome};

/// A selectable input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    name: String,
}

impl Source {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<SetOutcome> {
        validate_name(name)?;
        let outcome = SetOutcome::from_values(&self.name.as_str(), &name);
        self.name = name.to_string();
        Ok(outcome)
    }
}
