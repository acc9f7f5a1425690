//! Group entity

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{validate_name, Identifier, SetOutcome};

/// A named set of zones commanded as one
///
/// Membership is kept ordered so server fan-out visits members in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    name: String,
    members: BTreeSet<Identifier>,
}

impl Group {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            members: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in ascending zone-id order
    pub fn members(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, zone: Identifier) -> bool {
        self.members.contains(&zone)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn set_name(&mut self, name: &str) -> Result<SetOutcome> {
        validate_name(name)?;
        let outcome = SetOutcome::from_values(&self.name.as_str(), &name);
        self.name = name.to_string();
        Ok(outcome)
    }

    /// Membership checks live at the model level; adding an existing member
    /// is the unchanged case.
    pub(crate) fn add_member(&mut self, zone: Identifier) -> SetOutcome {
        if self.members.insert(zone) {
            SetOutcome::Changed
        } else {
            SetOutcome::Unchanged
        }
    }

    pub(crate) fn remove_member(&mut self, zone: Identifier) -> SetOutcome {
        if self.members.remove(&zone) {
            SetOutcome::Changed
        } else {
            SetOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_ordered() {
        let mut group = Group::new("Upstairs".to_string());
        group.add_member(5);
        group.add_member(2);
        group.add_member(8);

        let members: Vec<_> = group.members().collect();
        assert_eq!(members, vec![2, 5, 8]);
    }

    #[test]
    fn test_redundant_membership() {
        let mut group = Group::new("Upstairs".to_string());
        assert_eq!(group.add_member(3), SetOutcome::Changed);
        assert_eq!(group.add_member(3), SetOutcome::Unchanged);
        assert_eq!(group.remove_member(3), SetOutcome::Changed);
        assert_eq!(group.remove_member(3), SetOutcome::Unchanged);
    }
}
