//! The aggregated head model
//!
//! Owns every entity table. Controllers hold ids, never references; all
//! cross-entity invariants (source references, group membership, preset
//! references) are enforced here, the only place both sides of a reference
//! are visible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::equalizer::EqualizerPreset;
use crate::error::{ModelError, Result};
use crate::favorite::Favorite;
use crate::front_panel::FrontPanel;
use crate::group::Group;
use crate::infrared::Infrared;
use crate::network::Network;
use crate::source::Source;
use crate::types::{Identifier, SetOutcome};
use crate::zone::Zone;

/// Complete in-memory state of one HLX head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HlxModel {
    zones: BTreeMap<Identifier, Zone>,
    groups: BTreeMap<Identifier, Group>,
    sources: BTreeMap<Identifier, Source>,
    equalizer_presets: BTreeMap<Identifier, EqualizerPreset>,
    favorites: BTreeMap<Identifier, Favorite>,
    front_panel: FrontPanel,
    infrared: Infrared,
    network: Network,
}

impl HlxModel {
    /// Build the vendor default model
    pub fn with_defaults() -> Self {
        let zones = (1..=defaults::ZONE_COUNT)
            .map(|id| {
                (
                    id,
                    Zone::new(format!("Zone {id}"), defaults::ZONE_VOLUME, defaults::ZONE_SOURCE),
                )
            })
            .collect();
        let sources = (1..=defaults::SOURCE_COUNT)
            .map(|id| (id, Source::new(format!("Source {id}"))))
            .collect();
        let groups = (1..=defaults::GROUP_COUNT)
            .map(|id| (id, Group::new(format!("Group {id}"))))
            .collect();
        let equalizer_presets = (1..=defaults::EQUALIZER_PRESET_COUNT)
            .map(|id| (id, EqualizerPreset::new(format!("Preset {id}"))))
            .collect();
        let favorites = (1..=defaults::FAVORITE_COUNT)
            .map(|id| (id, Favorite::new(format!("Favorite {id}"))))
            .collect();

        Self {
            zones,
            groups,
            sources,
            equalizer_presets,
            favorites,
            front_panel: FrontPanel::new(defaults::BRIGHTNESS, false),
            infrared: Infrared::new(false),
            network: Network::private_defaults(),
        }
    }

    // ========================================================================
    // Entity access
    // ========================================================================

    pub fn zone(&self, id: Identifier) -> Result<&Zone> {
        self.zones
            .get(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "zone", id })
    }

    pub fn zone_mut(&mut self, id: Identifier) -> Result<&mut Zone> {
        self.zones
            .get_mut(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "zone", id })
    }

    /// Zone ids in ascending order
    pub fn zone_ids(&self) -> Vec<Identifier> {
        self.zones.keys().copied().collect()
    }

    pub fn group(&self, id: Identifier) -> Result<&Group> {
        self.groups
            .get(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "group", id })
    }

    pub fn group_mut(&mut self, id: Identifier) -> Result<&mut Group> {
        self.groups
            .get_mut(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "group", id })
    }

    pub fn group_ids(&self) -> Vec<Identifier> {
        self.groups.keys().copied().collect()
    }

    pub fn source(&self, id: Identifier) -> Result<&Source> {
        self.sources
            .get(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "source", id })
    }

    pub fn source_mut(&mut self, id: Identifier) -> Result<&mut Source> {
        self.sources
            .get_mut(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "source", id })
    }

    pub fn source_ids(&self) -> Vec<Identifier> {
        self.sources.keys().copied().collect()
    }

    pub fn equalizer_preset(&self, id: Identifier) -> Result<&EqualizerPreset> {
        self.equalizer_presets
            .get(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "equalizer preset", id })
    }

    pub fn equalizer_preset_mut(&mut self, id: Identifier) -> Result<&mut EqualizerPreset> {
        self.equalizer_presets
            .get_mut(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "equalizer preset", id })
    }

    pub fn equalizer_preset_ids(&self) -> Vec<Identifier> {
        self.equalizer_presets.keys().copied().collect()
    }

    pub fn favorite(&self, id: Identifier) -> Result<&Favorite> {
        self.favorites
            .get(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "favorite", id })
    }

    pub fn favorite_mut(&mut self, id: Identifier) -> Result<&mut Favorite> {
        self.favorites
            .get_mut(&id)
            .ok_or(ModelError::UnknownIdentifier { kind: "favorite", id })
    }

    pub fn favorite_ids(&self) -> Vec<Identifier> {
        self.favorites.keys().copied().collect()
    }

    pub fn front_panel(&self) -> &FrontPanel {
        &self.front_panel
    }

    pub fn front_panel_mut(&mut self) -> &mut FrontPanel {
        &mut self.front_panel
    }

    pub fn infrared(&self) -> &Infrared {
        &self.infrared
    }

    pub fn infrared_mut(&mut self) -> &mut Infrared {
        &mut self.infrared
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    // ========================================================================
    // Cross-entity mutations
    // ========================================================================

    /// Retarget a zone's source, validating the reference
    pub fn set_zone_source(&mut self, zone: Identifier, source: Identifier) -> Result<SetOutcome> {
        if !self.sources.contains_key(&source) {
            return Err(ModelError::UnknownIdentifier { kind: "source", id: source });
        }
        Ok(self.zone_mut(zone)?.set_source_unchecked(source))
    }

    /// Assign an equalizer preset to a zone, validating the reference
    pub fn set_zone_equalizer_preset(
        &mut self,
        zone: Identifier,
        preset: Identifier,
    ) -> Result<SetOutcome> {
        if !self.equalizer_presets.contains_key(&preset) {
            return Err(ModelError::UnknownIdentifier { kind: "equalizer preset", id: preset });
        }
        Ok(self.zone_mut(zone)?.set_equalizer_preset_unchecked(preset))
    }

    /// Add a zone to a group, validating both references
    pub fn add_zone_to_group(&mut self, group: Identifier, zone: Identifier) -> Result<SetOutcome> {
        if !self.zones.contains_key(&zone) {
            return Err(ModelError::UnknownIdentifier { kind: "zone", id: zone });
        }
        Ok(self.group_mut(group)?.add_member(zone))
    }

    /// Remove a zone from a group
    pub fn remove_zone_from_group(
        &mut self,
        group: Identifier,
        zone: Identifier,
    ) -> Result<SetOutcome> {
        Ok(self.group_mut(group)?.remove_member(zone))
    }

    /// Members of a group in ascending zone-id order
    pub fn group_members(&self, group: Identifier) -> Result<Vec<Identifier>> {
        Ok(self.group(group)?.members().collect())
    }

    // ========================================================================
    // Backup blob
    // ========================================================================

    /// Serialize the model as the backup blob
    pub fn to_backup(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ModelError::InvalidConfiguration(format!("backup serialization: {e}")))
    }

    /// Restore a model from a backup blob
    pub fn from_backup(blob: &[u8]) -> Result<Self> {
        if blob.is_empty() {
            return Err(ModelError::MissingConfiguration("empty backup blob".to_string()));
        }
        serde_json::from_slice(blob)
            .map_err(|e| ModelError::InvalidConfiguration(format!("backup deserialization: {e}")))
    }
}

impl Default for HlxModel {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_dense() {
        let model = HlxModel::with_defaults();
        assert_eq!(model.zone_ids(), (1..=defaults::ZONE_COUNT).collect::<Vec<_>>());
        assert_eq!(model.zone(1).unwrap().volume(), defaults::ZONE_VOLUME);
        assert_eq!(model.zone(8).unwrap().name(), "Zone 8");
        assert!(model.zone(9).is_err());
    }

    #[test]
    fn test_source_reference_validated() {
        let mut model = HlxModel::with_defaults();
        assert!(model.set_zone_source(1, 99).is_err());
        assert_eq!(model.zone(1).unwrap().source(), defaults::ZONE_SOURCE);

        assert_eq!(model.set_zone_source(1, 3).unwrap(), SetOutcome::Changed);
        assert_eq!(model.set_zone_source(1, 3).unwrap(), SetOutcome::Unchanged);
    }

    #[test]
    fn test_group_membership_validated() {
        let mut model = HlxModel::with_defaults();
        assert!(model.add_zone_to_group(2, 99).is_err());
        assert!(model.add_zone_to_group(99, 1).is_err());

        model.add_zone_to_group(2, 5).unwrap();
        model.add_zone_to_group(2, 3).unwrap();
        assert_eq!(model.group_members(2).unwrap(), vec![3, 5]);
    }

    #[test]
    fn test_backup_round_trip() {
        let mut model = HlxModel::with_defaults();
        model.zone_mut(1).unwrap().set_volume(-30).unwrap();
        model.zone_mut(1).unwrap().set_name("Kitchen").unwrap();
        model.add_zone_to_group(1, 1).unwrap();

        let blob = model.to_backup().unwrap();
        let restored = HlxModel::from_backup(&blob).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_empty_backup_is_missing_configuration() {
        assert!(matches!(
            HlxModel::from_backup(b""),
            Err(ModelError::MissingConfiguration(_))
        ));
    }

    #[test]
    fn test_garbage_backup_is_invalid_configuration() {
        assert!(matches!(
            HlxModel::from_backup(b"not json"),
            Err(ModelError::InvalidConfiguration(_))
        ));
    }
}
