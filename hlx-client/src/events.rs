//! Client-side event stream
//!
//! Controllers translate every state-bearing notification into a typed
//! [`StateChange`] and publish it on the application's broadcast channel, so
//! observers never parse wire frames themselves. Refresh progress and
//! controller faults ride the same channel.

use hlx_model::{CrossoverFrequency, Identifier, SoundMode};

/// A single observed mutation of the mirrored controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    ZoneName { zone: Identifier, name: String },
    ZoneVolume { zone: Identifier, volume: i8 },
    ZoneMuted { zone: Identifier, muted: bool },
    ZoneVolumeFixed { zone: Identifier, fixed: bool },
    ZoneSource { zone: Identifier, source: Identifier },
    ZoneBalance { zone: Identifier, balance: i8 },
    ZoneBass { zone: Identifier, level: i8 },
    ZoneTreble { zone: Identifier, level: i8 },
    ZoneSoundMode { zone: Identifier, mode: SoundMode },
    ZoneHighpass { zone: Identifier, frequency: CrossoverFrequency },
    ZoneLowpass { zone: Identifier, frequency: CrossoverFrequency },
    ZoneBandLevel { zone: Identifier, band: u8, level: i8 },
    ZoneEqualizerPreset { zone: Identifier, preset: Identifier },
    GroupName { group: Identifier, name: String },
    GroupZoneAdded { group: Identifier, zone: Identifier },
    GroupZoneRemoved { group: Identifier, zone: Identifier },
    SourceName { source: Identifier, name: String },
    FavoriteName { favorite: Identifier, name: String },
    EqualizerPresetName { preset: Identifier, name: String },
    EqualizerPresetBandLevel { preset: Identifier, band: u8, level: i8 },
    FrontPanelBrightness { brightness: u8 },
    FrontPanelLocked { locked: bool },
    InfraredDisabled { disabled: bool },
    NetworkUpdated,
    ConfigurationSaving,
    ConfigurationSaved,
    ConfigurationLoaded,
    ConfigurationReset,
}

/// Everything the application broadcasts to its subscribers
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The mirrored state changed, usually because a notification arrived
    State(StateChange),

    /// Global refresh progress, 0 through 100
    IsRefreshing { percent: u8 },

    /// A full refresh sweep finished; sent exactly once per sweep
    DidRefresh,

    /// A controller failed to apply a received frame to the mirror
    ControllerError { controller: &'static str, error: String },
}
