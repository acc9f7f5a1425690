//! Vendor default tables
//!
//! The factory state of a head: entity counts, names, and levels.
//! `ResetToDefaults` reinstalls exactly this.

/// Zones shipped by the head
pub const ZONE_COUNT: u8 = 8;

/// Selectable sources
pub const SOURCE_COUNT: u8 = 8;

/// Group slots (empty by default)
pub const GROUP_COUNT: u8 = 4;

/// Equalizer preset slots (flat by default)
pub const EQUALIZER_PRESET_COUNT: u8 = 3;

/// Favorite slots
pub const FAVORITE_COUNT: u8 = 10;

/// Factory volume per zone, scaled dB
pub const ZONE_VOLUME: i8 = -40;

/// Factory source selection per zone
pub const ZONE_SOURCE: u8 = 1;

/// Factory front panel brightness
pub const BRIGHTNESS: u8 = 2;
