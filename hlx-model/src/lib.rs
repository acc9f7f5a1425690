//! # hlx-model - In-memory domain model of an HLX head
//!
//! Identifier-keyed collections of the entities a head manages - zones,
//! groups, sources, equalizer presets, favorites - plus the head-wide front
//! panel, infrared, and network state.
//!
//! Mutations are check-then-apply: a setter either changes the entity
//! atomically within its declared bounds or leaves it untouched and returns
//! [`ModelError::InvalidConfiguration`]. Setting a field to its current value
//! is not an error; it reports [`SetOutcome::Unchanged`], which callers use
//! to suppress redundant notifications.
//!
//! The whole model serializes to the backup blob with `serde_json`; vendor
//! defaults live in [`defaults`].

pub mod defaults;
mod equalizer;
mod error;
mod favorite;
mod front_panel;
mod group;
mod infrared;
mod model;
mod network;
mod source;
mod types;
mod zone;

pub use equalizer::EqualizerPreset;
pub use error::{ModelError, Result};
pub use favorite::Favorite;
pub use front_panel::FrontPanel;
pub use group::Group;
pub use infrared::Infrared;
pub use model::HlxModel;
pub use network::Network;
pub use source::Source;
pub use types::{
    bounds, CrossoverFrequency, Identifier, SetOutcome, SoundMode, MAX_NAME_LEN,
};
pub use zone::Zone;
