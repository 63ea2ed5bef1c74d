//! World module - data loading, level construction, bolts, and void-out.

mod bolts;
mod builder;
mod data;
mod error;
mod geometry;
mod materials;
mod plugin;
mod void_out;

pub use bolts::{Bolt, BoltTally, BOLT_RADIUS};
pub use builder::LevelGeometry;
pub use data::{load_ron_or_default, CurrentLevel, LevelDefinition, LevelRegistry};
pub use error::DataLoadError;
pub use plugin::{setup_level, WorldPlugin};
pub use void_out::{below_kill_plane, KillPlane};
