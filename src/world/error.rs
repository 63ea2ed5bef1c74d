//! Error types for world data loading.

use thiserror::Error;

use crate::core::ConfigError;
use crate::wires::WireChainError;

/// Errors that can occur when loading tuning or level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Tuning values parsed but cannot drive the simulation.
    #[error("Invalid tuning in '{path}': {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: ConfigError,
    },

    /// The level's wires do not form a single chain.
    #[error("Malformed wires in level '{level}': {source}")]
    MalformedWires {
        level: String,
        #[source]
        source: WireChainError,
    },

    /// A platform with a zero or negative size.
    #[error("Platform {index} in level '{level}' has invalid half extents {half_extents:?}")]
    InvalidPlatform {
        level: String,
        index: usize,
        half_extents: (f32, f32, f32),
    },

    /// The requested level was never loaded.
    #[error("Unknown level '{0}'")]
    UnknownLevel(String),
}
