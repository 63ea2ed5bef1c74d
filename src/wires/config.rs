//! Current tuning loaded from an external RON file.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{require_positive, ConfigError};
use crate::world::{load_ron_or_default, DataLoadError};

/// Current tuning loaded from assets/data/wires/current.ron.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentConfig {
    /// Units per second along a wire.
    pub normal_speed: f32,
    /// Units per second along a wire while boost is held.
    pub boost_speed: f32,
    /// Seconds a gap crossing takes. Boost does not shorten it.
    pub transition_length: f32,
    /// How close the player must be to a gap anchor to bridge the gap.
    pub gap_trigger_radius: f32,
}

impl Default for CurrentConfig {
    fn default() -> Self {
        Self {
            normal_speed: 1.0,
            boost_speed: 3.0,
            transition_length: 0.5,
            gap_trigger_radius: 1.5,
        }
    }
}

impl CurrentConfig {
    pub const PATH: &'static str = "assets/data/wires/current.ron";

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("normal_speed", self.normal_speed)?;
        require_positive("boost_speed", self.boost_speed)?;
        require_positive("transition_length", self.transition_length)?;
        require_positive("gap_trigger_radius", self.gap_trigger_radius)?;
        Ok(())
    }

    pub fn load() -> Result<Self, DataLoadError> {
        let config: Self = load_ron_or_default(Self::PATH)?;
        config
            .validate()
            .map_err(|source| DataLoadError::InvalidConfig {
                path: Self::PATH.to_string(),
                source,
            })?;
        Ok(config)
    }
}
