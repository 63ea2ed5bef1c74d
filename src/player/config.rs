//! Movement tuning loaded from an external RON file.
//!
//! Allows tweaking the feel of the controller without recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{require_non_negative, require_positive, ConfigError};
use crate::world::{load_ron_or_default, DataLoadError};

/// Movement tuning loaded from assets/data/player/movement.ron.
///
/// Speeds are in units per second, times in seconds. The values are
/// validated once at load; the controller refuses to run with a
/// configuration that fails [`MovementConfig::validate`].
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Cap on horizontal speed reachable through input.
    pub max_move_velocity: f32,
    /// Velocity added per physics tick while input is held.
    pub move_accel: f32,
    /// Vertical launch speed of a jump (and magnitude of a wall jump).
    pub jump_power: f32,
    /// Gravity multiplier while falling or after releasing jump. Must be > 1.
    pub fall_gravity_multiplier: f32,
    /// Coyote time after leaving a jumpable surface.
    pub jump_leeway_time: f32,
    /// Minimum time between two jumps.
    pub jump_cooldown_time: f32,
    /// How long an early jump press is remembered.
    pub jump_buffer_time: f32,
    /// Longest continuous wall ride before the player slides off.
    pub wall_ride_max_time: f32,
    /// How long the player clings to a wall while steering away from it.
    pub sticky_wall_time: f32,
    /// How long input is ignored after a wall jump.
    pub wall_jump_input_deaden_time: f32,
    /// Magnitude of world gravity; must match the physics world.
    pub gravity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_move_velocity: 3.5,
            move_accel: 1.0,
            jump_power: 5.0,
            fall_gravity_multiplier: 2.0,
            jump_leeway_time: 0.1,
            jump_cooldown_time: 0.1,
            jump_buffer_time: 0.1,
            wall_ride_max_time: 1.0,
            sticky_wall_time: 0.1,
            wall_jump_input_deaden_time: 0.5,
            gravity: 9.81,
        }
    }
}

impl MovementConfig {
    /// Location of the tuning file, relative to the working directory.
    pub const PATH: &'static str = "assets/data/player/movement.ron";

    /// Check every tunable. A fall multiplier of exactly 1 would make the
    /// extra-gravity term a no-op and is rejected along with anything lower.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("max_move_velocity", self.max_move_velocity)?;
        require_non_negative("move_accel", self.move_accel)?;
        require_non_negative("jump_power", self.jump_power)?;
        require_positive("gravity", self.gravity)?;
        require_non_negative("jump_leeway_time", self.jump_leeway_time)?;
        require_non_negative("jump_cooldown_time", self.jump_cooldown_time)?;
        require_non_negative("jump_buffer_time", self.jump_buffer_time)?;
        require_non_negative("wall_ride_max_time", self.wall_ride_max_time)?;
        require_non_negative("sticky_wall_time", self.sticky_wall_time)?;
        require_non_negative("wall_jump_input_deaden_time", self.wall_jump_input_deaden_time)?;

        let multiplier = self.fall_gravity_multiplier;
        if !multiplier.is_finite() || multiplier <= 1.0 {
            return Err(ConfigError::FallGravityMultiplier(multiplier));
        }
        Ok(())
    }

    /// Load and validate the tuning file. A missing file falls back to the
    /// defaults; a file that fails to parse or validate is an error.
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

/// Physical dimensions of the simulated body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDimensions {
    /// Radius used for the ground and wall probes; the player's collider radius.
    pub probe_radius: f32,
}

impl BodyDimensions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("probe_radius", self.probe_radius)?;
        Ok(())
    }
}
