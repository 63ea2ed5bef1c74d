//! Errors raised when tuning values cannot drive a simulation.

use thiserror::Error;

/// A tunable value that would make a simulation degenerate.
///
/// These are fatal at construction: the entity is never simulated with a
/// configuration that failed validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The fall multiplier has to add gravity on top of the base gravity.
    #[error("fall_gravity_multiplier must be greater than 1, got {0}")]
    FallGravityMultiplier(f32),

    /// A value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// A value that must be strictly positive is zero or negative.
    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// A duration or rate is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Reject NaN and infinities.
pub fn require_finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub fn require_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub fn require_non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validators_report_the_field() {
        assert_eq!(require_positive("speed", 2.0), Ok(2.0));
        assert_eq!(
            require_positive("speed", 0.0),
            Err(ConfigError::NotPositive { field: "speed", value: 0.0 })
        );
        assert_eq!(
            require_non_negative("time", -0.5),
            Err(ConfigError::Negative { field: "time", value: -0.5 })
        );
        assert!(matches!(
            require_non_negative("time", f32::NAN),
            Err(ConfigError::NotFinite { field: "time", .. })
        ));
    }

    #[test]
    fn messages_name_the_offending_value() {
        let message = ConfigError::FallGravityMultiplier(1.0).to_string();
        assert!(message.contains("greater than 1"));
        assert!(message.contains('1'));
    }
}
