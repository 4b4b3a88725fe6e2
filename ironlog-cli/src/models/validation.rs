use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::NewSet;

/// Advisory input limits for set entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationLimits {
    #[serde(default = "default_max_reps")]
    pub max_reps: u32,

    #[serde(default = "default_max_weight_kg")]
    pub max_weight_kg: f64,

    #[serde(default = "default_max_rest_seconds")]
    pub max_rest_seconds: u32,
}

fn default_max_reps() -> u32 {
    100
}

fn default_max_weight_kg() -> f64 {
    1000.0
}

fn default_max_rest_seconds() -> u32 {
    3600
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_reps: default_max_reps(),
            max_weight_kg: default_max_weight_kg(),
            max_rest_seconds: default_max_rest_seconds(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Reps must be between 1 and {max}")]
    RepsOutOfRange { max: u32 },

    #[error("Weight must be between 0 and {max} kg")]
    WeightOutOfRange { max: f64 },

    #[error("Rest time cannot exceed {max} seconds")]
    RestTooLong { max: u32 },

    #[error("'{0}' is not a valid weight")]
    InvalidWeight(String),

    #[error("'{0}' is not a valid number of reps")]
    InvalidReps(String),
}

/// Check a set before it is sent to the server.
///
/// Weight is rounded to 0.01 kg in place once every check has passed; a
/// rejected set is left as it was.
pub fn validate_set(set: &mut NewSet, limits: &ValidationLimits) -> Result<(), ValidationError> {
    if set.reps == 0 || set.reps > limits.max_reps {
        return Err(ValidationError::RepsOutOfRange {
            max: limits.max_reps,
        });
    }

    if !set.weight_kg.is_finite() || set.weight_kg < 0.0 || set.weight_kg > limits.max_weight_kg {
        return Err(ValidationError::WeightOutOfRange {
            max: limits.max_weight_kg,
        });
    }

    if let Some(rest) = set.rest_seconds {
        if rest > limits.max_rest_seconds {
            return Err(ValidationError::RestTooLong {
                max: limits.max_rest_seconds,
            });
        }
    }

    set.weight_kg = (set.weight_kg * 100.0).round() / 100.0;
    Ok(())
}

/// Parse a weight as typed by the user. Accepts `,` as decimal separator.
pub fn parse_weight(input: &str) -> Result<f64, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ValidationError::InvalidWeight(input.to_string()));
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| ValidationError::InvalidWeight(input.to_string()))
}

pub fn parse_reps(input: &str) -> Result<u32, ValidationError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidReps(input.to_string()))
}
