//! Error types for the single-neuron simulator

use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while building a model, a stimulus or a simulation run.
///
/// Numerical edge cases inside a run (rate singularities, too few spikes for a
/// firing rate) are not errors; they have defined values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A model or driver parameter is outside its valid range
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// A stimulus waveform cannot be laid out over the run
    #[error("Invalid stimulus: {reason}")]
    InvalidStimulus { reason: String },
}

impl SimError {
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl ToString,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    pub fn invalid_stimulus(reason: impl Into<String>) -> Self {
        Self::InvalidStimulus {
            reason: reason.into(),
        }
    }
}

/// Fails with [`SimError::InvalidParameter`] unless `value` is finite and `> 0`.
pub(crate) fn ensure_positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_parameter(parameter, value, "finite and > 0"))
    }
}

/// Fails with [`SimError::InvalidParameter`] unless `value` is finite and `>= 0`.
pub(crate) fn ensure_non_negative(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_parameter(parameter, value, "finite and >= 0"))
    }
}

pub(crate) fn ensure_finite(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid_parameter(parameter, value, "finite"))
    }
}
