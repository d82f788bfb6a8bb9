use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Trajectory did not terminate within {samples} samples")]
    NonTerminatingTrajectory { samples: usize },

    #[error("Time step {time_step_s} s needs {required} samples, over the cap of {max_samples}")]
    SampleBudgetExceeded {
        time_step_s: f64,
        required: usize,
        max_samples: usize,
    },

    #[error("Simulation cancelled")]
    Cancelled,
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be a finite number"))
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be greater than zero"))
    }
}
