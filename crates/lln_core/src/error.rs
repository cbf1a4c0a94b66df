//! Error types for the trial simulator.
//!
//! Inputs are normally constrained by the collecting UI (slider bounds,
//! fixed sample sizes), but the library validates them anyway since the
//! HTTP API accepts arbitrary JSON.

use thiserror::Error;

/// Errors raised while configuring or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Probability outside [0, 1] or NaN.
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Sample size of zero.
    #[error("Invalid sample size {0}: must be a positive integer")]
    InvalidSampleSize(u64),

    /// No sample sizes were configured.
    #[error("At least one sample size is required")]
    EmptySampleSizes,

    /// The binomial distribution rejected its parameters.
    #[error("Binomial distribution error: {0}")]
    Distribution(String),
}

impl From<rand_distr::BinomialError> for SimulationError {
    fn from(err: rand_distr::BinomialError) -> Self {
        Self::Distribution(err.to_string())
    }
}
