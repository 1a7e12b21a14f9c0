//! Error types for decay simulations.

use thiserror::Error;

/// Result type alias using DecayError.
pub type DecayResult<T> = Result<T, DecayError>;

#[derive(Debug, Error)]
pub enum DecayError {
    #[error("Invalid half-life: {0} (expected a positive, finite number of steps)")]
    InvalidHalfLife(f64),

    #[error("Invalid population size: {0}")]
    InvalidPopulation(usize),

    #[error("Invalid experiment: {0}")]
    InvalidExperiment(String),
}
