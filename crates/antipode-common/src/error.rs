//! Error types for antipode geometry and grid handling.

use thiserror::Error;

/// Result type alias using AntipodeError.
pub type AntipodeResult<T> = Result<T, AntipodeError>;

/// Primary error type for geometry and grid construction.
#[derive(Debug, Error)]
pub enum AntipodeError {
    #[error("Invalid coordinate: {axis} = {value} (expected {min} to {max})")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Grid shape mismatch: expected {expected} values ({width} x {height}), got {actual}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Empty coordinate axis: {0}")]
    EmptyAxis(&'static str),
}
