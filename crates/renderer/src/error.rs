//! Error types for rendering.

use thiserror::Error;

use projection::ProjectionError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Invalid point: {0}")]
    InvalidPoint(#[from] antipode_common::AntipodeError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Coastline data error: {0}")]
    Coastline(String),

    #[error("Invalid figure configuration: {0}")]
    InvalidConfig(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
