//! Error types for the renderer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or saving a plot.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested canvas size cannot be allocated.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image could not be encoded or written.
    #[error("failed to save image to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
