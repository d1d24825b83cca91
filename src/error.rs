//! Error types for scene assembly and tracing.

use thiserror::Error;

/// Errors raised while building or tracing a scene.
#[derive(Error, Debug)]
pub enum Error {
    /// Degenerate input, e.g. a zero vector or coincident polygon vertices.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required scene or render field was never set.
    #[error("missing resource: {0}")]
    MissingResource(&'static str),

    /// The rendered image could not be written.
    #[error("image output failed: {0}")]
    ImageOutput(#[from] image::ImageError),

    /// The worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for tracing operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::InvalidArgument(msg.into()))
}
