use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TryOnError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Missing API key: set {0} in the environment")]
    MissingApiKey(&'static str),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("upstream request failed: {0}")]
    UpstreamStatus(u16),
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Image error: {0}")]
    ImageError(String),
}

/// Reasons an image reference is rejected before it reaches the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageValidationError {
    #[error("image data is empty")]
    Empty,
    #[error("invalid image format")]
    InvalidFormat,
    #[error("image size exceeds {max_mb}MB limit")]
    TooLarge { max_mb: usize },
}

impl From<ImageValidationError> for TryOnError {
    fn from(err: ImageValidationError) -> Self {
        TryOnError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TryOnError>;
