pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod seedream;
#[cfg(feature = "server")]
pub mod server;
pub mod service;

pub use config::{Config, GenerationConfig, UpstreamConfig};
pub use error::{ImageValidationError, Result, TryOnError};
pub use models::{
    ChangeClothesRequest, ChangeClothesResponse, GeneratedImage, ImageGenerationRequest,
    ImageGenerationResponse, ImagePayload, ImageSize, ResponseFormat,
};
pub use seedream::{ImageClient, ImageGenerator, UpstreamClient};
pub use service::{
    build_prompt, compress_image, validate_image, ChangeClothesService, Style,
};
