use crate::{
    error::Result,
    models::generation::{ImageGenerationRequest, ImageGenerationResponse},
};
use async_trait::async_trait;

/// Anything that can turn generation parameters into a provider response.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;
}
