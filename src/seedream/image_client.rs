use crate::{
    config::GenerationConfig,
    error::{Result, TryOnError},
    models::{
        ImageGenerationRequest, ImageGenerationResponse, SeedreamPayload, SequentialGeneration,
    },
    seedream::{traits::ImageGenerator, PROXY_PATH},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const MAX_INPUT_IMAGES: usize = 2;

/// Calls the proxy endpoint; never talks to the provider directly.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl ImageClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| TryOnError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: GenerationConfig) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", config.proxy_url.trim_end_matches('/'), PROXY_PATH),
            model: config.model,
            timeout: config.timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_payload(&self, request: &ImageGenerationRequest) -> Result<SeedreamPayload> {
        if request.images.is_empty() || request.images.len() > MAX_INPUT_IMAGES {
            return Err(TryOnError::RequestError(format!(
                "expected 1 to {} reference images, got {}",
                MAX_INPUT_IMAGES,
                request.images.len()
            )));
        }

        Ok(SeedreamPayload {
            model: request
                .model_id
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            prompt: request.prompt.clone(),
            image: request.images.clone(),
            size: request.size.unwrap_or_default(),
            sequential_image_generation: SequentialGeneration::Disabled,
            stream: request.stream.unwrap_or(false),
            response_format: request.response_format.unwrap_or_default(),
            watermark: request.watermark.unwrap_or(false),
        })
    }

    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let payload = self.build_payload(&request)?;

        log::info!(
            "Generating image with model: {} ({} reference images)",
            payload.model,
            payload.image.len()
        );

        let call = async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&payload)
                .send()
                .await
                .map_err(|e| TryOnError::RequestError(format!("Generation request failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                log::error!("Generation endpoint returned {}: {}", status, body);
                return Err(TryOnError::UpstreamStatus(status.as_u16()));
            }

            response
                .json::<ImageGenerationResponse>()
                .await
                .map_err(|e| TryOnError::ResponseError(e.to_string()))
        };

        // Dropping the future on expiry aborts the in-flight request.
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                log::error!("Generation request aborted after {:?}", self.timeout);
                Err(TryOnError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        ImageClient::generate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSize, ResponseFormat};

    fn client() -> ImageClient {
        ImageClient::new(GenerationConfig::new().with_proxy_url("http://localhost:9999/")).unwrap()
    }

    #[test]
    fn endpoint_joins_proxy_path() {
        assert_eq!(client().endpoint(), "http://localhost:9999/api/seedream");
    }

    #[test]
    fn payload_applies_defaults() {
        let request = ImageGenerationRequest::new("dress her up")
            .with_image("data:image/png;base64,AA")
            .with_image("data:image/png;base64,BB");
        let payload = client().build_payload(&request).unwrap();

        assert_eq!(payload.model, crate::config::DEFAULT_MODEL);
        assert_eq!(payload.size, ImageSize::TwoK);
        assert_eq!(payload.response_format, ResponseFormat::B64Json);
        assert_eq!(payload.sequential_image_generation, SequentialGeneration::Disabled);
        assert!(!payload.stream);
        assert!(!payload.watermark);
        assert_eq!(payload.image.len(), 2);
    }

    #[test]
    fn payload_keeps_explicit_overrides() {
        let mut request = ImageGenerationRequest::new("p")
            .with_image("data:image/png;base64,AA")
            .with_size(ImageSize::FourK)
            .with_response_format(ResponseFormat::Url)
            .with_watermark(true);
        request.model_id = Some("custom-model".into());

        let payload = client().build_payload(&request).unwrap();
        assert_eq!(payload.model, "custom-model");
        assert_eq!(payload.size, ImageSize::FourK);
        assert_eq!(payload.response_format, ResponseFormat::Url);
        assert!(payload.watermark);
    }

    #[test]
    fn payload_rejects_bad_image_counts() {
        let none = ImageGenerationRequest::new("p");
        assert!(matches!(
            client().build_payload(&none),
            Err(TryOnError::RequestError(_))
        ));

        let three = ImageGenerationRequest::new("p")
            .with_image("a")
            .with_image("b")
            .with_image("c");
        assert!(client().build_payload(&three).is_err());
    }
}
