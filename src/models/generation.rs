use super::common::{ImageSize, ResponseFormat, SequentialGeneration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub images: Vec<String>,
    pub model_id: Option<String>,
    pub size: Option<ImageSize>,
    pub response_format: Option<ResponseFormat>,
    pub stream: Option<bool>,
    pub watermark: Option<bool>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_watermark(mut self, watermark: bool) -> Self {
        self.watermark = Some(watermark);
        self
    }
}

/// Wire body of `POST /api/v3/images/generations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedreamPayload {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub image: Vec<String>,
    pub size: ImageSize,
    pub sequential_image_generation: SequentialGeneration,
    pub stream: bool,
    pub response_format: ResponseFormat,
    pub watermark: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UpstreamError>,
}

impl ImageGenerationResponse {
    pub fn first(&self) -> Option<&GeneratedImage> {
        self.data.first()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// What a result item actually carries. Inline data wins when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePayload<'a> {
    Inline(&'a str),
    Remote(&'a str),
}

impl GeneratedImage {
    pub fn payload(&self) -> Option<ImagePayload<'_>> {
        match (self.b64_json.as_deref(), self.url.as_deref()) {
            (Some(b64), _) if !b64.is_empty() => Some(ImagePayload::Inline(b64)),
            (_, Some(url)) if !url.is_empty() => Some(ImagePayload::Remote(url)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UpstreamError {
    pub fn describe(&self) -> String {
        match (self.code.as_deref(), self.message.as_deref()) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (Some(code), None) => code.to_string(),
            (None, Some(message)) => message.to_string(),
            (None, None) => "provider returned an unspecified error".to_string(),
        }
    }
}
