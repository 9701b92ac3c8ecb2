pub mod compress;
pub mod data_url;
pub mod prompt;
pub mod validator;

use crate::{
    error::{Result, TryOnError},
    models::{
        ChangeClothesRequest, ChangeClothesResponse, ImageGenerationRequest, ImagePayload,
        ResponseFormat,
    },
    seedream::{ImageClient, ImageGenerator},
};

pub use compress::compress_image;
pub use prompt::{build_prompt, build_prompt_with_parts, Style};
pub use validator::validate_image;

/// Person + garment in, rendered try-on out.
///
/// Every failure is reported inside [`ChangeClothesResponse`]; nothing
/// propagates past [`ChangeClothesService::change_clothes`].
pub struct ChangeClothesService<G: ImageGenerator = ImageClient> {
    generator: G,
}

impl<G: ImageGenerator> ChangeClothesService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn change_clothes(&self, request: ChangeClothesRequest) -> ChangeClothesResponse {
        match self.try_change_clothes(request).await {
            Ok(result_image) => ChangeClothesResponse::ok(result_image),
            Err(e) => {
                log::error!("Change clothes failed: {}", e);
                ChangeClothesResponse::failure(failure_message(e))
            }
        }
    }

    async fn try_change_clothes(&self, request: ChangeClothesRequest) -> Result<String> {
        validate_image(&request.person_image)?;
        validate_image(&request.clothes_image)?;

        let prompt = build_prompt_with_parts(
            &request.style,
            request.parts.as_deref().unwrap_or_default(),
        );
        log::debug!("Style '{}' -> prompt: {}", request.style, prompt);

        let generation = ImageGenerationRequest::new(prompt)
            .with_image(request.person_image)
            .with_image(request.clothes_image)
            .with_response_format(ResponseFormat::B64Json);

        let response = self.generator.generate(generation).await?;

        let first = response.first().ok_or_else(|| {
            let reason = response
                .error
                .as_ref()
                .map(|e| e.describe())
                .unwrap_or_else(|| "no image was generated".to_string());
            TryOnError::ResponseError(reason)
        })?;

        match first.payload() {
            Some(ImagePayload::Inline(b64)) => Ok(data_url::png_data_url(b64)),
            Some(ImagePayload::Remote(url)) => Err(TryOnError::ResponseError(format!(
                "expected inline image data but received a URL ({})",
                url
            ))),
            None => Err(TryOnError::ResponseError(
                "generated image has no b64_json payload".into(),
            )),
        }
    }
}

impl ChangeClothesService<ImageClient> {
    pub fn from_config(config: crate::config::GenerationConfig) -> Result<Self> {
        Ok(Self::new(ImageClient::new(config)?))
    }
}

// Validation errors already read as user-facing text; keep them unprefixed.
fn failure_message(err: TryOnError) -> String {
    match err {
        TryOnError::ValidationError(msg) => msg,
        other => other.to_string(),
    }
}
