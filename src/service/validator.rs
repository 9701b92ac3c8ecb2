use crate::error::ImageValidationError;

pub const DATA_URL_IMAGE_PREFIX: &str = "data:image/";
pub const MAX_IMAGE_SIZE_MB: usize = 10;
pub const MAX_IMAGE_SIZE_BYTES: usize = MAX_IMAGE_SIZE_MB * 1024 * 1024;

/// Checks an image reference before it is sent anywhere.
///
/// Size is estimated from the base64 text as `len * 3 / 4`; the pixels are
/// never inspected.
pub fn validate_image(image_data: &str) -> Result<(), ImageValidationError> {
    if image_data.is_empty() {
        return Err(ImageValidationError::Empty);
    }

    if !image_data.starts_with(DATA_URL_IMAGE_PREFIX) {
        return Err(ImageValidationError::InvalidFormat);
    }

    // len * 3 / 4 > max without truncating the quotient
    if image_data.len().saturating_mul(3) > MAX_IMAGE_SIZE_BYTES * 4 {
        return Err(ImageValidationError::TooLarge {
            max_mb: MAX_IMAGE_SIZE_MB,
        });
    }

    Ok(())
}

/// Decoded size implied by the base64 length, rounded down.
pub fn estimated_size_bytes(image_data: &str) -> usize {
    image_data.len().saturating_mul(3) / 4
}
