use crate::{
    error::{Result, TryOnError},
    service::data_url::{parse_data_url, to_data_url},
};
use image::{codecs::jpeg::JpegEncoder, ImageFormat};

pub const DEFAULT_QUALITY: f32 = 0.8;

/// Re-encodes an image data URL as JPEG at `quality` in [0, 1].
///
/// 0 maps to the encoder's lowest setting (1).
///
/// Decoding and encoding run on the blocking pool. Every intermediate buffer
/// is owned by that task and released however it exits.
pub async fn compress_image(image_data: &str, quality: f32) -> Result<String> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(TryOnError::ImageError(format!(
            "quality must be in [0, 1], got {}",
            quality
        )));
    }

    let source = parse_data_url(image_data)?;
    let jpeg_quality = ((quality * 100.0).round() as u8).clamp(1, 100);
    let input_len = source.bytes.len();

    let encoded = tokio::task::spawn_blocking(move || reencode_jpeg(source.bytes, jpeg_quality))
        .await
        .map_err(|e| TryOnError::ImageError(format!("compression task failed: {}", e)))??;

    log::debug!(
        "Compressed image {} -> {} bytes at quality {}",
        input_len,
        encoded.len(),
        jpeg_quality
    );

    Ok(to_data_url(ImageFormat::Jpeg.to_mime_type(), &encoded))
}

fn reencode_jpeg(bytes: Vec<u8>, quality: u8) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| TryOnError::ImageError(format!("failed to load image: {}", e)))?;
    drop(bytes);

    // JPEG has no alpha channel
    let rgb = decoded.to_rgb8();
    drop(decoded);

    let mut output = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|e| TryOnError::ImageError(format!("image compression failed: {}", e)))?;
    }

    if output.is_empty() {
        return Err(TryOnError::ImageError(
            "image compression produced no output".into(),
        ));
    }

    Ok(output)
}
