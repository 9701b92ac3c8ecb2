use crate::error::{Result, TryOnError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Splits `data:<mime>;base64,<payload>` and decodes the payload.
pub fn parse_data_url(data_url: &str) -> Result<DataUrl> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| TryOnError::ImageError("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| TryOnError::ImageError("data URL has no payload".into()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| TryOnError::ImageError("data URL is not base64 encoded".into()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| TryOnError::ImageError(format!("invalid base64 payload: {}", e)))?;

    Ok(DataUrl {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Wraps raw image bytes, sniffing the MIME type from the content.
pub fn encode_data_url(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes)
        .map_err(|e| TryOnError::ImageError(format!("unrecognized image data: {}", e)))?;
    Ok(to_data_url(format.to_mime_type(), bytes))
}

/// The provider hands back bare base64; the UI wants something it can put in `src`.
pub fn png_data_url(b64: &str) -> String {
    format!("data:{};base64,{}", ImageFormat::Png.to_mime_type(), b64)
}
